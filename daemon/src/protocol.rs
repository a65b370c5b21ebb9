use serde::{Deserialize, Serialize};

/// Body of `POST /correct` on the grammar backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectResponse {
    pub corrected_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_backend_reply() {
        let raw = r#"{"original_text":"he go home","corrected_text":"He goes home."}"#;
        let reply: CorrectResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.corrected_text, "He goes home.");
    }

    #[test]
    fn missing_correction_is_rejected() {
        assert!(serde_json::from_str::<CorrectResponse>(r#"{"error":"Model is not loaded."}"#).is_err());
    }
}
