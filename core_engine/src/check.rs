use crate::util::trimmed_char_len;

pub const DEFAULT_MIN_CHARS: usize = 10;

/// Texts shorter than `min_chars` after trimming are not worth a round trip.
pub fn needs_check(text: &str, min_chars: usize) -> bool {
    trimmed_char_len(text) >= min_chars
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionResult {
    pub original: String,
    pub corrected: String,
}

impl CorrectionResult {
    pub fn new(original: impl Into<String>, corrected: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            corrected: corrected.into(),
        }
    }

    pub fn is_material(&self) -> bool {
        self.original.trim() != self.corrected.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_skipped() {
        assert!(!needs_check("", DEFAULT_MIN_CHARS));
        assert!(!needs_check("   short    ", DEFAULT_MIN_CHARS));
        assert!(!needs_check("123456789", DEFAULT_MIN_CHARS));
        assert!(needs_check("1234567890", DEFAULT_MIN_CHARS));
        assert!(needs_check("  this one is long enough  ", DEFAULT_MIN_CHARS));
    }

    #[test]
    fn whitespace_only_changes_are_not_material() {
        let result = CorrectionResult::new("  He go home.\n", "He go home.");
        assert!(!result.is_material());
        let result = CorrectionResult::new("He go home.", "He goes home.");
        assert!(result.is_material());
    }
}
