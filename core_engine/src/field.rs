use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::overlay::{Rect, Scroll};
use crate::protocol::{EngineMessage, TextProperty};

const GENERATED_ID_PREFIX: &str = "gl-target-";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Textarea,
    TextInput,
    ContentEditable,
    Other,
}

impl FieldKind {
    pub fn is_monitored(self) -> bool {
        !matches!(self, FieldKind::Other)
    }

    /// Form controls take text through `value`; editable regions through their text content.
    pub fn text_property(self) -> TextProperty {
        match self {
            FieldKind::Textarea | FieldKind::TextInput => TextProperty::Value,
            FieldKind::ContentEditable | FieldKind::Other => TextProperty::TextContent,
        }
    }
}

/// A field as reported by the host at the moment of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub handle: u64,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub scroll: Scroll,
}

/// A snapshot whose identifier has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredField {
    pub id: String,
    pub handle: u64,
    pub kind: FieldKind,
    pub text: String,
    pub rect: Rect,
    pub scroll: Scroll,
}

/// Hands out `gl-target-<n>` ids to fields the host reports without one.
#[derive(Debug, Default)]
pub struct FieldIds {
    assigned: HashMap<u64, String>,
    next: u64,
}

impl FieldIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the snapshot's id. The message is returned only the first time
    /// an id is generated for a handle, so the host can stamp it on the element.
    pub fn resolve(&mut self, snapshot: FieldSnapshot) -> (MonitoredField, Option<EngineMessage>) {
        let reported = snapshot
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let (id, assigned) = match reported {
            Some(id) => (id, None),
            None => match self.assigned.get(&snapshot.handle) {
                Some(existing) => (existing.clone(), None),
                None => {
                    self.next += 1;
                    let id = format!("{GENERATED_ID_PREFIX}{}", self.next);
                    self.assigned.insert(snapshot.handle, id.clone());
                    let message = EngineMessage::AssignFieldId {
                        handle: snapshot.handle,
                        field_id: id.clone(),
                    };
                    (id, Some(message))
                }
            },
        };

        let field = MonitoredField {
            id,
            handle: snapshot.handle,
            kind: snapshot.kind,
            text: snapshot.text,
            rect: snapshot.rect,
            scroll: snapshot.scroll,
        };
        (field, assigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(handle: u64, id: Option<&str>) -> FieldSnapshot {
        FieldSnapshot {
            handle,
            id: id.map(str::to_string),
            kind: FieldKind::Textarea,
            text: "some text".to_string(),
            rect: Rect::default(),
            scroll: Scroll::default(),
        }
    }

    #[test]
    fn keeps_host_id() {
        let mut ids = FieldIds::new();
        let (field, assigned) = ids.resolve(snapshot(1, Some("comment")));
        assert_eq!(field.id, "comment");
        assert!(assigned.is_none());
    }

    #[test]
    fn assigns_once_per_handle() {
        let mut ids = FieldIds::new();
        let (first, assigned) = ids.resolve(snapshot(4, None));
        assert_eq!(first.id, "gl-target-1");
        assert_eq!(
            assigned,
            Some(EngineMessage::AssignFieldId {
                handle: 4,
                field_id: "gl-target-1".to_string()
            })
        );

        let (again, assigned) = ids.resolve(snapshot(4, Some("  ")));
        assert_eq!(again.id, "gl-target-1");
        assert!(assigned.is_none());

        let (other, _) = ids.resolve(snapshot(9, None));
        assert_eq!(other.id, "gl-target-2");
    }

    #[test]
    fn text_property_follows_kind() {
        assert_eq!(FieldKind::TextInput.text_property(), TextProperty::Value);
        assert_eq!(FieldKind::Textarea.text_property(), TextProperty::Value);
        assert_eq!(
            FieldKind::ContentEditable.text_property(),
            TextProperty::TextContent
        );
        assert!(!FieldKind::Other.is_monitored());
    }
}
