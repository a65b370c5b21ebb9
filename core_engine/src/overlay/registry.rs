use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::check::CorrectionResult;
use crate::diff::render_diff;
use crate::field::{FieldKind, MonitoredField};
use crate::overlay::Position;
use crate::protocol::EngineMessage;

/// How overlays are keyed: one for the whole page, or one per field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    #[default]
    Global,
    PerField,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum AssociationKey {
    Page,
    Field(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub field_id: String,
    pub kind: FieldKind,
    pub corrected: String,
    pub markup: String,
    pub position: Position,
    hovered: bool,
}

impl Suggestion {
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

/// Visible overlays, at most one per association key.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    association: Association,
    visible: HashMap<AssociationKey, Suggestion>,
    accepted: u64,
}

impl OverlayRegistry {
    pub fn new(association: Association) -> Self {
        Self {
            association,
            visible: HashMap::new(),
            accepted: 0,
        }
    }

    fn key(&self, field_id: &str) -> AssociationKey {
        match self.association {
            Association::Global => AssociationKey::Page,
            Association::PerField => AssociationKey::Field(field_id.to_string()),
        }
    }

    /// Replaces whatever overlay holds the field's key with a new one.
    pub fn show(
        &mut self,
        field: &MonitoredField,
        result: &CorrectionResult,
        position: Position,
    ) -> Vec<EngineMessage> {
        let mut messages: Vec<EngineMessage> = self.remove(&field.id).into_iter().collect();

        let suggestion = Suggestion {
            field_id: field.id.clone(),
            kind: field.kind,
            corrected: result.corrected.clone(),
            markup: render_diff(&result.original, &result.corrected),
            position,
            hovered: false,
        };
        messages.push(EngineMessage::ShowOverlay {
            field_id: suggestion.field_id.clone(),
            markup: suggestion.markup.clone(),
            position,
        });
        let key = self.key(&field.id);
        self.visible.insert(key, suggestion);
        messages
    }

    /// Removes the overlay occupying the field's key. Under the global policy
    /// that may be another field's overlay.
    pub fn remove(&mut self, field_id: &str) -> Option<EngineMessage> {
        let key = self.key(field_id);
        self.visible
            .remove(&key)
            .map(|suggestion| EngineMessage::HideOverlay {
                field_id: suggestion.field_id,
            })
    }

    pub fn get(&self, field_id: &str) -> Option<&Suggestion> {
        self.visible
            .get(&self.key(field_id))
            .filter(|suggestion| suggestion.field_id == field_id)
    }

    fn take_owned(&mut self, field_id: &str) -> Option<Suggestion> {
        self.get(field_id)?;
        let key = self.key(field_id);
        self.visible.remove(&key)
    }

    pub fn set_hovered(&mut self, field_id: &str, hovered: bool) -> bool {
        let key = self.key(field_id);
        match self.visible.get_mut(&key) {
            Some(suggestion) if suggestion.field_id == field_id => {
                suggestion.hovered = hovered;
                true
            }
            _ => false,
        }
    }

    pub fn accept(&mut self, field_id: &str) -> Vec<EngineMessage> {
        let Some(suggestion) = self.take_owned(field_id) else {
            return Vec::new();
        };
        self.accepted += 1;
        vec![
            EngineMessage::ReplaceFieldText {
                field_id: suggestion.field_id.clone(),
                property: suggestion.kind.text_property(),
                text: suggestion.corrected,
            },
            EngineMessage::HideOverlay {
                field_id: suggestion.field_id.clone(),
            },
            EngineMessage::CorrectionMade {
                field_id: suggestion.field_id,
                total: self.accepted,
            },
        ]
    }

    /// Focus-loss dismissal; an overlay under the pointer survives.
    pub fn dismiss(&mut self, field_id: &str) -> Option<EngineMessage> {
        if self.get(field_id)?.hovered {
            return None;
        }
        self.take_owned(field_id)
            .map(|suggestion| EngineMessage::HideOverlay {
                field_id: suggestion.field_id,
            })
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }
}
