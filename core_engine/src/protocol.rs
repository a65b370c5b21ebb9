use serde::{Deserialize, Serialize};

use crate::field::FieldSnapshot;
use crate::overlay::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    KeyUp {
        field: FieldSnapshot,
    },
    FocusOut {
        field: FieldSnapshot,
    },
    OverlayHover {
        field_id: String,
        hovered: bool,
    },
    OverlayClick {
        field_id: String,
    },
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    Ping,
    Unload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineMessage {
    AssignFieldId {
        handle: u64,
        field_id: String,
    },
    ShowOverlay {
        field_id: String,
        markup: String,
        position: Position,
    },
    HideOverlay {
        field_id: String,
    },
    ReplaceFieldText {
        field_id: String,
        property: TextProperty,
        text: String,
    },
    CorrectionMade {
        field_id: String,
        total: u64,
    },
    ShowIndicator {
        position: Position,
    },
    MoveIndicator {
        position: Position,
    },
    Pong,
    Error {
        code: ErrorCode,
        message: String,
    },
}

/// Which property of the host element receives accepted text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextProperty {
    Value,
    TextContent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
}
