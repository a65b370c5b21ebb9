pub mod check;
pub mod diff;
pub mod drag;
pub mod field;
pub mod overlay;
pub mod protocol;
mod util;

pub use check::{needs_check, CorrectionResult};
pub use diff::render_diff;
pub use drag::Indicator;
pub use field::{FieldIds, FieldKind, FieldSnapshot, MonitoredField};
pub use overlay::{Anchor, Association, OverlayRegistry, Position, Rect, Scroll};
pub use protocol::{ClientMessage, EngineMessage, ErrorCode, TextProperty};
