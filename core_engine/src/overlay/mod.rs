mod position;
mod registry;

pub use position::{below, Anchor, Position, Rect, Scroll, DEFAULT_OFFSET_PX};
pub use registry::{Association, OverlayRegistry, Suggestion};
