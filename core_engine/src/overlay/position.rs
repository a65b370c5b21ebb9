use serde::{Deserialize, Serialize};

pub const DEFAULT_OFFSET_PX: f64 = 5.0;

/// Viewport-relative bounding box, as reported by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Scroll {
    pub x: f64,
    pub y: f64,
}

/// Document-relative placement of an element's top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    Field,
    Indicator,
}

/// Places the overlay just under `anchor`, left-aligned with it.
pub fn below(anchor: Rect, scroll: Scroll, offset: f64) -> Position {
    Position {
        top: scroll.y + anchor.bottom() + offset,
        left: scroll.x + anchor.left,
    }
}
