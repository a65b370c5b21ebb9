use crate::overlay::{Position, Rect};

/// Fixed-position marker the user can drag around the viewport.
#[derive(Debug, Clone)]
pub struct Indicator {
    rect: Rect,
    grab: Option<(f64, f64)>,
}

impl Indicator {
    pub fn new(rect: Rect) -> Self {
        Self { rect, grab: None }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn position(&self) -> Position {
        Position {
            top: self.rect.top,
            left: self.rect.left,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Starts a drag if the pointer is over the marker.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        if !self.rect.contains(x, y) {
            return false;
        }
        self.grab = Some((x - self.rect.left, y - self.rect.top));
        true
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Position> {
        let (dx, dy) = self.grab?;
        self.rect.left = x - dx;
        self.rect.top = y - dy;
        Some(self.position())
    }

    pub fn pointer_up(&mut self) {
        self.grab = None;
    }
}
