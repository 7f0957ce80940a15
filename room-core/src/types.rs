use serde::{Deserialize, Serialize};

/// Hotspot position as percentages of the room container.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn clamped(self, min: f64, max: f64) -> Self {
        Self {
            x: self.x.clamp(min, max),
            y: self.y.clamp(min, max),
        }
    }
}

/// Inclusive progress interval over which a hotspot is shown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressRange {
    pub start: f64,
    pub end: f64,
}

impl ProgressRange {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress <= self.end
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// `0 <= start < end <= 1`, rejecting NaN.
    pub fn is_valid(&self) -> bool {
        self.start >= 0.0 && self.end <= 1.0 && self.start < self.end
    }
}

/// A point in CSS pixels (client coordinates).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn contains(&self, p: Point2) -> bool {
        let x = p.x - self.left;
        let y = p.y - self.top;
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }

    /// Pointer position as `(nx, ny)` in `[0,1]²`, or `None` when outside
    /// (or when the rect is degenerate).
    pub fn normalize(&self, p: Point2) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 || !self.contains(p) {
            return None;
        }
        Some(((p.x - self.left) / self.width, (p.y - self.top) / self.height))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}
