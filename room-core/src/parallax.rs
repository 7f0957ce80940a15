//! Pointer-driven zoom and pan of the video. Purely visual: nothing here reads
//! or writes scroll or media state.

use crate::config::ParallaxConfig;
use crate::tween::{Easing, Lerp, Tween};
use crate::types::{Point2, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxTransform {
    pub scale: f64,
    /// Percent of the container width.
    pub offset_x: f64,
    /// Percent of the container height.
    pub offset_y: f64,
}

impl ParallaxTransform {
    pub const NEUTRAL: Self = Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 };
}

impl Default for ParallaxTransform {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Lerp for ParallaxTransform {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            scale: self.scale.lerp(to.scale, t),
            offset_x: self.offset_x.lerp(to.offset_x, t),
            offset_y: self.offset_y.lerp(to.offset_y, t),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PointerParallaxController {
    config: ParallaxConfig,
    tween: Tween<ParallaxTransform>,
}

impl PointerParallaxController {
    pub fn new(config: &ParallaxConfig) -> Self {
        Self {
            config: config.clone(),
            tween: Tween::settled(ParallaxTransform::NEUTRAL),
        }
    }

    /// Transform for a normalized pointer position.
    pub fn target_for(&self, nx: f64, ny: f64) -> ParallaxTransform {
        ParallaxTransform {
            scale: self.config.zoom,
            offset_x: (0.5 - nx) * self.config.max_offset_x,
            offset_y: (0.5 - ny) * self.config.max_offset_y,
        }
    }

    /// Returns the new target, or `None` when the pointer is outside `bounds`.
    pub fn pointer_move(&mut self, pointer: Point2, bounds: Rect, now_ms: u64) -> Option<ParallaxTransform> {
        let (nx, ny) = bounds.normalize(pointer)?;
        let target = self.target_for(nx, ny);
        self.tween.retarget(now_ms, target, self.config.follow_ms, Easing::Power2Out);
        Some(target)
    }

    pub fn pointer_leave(&mut self, now_ms: u64) {
        self.tween
            .retarget(now_ms, ParallaxTransform::NEUTRAL, self.config.settle_ms, Easing::Power2Out);
    }

    pub fn sample(&self, now_ms: u64) -> ParallaxTransform {
        self.tween.sample(now_ms)
    }

    /// True once the transform stops changing until the next pointer input.
    pub fn is_settled(&self, now_ms: u64) -> bool {
        self.tween.is_done(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 500.0)
    }

    #[test]
    fn test_center_is_zoom_only() {
        let mut px = PointerParallaxController::new(&ParallaxConfig::default());
        let t = px.pointer_move(Point2::new(500.0, 250.0), bounds(), 0).unwrap();
        assert_eq!(t, ParallaxTransform { scale: 1.1, offset_x: 0.0, offset_y: 0.0 });
    }

    #[test]
    fn test_offset_grows_toward_edges() {
        let mut px = PointerParallaxController::new(&ParallaxConfig::default());
        let t = px.pointer_move(Point2::new(0.0, 500.0), bounds(), 0).unwrap();
        assert!((t.offset_x - 5.0).abs() < 1e-9);
        assert!((t.offset_y + 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_outside_pointer_is_ignored() {
        let mut px = PointerParallaxController::new(&ParallaxConfig::default());
        assert!(px.pointer_move(Point2::new(1200.0, 10.0), bounds(), 0).is_none());
        assert_eq!(px.sample(5000), ParallaxTransform::NEUTRAL);
    }

    #[test]
    fn test_leave_decays_to_neutral() {
        let cfg = ParallaxConfig::default();
        let mut px = PointerParallaxController::new(&cfg);
        px.pointer_move(Point2::new(100.0, 100.0), bounds(), 0);
        let mid = px.sample(1000);
        assert!(mid.scale > 1.0 && mid.scale < 1.1);

        px.pointer_leave(1000);
        assert_eq!(px.sample(1000), mid);
        assert!(!px.is_settled(1000 + cfg.settle_ms - 1));
        assert_eq!(px.sample(1000 + cfg.settle_ms), ParallaxTransform::NEUTRAL);
    }
}
