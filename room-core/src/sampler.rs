//! Scroll offset → progress, with churn suppression.

use log::debug;
use crate::config::{SamplerConfig, ScrollDirection};
use crate::types::ScrollBehavior;

/// The scrollable room container.
pub trait ScrollProvider {
    fn content_height(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn offset(&self) -> f64;
    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior);

    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.offset(),
            content_height: self.content_height(),
            viewport_height: self.viewport_height(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn scrollable_distance(&self) -> f64 {
        self.content_height - self.viewport_height
    }

    /// `clamp(offset / scrollable, 0, 1)`; 0 when nothing can scroll.
    pub fn fraction(&self) -> f64 {
        let distance = self.scrollable_distance();
        if !(distance > 0.0) {
            return 0.0;
        }
        (self.offset / distance).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct ScrollProgressSampler {
    min_delta: f64,
    direction: ScrollDirection,
    last: Option<f64>,
}

impl ScrollProgressSampler {
    pub fn new(config: &SamplerConfig) -> Self {
        Self { min_delta: config.min_delta, direction: config.direction, last: None }
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Returns the new progress when it should be propagated.
    ///
    /// Changes smaller than `min_delta` are dropped, except that landing
    /// exactly on either end is always reported so consumers converge.
    pub fn sample(&mut self, metrics: ScrollMetrics) -> Option<f64> {
        let progress = self.direction.apply(metrics.fraction());
        let emit = match self.last {
            None => true,
            Some(last) if last == progress => false,
            Some(last) => {
                (progress - last).abs() >= self.min_delta || progress == 0.0 || progress == 1.0
            }
        };
        if !emit {
            return None;
        }
        debug!("sampler: progress {:.4} (offset {:.1})", progress, metrics.offset);
        self.last = Some(progress);
        Some(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: f64) -> ScrollMetrics {
        ScrollMetrics { offset, content_height: 5000.0, viewport_height: 1000.0 }
    }

    fn sampler(direction: ScrollDirection) -> ScrollProgressSampler {
        ScrollProgressSampler::new(&SamplerConfig { min_delta: 0.01, direction })
    }

    #[test]
    fn test_fraction_clamps_and_handles_short_content() {
        assert_eq!(at(2000.0).fraction(), 0.5);
        assert_eq!(at(-50.0).fraction(), 0.0);
        assert_eq!(at(9000.0).fraction(), 1.0);
        let short = ScrollMetrics { offset: 10.0, content_height: 800.0, viewport_height: 1000.0 };
        assert_eq!(short.fraction(), 0.0);
    }

    #[test]
    fn test_small_changes_are_suppressed() {
        let mut s = sampler(ScrollDirection::Forward);
        assert_eq!(s.sample(at(400.0)), Some(0.1));
        // 0.00025 per px; 20 px = 0.005
        assert_eq!(s.sample(at(420.0)), None);
        assert_eq!(s.sample(at(400.0)), None);
        assert_eq!(s.sample(at(480.0)), Some(0.12));
    }

    #[test]
    fn test_ends_always_emit() {
        let mut s = sampler(ScrollDirection::Forward);
        assert_eq!(s.sample(at(3990.0)), Some(0.9975));
        assert_eq!(s.sample(at(4000.0)), Some(1.0));
        assert_eq!(s.sample(at(4100.0)), None);
        s.reset();
        assert_eq!(s.sample(at(4000.0)), Some(1.0));
    }

    #[test]
    fn test_inverted_direction() {
        let mut s = sampler(ScrollDirection::Inverted);
        assert_eq!(s.sample(at(0.0)), Some(1.0));
        assert_eq!(s.sample(at(1000.0)), Some(0.75));
    }
}
