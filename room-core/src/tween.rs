//! Time-based interpolation with retargeting.

/// Values that can be interpolated.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out.
    Power2Out,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self { from, to, start_ms, duration_ms, easing }
    }

    /// A tween that is already at rest on `value`.
    pub fn settled(value: T) -> Self {
        Self::new(value, value, 0, 0, Easing::Linear)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> T {
        if self.is_done(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = elapsed as f64 / self.duration_ms as f64;
        self.from.lerp(self.to, self.easing.apply(t))
    }

    /// Restarts from the value currently sampled at `now_ms`.
    pub fn retarget(&mut self, now_ms: u64, to: T, duration_ms: u64, easing: Easing) {
        let current = self.sample(now_ms);
        *self = Self::new(current, to, now_ms, duration_ms, easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for e in [Easing::Linear, Easing::Power2Out] {
            assert!(e.apply(0.0).abs() < 1e-12, "{e:?}");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?}");
        }
        assert_eq!(Easing::Power2Out.apply(0.5), 0.75);
        assert_eq!(Easing::Power2Out.apply(2.0), 1.0);
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut tw = Tween::new(0.0, 100.0, 0, 1000, Easing::Linear);
        assert_eq!(tw.sample(250), 25.0);
        tw.retarget(500, 0.0, 500, Easing::Linear);
        assert_eq!(tw.sample(500), 50.0);
        assert_eq!(tw.sample(750), 25.0);
        assert!(tw.is_done(1000));
        assert_eq!(tw.sample(5000), 0.0);
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let tw = Tween::new(1.0, 2.0, 10, 0, Easing::Power2Out);
        assert!(tw.is_done(10));
        assert_eq!(tw.sample(10), 2.0);
        assert_eq!(Tween::settled(3.0).sample(0), 3.0);
    }
}
