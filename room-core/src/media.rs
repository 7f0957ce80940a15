//! Progress → video playback position.

use log::debug;
use crate::config::{MappingPolicy, MediaConfig};

/// The scrubbed video. Only a minimal seek contract is needed.
pub trait MediaResource {
    /// `None` (or a non-positive value) while metadata is still loading.
    fn duration(&self) -> Option<f64>;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
}

fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

#[derive(Clone, Debug)]
pub struct MediaPositionController {
    policy: MappingPolicy,
    threshold: f64,
    waiting_for_duration: bool,
}

impl MediaPositionController {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            policy: config.policy,
            threshold: config.seek_threshold_secs,
            waiting_for_duration: false,
        }
    }

    pub fn policy(&self) -> MappingPolicy {
        self.policy
    }

    /// Seeks `media` to the time for `progress`. Returns the applied time, or
    /// `None` when the seek was skipped (unknown duration, within hysteresis).
    pub fn set_progress<M: MediaResource + ?Sized>(&mut self, progress: f64, media: &mut M) -> Option<f64> {
        let Some(duration) = known_duration(media.duration()) else {
            if !self.waiting_for_duration {
                debug!("media: duration unknown, deferring seeks");
                self.waiting_for_duration = true;
            }
            return None;
        };
        if self.waiting_for_duration {
            debug!("media: duration resolved ({duration:.2}s)");
            self.waiting_for_duration = false;
        }

        let target = self.policy.target_time(progress, duration);
        if (media.current_time() - target).abs() <= self.threshold {
            return None;
        }
        media.set_current_time(target);
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeVideo {
        duration: Option<f64>,
        time: f64,
        seeks: usize,
    }

    impl MediaResource for FakeVideo {
        fn duration(&self) -> Option<f64> {
            self.duration
        }
        fn current_time(&self) -> f64 {
            self.time
        }
        fn set_current_time(&mut self, secs: f64) {
            self.time = secs;
            self.seeks += 1;
        }
    }

    fn controller(policy: MappingPolicy) -> MediaPositionController {
        MediaPositionController::new(&MediaConfig { policy, seek_threshold_secs: 0.1 })
    }

    #[test]
    fn test_linear_seek() {
        let mut video = FakeVideo { duration: Some(20.0), ..Default::default() };
        let mut ctl = controller(MappingPolicy::Linear);
        assert_eq!(ctl.set_progress(0.5, &mut video), Some(10.0));
        assert_eq!(video.time, 10.0);
    }

    #[test]
    fn test_ping_pong_seek() {
        let mut video = FakeVideo { duration: Some(120.0), ..Default::default() };
        let mut ctl = controller(MappingPolicy::PingPong);
        assert_eq!(ctl.set_progress(0.75, &mut video), Some(60.0));
        // forward phase lands on the same frame: within hysteresis
        assert_eq!(ctl.set_progress(0.25, &mut video), None);
        assert_eq!(video.time, 60.0);
    }

    #[test]
    fn test_hysteresis_suppresses_tiny_seeks() {
        let mut video = FakeVideo { duration: Some(10.0), ..Default::default() };
        let mut ctl = controller(MappingPolicy::Linear);
        assert!(ctl.set_progress(0.5, &mut video).is_some());
        assert_eq!(ctl.set_progress(0.505, &mut video), None); // 0.05s away
        assert_eq!(ctl.set_progress(0.75, &mut video), Some(7.5));
        assert_eq!(video.seeks, 2);
    }

    #[test]
    fn test_unknown_duration_is_retried() {
        let mut video = FakeVideo::default();
        let mut ctl = controller(MappingPolicy::Linear);
        assert_eq!(ctl.set_progress(0.4, &mut video), None);
        video.duration = Some(0.0);
        assert_eq!(ctl.set_progress(0.4, &mut video), None);
        video.duration = Some(f64::NAN);
        assert_eq!(ctl.set_progress(0.4, &mut video), None);
        assert_eq!(video.seeks, 0);

        video.duration = Some(50.0);
        assert_eq!(ctl.set_progress(0.5, &mut video), Some(25.0));
    }
}
