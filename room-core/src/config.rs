//! Tunables for every engine component.
//!
//! All sections use `#[serde(default)]`, so a config file only needs the keys
//! it wants to change. Durations are milliseconds.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::types::ScrollBehavior;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How scroll progress maps onto the video timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MappingPolicy {
    #[default]
    Linear,
    /// Forward over the first half of the scroll, backwards over the second.
    PingPong,
}

impl MappingPolicy {
    pub fn target_time(self, progress: f64, duration: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => p * duration,
            Self::PingPong => {
                if p <= 0.5 {
                    2.0 * p * duration
                } else {
                    (1.0 - 2.0 * (p - 0.5)) * duration
                }
            }
        }
    }
}

/// Whether scrolling down advances (`Forward`) or rewinds (`Inverted`) progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollDirection {
    #[default]
    Forward,
    Inverted,
}

impl ScrollDirection {
    /// Converts between raw scroll fraction and progress. Self-inverse.
    pub fn apply(self, fraction: f64) -> f64 {
        match self {
            Self::Forward => fraction,
            Self::Inverted => 1.0 - fraction,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SamplerConfig {
    /// Smallest progress change that is re-emitted.
    pub min_delta: f64,
    pub direction: ScrollDirection,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { min_delta: 0.01, direction: ScrollDirection::Forward }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaConfig {
    pub policy: MappingPolicy,
    /// Seeks closer than this to the current time are skipped.
    pub seek_threshold_secs: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { policy: MappingPolicy::Linear, seek_threshold_secs: 0.1 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxConfig {
    pub zoom: f64,
    /// Horizontal offset (percent) at the container edge.
    pub max_offset_x: f64,
    /// Vertical offset (percent) at the container edge.
    pub max_offset_y: f64,
    pub follow_ms: u64,
    pub settle_ms: u64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            zoom: 1.1,
            max_offset_x: 10.0,
            max_offset_y: 15.0,
            follow_ms: 2_000,
            settle_ms: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub enter_ms: u64,
    pub exit_ms: u64,
    /// Dragged hotspots stay within `[drag_min, drag_max]` percent.
    pub drag_min: f64,
    pub drag_max: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { enter_ms: 600, exit_ms: 400, drag_min: 5.0, drag_max: 95.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    /// Approximate length of the smooth scroll; the lock is held this long.
    pub lock_ms: u64,
    /// Delay before the destination hotspot appears.
    pub reveal_delay_ms: u64,
    pub behavior: ScrollBehavior,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { lock_ms: 1_200, reveal_delay_ms: 300, behavior: ScrollBehavior::Smooth }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdleConfig {
    pub show_after_ms: u64,
    pub hide_after_ms: u64,
    pub exit_ms: u64,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self { show_after_ms: 10_000, hide_after_ms: 3_000, exit_ms: 400 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstructionsConfig {
    /// Open the guide once on its own, `auto_show_after_ms` after startup.
    pub auto_show: bool,
    pub auto_show_after_ms: u64,
}

impl Default for InstructionsConfig {
    fn default() -> Self {
        Self { auto_show: false, auto_show_after_ms: 1_000 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomConfig {
    pub sampler: SamplerConfig,
    pub media: MediaConfig,
    pub parallax: ParallaxConfig,
    pub overlay: OverlayConfig,
    pub navigation: NavigationConfig,
    pub idle: IdleConfig,
    pub instructions: InstructionsConfig,
}

impl RoomConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.sampler.min_delta) {
            return Err(ConfigError::Invalid(format!(
                "sampler.minDelta must be in [0, 1), got {}",
                self.sampler.min_delta
            )));
        }
        if !(self.media.seek_threshold_secs >= 0.0) {
            return Err(ConfigError::Invalid("media.seekThresholdSecs must be >= 0".into()));
        }
        if !(self.parallax.zoom > 0.0) {
            return Err(ConfigError::Invalid("parallax.zoom must be > 0".into()));
        }
        let o = &self.overlay;
        if !(o.drag_min >= 0.0 && o.drag_min < o.drag_max && o.drag_max <= 100.0) {
            return Err(ConfigError::Invalid(format!(
                "overlay drag bounds must satisfy 0 <= min < max <= 100, got {}..{}",
                o.drag_min, o.drag_max
            )));
        }
        if self.navigation.lock_ms == 0 {
            return Err(ConfigError::Invalid("navigation.lockMs must be > 0".into()));
        }
        Ok(())
    }
}
