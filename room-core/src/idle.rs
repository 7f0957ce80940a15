//! "Scroll to explore" hint shown after a stretch of inactivity.
//!
//! One state object, one timer:
//!
//! ```text
//! Waiting --show_after--> Visible --hide_after--> Hiding --exit--> Waiting
//! ```
//!
//! [`IdleHintScheduler::reset`] and [`IdleHintScheduler::cancel`] are the only
//! external mutators besides the clock.

use log::debug;
use crate::config::IdleConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdlePhase {
    Waiting,
    Visible,
    Hiding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdleTimerState {
    pub phase: IdlePhase,
    pub last_activity_at: u64,
}

/// Conditions under which the hint must not appear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdleEligibility {
    pub mobile: bool,
    pub navigating: bool,
    pub modal_open: bool,
}

impl IdleEligibility {
    pub fn is_eligible(&self) -> bool {
        !(self.mobile || self.navigating || self.modal_open)
    }
}

/// What the renderer should do with the hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintChange {
    Show,
    /// Start the exit transition.
    Hide,
    /// Remove immediately / exit finished.
    Hidden,
}

#[derive(Clone, Debug)]
pub struct IdleHintScheduler {
    config: IdleConfig,
    state: IdleTimerState,
    deadline_ms: Option<u64>,
}

impl IdleHintScheduler {
    pub fn new(config: &IdleConfig, now_ms: u64) -> Self {
        Self {
            config: config.clone(),
            state: IdleTimerState { phase: IdlePhase::Waiting, last_activity_at: now_ms },
            deadline_ms: Some(now_ms + config.show_after_ms),
        }
    }

    pub fn state(&self) -> IdleTimerState {
        self.state
    }

    pub fn phase(&self) -> IdlePhase {
        self.state.phase
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Activity: drop any visible hint and restart the wait from zero.
    pub fn reset(&mut self, now_ms: u64) -> Option<HintChange> {
        let was = self.state.phase;
        self.state = IdleTimerState { phase: IdlePhase::Waiting, last_activity_at: now_ms };
        self.deadline_ms = Some(now_ms + self.config.show_after_ms);
        match was {
            IdlePhase::Waiting => None,
            IdlePhase::Visible | IdlePhase::Hiding => {
                debug!("idle: hint dismissed by activity");
                Some(HintChange::Hidden)
            }
        }
    }

    /// Stops the cycle until the next [`Self::reset`].
    pub fn cancel(&mut self) -> Option<HintChange> {
        self.deadline_ms = None;
        let was = std::mem::replace(&mut self.state.phase, IdlePhase::Waiting);
        (was != IdlePhase::Waiting).then_some(HintChange::Hidden)
    }

    pub fn tick(&mut self, now_ms: u64, eligibility: IdleEligibility) -> Option<HintChange> {
        let due = self.deadline_ms.filter(|d| *d <= now_ms)?;
        match self.state.phase {
            IdlePhase::Waiting => {
                if eligibility.is_eligible() {
                    debug!("idle: showing hint (idle since {})", self.state.last_activity_at);
                    self.state.phase = IdlePhase::Visible;
                    self.deadline_ms = Some(now_ms + self.config.hide_after_ms);
                    Some(HintChange::Show)
                } else {
                    debug!("idle: hint skipped at {due}, not eligible {eligibility:?}");
                    self.deadline_ms = Some(now_ms + self.config.show_after_ms);
                    None
                }
            }
            IdlePhase::Visible => {
                self.state.phase = IdlePhase::Hiding;
                self.deadline_ms = Some(now_ms + self.config.exit_ms);
                Some(HintChange::Hide)
            }
            IdlePhase::Hiding => {
                self.state.phase = IdlePhase::Waiting;
                self.deadline_ms = Some(now_ms + self.config.show_after_ms);
                Some(HintChange::Hidden)
            }
        }
    }
}
