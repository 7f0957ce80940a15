//! Programmatic "jump to point" scrolling.
//!
//! At most one navigation is in flight. Its lock is held for a fixed time
//! approximating the smooth scroll; requests arriving meanwhile are dropped,
//! not queued.

use log::debug;
use crate::config::{NavigationConfig, ScrollDirection};
use crate::sampler::ScrollProvider;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationRequest {
    pub target_progress: f64,
    pub lock_expiry_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavigateOutcome {
    Started { offset: f64 },
    /// Another navigation still holds the lock.
    Rejected,
    /// No scroll container is attached.
    NoContainer,
}

impl NavigateOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

#[derive(Clone, Debug)]
pub struct NavigationScheduler {
    config: NavigationConfig,
    direction: ScrollDirection,
    request: Option<NavigationRequest>,
}

impl NavigationScheduler {
    pub fn new(config: &NavigationConfig, direction: ScrollDirection) -> Self {
        Self { config: config.clone(), direction, request: None }
    }

    pub fn is_locked(&self) -> bool {
        self.request.is_some()
    }

    pub fn active(&self) -> Option<&NavigationRequest> {
        self.request.as_ref()
    }

    /// Scroll offset that shows `progress` in a container of the given distance.
    pub fn offset_for(&self, progress: f64, scrollable_distance: f64) -> f64 {
        scrollable_distance.max(0.0) * self.direction.apply(progress.clamp(0.0, 1.0))
    }

    pub fn navigate<S: ScrollProvider + ?Sized>(
        &mut self,
        target_progress: f64,
        scroll: Option<&mut S>,
        now_ms: u64,
    ) -> NavigateOutcome {
        if let Some(active) = self.request {
            debug!(
                "nav: request for {:.3} rejected, lock held until {}",
                target_progress, active.lock_expiry_ms
            );
            return NavigateOutcome::Rejected;
        }
        let Some(scroll) = scroll else {
            debug!("nav: request for {target_progress:.3} dropped, no container");
            return NavigateOutcome::NoContainer;
        };
        let target_progress = target_progress.clamp(0.0, 1.0);
        let offset = self.offset_for(target_progress, scroll.metrics().scrollable_distance());
        scroll.scroll_to(offset, self.config.behavior);
        let lock_expiry_ms = now_ms + self.config.lock_ms;
        debug!("nav: scrolling to {offset:.1}px for progress {target_progress:.3}, locked until {lock_expiry_ms}");
        self.request = Some(NavigationRequest { target_progress, lock_expiry_ms });
        NavigateOutcome::Started { offset }
    }

    /// Clears an expired lock and returns the finished request.
    pub fn tick(&mut self, now_ms: u64) -> Option<NavigationRequest> {
        let expired = self.request.filter(|r| now_ms >= r.lock_expiry_ms)?;
        debug!("nav: lock released");
        self.request = None;
        Some(expired)
    }
}

/// Which point the prev/next arrows step from.
///
/// Follows the active hotspot while one is in range and otherwise remembers
/// the last one stepped to.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArrowCursor {
    index: usize,
}

impl ArrowCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sync(&mut self, active: Option<usize>) {
        if let Some(i) = active {
            self.index = i;
        }
    }

    pub fn next(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.index = if self.index + 1 < len { self.index + 1 } else { 0 };
        Some(self.index)
    }

    pub fn prev(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.index = if self.index > 0 && self.index < len { self.index - 1 } else { len - 1 };
        Some(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScrollBehavior;

    #[derive(Default)]
    struct FakeScroll {
        offset: f64,
        calls: Vec<(f64, ScrollBehavior)>,
    }

    impl ScrollProvider for FakeScroll {
        fn content_height(&self) -> f64 {
            5000.0
        }
        fn viewport_height(&self) -> f64 {
            1000.0
        }
        fn offset(&self) -> f64 {
            self.offset
        }
        fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
            self.offset = offset;
            self.calls.push((offset, behavior));
        }
    }

    fn scheduler(direction: ScrollDirection) -> NavigationScheduler {
        NavigationScheduler::new(&NavigationConfig::default(), direction)
    }

    #[test]
    fn test_second_request_while_locked_is_ignored() {
        let mut nav = scheduler(ScrollDirection::Forward);
        let mut scroll = FakeScroll::default();
        assert_eq!(nav.navigate(0.2, Some(&mut scroll), 0), NavigateOutcome::Started { offset: 800.0 });
        assert_eq!(nav.navigate(0.8, Some(&mut scroll), 10), NavigateOutcome::Rejected);
        assert_eq!(scroll.offset, 800.0);
        assert_eq!(scroll.calls, vec![(800.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn test_lock_expires_on_timer() {
        let mut nav = scheduler(ScrollDirection::Forward);
        let mut scroll = FakeScroll::default();
        nav.navigate(0.5, Some(&mut scroll), 100);
        assert!(nav.tick(1299).is_none());
        assert!(nav.is_locked());
        let done = nav.tick(1300).unwrap();
        assert_eq!(done, NavigationRequest { target_progress: 0.5, lock_expiry_ms: 1300 });
        assert!(!nav.is_locked());
        assert!(nav.tick(5000).is_none());
        assert!(nav.navigate(0.25, Some(&mut scroll), 5000).is_started());
        assert_eq!(scroll.offset, 1000.0);
    }

    #[test]
    fn test_missing_container_drops_request() {
        let mut nav = scheduler(ScrollDirection::Forward);
        assert_eq!(nav.navigate::<FakeScroll>(0.5, None, 0), NavigateOutcome::NoContainer);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_inverted_direction_mirrors_offset() {
        let mut nav = scheduler(ScrollDirection::Inverted);
        let mut scroll = FakeScroll::default();
        assert_eq!(nav.navigate(0.25, Some(&mut scroll), 0), NavigateOutcome::Started { offset: 3000.0 });
    }

    #[test]
    fn test_arrow_cursor_wraps() {
        let mut cursor = ArrowCursor::default();
        assert_eq!(cursor.prev(4), Some(3));
        assert_eq!(cursor.next(4), Some(0));
        cursor.sync(Some(2));
        cursor.sync(None);
        assert_eq!(cursor.next(4), Some(3));
        assert_eq!(cursor.next(4), Some(0));
        assert_eq!(cursor.next(0), None);
    }
}
