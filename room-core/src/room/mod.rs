//! The coordinator that wires the engine components together.
//!
//! scroll → sampler → {media, overlays}; pointer → parallax;
//! navigate → scheduler → programmatic scroll; any input → idle reset.
//! At most one modal (an object sheet or the instructions guide) is open.
//!
//! The shell forwards browser events to the `on_*` methods, calls
//! [`Room::tick`] once per animation frame, and renders whatever
//! [`Room::drain_events`] returns.

use log::{debug, info, warn};
use crate::catalog::{Catalog, HighlightPoint, NavigationPoint};
use crate::config::RoomConfig;
use crate::content::{object_info, ObjectInfo};
use crate::idle::{HintChange, IdleEligibility, IdleHintScheduler, IdlePhase};
use crate::media::{MediaPositionController, MediaResource};
use crate::navigation::{ArrowCursor, NavigateOutcome, NavigationScheduler};
use crate::overlay::{HighlightOverlayManager, OverlayEvent, TransitionToken};
use crate::parallax::{ParallaxTransform, PointerParallaxController};
use crate::sampler::{ScrollProgressSampler, ScrollProvider};
use crate::store::{PositionBook, PositionMap, PositionStore};
use crate::types::{Point2, Position, Rect};

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Object(String),
    Instructions,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoomEvent {
    Progress(f64),
    /// The video was moved to this time (seconds).
    Seeked(f64),
    Overlay(OverlayEvent),
    Hint(HintChange),
    NavigationStarted { target: f64, offset: f64 },
    NavigationSettled { target: f64 },
    /// Jump targets changed; the full list after the change.
    NavigationPoints(Vec<NavigationPoint>),
    ModalOpened(Modal),
    ModalClosed,
}

pub struct Room<M: MediaResource, S: ScrollProvider, P: PositionStore> {
    config: RoomConfig,
    catalog: Catalog,
    sampler: ScrollProgressSampler,
    media_ctl: MediaPositionController,
    parallax: PointerParallaxController,
    overlays: HighlightOverlayManager<P>,
    navigation: NavigationScheduler,
    cursor: ArrowCursor,
    idle: IdleHintScheduler,
    media: Option<M>,
    scroll: Option<S>,
    mobile: bool,
    modal: Option<Modal>,
    instructions_due: Option<u64>,
    progress: f64,
    events: Vec<RoomEvent>,
}

impl<M: MediaResource, S: ScrollProvider, P: PositionStore> Room<M, S, P> {
    pub fn new(config: RoomConfig, mut catalog: Catalog, store: P, now_ms: u64) -> Self {
        let book = PositionBook::new(store, &catalog);
        for (id, target) in book.load_targets() {
            if !catalog.set_target_override(&id, target) {
                warn!("room: ignoring stored target {target} for {id:?}");
            }
        }
        let overlays = HighlightOverlayManager::new(&catalog, book, &config.overlay);
        info!(
            "room: {} hotspots, {:?} mapping, {:?} scroll",
            catalog.len(),
            config.media.policy,
            config.sampler.direction
        );
        Self {
            sampler: ScrollProgressSampler::new(&config.sampler),
            media_ctl: MediaPositionController::new(&config.media),
            parallax: PointerParallaxController::new(&config.parallax),
            navigation: NavigationScheduler::new(&config.navigation, config.sampler.direction),
            cursor: ArrowCursor::default(),
            idle: IdleHintScheduler::new(&config.idle, now_ms),
            instructions_due: config
                .instructions
                .auto_show
                .then(|| now_ms + config.instructions.auto_show_after_ms),
            overlays,
            catalog,
            config,
            media: None,
            scroll: None,
            mobile: false,
            modal: None,
            progress: 0.0,
            events: Vec::new(),
        }
    }

    // ── Wiring ───────────────────────────────────────────────────────────────

    pub fn attach_media(&mut self, media: M) {
        self.media = Some(media);
        self.seek_media();
    }

    pub fn detach_media(&mut self) -> Option<M> {
        self.media.take()
    }

    /// Attaches the room container and takes an initial progress sample.
    pub fn attach_scroll(&mut self, scroll: S, now_ms: u64) {
        self.scroll = Some(scroll);
        self.sampler.reset();
        self.sample_scroll(now_ms);
    }

    pub fn detach_scroll(&mut self) -> Option<S> {
        self.scroll.take()
    }

    /// Mobile layouts never show the idle hint; switching drops a visible one.
    pub fn set_mobile(&mut self, mobile: bool, now_ms: u64) {
        if self.mobile == mobile {
            return;
        }
        debug!("room: mobile layout {mobile}");
        self.mobile = mobile;
        if mobile {
            self.on_activity(now_ms);
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn on_scroll(&mut self, now_ms: u64) {
        self.sample_scroll(now_ms);
        self.on_activity(now_ms);
    }

    /// Re-applies the current progress once the video knows its duration.
    pub fn on_media_ready(&mut self) {
        self.seek_media();
    }

    pub fn on_pointer_move(&mut self, pointer: Point2, bounds: Rect, now_ms: u64) {
        self.parallax.pointer_move(pointer, bounds, now_ms);
        self.on_activity(now_ms);
    }

    pub fn on_pointer_leave(&mut self, now_ms: u64) {
        self.parallax.pointer_leave(now_ms);
    }

    /// Any user input (keys, touches, clicks) postpones the idle hint.
    pub fn on_activity(&mut self, now_ms: u64) {
        if let Some(change) = self.idle.reset(now_ms) {
            self.events.push(RoomEvent::Hint(change));
        }
    }

    /// Stops the idle hint until the next input; used on teardown.
    pub fn cancel_idle(&mut self) {
        if let Some(change) = self.idle.cancel() {
            self.events.push(RoomEvent::Hint(change));
        }
    }

    fn sample_scroll(&mut self, now_ms: u64) {
        let Some(metrics) = self.scroll.as_ref().map(|s| s.metrics()) else {
            return;
        };
        let Some(progress) = self.sampler.sample(metrics) else {
            return;
        };
        self.progress = progress;
        self.events.push(RoomEvent::Progress(progress));
        self.seek_media();
        self.overlays.update(progress, now_ms);
        self.cursor.sync(self.catalog.active_index(progress));
        self.flush_overlay_events();
    }

    fn seek_media(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        if let Some(t) = self.media_ctl.set_progress(self.progress, media) {
            self.events.push(RoomEvent::Seeked(t));
        }
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    /// Scrolls to `target` progress. While the scroll runs only the hotspot
    /// active at `target` is shown, and only after the reveal delay.
    pub fn navigate(&mut self, target: f64, now_ms: u64) -> NavigateOutcome {
        let outcome = self.navigation.navigate(target, self.scroll.as_mut(), now_ms);
        let NavigateOutcome::Started { offset } = outcome else {
            return outcome;
        };
        let target = target.clamp(0.0, 1.0);
        match self.catalog.active_index(target) {
            Some(i) => {
                let reveal_at = now_ms + self.config.navigation.reveal_delay_ms;
                let id = self.catalog.points()[i].id.clone();
                self.overlays.focus(&id, reveal_at, now_ms);
                self.cursor.sync(Some(i));
            }
            None => self.overlays.suppress_all(now_ms),
        }
        self.events.push(RoomEvent::NavigationStarted { target, offset });
        self.flush_overlay_events();
        self.on_activity(now_ms);
        outcome
    }

    /// `None` for an unknown id.
    pub fn navigate_to(&mut self, id: &str, now_ms: u64) -> Option<NavigateOutcome> {
        let point = self.catalog.navigation_point(id)?;
        Some(self.navigate(point.target, now_ms))
    }

    pub fn navigate_next(&mut self, now_ms: u64) -> Option<NavigateOutcome> {
        let mut cursor = self.cursor;
        let index = cursor.next(self.catalog.len())?;
        self.step_to(cursor, index, now_ms)
    }

    pub fn navigate_prev(&mut self, now_ms: u64) -> Option<NavigateOutcome> {
        let mut cursor = self.cursor;
        let index = cursor.prev(self.catalog.len())?;
        self.step_to(cursor, index, now_ms)
    }

    fn step_to(&mut self, cursor: ArrowCursor, index: usize, now_ms: u64) -> Option<NavigateOutcome> {
        let point = self.catalog.navigation_point_at(index)?;
        let outcome = self.navigate(point.target, now_ms);
        if outcome.is_started() {
            self.cursor = cursor;
        }
        Some(outcome)
    }

    pub fn is_navigating(&self) -> bool {
        self.navigation.is_locked()
    }

    /// Pins the jump target of `id` and persists it. Out-of-range targets
    /// and unknown ids are refused.
    pub fn set_navigation_target(&mut self, id: &str, target: f64) -> bool {
        if !self.catalog.set_target_override(id, target) {
            return false;
        }
        info!("room: {id} jump target pinned at {target:.3}");
        let targets = self.catalog.target_overrides().clone();
        self.overlays.book_mut().save_targets(&targets);
        self.events.push(RoomEvent::NavigationPoints(self.catalog.navigation_points()));
        true
    }

    /// Back to range midpoints for every hotspot.
    pub fn reset_navigation_targets(&mut self) {
        self.catalog.clear_target_overrides();
        self.overlays.book_mut().clear_targets();
        self.events.push(RoomEvent::NavigationPoints(self.catalog.navigation_points()));
    }

    // ── Timers ───────────────────────────────────────────────────────────────

    pub fn tick(&mut self, now_ms: u64) {
        if let Some(done) = self.navigation.tick(now_ms) {
            self.overlays.clear_focus(now_ms);
            self.events.push(RoomEvent::NavigationSettled { target: done.target_progress });
        }
        self.overlays.tick(now_ms);
        self.flush_overlay_events();

        if self.instructions_due.is_some_and(|due| due <= now_ms) {
            self.instructions_due = None;
            if self.modal.is_none() {
                debug!("room: showing instructions");
                self.open_modal(Modal::Instructions);
            }
        }

        let eligibility = IdleEligibility {
            mobile: self.mobile,
            navigating: self.navigation.is_locked(),
            modal_open: self.modal.is_some(),
        };
        if let Some(change) = self.idle.tick(now_ms, eligibility) {
            self.events.push(RoomEvent::Hint(change));
        }
    }

    /// Completion callback for an externally driven overlay animation.
    pub fn complete_transition(&mut self, id: &str, token: TransitionToken) -> bool {
        let done = self.overlays.complete_transition(id, token);
        self.flush_overlay_events();
        done
    }

    // ── Modal ────────────────────────────────────────────────────────────────

    /// Opens the sheet for `id`, replacing any open modal.
    pub fn open_object(&mut self, id: &str, now_ms: u64) -> Option<&'static ObjectInfo> {
        let info = object_info(id)?;
        self.open_modal(Modal::Object(id.to_string()));
        self.on_activity(now_ms);
        Some(info)
    }

    /// Opens the instructions guide. A pending automatic showing is dropped.
    pub fn open_instructions(&mut self, now_ms: u64) {
        self.instructions_due = None;
        self.open_modal(Modal::Instructions);
        self.on_activity(now_ms);
    }

    pub fn close_modal(&mut self, now_ms: u64) {
        if self.modal.take().is_some() {
            self.events.push(RoomEvent::ModalClosed);
            self.on_activity(now_ms);
        }
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal.clone());
        self.events.push(RoomEvent::ModalOpened(modal));
    }

    // ── Editing ──────────────────────────────────────────────────────────────

    pub fn is_edit_mode(&self) -> bool {
        self.overlays.is_edit_mode()
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        debug!("room: edit mode {on}");
        self.overlays.set_edit_mode(on);
    }

    pub fn begin_drag(&mut self, id: &str, pointer: Point2, element_origin: Point2, container: Rect) -> bool {
        self.overlays.begin_drag(id, pointer, element_origin, container)
    }

    pub fn drag_to(&mut self, pointer: Point2) -> Option<Position> {
        let moved = self.overlays.drag_to(pointer);
        self.flush_overlay_events();
        moved
    }

    pub fn end_drag(&mut self) -> Option<Position> {
        self.overlays.end_drag()
    }

    pub fn is_dragging(&self) -> bool {
        self.overlays.is_dragging()
    }

    pub fn reset_positions(&mut self) {
        self.overlays.reset_positions();
        self.flush_overlay_events();
    }

    pub fn save_as_defaults(&mut self) {
        self.overlays.save_as_defaults();
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn overlays(&self) -> &HighlightOverlayManager<P> {
        &self.overlays
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn active_point(&self) -> Option<&HighlightPoint> {
        self.catalog.active_point(self.progress)
    }

    pub fn navigation_points(&self) -> Vec<NavigationPoint> {
        self.catalog.navigation_points()
    }

    pub fn working_positions(&self) -> PositionMap {
        self.overlays.working_positions()
    }

    pub fn parallax(&self, now_ms: u64) -> ParallaxTransform {
        self.parallax.sample(now_ms)
    }

    pub fn is_parallax_settled(&self, now_ms: u64) -> bool {
        self.parallax.is_settled(now_ms)
    }

    pub fn hint_phase(&self) -> IdlePhase {
        self.idle.phase()
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    pub fn scroll(&self) -> Option<&S> {
        self.scroll.as_ref()
    }

    pub fn scroll_mut(&mut self) -> Option<&mut S> {
        self.scroll.as_mut()
    }

    pub fn drain_events(&mut self) -> Vec<RoomEvent> {
        self.flush_overlay_events();
        std::mem::take(&mut self.events)
    }

    fn flush_overlay_events(&mut self) {
        self.events
            .extend(self.overlays.drain_events().into_iter().map(RoomEvent::Overlay));
    }
}
