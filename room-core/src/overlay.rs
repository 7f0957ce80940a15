//! Hotspot overlay lifecycle.
//!
//! Each hotspot gets at most one [`OverlayInstance`], created lazily when its
//! range is first entered and destroyed once its exit transition completes:
//!
//! ```text
//! Absent → Entering → Visible → Exiting → Absent
//!              ↑__________________|
//! ```
//!
//! Re-entering the range while `Exiting` flips the same instance back to
//! `Entering`, so oscillating around a boundary never stacks duplicates.
//! Every transition carries a [`TransitionToken`]; starting a new one cancels
//! the pending completion of the previous.
//!
//! The manager never touches views. Renderers consume [`OverlayEvent`]s from
//! [`HighlightOverlayManager::drain_events`].

use std::collections::HashMap;
use log::{debug, warn};
use crate::catalog::Catalog;
use crate::config::OverlayConfig;
use crate::store::{PositionBook, PositionMap, PositionStore};
use crate::types::{Point2, Position, ProgressRange, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayPhase {
    Absent,
    Entering,
    Visible,
    Exiting,
}

impl OverlayPhase {
    pub fn is_shown(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionToken(u64);

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    Created { id: String, position: Position },
    /// Phase change. Entering/Exiting carry the token the renderer passes
    /// back to [`HighlightOverlayManager::complete_transition`].
    Updated {
        id: String,
        phase: OverlayPhase,
        token: Option<TransitionToken>,
        duration_ms: u64,
    },
    Moved { id: String, position: Position },
    Destroyed { id: String },
}

#[derive(Clone, Copy, Debug)]
struct PendingTransition {
    token: TransitionToken,
    due_ms: u64,
}

#[derive(Clone, Debug)]
struct OverlayInstance {
    phase: OverlayPhase,
    pending: Option<PendingTransition>,
}

#[derive(Clone, Copy, Debug)]
struct Focus {
    slot: Option<usize>,
    reveal_at_ms: u64,
}

/// A grabbed hotspot. Exists only while a drag is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    slot: usize,
    grab_offset: Point2,
    container: Rect,
}

pub struct HighlightOverlayManager<S: PositionStore> {
    config: OverlayConfig,
    ids: Vec<String>,
    ranges: Vec<ProgressRange>,
    index: HashMap<String, usize>,
    slots: Vec<Option<OverlayInstance>>,
    positions: Vec<Position>,
    book: PositionBook<S>,
    focus: Option<Focus>,
    edit_mode: bool,
    drag: Option<DragSession>,
    next_token: u64,
    last_progress: Option<f64>,
    events: Vec<OverlayEvent>,
}

impl<S: PositionStore> HighlightOverlayManager<S> {
    pub fn new(catalog: &Catalog, book: PositionBook<S>, config: &OverlayConfig) -> Self {
        let resolved = book.resolve_all();
        let points = catalog.points();
        let positions = points
            .iter()
            .map(|p| resolved.get(&p.id).copied().unwrap_or(p.position))
            .collect();
        Self {
            config: config.clone(),
            ids: points.iter().map(|p| p.id.clone()).collect(),
            ranges: points.iter().map(|p| p.range).collect(),
            index: points.iter().enumerate().map(|(i, p)| (p.id.clone(), i)).collect(),
            slots: vec![None; points.len()],
            positions,
            book,
            focus: None,
            edit_mode: false,
            drag: None,
            next_token: 0,
            last_progress: None,
            events: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn phase(&self, id: &str) -> OverlayPhase {
        self.index
            .get(id)
            .and_then(|&i| self.slots[i].as_ref())
            .map_or(OverlayPhase::Absent, |inst| inst.phase)
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.index.get(id).map(|&i| self.positions[i])
    }

    pub fn working_positions(&self) -> PositionMap {
        self.ids.iter().cloned().zip(self.positions.iter().copied()).collect()
    }

    /// Ids of instances currently Entering or Visible, in catalog order.
    pub fn shown_ids(&self) -> Vec<&str> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.as_ref().is_some_and(|inst| inst.phase.is_shown()))
            .map(|(i, _)| self.ids[i].as_str())
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.and_then(|f| f.slot).map(|slot| self.ids[slot].as_str())
    }

    pub fn book(&self) -> &PositionBook<S> {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut PositionBook<S> {
        &mut self.book
    }

    pub fn drain_events(&mut self) -> Vec<OverlayEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Range-driven control ─────────────────────────────────────────────────

    /// Re-evaluates every hotspot against `progress`.
    pub fn update(&mut self, progress: f64, now_ms: u64) {
        self.last_progress = Some(progress);
        self.reconcile(now_ms);
    }

    /// Completes transitions that are due and lets a pending reveal start.
    pub fn tick(&mut self, now_ms: u64) {
        if self.focus.is_some() {
            self.reconcile(now_ms);
        }
        for slot in 0..self.slots.len() {
            let due = self.slots[slot]
                .as_ref()
                .and_then(|inst| inst.pending)
                .filter(|p| p.due_ms <= now_ms);
            if let Some(p) = due {
                self.finish(slot, p.token);
            }
        }
    }

    /// Completion callback from an external animation. Stale tokens and
    /// removed instances are ignored.
    pub fn complete_transition(&mut self, id: &str, token: TransitionToken) -> bool {
        let Some(&slot) = self.index.get(id) else {
            return false;
        };
        self.finish(slot, token)
    }

    /// Narrows visibility to `id` until [`Self::clear_focus`]. The destination
    /// appears no earlier than `reveal_at_ms` unless it is already shown.
    pub fn focus(&mut self, id: &str, reveal_at_ms: u64, now_ms: u64) -> bool {
        let Some(&slot) = self.index.get(id) else {
            warn!("overlay: focus on unknown hotspot {id:?}");
            return false;
        };
        debug!("overlay: focus {id} (reveal at {reveal_at_ms})");
        self.focus = Some(Focus { slot: Some(slot), reveal_at_ms });
        self.reconcile(now_ms);
        true
    }

    /// Focus with no destination: every hotspot is hidden until cleared.
    pub fn suppress_all(&mut self, now_ms: u64) {
        debug!("overlay: all hotspots suppressed");
        self.focus = Some(Focus { slot: None, reveal_at_ms: now_ms });
        self.reconcile(now_ms);
    }

    /// Returns to organic, range-based control.
    pub fn clear_focus(&mut self, now_ms: u64) {
        if self.focus.take().is_some() {
            debug!("overlay: focus cleared");
            self.reconcile(now_ms);
        }
    }

    fn wants_shown(&self, slot: usize, now_ms: u64) -> Option<bool> {
        if let Some(focus) = self.focus {
            if focus.slot != Some(slot) {
                return Some(false);
            }
            let shown = self.slots[slot].as_ref().is_some_and(|inst| inst.phase.is_shown());
            return if shown || now_ms >= focus.reveal_at_ms { Some(true) } else { None };
        }
        let in_range = self.last_progress.is_some_and(|p| self.ranges[slot].contains(p));
        Some(in_range)
    }

    fn reconcile(&mut self, now_ms: u64) {
        for slot in 0..self.slots.len() {
            let phase = self.slots[slot].as_ref().map_or(OverlayPhase::Absent, |inst| inst.phase);
            match (self.wants_shown(slot, now_ms), phase) {
                (Some(true), OverlayPhase::Absent | OverlayPhase::Exiting) => self.begin_enter(slot, now_ms),
                (Some(false), OverlayPhase::Entering | OverlayPhase::Visible) => self.begin_exit(slot, now_ms),
                _ => {}
            }
        }
    }

    fn issue_token(&mut self) -> TransitionToken {
        self.next_token += 1;
        TransitionToken(self.next_token)
    }

    fn begin_enter(&mut self, slot: usize, now_ms: u64) {
        if self.slots[slot].is_none() {
            self.slots[slot] = Some(OverlayInstance { phase: OverlayPhase::Absent, pending: None });
            self.events.push(OverlayEvent::Created {
                id: self.ids[slot].clone(),
                position: self.positions[slot],
            });
        }
        self.transition(slot, OverlayPhase::Entering, self.config.enter_ms, now_ms);
    }

    fn begin_exit(&mut self, slot: usize, now_ms: u64) {
        self.transition(slot, OverlayPhase::Exiting, self.config.exit_ms, now_ms);
    }

    fn transition(&mut self, slot: usize, phase: OverlayPhase, duration_ms: u64, now_ms: u64) {
        let token = self.issue_token();
        let Some(inst) = self.slots[slot].as_mut() else {
            return;
        };
        // replacing `pending` cancels the superseded completion
        inst.phase = phase;
        inst.pending = Some(PendingTransition { token, due_ms: now_ms + duration_ms });
        debug!("overlay: {} → {:?}", self.ids[slot], phase);
        self.events.push(OverlayEvent::Updated {
            id: self.ids[slot].clone(),
            phase,
            token: Some(token),
            duration_ms,
        });
    }

    fn finish(&mut self, slot: usize, token: TransitionToken) -> bool {
        let Some(inst) = self.slots[slot].as_mut() else {
            return false;
        };
        if inst.pending.map(|p| p.token) != Some(token) {
            return false;
        }
        inst.pending = None;
        let phase = inst.phase;
        match phase {
            OverlayPhase::Entering => {
                inst.phase = OverlayPhase::Visible;
                self.events.push(OverlayEvent::Updated {
                    id: self.ids[slot].clone(),
                    phase: OverlayPhase::Visible,
                    token: None,
                    duration_ms: 0,
                });
            }
            OverlayPhase::Exiting => {
                if self.drag.is_some_and(|d| d.slot == slot) {
                    self.end_drag();
                }
                self.slots[slot] = None;
                debug!("overlay: {} destroyed", self.ids[slot]);
                self.events.push(OverlayEvent::Destroyed { id: self.ids[slot].clone() });
            }
            OverlayPhase::Absent | OverlayPhase::Visible => {}
        }
        true
    }

    // ── Editing ──────────────────────────────────────────────────────────────

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Leaving edit mode drops any drag in progress without saving it.
    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
        if !on && self.drag.take().is_some() {
            debug!("overlay: drag released by leaving edit mode");
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Grabs a shown (entering or visible) `id` at `pointer`. `element_origin` is the top-left corner of the
    /// hotspot's element, so the grab point stays under the pointer.
    pub fn begin_drag(&mut self, id: &str, pointer: Point2, element_origin: Point2, container: Rect) -> bool {
        if !self.edit_mode || self.drag.is_some() || container.width <= 0.0 || container.height <= 0.0 {
            return false;
        }
        let Some(&slot) = self.index.get(id) else {
            return false;
        };
        if !self.slots[slot].as_ref().is_some_and(|inst| inst.phase.is_shown()) {
            return false;
        }
        let grab_offset = Point2::new(pointer.x - element_origin.x, pointer.y - element_origin.y);
        self.drag = Some(DragSession { slot, grab_offset, container });
        debug!("overlay: drag start {id}");
        true
    }

    /// Moves the grabbed hotspot. The last call before release wins.
    pub fn drag_to(&mut self, pointer: Point2) -> Option<Position> {
        let session = self.drag?;
        let c = session.container;
        let x = (pointer.x - c.left - session.grab_offset.x) * 100.0 / c.width;
        let y = (pointer.y - c.top - session.grab_offset.y) * 100.0 / c.height;
        let position = Position::new(x, y).clamped(self.config.drag_min, self.config.drag_max);
        self.positions[session.slot] = position;
        self.events.push(OverlayEvent::Moved { id: self.ids[session.slot].clone(), position });
        Some(position)
    }

    /// Releases the drag and writes the final position through the store.
    pub fn end_drag(&mut self) -> Option<Position> {
        let session = self.drag.take()?;
        let position = self.positions[session.slot];
        let id = &self.ids[session.slot];
        debug!("overlay: drag end {id} at ({:.1}, {:.1})", position.x, position.y);
        self.book.set(id, position);
        Some(position)
    }

    /// Clears all persisted positions and returns to compiled defaults.
    pub fn reset_positions(&mut self) {
        self.drag = None;
        self.book.reset();
        for slot in 0..self.ids.len() {
            let Some(position) = self.book.compiled_default(&self.ids[slot]) else {
                continue;
            };
            if self.positions[slot] != position {
                self.positions[slot] = position;
                if self.slots[slot].is_some() {
                    self.events.push(OverlayEvent::Moved { id: self.ids[slot].clone(), position });
                }
            }
        }
    }

    pub fn save_as_defaults(&mut self) {
        let working = self.working_positions();
        self.book.save_as_defaults(&working);
    }
}
