//! The engine instance and the bridge from its events to Leptos signals.

use std::cell::RefCell;
use leptos::prelude::*;
use room_core::content::object_info;
use room_core::idle::HintChange;
use room_core::overlay::{OverlayEvent, OverlayPhase};
use room_core::{Catalog, Modal, Room, RoomConfig, RoomEvent};
use crate::dom::scroll::WindowScroll;
use crate::dom::storage::LocalStorageStore;
use crate::dom::video::VideoElement;
use crate::state::{AppState, HintState, HotspotView};

pub type ShellRoom = Room<VideoElement, WindowScroll, LocalStorageStore>;

thread_local! {
    static ROOM: RefCell<Option<ShellRoom>> = RefCell::new(None);
}

const CONFIG_JSON: &str = include_str!("../room.config.json");

pub fn load_config() -> RoomConfig {
    RoomConfig::from_json(CONFIG_JSON).unwrap_or_else(|e| {
        log::warn!("room.config.json rejected, using defaults: {e}");
        RoomConfig::default()
    })
}

pub fn install(state: &AppState, now_ms: u64) {
    let room = ShellRoom::new(load_config(), Catalog::compiled(), LocalStorageStore, now_ms);
    state.points.set(room.navigation_points());
    ROOM.with(|r| *r.borrow_mut() = Some(room));
}

/// Runs `f` against the engine, then pushes whatever it emitted into the
/// signals. The engine is borrowed only while `f` runs.
pub fn dispatch<R>(state: &AppState, f: impl FnOnce(&mut ShellRoom) -> R) -> Option<R> {
    let (out, events, active) = ROOM.with(|r| {
        let mut slot = r.borrow_mut();
        let room = slot.as_mut()?;
        let out = f(room);
        let active = room.active_point().map(|p| p.id.clone());
        Some((out, room.drain_events(), active))
    })?;
    if state.active_id.get_untracked() != active {
        state.active_id.set(active);
    }
    apply_events(state, events);
    Some(out)
}

fn apply_events(state: &AppState, events: Vec<RoomEvent>) {
    for event in events {
        match event {
            RoomEvent::Progress(p) => state.progress.set(p),
            RoomEvent::Seeked(_) => {}
            RoomEvent::Overlay(ev) => apply_overlay_event(state, ev),
            RoomEvent::Hint(change) => state.hint.set(match change {
                HintChange::Show => HintState::Shown,
                HintChange::Hide => HintState::Leaving,
                HintChange::Hidden => HintState::Hidden,
            }),
            RoomEvent::NavigationStarted { .. } => state.navigating.set(true),
            RoomEvent::NavigationSettled { .. } => state.navigating.set(false),
            RoomEvent::NavigationPoints(points) => state.points.set(points),
            RoomEvent::ModalOpened(Modal::Object(id)) => {
                state.instructions_open.set(false);
                state.modal.set(object_info(&id));
            }
            RoomEvent::ModalOpened(Modal::Instructions) => {
                state.modal.set(None);
                state.instructions_open.set(true);
            }
            RoomEvent::ModalClosed => {
                state.modal.set(None);
                state.instructions_open.set(false);
            }
        }
    }
}

fn apply_overlay_event(state: &AppState, event: OverlayEvent) {
    match event {
        OverlayEvent::Created { id, position } => {
            let (name, icon) = state
                .point(&id)
                .map(|p| (p.name, p.icon))
                .unwrap_or_default();
            state.hotspots.update(|hs| {
                hs.push(HotspotView {
                    id,
                    name,
                    icon,
                    position,
                    phase: OverlayPhase::Absent,
                    token: None,
                    duration_ms: 0,
                })
            });
        }
        OverlayEvent::Updated { id, phase, token, duration_ms } => state.hotspots.update(|hs| {
            if let Some(h) = hs.iter_mut().find(|h| h.id == id) {
                h.phase = phase;
                h.token = token;
                h.duration_ms = duration_ms;
            }
        }),
        OverlayEvent::Moved { id, position } => state.hotspots.update(|hs| {
            if let Some(h) = hs.iter_mut().find(|h| h.id == id) {
                h.position = position;
            }
        }),
        OverlayEvent::Destroyed { id } => state.hotspots.update(|hs| hs.retain(|h| h.id != id)),
    }
}
