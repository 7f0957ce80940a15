use std::cell::RefCell;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, PointerEvent, TransitionEvent};
use room_core::overlay::OverlayPhase;
use room_core::Point2;
use crate::components::main_scene::element_rect;
use crate::dom::{self, drag::DragListeners};
use crate::engine;
use crate::state::{AppState, HotspotView};

thread_local! {
    static ACTIVE_DRAG: RefCell<Option<DragListeners>> = RefCell::new(None);
}

/// Removes the document listeners of the drag in progress, if any. Not for
/// use inside those listeners; they go through [`release_drag_later`].
pub fn release_drag() {
    ACTIVE_DRAG.with(|d| d.borrow_mut().take());
}

/// The listeners can't be dropped from inside their own callback.
fn release_drag_later() {
    let handle = Closure::once(release_drag);
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            handle.as_ref().unchecked_ref(),
            0,
        );
    }
    handle.forget();
}

fn phase_class(phase: OverlayPhase) -> &'static str {
    match phase {
        OverlayPhase::Absent => "hotspot",
        OverlayPhase::Entering => "hotspot entering",
        OverlayPhase::Visible => "hotspot visible",
        OverlayPhase::Exiting => "hotspot exiting",
    }
}

#[component]
pub fn Highlights() -> impl IntoView {
    let state = expect_context::<AppState>();
    let layer_ref = NodeRef::<leptos::html::Div>::new();

    let layer_class = move || {
        if state.edit_mode.get() { "highlights-layer editing" } else { "highlights-layer" }
    };

    view! {
        <div class=layer_class node_ref=layer_ref>
            <For
                each=move || state.hotspots.get()
                key=|h| h.id.clone()
                let:hotspot
            >
                <Hotspot id=hotspot.id.clone() layer_ref=layer_ref />
            </For>
        </div>
    }
}

#[component]
fn Hotspot(id: String, layer_ref: NodeRef<leptos::html::Div>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = StoredValue::new(id);

    let view_of = move || -> Option<HotspotView> {
        id.with_value(|id| state.hotspots.with(|hs| hs.iter().find(|h| &h.id == id).cloned()))
    };

    let class = move || view_of().map_or("hotspot", |h| phase_class(h.phase));
    let style = move || {
        view_of().map_or_else(String::new, |h| {
            format!(
                "left: {:.2}%; top: {:.2}%; transition-duration: {}ms;",
                h.position.x, h.position.y, h.duration_ms
            )
        })
    };

    let on_click = move |_: web_sys::MouseEvent| {
        if state.edit_mode.get_untracked() {
            return;
        }
        let now = dom::now_ms();
        id.with_value(|id| engine::dispatch(&state, |room| room.open_object(id, now)));
    };

    let on_transitionend = move |ev: TransitionEvent| {
        if ev.target() != ev.current_target() {
            return;
        }
        let Some(token) = view_of().and_then(|h| h.token) else { return };
        id.with_value(|id| engine::dispatch(&state, |room| room.complete_transition(id, token)));
    };

    let on_pointerdown = move |ev: PointerEvent| {
        if !state.edit_mode.get_untracked() {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<Element>().ok()) else { return };
        let Some(layer) = layer_ref.get_untracked() else { return };
        let origin = el.get_bounding_client_rect();
        let pointer = Point2::new(ev.client_x() as f64, ev.client_y() as f64);
        let container = element_rect(&layer);
        let grabbed = id.with_value(|id| {
            engine::dispatch(&state, |room| {
                room.begin_drag(id, pointer, Point2::new(origin.left(), origin.top()), container)
            })
        });
        if grabbed != Some(true) {
            return;
        }

        let listeners = DragListeners::attach(
            move |ev: PointerEvent| {
                let pointer = Point2::new(ev.client_x() as f64, ev.client_y() as f64);
                engine::dispatch(&state, |room| room.drag_to(pointer));
            },
            move |_: PointerEvent| {
                engine::dispatch(&state, |room| room.end_drag());
                release_drag_later();
            },
        );
        ACTIVE_DRAG.with(|d| *d.borrow_mut() = listeners);
    };

    view! {
        <button
            class=class
            style=style
            on:click=on_click
            on:pointerdown=on_pointerdown
            on:transitionend=on_transitionend
            aria-label=move || view_of().map(|h| h.name).unwrap_or_default()
        >
            <span class="hotspot-icon">{move || view_of().map(|h| h.icon).unwrap_or_default()}</span>
            <span class="hotspot-pulse"></span>
        </button>
    }
}
