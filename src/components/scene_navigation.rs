use leptos::prelude::*;
use crate::dom;
use crate::engine;
use crate::state::AppState;

/// Previous/next arrows stepping through the hotspots with wrap-around.
#[component]
pub fn SceneNavigation() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_prev = move |_: web_sys::MouseEvent| {
        let now = dom::now_ms();
        engine::dispatch(&state, |room| room.navigate_prev(now));
    };
    let on_next = move |_: web_sys::MouseEvent| {
        let now = dom::now_ms();
        engine::dispatch(&state, |room| room.navigate_next(now));
    };

    let arrow_class = move |side: &'static str| {
        move || {
            if state.navigating.get() {
                format!("scene-arrow {side} busy")
            } else {
                format!("scene-arrow {side}")
            }
        }
    };

    view! {
        <div class="scene-navigation">
            <button class=arrow_class("left") on:click=on_prev aria-label="Previous point">"\u{2039}"</button>
            <button class=arrow_class("right") on:click=on_next aria-label="Next point">"\u{203A}"</button>
        </div>
    }
}
