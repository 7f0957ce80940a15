use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::components::highlights;
use crate::engine;
use crate::state::AppState;

const SAVE_NOTICE_MS: i32 = 2_000;

#[component]
pub fn EditModeToggle() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_toggle = move |_: web_sys::MouseEvent| {
        let on = !state.edit_mode.get_untracked();
        state.edit_mode.set(on);
        let dragging = engine::dispatch(&state, |room| {
            room.set_edit_mode(on);
            room.is_dragging()
        });
        if dragging != Some(true) {
            highlights::release_drag();
        }
    };

    view! {
        <button
            class=move || if state.edit_mode.get() { "edit-toggle active" } else { "edit-toggle" }
            on:click=on_toggle
            title=move || if state.edit_mode.get() { "Finish editing" } else { "Move hotspots" }
        >
            "\u{270E}"
        </button>
    }
}

/// Shown while editing: reset or promote the current layout.
#[component]
pub fn EditControls() -> impl IntoView {
    let state = expect_context::<AppState>();
    let notice_gen = StoredValue::new(0u32);

    let on_reset = move |_: web_sys::MouseEvent| {
        engine::dispatch(&state, |room| {
            room.reset_positions();
            room.reset_navigation_targets();
        });
        highlights::release_drag();
    };

    let on_save = move |_: web_sys::MouseEvent| {
        engine::dispatch(&state, |room| room.save_as_defaults());
        log::info!("hotspot layout saved as defaults");

        notice_gen.update_value(|g| *g += 1);
        let shown_gen = notice_gen.get_value();
        state.save_notice.set(true);
        let hide = Closure::once(move || {
            // a later save restarts the countdown
            if notice_gen.get_value() == shown_gen {
                state.save_notice.set(false);
            }
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.as_ref().unchecked_ref(),
                SAVE_NOTICE_MS,
            );
        }
        hide.forget();
    };

    move || {
        state.edit_mode.get().then(|| view! {
            <div class="edit-mode-indicators">
                <span class="edit-badge">"Edit mode: drag hotspots to reposition"</span>
                <button class="edit-action" on:click=on_reset>"Reset positions"</button>
                <button class="edit-action" on:click=on_save>"Save as defaults"</button>
            </div>
            {move || state.save_notice.get().then(|| view! {
                <div class="save-notification">"\u{2713} Positions saved as defaults!"</div>
            })}
        })
    }
}
