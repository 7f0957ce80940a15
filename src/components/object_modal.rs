use leptos::prelude::*;
use leptos::ev;
use crate::dom;
use crate::engine;
use crate::state::AppState;

#[component]
pub fn ObjectModal() -> impl IntoView {
    let state = expect_context::<AppState>();

    let close = move || {
        let now = dom::now_ms();
        engine::dispatch(&state, |room| room.close_modal(now));
    };

    let _ = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" && state.modal.get_untracked().is_some() {
            close();
        }
    });

    move || {
        state.modal.get().map(|info| {
            let features = info
                .features
                .iter()
                .map(|f| view! { <li>{*f}</li> })
                .collect::<Vec<_>>();
            view! {
                <div class="modal-backdrop" on:click=move |_| close()>
                    <div class="object-modal" on:click=|e: web_sys::MouseEvent| e.stop_propagation()>
                        <button class="close-button" on:click=move |_| close() aria-label="Close">"\u{2715}"</button>
                        <div class="modal-header">
                            <span class="modal-icon">{info.icon}</span>
                            <h2>{info.name}</h2>
                        </div>
                        <p class="modal-description">{info.description}</p>
                        <ul class="modal-features">{features}</ul>
                        <p class="modal-details">{info.details}</p>
                    </div>
                </div>
            }
        })
    }
}
