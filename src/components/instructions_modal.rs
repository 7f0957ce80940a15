use leptos::prelude::*;
use leptos::ev;
use room_core::content::INSTRUCTIONS;
use crate::dom;
use crate::engine;
use crate::state::AppState;

/// The first-visit guide. Open and closed through the engine so the idle
/// hint stays away while it is up.
#[component]
pub fn InstructionsModal() -> impl IntoView {
    let state = expect_context::<AppState>();
    let step = RwSignal::new(0usize);
    let last = INSTRUCTIONS.len().saturating_sub(1);

    let close = move || {
        let now = dom::now_ms();
        engine::dispatch(&state, |room| room.close_modal(now));
        step.set(0);
    };

    let _ = window_event_listener(ev::keydown, move |e| {
        if !state.instructions_open.get_untracked() {
            return;
        }
        match e.key().as_str() {
            "Escape" => close(),
            "ArrowRight" => step.update(|s| *s = (*s + 1).min(last)),
            "ArrowLeft" => step.update(|s| *s = s.saturating_sub(1)),
            _ => {}
        }
    });

    let on_next = move |_: web_sys::MouseEvent| {
        if step.get_untracked() >= last {
            close();
        } else {
            step.update(|s| *s += 1);
        }
    };
    let on_prev = move |_: web_sys::MouseEvent| step.update(|s| *s = s.saturating_sub(1));

    move || {
        state.instructions_open.get().then(|| {
            let current = step.get();
            let Some(info) = INSTRUCTIONS.get(current) else {
                return view! { <div class="instructions-empty"></div> }.into_any();
            };
            let dots = (0..INSTRUCTIONS.len())
                .map(|i| {
                    let cls = if i == current {
                        "progress-dot active"
                    } else if i < current {
                        "progress-dot completed"
                    } else {
                        "progress-dot"
                    };
                    view! { <span class=cls on:click=move |_| step.set(i)></span> }
                })
                .collect::<Vec<_>>();
            view! {
                <div class="modal-backdrop" on:click=move |_| close()>
                    <div class="instructions-modal" on:click=|e: web_sys::MouseEvent| e.stop_propagation()>
                        <button class="skip-button" on:click=move |_| close()>"Skip"</button>
                        <div class="instruction-icon">{info.icon}</div>
                        <h2 class="instruction-title">{info.title}</h2>
                        <p class="instruction-description">{info.description}</p>
                        <div class="instruction-details">"\u{1F4A1} "{info.details}</div>
                        <div class="progress-text">
                            {format!("Step {} of {}", current + 1, INSTRUCTIONS.len())}
                        </div>
                        <div class="progress-dots">{dots}</div>
                        <div class="instructions-navigation">
                            <button class="nav-button prev" on:click=on_prev disabled={current == 0}>
                                "Previous"
                            </button>
                            <button
                                class={if current == last { "nav-button next primary" } else { "nav-button next" }}
                                on:click=on_next
                            >
                                {if current == last { "Get Started!" } else { "Next" }}
                            </button>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        })
    }
}
