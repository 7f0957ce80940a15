use leptos::prelude::*;
use crate::state::{AppState, HintState};

#[component]
pub fn ScrollHint() -> impl IntoView {
    let state = expect_context::<AppState>();

    move || match state.hint.get() {
        HintState::Hidden => None,
        shown => {
            let class = if shown == HintState::Leaving { "scroll-hint leaving" } else { "scroll-hint" };
            Some(view! {
                <div class=class>
                    <span class="scroll-hint-mouse"><span class="scroll-hint-wheel"></span></span>
                    <span class="scroll-hint-text">"Scroll to explore"</span>
                </div>
            })
        }
    }
}
