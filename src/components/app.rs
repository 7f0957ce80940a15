use leptos::prelude::*;
use crate::state::AppState;
use crate::components::instructions_modal::InstructionsModal;
use crate::components::main_scene::MainScene;
use crate::components::object_modal::ObjectModal;
use crate::components::start_scene::StartScene;
use crate::dom;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    state.is_mobile.set(dom::is_mobile_viewport());
    provide_context(state);

    view! {
        <div class="app">
            <Show when=move || state.intro_done.get() fallback=|| view! { <StartScene /> }>
                <MainScene />
                <ObjectModal />
                <InstructionsModal />
            </Show>
        </div>
    }
}
