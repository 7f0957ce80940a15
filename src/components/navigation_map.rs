use leptos::prelude::*;
use crate::components::edit_controls::EditModeToggle;
use crate::dom;
use crate::engine;
use crate::state::AppState;

#[component]
pub fn NavigationMap() -> impl IntoView {
    let state = expect_context::<AppState>();
    let expanded = state.nav_expanded;

    let toggle = move |_: web_sys::MouseEvent| expanded.update(|v| *v = !*v);

    let map_class = move || {
        if expanded.get() { "navigation-map expanded" } else { "navigation-map" }
    };

    view! {
        <div class=map_class>
            <div class="navigation-controls">
                <HelpButton />
                <EditModeToggle />
                <button
                    class="burger-button"
                    on:click=toggle
                    aria-label=move || if expanded.get() { "Close navigation" } else { "Open navigation" }
                >
                    {move || if expanded.get() { "\u{2715}" } else { "\u{2630}" }}
                </button>
            </div>
            {move || expanded.get().then(|| view! { <PointsList /> })}
        </div>
    }
}

#[component]
fn HelpButton() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_click = move |_: web_sys::MouseEvent| {
        let now = dom::now_ms();
        engine::dispatch(&state, |room| room.open_instructions(now));
    };

    view! {
        <button class="help-button" on:click=on_click aria-label="Show help" title="Help">"?"</button>
    }
}

#[component]
fn PointsList() -> impl IntoView {
    let state = expect_context::<AppState>();

    let items = move || {
        let progress = state.progress.get();
        let active = state.active_id.get();
        let editing = state.edit_mode.get();
        state
            .points
            .get()
            .into_iter()
            .map(|point| {
                let is_active = active.as_deref() == Some(point.id.as_str());
                let in_range = point.range.contains(progress);
                let mut cls = String::from("navigation-point");
                if is_active {
                    cls.push_str(" active");
                }
                if in_range {
                    cls.push_str(" highlighted");
                }
                let id = point.id.clone();
                let on_click = move |_: web_sys::MouseEvent| {
                    let now = dom::now_ms();
                    engine::dispatch(&state, |room| room.navigate_to(&id, now));
                };
                // pins the jump target to wherever the room is scrolled now
                let pin_id = point.id.clone();
                let on_pin = move |_: web_sys::MouseEvent| {
                    engine::dispatch(&state, |room| {
                        let here = room.progress();
                        room.set_navigation_target(&pin_id, here)
                    });
                };
                let target_label = format!("{:.0}%", point.target * 100.0);
                view! {
                    <div class="navigation-row">
                        <button class=cls on:click=on_click title=point.description.clone()>
                            <span class="point-icon">{point.icon.clone()}</span>
                            <span class="point-name">{point.name.clone()}</span>
                            {is_active.then(|| view! { <div class="active-indicator"></div> })}
                        </button>
                        {editing.then(|| view! {
                            <button class="pin-target" on:click=on_pin title="Jump here from now on">
                                {target_label}" \u{1F4CC}"
                            </button>
                        })}
                    </div>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="navigation-points">
            <div class="navigation-header">
                <h3>"Navigation"</h3>
            </div>
            <div class="points-list">{items}</div>
        </div>
    }
}
