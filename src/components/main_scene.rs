use leptos::prelude::*;
use leptos::ev;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent};
use room_core::{Point2, Rect};
use crate::components::edit_controls::EditControls;
use crate::components::highlights::Highlights;
use crate::components::navigation_map::NavigationMap;
use crate::components::scene_navigation::SceneNavigation;
use crate::components::scroll_hint::ScrollHint;
use crate::dom::{self, frame_loop};
use crate::dom::scroll::WindowScroll;
use crate::dom::video::VideoElement;
use crate::engine;
use crate::state::AppState;

const VIDEO_SRC: &str = "videos/main-scene.mp4";

pub fn element_rect(el: &web_sys::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

#[component]
pub fn MainScene() -> impl IntoView {
    let state = expect_context::<AppState>();
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let viewport_ref = NodeRef::<leptos::html::Div>::new();
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let started = StoredValue::new(false);

    // Build the engine once both elements exist, then drive it every frame
    Effect::new(move || {
        let (Some(container), Some(video)) = (container_ref.get(), video_ref.get()) else { return };
        if started.get_value() {
            return;
        }
        started.set_value(true);

        let now = dom::now_ms();
        engine::install(&state, now);
        let container: HtmlElement = container.unchecked_into();
        let mobile = state.is_mobile.get_untracked();
        engine::dispatch(&state, |room| {
            room.set_mobile(mobile, now);
            room.attach_media(VideoElement(video));
            room.attach_scroll(WindowScroll::new(container), now);
        });

        let mut was_settled = false;
        frame_loop::start(move |now| {
            let frame = engine::dispatch(&state, |room| {
                room.tick(now);
                (room.parallax(now), room.is_parallax_settled(now))
            });
            let Some((t, settled)) = frame else { return };
            // once settled the transform holds until the next pointer input
            if !(settled && was_settled) && state.parallax.get_untracked() != t {
                state.parallax.set(t);
            }
            was_settled = settled;
        });
    });

    on_cleanup(move || {
        frame_loop::stop();
        engine::dispatch(&state, |room| {
            room.cancel_idle();
            room.detach_media();
            room.detach_scroll();
        });
    });

    let _ = window_event_listener(ev::scroll, move |_| {
        engine::dispatch(&state, |room| room.on_scroll(dom::now_ms()));
    });
    let _ = window_event_listener(ev::keydown, move |_| {
        engine::dispatch(&state, |room| room.on_activity(dom::now_ms()));
    });
    let _ = window_event_listener(ev::touchstart, move |_| {
        engine::dispatch(&state, |room| room.on_activity(dom::now_ms()));
    });
    let _ = window_event_listener(ev::resize, move |_| {
        let mobile = dom::is_mobile_viewport();
        if mobile != state.is_mobile.get_untracked() {
            state.is_mobile.set(mobile);
            engine::dispatch(&state, |room| room.set_mobile(mobile, dom::now_ms()));
        }
        // content height changed; resample
        engine::dispatch(&state, |room| room.on_scroll(dom::now_ms()));
    });

    let on_pointermove = move |ev: PointerEvent| {
        if ev.pointer_type() != "mouse" {
            return;
        }
        let Some(viewport) = viewport_ref.get_untracked() else { return };
        let bounds = element_rect(&viewport);
        let pointer = Point2::new(ev.client_x() as f64, ev.client_y() as f64);
        engine::dispatch(&state, |room| room.on_pointer_move(pointer, bounds, dom::now_ms()));
    };

    let on_pointerleave = move |_: PointerEvent| {
        engine::dispatch(&state, |room| room.on_pointer_leave(dom::now_ms()));
    };

    let on_loadedmetadata = move |_: web_sys::Event| {
        state.video_ready.set(true);
        engine::dispatch(&state, |room| room.on_media_ready());
    };

    let video_style = move || {
        let t = state.parallax.get();
        format!(
            "transform: scale({:.4}) translateX({:.3}%); object-position: {:.3}% {:.3}%;",
            t.scale,
            t.offset_x,
            50.0 + t.offset_x * 0.5,
            50.0 + t.offset_y,
        )
    };

    view! {
        <div class="main-scene" node_ref=container_ref>
            <div
                class="scene-viewport"
                node_ref=viewport_ref
                on:pointermove=on_pointermove
                on:pointerleave=on_pointerleave
            >
                <video
                    class="main-video"
                    node_ref=video_ref
                    src=VIDEO_SRC
                    muted=true
                    playsinline=true
                    preload="auto"
                    style=video_style
                    on:loadedmetadata=on_loadedmetadata
                ></video>
                <Highlights />
                <NavigationMap />
                <SceneNavigation />
                <EditControls />
                <ScrollHint />
                {move || (!state.video_ready.get()).then(|| view! {
                    <div class="loading-screen">"Loading the room…"</div>
                })}
            </div>
        </div>
    }
}
