use leptos::prelude::*;
use wasm_bindgen_futures::JsFuture;
use crate::state::AppState;

const INTRO_SRC: &str = "videos/start-scene.mp4";

/// Title card and intro clip played before the room. The room mounts when
/// the clip ends, or straight away if it cannot play.
#[component]
pub fn StartScene() -> impl IntoView {
    let state = expect_context::<AppState>();
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let playing = RwSignal::new(false);

    let finish = move || state.intro_done.set(true);

    let on_start = move |_: web_sys::MouseEvent| {
        if playing.get_untracked() {
            return;
        }
        playing.set(true);
        let Some(video) = video_ref.get_untracked() else {
            finish();
            return;
        };
        video.set_current_time(0.0);
        match video.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("intro: playback refused, skipping: {e:?}");
                    finish();
                }
            }),
            Err(e) => {
                log::warn!("intro: play failed, skipping: {e:?}");
                finish();
            }
        }
    };

    let overlay_class = move || if playing.get() { "start-overlay leaving" } else { "start-overlay" };

    view! {
        <div class="start-scene">
            <video
                class="start-video"
                node_ref=video_ref
                src=INTRO_SRC
                muted=true
                playsinline=true
                preload="auto"
                on:ended=move |_| finish()
                on:error=move |_| {
                    if playing.get_untracked() {
                        finish();
                    }
                }
            ></video>
            <div class=overlay_class>
                <h1 class="start-title">"Welcome to the Journey"</h1>
                <p class="start-subtitle">"Experience the cinematic adventure"</p>
                <button class="start-button" on:click=on_start>"Begin Your Journey"</button>
            </div>
        </div>
    }
}
