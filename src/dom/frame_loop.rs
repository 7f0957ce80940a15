use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

thread_local! {
    static FRAME_HANDLE: RefCell<Option<i32>> = RefCell::new(None);
    static RUNNING: RefCell<bool> = RefCell::new(false);
}

/// Calls `on_frame(now_ms)` on every animation frame until [`stop`].
/// `now_ms` comes from [`super::now_ms`], the clock event handlers use.
pub fn start(mut on_frame: impl FnMut(u64) + 'static) {
    stop();
    let Some(window) = web_sys::window() else { return };
    RUNNING.with(|r| *r.borrow_mut() = true);

    let cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let cb_clone = cb.clone();

    *cb.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        if !RUNNING.with(|r| *r.borrow()) {
            return;
        }
        on_frame(super::now_ms());

        let Some(window) = web_sys::window() else { return };
        let next = cb_clone
            .borrow()
            .as_ref()
            .and_then(|c| window.request_animation_frame(c.as_ref().unchecked_ref()).ok());
        FRAME_HANDLE.with(|h| *h.borrow_mut() = next);
    }));

    let handle = cb
        .borrow()
        .as_ref()
        .and_then(|c| window.request_animation_frame(c.as_ref().unchecked_ref()).ok());
    FRAME_HANDLE.with(|h| *h.borrow_mut() = handle);
}

pub fn stop() {
    RUNNING.with(|r| *r.borrow_mut() = false);
    FRAME_HANDLE.with(|h| {
        if let Some(handle) = h.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    });
}
