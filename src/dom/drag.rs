use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, PointerEvent};

/// Document-level `pointermove`/`pointerup` listeners for one drag.
///
/// The listeners live exactly as long as this value; dropping it removes
/// them from the document.
pub struct DragListeners {
    doc: Document,
    on_move: Closure<dyn FnMut(PointerEvent)>,
    on_up: Closure<dyn FnMut(PointerEvent)>,
}

impl DragListeners {
    pub fn attach(
        on_move: impl FnMut(PointerEvent) + 'static,
        on_up: impl FnMut(PointerEvent) + 'static,
    ) -> Option<Self> {
        let doc = web_sys::window()?.document()?;
        let on_move = Closure::<dyn FnMut(PointerEvent)>::new(on_move);
        let on_up = Closure::<dyn FnMut(PointerEvent)>::new(on_up);
        let move_fn = on_move.as_ref().unchecked_ref::<js_sys::Function>();
        let up_fn = on_up.as_ref().unchecked_ref::<js_sys::Function>();
        let _ = doc.add_event_listener_with_callback("pointermove", move_fn);
        let _ = doc.add_event_listener_with_callback_and_bool("pointerup", up_fn, true);
        let _ = doc.add_event_listener_with_callback_and_bool("pointercancel", up_fn, true);
        if let Some(body) = doc.body() {
            let _ = body.class_list().add_1("hotspot-dragging");
        }
        Some(Self { doc, on_move, on_up })
    }
}

impl Drop for DragListeners {
    fn drop(&mut self) {
        let move_fn = self.on_move.as_ref().unchecked_ref::<js_sys::Function>();
        let up_fn = self.on_up.as_ref().unchecked_ref::<js_sys::Function>();
        let _ = self.doc.remove_event_listener_with_callback("pointermove", move_fn);
        let _ = self.doc.remove_event_listener_with_callback_and_bool("pointerup", up_fn, true);
        let _ = self.doc.remove_event_listener_with_callback_and_bool("pointercancel", up_fn, true);
        if let Some(body) = self.doc.body() {
            let _ = body.class_list().remove_1("hotspot-dragging");
        }
    }
}
