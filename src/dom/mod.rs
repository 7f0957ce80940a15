//! `web-sys` implementations of the engine's external interfaces.

pub mod drag;
pub mod frame_loop;
pub mod scroll;
pub mod storage;
pub mod video;

use std::cell::Cell;

thread_local! {
    static LAST_NOW: Cell<u64> = const { Cell::new(0) };
}

/// Milliseconds since page load, the clock every engine call is stamped
/// with, frames and input events alike. Never goes backwards.
pub fn now_ms() -> u64 {
    let sampled = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now().max(0.0) as u64)
        .unwrap_or(0);
    LAST_NOW.with(|last| {
        let now = advance(last.get(), sampled);
        last.set(now);
        now
    })
}

fn advance(last: u64, sampled: u64) -> u64 {
    last.max(sampled)
}

/// Narrow layouts get no idle hint.
pub fn is_mobile_viewport() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(max-width: 768px)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}
