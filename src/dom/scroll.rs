use room_core::{ScrollBehavior, ScrollProvider};
use web_sys::{HtmlElement, ScrollToOptions};

/// The window scrolling over the tall room container.
pub struct WindowScroll {
    container: HtmlElement,
}

impl WindowScroll {
    pub fn new(container: HtmlElement) -> Self {
        Self { container }
    }
}

impl ScrollProvider for WindowScroll {
    fn content_height(&self) -> f64 {
        self.container.offset_height() as f64
    }

    fn viewport_height(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn offset(&self) -> f64 {
        let scroll_y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
        scroll_y - self.container.offset_top() as f64
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        let Some(window) = web_sys::window() else { return };
        let opts = ScrollToOptions::new();
        opts.set_top(offset + self.container.offset_top() as f64);
        opts.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        window.scroll_to_with_scroll_to_options(&opts);
    }
}
