use room_core::MediaResource;
use web_sys::HtmlVideoElement;

/// The scrubbed `<video>`. `duration` is NaN until metadata arrives.
pub struct VideoElement(pub HtmlVideoElement);

impl MediaResource for VideoElement {
    fn duration(&self) -> Option<f64> {
        let d = self.0.duration();
        d.is_finite().then_some(d)
    }

    fn current_time(&self) -> f64 {
        self.0.current_time()
    }

    fn set_current_time(&mut self, secs: f64) {
        self.0.set_current_time(secs);
    }
}
