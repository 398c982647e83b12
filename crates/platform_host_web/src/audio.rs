//! `<audio>` element adapter.

use platform_host::{AudioElement, AudioError, AudioFuture};
use web_sys::HtmlAudioElement;

/// [`AudioElement`] over a mounted `HtmlAudioElement`.
#[derive(Debug, Clone)]
pub struct WebAudioElement {
    element: HtmlAudioElement,
}

impl WebAudioElement {
    /// Wraps a mounted element.
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }
}

impl AudioElement for WebAudioElement {
    fn load(&self, src: &str) {
        self.element.set_src(src);
        self.element.load();
    }

    fn play(&self) -> AudioFuture {
        match self.element.play() {
            Ok(promise) => Box::pin(async move {
                wasm_bindgen_futures::JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| AudioError::PlayRejected(format!("{err:?}")))
            }),
            Err(err) => Box::pin(futures::future::ready(Err(AudioError::PlayRejected(
                format!("{err:?}"),
            )))),
        }
    }

    fn pause(&self) {
        let _ = self.element.pause();
    }

    fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume.clamp(0.0, 1.0));
    }

    fn seek(&self, seconds: f64) {
        self.element.set_current_time(seconds.max(0.0));
    }
}
