//! History-API router adapter.

use platform_host::NavigationService;

#[derive(Debug, Clone, Copy, Default)]
/// Pushes routes with `history.pushState` and announces them with a `popstate` event so the
/// page router re-renders.
pub struct WebNavigationService;

impl NavigationService for WebNavigationService {
    fn push(&self, path: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let pushed = window.history().and_then(|history| {
                history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
            });
            if pushed.is_err() {
                // History API refused the URL; fall back to a full navigation.
                let _ = window.location().set_href(path);
                return;
            }
            if let Ok(event) = web_sys::Event::new("popstate") {
                let _ = window.dispatch_event(&event);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = path;
        }
    }

    fn reload(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}
