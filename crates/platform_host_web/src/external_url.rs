//! External URL adapter that opens links in a new tab.

use platform_host::{ExternalUrlFuture, ExternalUrlService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser external URL adapter backed by `window.open(url, "_blank")`.
pub struct WebExternalUrlService;

impl ExternalUrlService for WebExternalUrlService {
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
                window
                    .open_with_url_and_target(url, "_blank")
                    .map_err(|e| format!("window.open failed: {e:?}"))?;
                Ok(())
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = url;
                Ok(())
            }
        })
    }
}
