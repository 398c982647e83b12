//! Document theme adapter backed by a `data-theme` attribute and `localStorage`.

use platform_host::ThemeService;
use terminal_contract::ThemeMode;

/// `localStorage` key holding the last applied theme token.
pub const THEME_PREF_KEY: &str = "portfolio.theme";

#[derive(Debug, Clone, Copy, Default)]
/// Applies themes to `<html data-theme=...>` and remembers the choice.
pub struct WebThemeService;

impl ThemeService for WebThemeService {
    fn set_theme(&self, mode: ThemeMode) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(root) = window.document().and_then(|doc| doc.document_element()) {
                let _ = root.set_attribute("data-theme", mode.as_str());
            }
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(THEME_PREF_KEY, mode.as_str());
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = mode;
        }
    }
}

/// Reads the remembered theme, if any.
pub fn load_saved_theme() -> Option<ThemeMode> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        let raw = storage.get_item(THEME_PREF_KEY).ok().flatten()?;
        ThemeMode::parse(&raw)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
