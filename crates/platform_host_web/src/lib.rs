//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Every adapter compiles on native targets too; outside `wasm32` they degrade to no-ops so the
//! workspace can be checked and tested without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factory for runtime wiring.
pub mod adapters;
pub mod audio;
pub mod external_url;
pub mod navigation;
pub mod scheduler;
pub mod theme;

pub use adapters::build_host_services;
pub use audio::WebAudioElement;
pub use external_url::WebExternalUrlService;
pub use navigation::WebNavigationService;
pub use scheduler::WebScheduler;
pub use theme::{load_saved_theme, WebThemeService, THEME_PREF_KEY};
