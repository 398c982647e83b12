//! Typed host-capability contracts shared by the terminal, the store wiring, and the music
//! player.
//!
//! This crate is the API-first boundary for everything the interactive core needs from its
//! environment: route navigation, theme application, external links, task scheduling, and the
//! audio element. Concrete browser adapters live in `platform_host_web`; the in-memory adapters
//! here back headless runs and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod external_url;
pub mod host;
pub mod navigation;
pub mod scheduler;
pub mod theme;

pub use audio::{AudioCall, AudioElement, AudioError, AudioFuture, MemoryAudioElement};
pub use external_url::{
    ExternalUrlFuture, ExternalUrlService, NoopExternalUrlService, RecordingExternalUrlService,
};
pub use host::{HostServices, HostStrategy};
pub use navigation::{NavigationService, NoopNavigationService, RecordingNavigationService};
pub use scheduler::{LocalPoolScheduler, TaskFuture, TaskScheduler};
pub use theme::{NoopThemeService, RecordingThemeService, ThemeService};
