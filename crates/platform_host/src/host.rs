//! Shared host-bundle models for browser and headless composition.

use std::rc::Rc;

use crate::{
    ExternalUrlService, LocalPoolScheduler, NavigationService, NoopExternalUrlService,
    NoopNavigationService, NoopThemeService, TaskScheduler, ThemeService,
};

/// Stable host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed composition.
    Browser,
    /// In-memory composition for native runs and tests.
    Headless,
}

impl HostStrategy {
    /// Stable lowercase token, shown by the terminal's system summary.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Host service bundle injected into the terminal wiring and widgets.
///
/// All environment-specific service selection happens before this bundle is built, which keeps
/// the command table and widgets decoupled from browser adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// In-site router.
    pub navigation: Rc<dyn NavigationService>,
    /// Document theme applier.
    pub theme: Rc<dyn ThemeService>,
    /// New-tab link opener.
    pub external_urls: Rc<dyn ExternalUrlService>,
    /// Event-loop scheduler.
    pub scheduler: Rc<dyn TaskScheduler>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Bundle whose services do nothing; tasks run on a fresh [`LocalPoolScheduler`].
    pub fn headless() -> Self {
        Self {
            navigation: Rc::new(NoopNavigationService),
            theme: Rc::new(NoopThemeService),
            external_urls: Rc::new(NoopExternalUrlService),
            scheduler: Rc::new(LocalPoolScheduler::new()),
            host_strategy: HostStrategy::Headless,
        }
    }
}
