use std::rc::Rc;

use platform_host::{HostServices, HostStrategy};

use crate::{WebExternalUrlService, WebNavigationService, WebScheduler, WebThemeService};

/// Builds the browser host bundle.
pub fn build_host_services() -> HostServices {
    HostServices {
        navigation: Rc::new(WebNavigationService),
        theme: Rc::new(WebThemeService),
        external_urls: Rc::new(WebExternalUrlService),
        scheduler: Rc::new(WebScheduler),
        host_strategy: HostStrategy::Browser,
    }
}
