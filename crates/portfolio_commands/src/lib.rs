//! Built-in terminal commands for the portfolio site and the wiring that connects them to the
//! shared store and host services.
//!
//! - [`config`] loads the embedded [`SiteConfig`].
//! - [`content`] is the leaf data module (directories, files, the hidden challenge).
//! - [`builtin_registry`] assembles the command table.
//! - [`StoreShellHost`] implements the terminal capabilities over [`Store`] and
//!   [`HostServices`].

use std::rc::Rc;

use platform_host::HostServices;
use portfolio_store::Store;
use terminal_shell::{RegistryError, ShellEngine};

mod commands;
pub mod config;
pub mod content;
mod host;

pub use commands::builtin_registry;
pub use config::{ConfigError, SiteConfig};
pub use host::StoreShellHost;

/// Builds the interpreter used by the terminal widget.
pub fn build_engine(
    store: Store,
    services: HostServices,
    config: Rc<SiteConfig>,
) -> Result<ShellEngine, RegistryError> {
    let registry = builtin_registry(config)?;
    Ok(ShellEngine::new(
        registry,
        Rc::new(StoreShellHost::new(store, services)),
    ))
}

#[cfg(test)]
mod testing {
    use std::rc::Rc;

    use platform_host::{
        HostServices, HostStrategy, LocalPoolScheduler, RecordingExternalUrlService,
        RecordingNavigationService, RecordingThemeService,
    };
    use portfolio_store::Store;
    use terminal_contract::ExecutionSummary;
    use terminal_shell::ShellEngine;

    use crate::{build_engine, SiteConfig};

    pub(crate) struct TestTerminal {
        pub store: Store,
        pub navigation: RecordingNavigationService,
        pub theme: RecordingThemeService,
        pub engine: ShellEngine,
    }

    impl TestTerminal {
        pub fn new() -> Self {
            let store = Store::global();
            store.reset();
            let navigation = RecordingNavigationService::default();
            let theme = RecordingThemeService::default();
            let services = HostServices {
                navigation: Rc::new(navigation.clone()),
                theme: Rc::new(theme.clone()),
                external_urls: Rc::new(RecordingExternalUrlService::default()),
                scheduler: Rc::new(LocalPoolScheduler::new()),
                host_strategy: HostStrategy::Headless,
            };
            let engine = build_engine(store.clone(), services, Rc::new(SiteConfig::embedded()))
                .expect("builtin registry");
            Self {
                store,
                navigation,
                theme,
                engine,
            }
        }

        pub async fn run(&self, line: &str) -> ExecutionSummary {
            self.engine.run_line(line).await
        }

        pub fn lines(&self) -> Vec<String> {
            self.store.read(|state| state.terminal.lines.clone())
        }
    }
}
