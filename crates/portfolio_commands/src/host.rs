//! [`ShellHost`] over the shared store and the host service bundle.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use platform_host::{HostServices, TaskScheduler};
use portfolio_store::Store;
use terminal_contract::ThemeMode;
use terminal_shell::ShellHost;

/// Routes terminal capabilities to the [`Store`] and the injected host services.
///
/// Navigation and theme changes go to both: the service performs the side effect, the store
/// records the result for every other widget.
#[derive(Clone)]
pub struct StoreShellHost {
    store: Store,
    services: HostServices,
}

impl StoreShellHost {
    pub fn new(store: Store, services: HostServices) -> Self {
        Self { store, services }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl ShellHost for StoreShellHost {
    fn append_lines(&self, lines: Vec<String>) {
        self.store.append_lines(lines);
    }

    fn clear(&self) {
        self.store.clear_terminal();
    }

    fn set_password_mode(&self, enabled: bool) {
        self.store.set_password_mode(enabled);
    }

    fn navigate(&self, path: &str) {
        self.services.navigation.push(path);
        self.store.set_route(path);
    }

    fn reload(&self) {
        self.services.navigation.reload();
    }

    fn set_theme(&self, mode: ThemeMode) {
        self.services.theme.set_theme(mode);
        self.store.set_theme(mode);
    }

    fn toggle_matrix(&self) -> bool {
        self.store.toggle_matrix()
    }

    fn matrix_enabled(&self) -> bool {
        self.store.read(|state| state.ui.matrix_enabled)
    }

    fn toggle_system_monitor(&self) -> bool {
        self.store.toggle_system_monitor()
    }

    fn set_input(&self, input: &str) {
        self.store.set_input(input);
    }

    fn history(&self) -> Vec<String> {
        self.store.read(|state| state.terminal.history.clone())
    }

    fn open_external(&self, url: &str) -> LocalBoxFuture<'static, Result<(), String>> {
        let service = self.services.external_urls.clone();
        let url = url.to_string();
        Box::pin(async move { service.open_url(&url).await })
    }

    fn scheduler(&self) -> Rc<dyn TaskScheduler> {
        self.services.scheduler.clone()
    }

    fn host_label(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }
}
