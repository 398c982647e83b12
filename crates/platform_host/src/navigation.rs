//! Route navigation contracts.

use std::{cell::RefCell, rc::Rc};

/// Router abstraction consumed by navigation commands.
pub trait NavigationService {
    /// Pushes a new in-site route such as `/blogs`.
    fn push(&self, path: &str);

    /// Reloads the current page.
    fn reload(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// Navigation service that ignores every request.
pub struct NoopNavigationService;

impl NavigationService for NoopNavigationService {
    fn push(&self, _path: &str) {}

    fn reload(&self) {}
}

#[derive(Debug, Clone, Default)]
/// In-memory navigation service that records pushed routes and reload requests.
pub struct RecordingNavigationService {
    pushed: Rc<RefCell<Vec<String>>>,
    reloads: Rc<RefCell<usize>>,
}

impl RecordingNavigationService {
    /// Routes pushed so far, oldest first.
    pub fn pushed(&self) -> Vec<String> {
        self.pushed.borrow().clone()
    }

    /// Number of reload requests.
    pub fn reload_count(&self) -> usize {
        *self.reloads.borrow()
    }
}

impl NavigationService for RecordingNavigationService {
    fn push(&self, path: &str) {
        self.pushed.borrow_mut().push(path.to_string());
    }

    fn reload(&self) {
        *self.reloads.borrow_mut() += 1;
    }
}
