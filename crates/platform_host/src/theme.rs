//! Theme application contracts.

use std::{cell::RefCell, rc::Rc};

use terminal_contract::ThemeMode;

/// Applies a color scheme to the host document.
pub trait ThemeService {
    /// Applies `mode`.
    fn set_theme(&self, mode: ThemeMode);
}

#[derive(Debug, Clone, Copy, Default)]
/// Theme service for headless targets.
pub struct NoopThemeService;

impl ThemeService for NoopThemeService {
    fn set_theme(&self, _mode: ThemeMode) {}
}

#[derive(Debug, Clone, Default)]
/// Theme service that records applied modes.
pub struct RecordingThemeService {
    applied: Rc<RefCell<Vec<ThemeMode>>>,
}

impl RecordingThemeService {
    /// Modes applied so far, oldest first.
    pub fn applied(&self) -> Vec<ThemeMode> {
        self.applied.borrow().clone()
    }
}

impl ThemeService for RecordingThemeService {
    fn set_theme(&self, mode: ThemeMode) {
        self.applied.borrow_mut().push(mode);
    }
}
