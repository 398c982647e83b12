//! Capability bundle handed to command handlers.

use std::{cell::RefCell, rc::Rc};

use futures::future::LocalBoxFuture;
use platform_host::{TaskFuture, TaskScheduler};
use terminal_contract::ThemeMode;

use crate::CommandRegistry;

/// Everything a command may do outside its own output.
///
/// The application implements this over its shared store and host services; tests implement it
/// in memory.
pub trait ShellHost {
    /// Appends lines to the visible terminal buffer.
    fn append_lines(&self, lines: Vec<String>);

    /// Empties the visible buffer and the input box.
    fn clear(&self);

    /// Masks or unmasks the input box.
    fn set_password_mode(&self, enabled: bool);

    /// Pushes an in-site route.
    fn navigate(&self, path: &str);

    /// Reloads the page.
    fn reload(&self);

    /// Applies a color scheme.
    fn set_theme(&self, mode: ThemeMode);

    /// Flips the matrix-rain effect and returns the new value.
    fn toggle_matrix(&self) -> bool;

    /// Current matrix-rain state.
    fn matrix_enabled(&self) -> bool;

    /// Flips the system monitor and returns the new value.
    fn toggle_system_monitor(&self) -> bool;

    /// Replaces the input box contents.
    fn set_input(&self, input: &str);

    /// Submitted commands, oldest first.
    fn history(&self) -> Vec<String>;

    /// Opens a link outside the site.
    fn open_external(&self, url: &str) -> LocalBoxFuture<'static, Result<(), String>>;

    /// Event-loop scheduler used for spawned executions and simulated delays.
    fn scheduler(&self) -> Rc<dyn TaskScheduler>;

    /// Short name of the environment the shell runs in.
    fn host_label(&self) -> &'static str {
        "headless"
    }
}

#[derive(Clone)]
pub(crate) enum OutputSink {
    Terminal,
    Buffer(Rc<RefCell<Vec<String>>>),
}

impl OutputSink {
    pub(crate) fn buffer() -> Self {
        Self::Buffer(Rc::new(RefCell::new(Vec::new())))
    }

    pub(crate) fn take_buffered(&self) -> Option<Vec<String>> {
        match self {
            Self::Terminal => None,
            Self::Buffer(lines) => Some(std::mem::take(&mut *lines.borrow_mut())),
        }
    }
}

/// Per-invocation context.
///
/// Output printed here goes to the terminal for the last pipeline stage and into the next
/// stage's raw input otherwise.
#[derive(Clone)]
pub struct CommandContext {
    /// Name the command was invoked as.
    pub name: String,
    /// Arguments after the name.
    pub args: Vec<String>,
    /// Output of the previous stage joined with `\n`, when this stage is piped into.
    pub raw_input: Option<String>,
    pub(crate) output: OutputSink,
    pub(crate) host: Rc<dyn ShellHost>,
    pub(crate) registry: CommandRegistry,
}

impl CommandContext {
    /// Emits one output line.
    pub fn print(&self, line: impl Into<String>) {
        self.print_lines([line.into()]);
    }

    /// Emits several output lines in order.
    pub fn print_lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return;
        }
        match &self.output {
            OutputSink::Terminal => self.host.append_lines(lines),
            OutputSink::Buffer(buffer) => buffer.borrow_mut().extend(lines),
        }
    }

    /// Piped input when present, otherwise the arguments joined with single spaces.
    pub fn input_text(&self) -> String {
        match &self.raw_input {
            Some(raw) => raw.clone(),
            None => self.args.join(" "),
        }
    }

    /// The registry this command was resolved from.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Empties the terminal.
    pub fn clear(&self) {
        self.host.clear();
    }

    /// Masks or unmasks input.
    pub fn set_password_mode(&self, enabled: bool) {
        self.host.set_password_mode(enabled);
    }

    /// Pushes an in-site route.
    pub fn navigate(&self, path: &str) {
        self.host.navigate(path);
    }

    /// Reloads the page.
    pub fn reload(&self) {
        self.host.reload();
    }

    /// Applies a color scheme.
    pub fn set_theme(&self, mode: ThemeMode) {
        self.host.set_theme(mode);
    }

    /// Flips the matrix effect; returns the new value.
    pub fn toggle_matrix(&self) -> bool {
        self.host.toggle_matrix()
    }

    /// Current matrix-rain state.
    pub fn matrix_enabled(&self) -> bool {
        self.host.matrix_enabled()
    }

    /// Flips the system monitor; returns the new value.
    pub fn toggle_system_monitor(&self) -> bool {
        self.host.toggle_system_monitor()
    }

    /// Replaces the input box contents.
    pub fn set_input(&self, input: &str) {
        self.host.set_input(input);
    }

    /// Submitted commands, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.host.history()
    }

    /// Opens a link outside the site.
    pub fn open_external(&self, url: &str) -> LocalBoxFuture<'static, Result<(), String>> {
        self.host.open_external(url)
    }

    /// Short name of the hosting environment.
    pub fn host_label(&self) -> &'static str {
        self.host.host_label()
    }

    /// Resolves after `duration_ms`.
    pub fn delay(&self, duration_ms: u32) -> TaskFuture {
        self.host.scheduler().sleep(duration_ms)
    }
}
