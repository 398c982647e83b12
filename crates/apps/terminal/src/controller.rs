//! Headless terminal behavior: prompt echo, input lock, history navigation, completion and the
//! intro sequence. The Leptos component only forwards DOM events here.

use std::rc::Rc;

use platform_host::TaskScheduler;
use portfolio_commands::SiteConfig;
use portfolio_store::Store;
use terminal_contract::CompletionItem;
use terminal_shell::ShellEngine;

/// Direction of a history step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Towards older entries (ArrowUp).
    Older,
    /// Towards newer entries and finally the empty prompt (ArrowDown).
    Newer,
}

#[derive(Clone)]
/// Drives one terminal widget over the shared store.
pub struct TerminalController {
    store: Store,
    engine: ShellEngine,
    scheduler: Rc<dyn TaskScheduler>,
    prompt: Rc<str>,
    intro_lines: Rc<[String]>,
    intro_step_delay_ms: u32,
}

impl TerminalController {
    /// Creates a controller using the prompt and intro settings from `config`.
    pub fn new(
        store: Store,
        engine: ShellEngine,
        scheduler: Rc<dyn TaskScheduler>,
        config: &SiteConfig,
    ) -> Self {
        Self {
            store,
            engine,
            scheduler,
            prompt: config.prompt.prefix().into(),
            intro_lines: config.terminal.intro_lines.clone().into(),
            intro_step_delay_ms: config.terminal.intro_step_delay_ms,
        }
    }

    /// The store this terminal renders.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Prompt prefix, e.g. `guest@portfolio:~$`.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether the input box accepts keystrokes.
    pub fn input_enabled(&self) -> bool {
        self.store
            .read(|state| state.terminal.intro_done && !state.terminal.busy)
    }

    /// Mirrors the input box into the store.
    pub fn set_input(&self, input: impl Into<String>) {
        self.store.set_input(input);
    }

    /// Submits `line` as typed.
    ///
    /// Ignored while a command's synchronous part is still running. In password mode the line is
    /// echoed masked and never executed or recorded.
    pub fn submit(&self, line: &str) {
        let (busy, password_mode) = self
            .store
            .read(|state| (state.terminal.busy, state.terminal.password_mode));
        if busy {
            return;
        }

        if password_mode {
            let masked = "*".repeat(line.chars().count());
            self.store.append_line(format!("{} {masked}", self.prompt));
            self.store.set_input("");
            return;
        }

        let command = line.trim();
        if command.is_empty() {
            self.store.append_line(self.prompt.to_string());
            self.store.set_input("");
            return;
        }

        self.store
            .append_line(format!("{} {command}", self.prompt));
        self.store.push_history(command);
        self.store.set_input("");
        self.store.set_busy(true);
        let store = self.store.clone();
        self.engine
            .submit(command, move || {
                store.set_busy(false);
            });
    }

    /// Moves the history cursor and loads the selected entry into the input box.
    pub fn navigate_history(&self, direction: HistoryDirection) {
        let (history, cursor) = self.store.read(|state| {
            (
                state.terminal.history.clone(),
                state.terminal.history_cursor,
            )
        });
        if history.is_empty() {
            return;
        }

        let next = match (cursor, direction) {
            (None, HistoryDirection::Older) => Some(history.len() - 1),
            (Some(index), HistoryDirection::Older) => Some(index.saturating_sub(1)),
            (Some(index), HistoryDirection::Newer) if index + 1 < history.len() => {
                Some(index + 1)
            }
            (Some(_), HistoryDirection::Newer) => None,
            (None, HistoryDirection::Newer) => return,
        };

        self.store.set_history_cursor(next);
        match next.and_then(|index| history.get(index)) {
            Some(entry) => self.store.set_input(entry.clone()),
            None => self.store.set_input(""),
        };
    }

    /// Tab completion for the current input.
    ///
    /// A single candidate is applied to the input box and an empty list is returned; otherwise
    /// the candidates are returned for display and the input is left alone.
    pub fn complete(&self) -> Vec<CompletionItem> {
        let input = self.store.read(|state| state.terminal.input.clone());
        let items = self.engine.complete(&input);
        let [item] = items.as_slice() else {
            return items;
        };
        let head = input.trim_end_matches(|c: char| !c.is_whitespace());
        self.store.set_input(format!("{head}{} ", item.value));
        Vec::new()
    }

    /// Types out the intro lines once per store, then unlocks input.
    pub fn run_intro(&self) {
        if self.store.read(|state| state.terminal.intro_done) {
            return;
        }
        let store = self.store.clone();
        let scheduler = self.scheduler.clone();
        let lines = self.intro_lines.clone();
        let step_ms = self.intro_step_delay_ms;
        self.scheduler.spawn_local(Box::pin(async move {
            for line in lines.iter() {
                store.append_line(line.clone());
                scheduler.sleep(step_ms).await;
            }
            store.set_intro_done(true);
        }));
    }
}
