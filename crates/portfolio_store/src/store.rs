//! Process-wide observable container around [`AppState`].

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use terminal_contract::ThemeMode;

use crate::{
    model::{AppState, ModalId, Shelf},
    reducer::{reduce_store, StoreAction},
};

type Listener = Rc<dyn Fn(&AppState)>;

struct StoreInner {
    state: RefCell<Rc<AppState>>,
    next_token: Cell<u64>,
    subscribers: RefCell<BTreeMap<u64, Listener>>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
}

thread_local! {
    static GLOBAL_STORE: Store = Store {
        inner: Rc::new(StoreInner {
            state: RefCell::new(Rc::new(AppState::default())),
            next_token: Cell::new(1),
            subscribers: RefCell::new(BTreeMap::new()),
            notifying: Cell::new(false),
            dirty: Cell::new(false),
        }),
    };
}

#[derive(Clone)]
/// Handle to the shared store. Clones refer to the same state.
///
/// Every mutation goes through [`Store::dispatch`] (or one of the named setters wrapping it), so
/// a setter only touches the fields it names. Subscribers run synchronously after each effective
/// change; a mutation made from inside a subscriber schedules one more notification round with
/// the newest snapshot instead of recursing.
pub struct Store {
    inner: Rc<StoreInner>,
}

/// Drop guard that removes its listener from the store.
pub struct Subscription {
    inner: Weak<StoreInner>,
    token: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.subscribers.borrow_mut().remove(&self.token);
        }
    }
}

struct NotifyingGuard<'a>(&'a StoreInner);

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.notifying.set(false);
        self.0.dirty.set(false);
    }
}

impl Store {
    /// Returns the store shared by every widget on the current thread.
    pub fn global() -> Self {
        GLOBAL_STORE.with(Clone::clone)
    }

    /// Current state. The returned snapshot does not observe later mutations.
    pub fn snapshot(&self) -> Rc<AppState> {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state without cloning the snapshot handle out.
    pub fn read<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.inner.state.borrow())
    }

    /// Applies `action`; subscribers are notified only if the state changed.
    pub fn dispatch(&self, action: StoreAction) -> bool {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            reduce_store(Rc::make_mut(&mut state), action)
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// Registers `listener` for every effective change. It is not called for the current state.
    pub fn subscribe(&self, listener: impl Fn(&AppState) + 'static) -> Subscription {
        let token = self.inner.next_token.get();
        self.inner.next_token.set(token + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .insert(token, Rc::new(listener));
        Subscription {
            inner: Rc::downgrade(&self.inner),
            token,
        }
    }

    /// Calls `on_change` whenever the selected value differs from the last one seen.
    pub fn watch<T, S, F>(&self, selector: S, on_change: F) -> Subscription
    where
        T: PartialEq + 'static,
        S: Fn(&AppState) -> T + 'static,
        F: Fn(&T) + 'static,
    {
        let last = RefCell::new(self.read(&selector));
        self.subscribe(move |state| {
            let next = selector(state);
            if *last.borrow() == next {
                return;
            }
            on_change(&next);
            *last.borrow_mut() = next;
        })
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Restores the default state, notifying subscribers if anything differed.
    pub fn reset(&self) -> bool {
        self.dispatch(StoreAction::ResetState)
    }

    /// Serializes the current state for debugging overlays.
    pub fn debug_json(&self) -> Result<String, serde_json::Error> {
        self.read(serde_json::to_string_pretty)
    }

    fn notify(&self) {
        let inner = &*self.inner;
        if inner.notifying.get() {
            inner.dirty.set(true);
            return;
        }
        inner.notifying.set(true);
        let _guard = NotifyingGuard(inner);
        loop {
            inner.dirty.set(false);
            let snapshot = self.snapshot();
            let tokens: Vec<u64> = inner.subscribers.borrow().keys().copied().collect();
            for token in tokens {
                let listener = inner.subscribers.borrow().get(&token).cloned();
                if let Some(listener) = listener {
                    listener(snapshot.as_ref());
                }
            }
            if !inner.dirty.get() {
                break;
            }
        }
    }

    // Terminal

    /// Appends output lines to the terminal buffer.
    pub fn append_lines<I, S>(&self, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(StoreAction::AppendTerminalLines {
            lines: lines.into_iter().map(Into::into).collect(),
        })
    }

    /// Appends one output line.
    pub fn append_line(&self, line: impl Into<String>) -> bool {
        self.append_lines([line.into()])
    }

    /// Empties the output buffer and the input box.
    pub fn clear_terminal(&self) -> bool {
        self.dispatch(StoreAction::ClearTerminal)
    }

    /// Remembers a submitted command; blank and repeated entries are skipped.
    pub fn push_history(&self, command: impl Into<String>) -> bool {
        self.dispatch(StoreAction::PushHistory {
            command: command.into(),
        })
    }

    /// Moves the arrow-key history cursor; out-of-range indices reset it.
    pub fn set_history_cursor(&self, cursor: Option<usize>) -> bool {
        self.dispatch(StoreAction::SetHistoryCursor { cursor })
    }

    /// Replaces the input box contents.
    pub fn set_input(&self, input: impl Into<String>) -> bool {
        self.dispatch(StoreAction::SetTerminalInput {
            input: input.into(),
        })
    }

    /// Marks the scripted intro as finished.
    pub fn set_intro_done(&self, done: bool) -> bool {
        self.dispatch(StoreAction::SetIntroDone { done })
    }

    /// Masks or unmasks terminal input.
    pub fn set_password_mode(&self, enabled: bool) -> bool {
        self.dispatch(StoreAction::SetPasswordMode { enabled })
    }

    /// Locks input while a command runs.
    pub fn set_busy(&self, busy: bool) -> bool {
        self.dispatch(StoreAction::SetTerminalBusy { busy })
    }

    // Music

    /// Requests playback or pause.
    pub fn set_playing(&self, playing: bool) -> bool {
        self.dispatch(StoreAction::SetPlaying { playing })
    }

    /// Flips play/pause and returns the new value.
    pub fn toggle_playing(&self) -> bool {
        self.dispatch(StoreAction::TogglePlaying);
        self.read(|state| state.music.is_playing)
    }

    /// Sets the volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&self, volume: f64) -> bool {
        self.dispatch(StoreAction::SetVolume { volume })
    }

    /// Mutes or unmutes.
    pub fn set_muted(&self, muted: bool) -> bool {
        self.dispatch(StoreAction::SetMuted { muted })
    }

    /// Flips mute and returns the new value.
    pub fn toggle_muted(&self) -> bool {
        self.dispatch(StoreAction::ToggleMuted);
        self.read(|state| state.music.muted)
    }

    /// Switches track and resets the playhead.
    pub fn select_track(&self, index: usize) -> bool {
        self.dispatch(StoreAction::SelectTrack { index })
    }

    /// Enables or disables shuffle.
    pub fn set_shuffle(&self, enabled: bool) -> bool {
        self.dispatch(StoreAction::SetShuffle { enabled })
    }

    /// Enables or disables repeat.
    pub fn set_repeat(&self, enabled: bool) -> bool {
        self.dispatch(StoreAction::SetRepeat { enabled })
    }

    /// Records the playhead reported by the audio element.
    pub fn set_playback_time(&self, current_time: f64, duration: f64) -> bool {
        self.dispatch(StoreAction::SetPlaybackTime {
            current_time,
            duration,
        })
    }

    /// Moves the displayed playhead and asks the binding layer to seek.
    pub fn request_seek(&self, seconds: f64) -> bool {
        self.dispatch(StoreAction::RequestSeek { seconds })
    }

    /// Marks the pending seek as applied.
    pub fn clear_seek_request(&self) -> bool {
        self.dispatch(StoreAction::ClearSeekRequest)
    }

    /// Starts or ends a seek drag.
    pub fn set_seeking(&self, seeking: bool) -> bool {
        self.dispatch(StoreAction::SetSeeking { seeking })
    }

    // UI

    /// Records the applied color scheme.
    pub fn set_theme(&self, mode: ThemeMode) -> bool {
        self.dispatch(StoreAction::SetTheme { mode })
    }

    /// Records the current route.
    pub fn set_route(&self, path: impl Into<String>) -> bool {
        self.dispatch(StoreAction::SetRoute { path: path.into() })
    }

    /// Turns the matrix-rain effect on or off.
    pub fn set_matrix_enabled(&self, enabled: bool) -> bool {
        self.dispatch(StoreAction::SetMatrixEnabled { enabled })
    }

    /// Flips the matrix effect and returns the new value.
    pub fn toggle_matrix(&self) -> bool {
        self.dispatch(StoreAction::ToggleMatrix);
        self.read(|state| state.ui.matrix_enabled)
    }

    /// Flips the system monitor and returns the new value.
    pub fn toggle_system_monitor(&self) -> bool {
        self.dispatch(StoreAction::ToggleSystemMonitor);
        self.read(|state| state.ui.system_monitor_open)
    }

    /// Records that the client has mounted.
    pub fn set_mounted(&self, mounted: bool) -> bool {
        self.dispatch(StoreAction::SetMounted { mounted })
    }

    /// Opens or closes the mobile navbar.
    pub fn set_navbar_open(&self, open: bool) -> bool {
        self.dispatch(StoreAction::SetNavbarOpen { open })
    }

    /// Opens or closes one modal.
    pub fn set_modal_open(&self, modal: ModalId, open: bool) -> bool {
        self.dispatch(StoreAction::SetModalOpen { modal, open })
    }

    /// Flips one modal and returns whether it is now open.
    pub fn toggle_modal(&self, modal: ModalId) -> bool {
        self.dispatch(StoreAction::ToggleModal { modal });
        self.read(|state| state.ui.modals.is_open(modal))
    }

    /// Flips one collapsible section and returns whether it is now expanded.
    pub fn toggle_section(&self, section_id: impl Into<String>) -> bool {
        let section_id = section_id.into();
        self.dispatch(StoreAction::ToggleSection {
            section_id: section_id.clone(),
        });
        self.read(|state| state.ui.is_section_expanded(&section_id))
    }

    // Content

    /// Selects (or clears) a shelf item.
    pub fn select_shelf_item(&self, shelf: Shelf, item: Option<String>) -> bool {
        self.dispatch(StoreAction::SelectShelfItem { shelf, item })
    }

    /// Replaces the command palette query.
    pub fn set_search_query(&self, query: impl Into<String>) -> bool {
        self.dispatch(StoreAction::SetSearchQuery {
            query: query.into(),
        })
    }

    /// Updates the random-pick widget.
    pub fn set_randomizer(&self, selected_index: Option<usize>, spinning: bool) -> bool {
        self.dispatch(StoreAction::SetRandomizer {
            selected_index,
            spinning,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    // Each test runs on its own thread, so each sees a fresh global store.

    #[test]
    fn global_returns_the_same_store() {
        let a = Store::global();
        let b = Store::global();
        a.set_route("/projects");
        assert_eq!(b.snapshot().ui.route, "/projects");
    }

    #[test]
    fn subscribers_see_changes_but_not_no_ops() {
        let store = Store::global();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = store.subscribe(move |state| sink.borrow_mut().push(state.music.is_playing));

        store.set_playing(true);
        store.set_playing(true);
        store.set_playing(false);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn dropping_the_subscription_stops_notifications() {
        let store = Store::global();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let sub = store.subscribe(move |_| counter.set(counter.get() + 1));
        store.set_matrix_enabled(true);
        drop(sub);
        store.set_matrix_enabled(false);
        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn mutation_inside_a_subscriber_renotifies_with_latest_state() {
        let store = Store::global();
        let writer = store.clone();
        let _clamp = store.subscribe(move |state| {
            if state.music.volume > 0.5 {
                writer.set_volume(0.5);
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _observer = store.subscribe(move |state| sink.borrow_mut().push(state.music.volume));

        store.set_volume(0.9);

        assert_eq!(store.snapshot().music.volume, 0.5);
        assert_eq!(seen.borrow().last().copied(), Some(0.5));
    }

    #[test]
    fn watch_fires_only_when_the_selected_value_changes() {
        let store = Store::global();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _watch = store.watch(
            |state| state.music.current_index,
            move |index| sink.borrow_mut().push(*index),
        );

        store.set_volume(0.2);
        store.select_track(3);
        store.set_playing(true);
        store.select_track(1);

        assert_eq!(*seen.borrow(), vec![3, 1]);
    }

    #[test]
    fn toggles_return_the_new_value() {
        let store = Store::global();
        assert!(store.toggle_matrix());
        assert!(!store.toggle_matrix());
        assert!(store.toggle_modal(ModalId::MusicPlayer));
        assert!(store.toggle_section("about"));
    }

    #[test]
    fn snapshot_is_not_affected_by_later_writes() {
        let store = Store::global();
        let before = store.snapshot();
        store.append_line("hello");
        assert!(before.terminal.lines.is_empty());
        assert_eq!(store.snapshot().terminal.lines, vec!["hello"]);
    }

    #[test]
    fn debug_json_contains_the_route() {
        let store = Store::global();
        let json = store.debug_json().expect("serialize");
        assert!(json.contains("\"route\": \"/\""));
    }

    #[test]
    fn reset_restores_defaults_and_keeps_subscribers() {
        let store = Store::global();
        store.append_line("left over");
        store.push_history("ls");
        store.set_playing(true);

        let notified = Rc::new(Cell::new(0));
        let _subscription = store.subscribe({
            let notified = notified.clone();
            move |_| notified.set(notified.get() + 1)
        });

        assert!(store.reset());
        assert_eq!(*store.snapshot(), AppState::default());
        assert_eq!(notified.get(), 1);
        assert!(!store.reset());
        assert_eq!(notified.get(), 1);
    }
}
