//! Store actions and the transition function that applies them.

use terminal_contract::ThemeMode;

use crate::model::{AppState, ModalId, Shelf};

/// Oldest entries are dropped past this many remembered commands.
pub const MAX_TERMINAL_HISTORY: usize = 100;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_store`]. Each one touches only the fields it names.
pub enum StoreAction {
    /// Append lines to the terminal output buffer.
    AppendTerminalLines {
        /// Lines in display order.
        lines: Vec<String>,
    },
    /// Empty the output buffer and the input box.
    ClearTerminal,
    /// Remember a submitted command and reset the history cursor.
    PushHistory {
        /// Submitted command text.
        command: String,
    },
    /// Move the history browsing cursor.
    SetHistoryCursor {
        /// Index into history, or `None` for the fresh input line.
        cursor: Option<usize>,
    },
    /// Replace the input box contents.
    SetTerminalInput {
        /// New input text.
        input: String,
    },
    /// Mark the intro sequence as finished (or restart it).
    SetIntroDone {
        /// Whether the intro has finished.
        done: bool,
    },
    /// Mask or unmask terminal input.
    SetPasswordMode {
        /// Whether input is masked.
        enabled: bool,
    },
    /// Lock or unlock terminal input while a command runs.
    SetTerminalBusy {
        /// Whether a command is running.
        busy: bool,
    },
    /// Set the logical play/pause flag.
    SetPlaying {
        /// Whether playback should run.
        playing: bool,
    },
    /// Flip the play/pause flag using the current value.
    TogglePlaying,
    /// Set the volume; clamped to `0.0..=1.0`, non-finite values are ignored.
    SetVolume {
        /// Requested volume.
        volume: f64,
    },
    /// Mute or unmute.
    SetMuted {
        /// Whether output is muted.
        muted: bool,
    },
    /// Flip mute using the current value.
    ToggleMuted,
    /// Switch to a track and reset the playhead.
    SelectTrack {
        /// Playlist index.
        index: usize,
    },
    /// Enable or disable shuffle.
    SetShuffle {
        /// Whether shuffle is on.
        enabled: bool,
    },
    /// Enable or disable single-track repeat.
    SetRepeat {
        /// Whether repeat is on.
        enabled: bool,
    },
    /// Record the playhead reported by the audio element.
    SetPlaybackTime {
        /// Playhead in seconds.
        current_time: f64,
        /// Track length in seconds.
        duration: f64,
    },
    /// Ask the binding layer to move the playhead.
    RequestSeek {
        /// Target position in seconds.
        seconds: f64,
    },
    /// The binding layer applied the pending seek.
    ClearSeekRequest,
    /// Start or finish a seek drag.
    SetSeeking {
        /// Whether a drag is in progress.
        seeking: bool,
    },
    /// Record the applied color scheme.
    SetTheme {
        /// Applied mode.
        mode: ThemeMode,
    },
    /// Record the current route.
    SetRoute {
        /// Route path.
        path: String,
    },
    /// Enable or disable the matrix-rain effect.
    SetMatrixEnabled {
        /// Whether the effect runs.
        enabled: bool,
    },
    /// Flip the matrix-rain effect using the current value.
    ToggleMatrix,
    /// Flip the system-monitor overlay using the current value.
    ToggleSystemMonitor,
    /// Record that the client has mounted.
    SetMounted {
        /// Whether the client has mounted.
        mounted: bool,
    },
    /// Open or close the mobile navbar.
    SetNavbarOpen {
        /// Whether the navbar is open.
        open: bool,
    },
    /// Open or close one modal.
    SetModalOpen {
        /// Target modal.
        modal: ModalId,
        /// Whether it is visible.
        open: bool,
    },
    /// Flip one modal using the current value.
    ToggleModal {
        /// Target modal.
        modal: ModalId,
    },
    /// Flip one collapsible section.
    ToggleSection {
        /// Section identifier.
        section_id: String,
    },
    /// Select (or clear) the item shown for a shelf.
    SelectShelfItem {
        /// Target shelf.
        shelf: Shelf,
        /// Selected item id.
        item: Option<String>,
    },
    /// Replace the search query.
    SetSearchQuery {
        /// New query.
        query: String,
    },
    /// Update the randomizer.
    SetRandomizer {
        /// Picked index, if any.
        selected_index: Option<usize>,
        /// Whether the pick animation is running.
        spinning: bool,
    },    /// Restore every field to its default.
    ResetState,
}

fn assign<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Applies a [`StoreAction`] and reports whether anything changed.
///
/// Redundant actions (pausing while paused, re-selecting the same item) leave the state untouched
/// and return `false`, so the store can skip notifying subscribers.
pub fn reduce_store(state: &mut AppState, action: StoreAction) -> bool {
    match action {
        StoreAction::AppendTerminalLines { lines } => {
            if lines.is_empty() {
                return false;
            }
            state.terminal.lines.extend(lines);
            true
        }
        StoreAction::ClearTerminal => {
            let changed = !state.terminal.lines.is_empty() || !state.terminal.input.is_empty();
            state.terminal.lines.clear();
            state.terminal.input.clear();
            changed
        }
        StoreAction::PushHistory { command } => {
            let command = command.trim().to_string();
            let cursor_reset = assign(&mut state.terminal.history_cursor, None);
            if command.is_empty() || state.terminal.history.last() == Some(&command) {
                return cursor_reset;
            }
            state.terminal.history.push(command);
            if state.terminal.history.len() > MAX_TERMINAL_HISTORY {
                let overflow = state.terminal.history.len() - MAX_TERMINAL_HISTORY;
                state.terminal.history.drain(0..overflow);
            }
            true
        }
        StoreAction::SetHistoryCursor { cursor } => {
            let cursor = cursor.filter(|index| *index < state.terminal.history.len());
            assign(&mut state.terminal.history_cursor, cursor)
        }
        StoreAction::SetTerminalInput { input } => assign(&mut state.terminal.input, input),
        StoreAction::SetIntroDone { done } => assign(&mut state.terminal.intro_done, done),
        StoreAction::SetPasswordMode { enabled } => {
            assign(&mut state.terminal.password_mode, enabled)
        }
        StoreAction::SetTerminalBusy { busy } => assign(&mut state.terminal.busy, busy),
        StoreAction::SetPlaying { playing } => assign(&mut state.music.is_playing, playing),
        StoreAction::TogglePlaying => {
            state.music.is_playing = !state.music.is_playing;
            true
        }
        StoreAction::SetVolume { volume } => {
            if !volume.is_finite() {
                return false;
            }
            assign(&mut state.music.volume, volume.clamp(0.0, 1.0))
        }
        StoreAction::SetMuted { muted } => assign(&mut state.music.muted, muted),
        StoreAction::ToggleMuted => {
            state.music.muted = !state.music.muted;
            true
        }
        StoreAction::SelectTrack { index } => {
            if state.music.current_index == index {
                return false;
            }
            state.music.current_index = index;
            state.music.current_time = 0.0;
            state.music.duration = 0.0;
            state.music.seek_request = None;
            true
        }
        StoreAction::SetShuffle { enabled } => assign(&mut state.music.shuffle, enabled),
        StoreAction::SetRepeat { enabled } => assign(&mut state.music.repeat, enabled),
        StoreAction::SetPlaybackTime {
            current_time,
            duration,
        } => {
            let current_time = if current_time.is_finite() {
                current_time.max(0.0)
            } else {
                0.0
            };
            let duration = if duration.is_finite() {
                duration.max(0.0)
            } else {
                0.0
            };
            let time_changed = assign(&mut state.music.current_time, current_time);
            assign(&mut state.music.duration, duration) || time_changed
        }
        StoreAction::RequestSeek { seconds } => {
            if !seconds.is_finite() {
                return false;
            }
            let seconds = seconds.max(0.0);
            state.music.current_time = seconds;
            state.music.seek_request = Some(seconds);
            true
        }
        StoreAction::ClearSeekRequest => assign(&mut state.music.seek_request, None),
        StoreAction::SetSeeking { seeking } => assign(&mut state.music.is_seeking, seeking),
        StoreAction::SetTheme { mode } => assign(&mut state.ui.theme, mode),
        StoreAction::SetRoute { path } => assign(&mut state.ui.route, path),
        StoreAction::SetMatrixEnabled { enabled } => {
            assign(&mut state.ui.matrix_enabled, enabled)
        }
        StoreAction::ToggleMatrix => {
            state.ui.matrix_enabled = !state.ui.matrix_enabled;
            true
        }
        StoreAction::ToggleSystemMonitor => {
            state.ui.system_monitor_open = !state.ui.system_monitor_open;
            true
        }
        StoreAction::SetMounted { mounted } => assign(&mut state.ui.mounted, mounted),
        StoreAction::SetNavbarOpen { open } => assign(&mut state.ui.navbar_open, open),
        StoreAction::SetModalOpen { modal, open } => {
            assign(state.ui.modals.slot_mut(modal), open)
        }
        StoreAction::ToggleModal { modal } => {
            let slot = state.ui.modals.slot_mut(modal);
            *slot = !*slot;
            true
        }
        StoreAction::ToggleSection { section_id } => {
            let expanded = state.ui.is_section_expanded(&section_id);
            state.ui.expanded_sections.insert(section_id, !expanded);
            true
        }
        StoreAction::SelectShelfItem { shelf, item } => {
            assign(state.shelves.slot_mut(shelf), item)
        }
        StoreAction::SetSearchQuery { query } => assign(&mut state.search_query, query),
        StoreAction::SetRandomizer {
            selected_index,
            spinning,
        } => {
            let index_changed = assign(&mut state.randomizer.selected_index, selected_index);
            assign(&mut state.randomizer.spinning, spinning) || index_changed
        }
        StoreAction::ResetState => assign(state, AppState::default()),
    }
}
