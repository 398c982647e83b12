//! State shapes owned by the store. Each sub-domain is written by one feature and readable by all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use terminal_contract::ThemeMode;

/// Volume before the site config or the user changes it.
pub const DEFAULT_VOLUME: f64 = 0.7;
/// Route the site starts on.
pub const HOME_ROUTE: &str = "/";

/// Terminal widget state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerminalState {
    /// Visible output buffer, oldest first. Grows until `clear`.
    pub lines: Vec<String>,
    /// Submitted commands, oldest first.
    pub history: Vec<String>,
    /// Index into `history` while browsing with the arrow keys.
    pub history_cursor: Option<usize>,
    /// Current input box contents.
    pub input: String,
    /// The scripted intro has finished printing.
    pub intro_done: bool,
    /// Masks the input box and prompt echo.
    pub password_mode: bool,
    /// Set while the synchronous part of a submitted line runs; input is locked meanwhile.
    pub busy: bool,
}

/// Logical playback state; the binding layer mirrors it onto the audio element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicState {
    /// Playlist index of the selected track.
    pub current_index: usize,
    /// Playback is requested.
    pub is_playing: bool,
    /// Output volume in `0.0..=1.0`.
    pub volume: f64,
    /// Output silenced without forgetting `volume`.
    pub muted: bool,
    /// Next/ended pick a random other track.
    pub shuffle: bool,
    /// Ended restarts the current track.
    pub repeat: bool,
    /// Playhead in seconds, as last reported by the audio element (or the drag preview).
    pub current_time: f64,
    /// Track length in seconds; `0.0` until metadata loads.
    pub duration: f64,
    /// Pending seek the binding layer has not applied yet.
    pub seek_request: Option<f64>,
    /// The user is dragging the seek control.
    pub is_seeking: bool,
}

impl Default for MusicState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            volume: DEFAULT_VOLUME,
            muted: false,
            shuffle: false,
            repeat: false,
            current_time: 0.0,
            duration: 0.0,
            seek_request: None,
            is_seeking: false,
        }
    }
}

impl MusicState {
    /// Volume the audio element should actually use.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

/// Modal dialogs whose visibility lives in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalId {
    /// Command palette.
    Search,
    /// Expanded music player.
    MusicPlayer,
    /// Contact form.
    Contact,
    /// Full-size image viewer.
    ImagePreview,
}

/// Visibility of each modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalState {
    /// [`ModalId::Search`].
    pub search: bool,
    /// [`ModalId::MusicPlayer`].
    pub music_player: bool,
    /// [`ModalId::Contact`].
    pub contact: bool,
    /// [`ModalId::ImagePreview`].
    pub image_preview: bool,
}

impl ModalState {
    /// Whether `modal` is visible.
    pub fn is_open(&self, modal: ModalId) -> bool {
        match modal {
            ModalId::Search => self.search,
            ModalId::MusicPlayer => self.music_player,
            ModalId::Contact => self.contact,
            ModalId::ImagePreview => self.image_preview,
        }
    }

    pub(crate) fn slot_mut(&mut self, modal: ModalId) -> &mut bool {
        match modal {
            ModalId::Search => &mut self.search,
            ModalId::MusicPlayer => &mut self.music_player,
            ModalId::Contact => &mut self.contact,
            ModalId::ImagePreview => &mut self.image_preview,
        }
    }
}

/// Site-wide presentation flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// Applied color scheme.
    pub theme: ThemeMode,
    /// Current in-site route.
    pub route: String,
    /// Matrix-rain overlay is running.
    pub matrix_enabled: bool,
    /// System monitor panel is shown.
    pub system_monitor_open: bool,
    /// The client has mounted.
    pub mounted: bool,
    /// Mobile navbar is expanded.
    pub navbar_open: bool,
    /// Modal visibility.
    pub modals: ModalState,
    /// Collapsible sections keyed by section id; absent means collapsed.
    pub expanded_sections: BTreeMap<String, bool>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            route: HOME_ROUTE.to_string(),
            matrix_enabled: false,
            system_monitor_open: false,
            mounted: false,
            navbar_open: false,
            modals: ModalState::default(),
            expanded_sections: BTreeMap::new(),
        }
    }
}

impl UiState {
    /// Whether `section_id` is expanded.
    pub fn is_section_expanded(&self, section_id: &str) -> bool {
        self.expanded_sections
            .get(section_id)
            .copied()
            .unwrap_or(false)
    }
}

/// Content shelves with a single selected item each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shelf {
    /// Anime list.
    Anime,
    /// Bookshelf.
    Book,
    /// Hobbies.
    Hobby,
}

/// Selected item id per shelf.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShelfSelection {
    /// [`Shelf::Anime`] selection.
    pub anime: Option<String>,
    /// [`Shelf::Book`] selection.
    pub book: Option<String>,
    /// [`Shelf::Hobby`] selection.
    pub hobby: Option<String>,
}

impl ShelfSelection {
    /// Selected item for `shelf`.
    pub fn selected(&self, shelf: Shelf) -> Option<&str> {
        match shelf {
            Shelf::Anime => self.anime.as_deref(),
            Shelf::Book => self.book.as_deref(),
            Shelf::Hobby => self.hobby.as_deref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, shelf: Shelf) -> &mut Option<String> {
        match shelf {
            Shelf::Anime => &mut self.anime,
            Shelf::Book => &mut self.book,
            Shelf::Hobby => &mut self.hobby,
        }
    }
}

/// Random-pick widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RandomizerState {
    /// Picked entry.
    pub selected_index: Option<usize>,
    /// The pick animation is running.
    pub spinning: bool,
}

/// Full store snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    /// Terminal widget.
    pub terminal: TerminalState,
    /// Music player.
    pub music: MusicState,
    /// Presentation flags.
    pub ui: UiState,
    /// Shelf selections.
    pub shelves: ShelfSelection,
    /// Command palette query.
    pub search_query: String,
    /// Random-pick widget.
    pub randomizer: RandomizerState,
}
