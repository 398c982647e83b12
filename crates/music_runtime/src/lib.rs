//! Music playback runtime: the playlist, the binding layer that keeps an audio element in step
//! with the store, and the transport controls the player widget calls.

mod binding;
mod playlist;
mod transport;

pub use binding::AudioBinding;
pub use playlist::{Playlist, Track};
pub use transport::{format_time, MusicTransport, RESTART_THRESHOLD_SECS};
