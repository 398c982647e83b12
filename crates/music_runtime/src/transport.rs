use std::rc::Rc;

use portfolio_store::Store;

use crate::playlist::{Playlist, Track};

/// Seconds into a track after which "previous" restarts it instead of going back.
pub const RESTART_THRESHOLD_SECS: f64 = 3.0;

/// Player controls. Every method only writes the store; [`crate::AudioBinding`] drives the
/// element.
#[derive(Clone)]
pub struct MusicTransport {
    store: Store,
    playlist: Rc<Playlist>,
}

impl MusicTransport {
    pub fn new(store: Store, playlist: Rc<Playlist>) -> Self {
        Self { store, playlist }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<Track> {
        let index = self.store.read(|state| state.music.current_index);
        self.playlist.get(index).cloned()
    }

    /// Flips play/pause and returns whether playback is now requested.
    pub fn toggle_play(&self) -> bool {
        if self.playlist.is_empty() {
            return false;
        }
        self.store.toggle_playing()
    }

    pub fn play(&self) {
        if !self.playlist.is_empty() {
            self.store.set_playing(true);
        }
    }

    pub fn pause(&self) {
        self.store.set_playing(false);
    }

    pub fn next(&self) {
        let (current, shuffle) = self
            .store
            .read(|state| (state.music.current_index, state.music.shuffle));
        match self
            .playlist
            .advance(current, shuffle, &mut rand::thread_rng())
        {
            Some(next) if next != current => {
                self.store.select_track(next);
            }
            Some(_) => {
                self.store.request_seek(0.0);
            }
            None => {}
        }
    }

    /// Restarts the current track when past [`RESTART_THRESHOLD_SECS`], otherwise goes back one.
    pub fn previous(&self) {
        let (current, position) = self
            .store
            .read(|state| (state.music.current_index, state.music.current_time));
        if position > RESTART_THRESHOLD_SECS {
            self.store.request_seek(0.0);
            return;
        }
        match self.playlist.previous_index(current) {
            Some(previous) if previous != current => {
                self.store.select_track(previous);
            }
            Some(_) => {
                self.store.request_seek(0.0);
            }
            None => {}
        }
    }

    pub fn select(&self, index: usize) {
        if index < self.playlist.len() {
            self.store.select_track(index);
        }
    }

    /// Sets the volume; raising it above zero also unmutes.
    pub fn set_volume(&self, volume: f64) {
        self.store.set_volume(volume);
        if volume > 0.0 {
            self.store.set_muted(false);
        }
    }

    pub fn toggle_mute(&self) -> bool {
        self.store.toggle_muted()
    }

    pub fn toggle_shuffle(&self) -> bool {
        let enabled = !self.store.read(|state| state.music.shuffle);
        self.store.set_shuffle(enabled);
        enabled
    }

    pub fn toggle_repeat(&self) -> bool {
        let enabled = !self.store.read(|state| state.music.repeat);
        self.store.set_repeat(enabled);
        enabled
    }

    /// Starts a seek drag. Time updates from the element are ignored until it is committed.
    pub fn begin_seek(&self) {
        self.store.set_seeking(true);
    }

    /// Moves the displayed playhead without touching the element.
    pub fn update_seek(&self, seconds: f64) {
        let duration = self.store.read(|state| state.music.duration);
        self.store
            .set_playback_time(clamp_position(seconds, duration), duration);
    }

    pub fn commit_seek(&self, seconds: f64) {
        let duration = self.store.read(|state| state.music.duration);
        self.store.request_seek(clamp_position(seconds, duration));
        self.store.set_seeking(false);
    }
}

fn clamp_position(seconds: f64, duration: f64) -> f64 {
    if !seconds.is_finite() || seconds < 0.0 {
        return 0.0;
    }
    if duration.is_finite() && duration > 0.0 {
        seconds.min(duration)
    } else {
        seconds
    }
}

/// Formats a playhead position as `mm:ss`. Unknown or negative values render as `00:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn transport(len: usize) -> MusicTransport {
        let tracks = (0..len)
            .map(|index| Track::new(format!("t{index}"), "a", format!("/audio/{index}.mp3")))
            .collect();
        MusicTransport::new(Store::global(), Rc::new(Playlist::new(tracks)))
    }

    fn music(transport: &MusicTransport) -> portfolio_store::MusicState {
        transport.store.read(|state| state.music.clone())
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.9), "01:05");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(-4.0), "00:00");
    }

    #[test]
    fn toggle_play_needs_tracks() {
        assert!(!transport(0).toggle_play());

        let transport = transport(2);
        assert!(transport.toggle_play());
        assert!(!transport.toggle_play());
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let transport = transport(3);
        transport.previous();
        assert_eq!(music(&transport).current_index, 2);
        transport.next();
        assert_eq!(music(&transport).current_index, 0);
    }

    #[test]
    fn previous_restarts_after_threshold() {
        let transport = transport(3);
        transport.select(1);
        transport.store.set_playback_time(10.0, 180.0);
        transport.previous();
        let state = music(&transport);
        assert_eq!(state.current_index, 1);
        assert_eq!(state.seek_request, Some(0.0));
    }

    #[test]
    fn shuffle_next_picks_a_different_track() {
        let transport = transport(2);
        assert!(transport.toggle_shuffle());
        for expected in [1, 0, 1] {
            transport.next();
            assert_eq!(music(&transport).current_index, expected);
        }
    }

    #[test]
    fn raising_volume_unmutes() {
        let transport = transport(1);
        assert!(transport.toggle_mute());
        transport.set_volume(0.4);
        let state = music(&transport);
        assert!(!state.muted);
        assert_eq!(state.volume, 0.4);
    }

    #[test]
    fn seek_drag_previews_then_requests() {
        let transport = transport(1);
        transport.store.set_playback_time(0.0, 100.0);
        transport.begin_seek();
        transport.update_seek(150.0);
        assert_eq!(music(&transport).current_time, 100.0);
        assert_eq!(music(&transport).seek_request, None);

        transport.commit_seek(30.0);
        let state = music(&transport);
        assert!(!state.is_seeking);
        assert_eq!(state.seek_request, Some(30.0));
    }
}
