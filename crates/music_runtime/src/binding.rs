//! Binding layer between the store's logical playback state and the audio element.
//!
//! Store -> element: volume/mute, track changes, play/pause and seek requests are mirrored
//! through store subscriptions. Element -> store: the widget forwards the element's media events
//! to the `handle_*` methods.

use std::{cell::Cell, rc::Rc};

use leptos::logging;
use platform_host::{AudioElement, TaskScheduler};
use portfolio_store::{Store, Subscription};

use crate::playlist::Playlist;

struct BindingInner {
    store: Store,
    element: Rc<dyn AudioElement>,
    scheduler: Rc<dyn TaskScheduler>,
    playlist: Rc<Playlist>,
    load_guard_ms: u32,
    /// Bumped on every play attempt and pause; a rejection only reverts its own attempt.
    play_generation: Cell<u64>,
    /// Token of the load-failure skip waiting out the guard delay.
    pending_skip: Cell<Option<u64>>,
    skip_tokens: Cell<u64>,
}

impl BindingInner {
    fn load_current(&self) {
        let index = self.store.read(|state| state.music.current_index);
        if let Some(track) = self.playlist.get(index) {
            self.element.load(&track.src);
        }
    }

    fn next_generation(&self) -> u64 {
        let generation = self.play_generation.get() + 1;
        self.play_generation.set(generation);
        generation
    }

    fn attempt_play(self: &Rc<Self>) {
        let generation = self.next_generation();
        let play = self.element.play();
        let inner = self.clone();
        self.scheduler.spawn_local(Box::pin(async move {
            if let Err(err) = play.await {
                logging::warn!("music: {err}");
                // A later play or pause supersedes this attempt.
                if inner.play_generation.get() == generation {
                    inner.store.set_playing(false);
                }
            }
        }));
    }

    fn pause(&self) {
        self.next_generation();
        self.element.pause();
    }

    fn restart(self: &Rc<Self>) {
        self.element.seek(0.0);
        let duration = self.store.read(|state| state.music.duration);
        self.store.set_playback_time(0.0, duration);
        if self.store.read(|state| state.music.is_playing) {
            self.attempt_play();
        }
    }

    fn advance_from(self: &Rc<Self>, current: usize) {
        let shuffle = self.store.read(|state| state.music.shuffle);
        match self
            .playlist
            .advance(current, shuffle, &mut rand::thread_rng())
        {
            Some(next) if next != current => {
                self.store.select_track(next);
            }
            Some(_) => self.restart(),
            None => {
                self.store.set_playing(false);
            }
        }
    }
}

/// Live binding of one audio element to the store. Dropping it detaches every subscription.
pub struct AudioBinding {
    inner: Rc<BindingInner>,
    _subscriptions: Vec<Subscription>,
}

impl AudioBinding {
    /// Syncs `element` with the current store state and keeps it in sync until dropped.
    pub fn attach(
        store: Store,
        element: Rc<dyn AudioElement>,
        scheduler: Rc<dyn TaskScheduler>,
        playlist: Rc<Playlist>,
        load_guard_ms: u32,
    ) -> Self {
        let inner = Rc::new(BindingInner {
            store: store.clone(),
            element,
            scheduler,
            playlist,
            load_guard_ms,
            play_generation: Cell::new(0),
            pending_skip: Cell::new(None),
            skip_tokens: Cell::new(0),
        });

        let (volume, playing) =
            store.read(|state| (state.music.effective_volume(), state.music.is_playing));
        inner.element.set_volume(volume);
        inner.load_current();
        if playing {
            inner.attempt_play();
        }

        let subscriptions = vec![
            store.watch(|state| state.music.effective_volume(), {
                let inner = inner.clone();
                move |volume| inner.element.set_volume(*volume)
            }),
            store.watch(|state| state.music.current_index, {
                let inner = inner.clone();
                move |_| {
                    inner.pending_skip.set(None);
                    inner.load_current();
                    if inner.store.read(|state| state.music.is_playing) {
                        inner.attempt_play();
                    }
                }
            }),
            store.watch(|state| state.music.is_playing, {
                let inner = inner.clone();
                move |playing| {
                    if *playing {
                        inner.attempt_play();
                    } else {
                        inner.pause();
                    }
                }
            }),
            store.watch(|state| state.music.seek_request, {
                let inner = inner.clone();
                move |request| {
                    if let Some(seconds) = *request {
                        inner.element.seek(seconds);
                        inner.store.clear_seek_request();
                    }
                }
            }),
        ];

        Self {
            inner,
            _subscriptions: subscriptions,
        }
    }

    /// The element finished the current track.
    pub fn handle_ended(&self) {
        let (repeat, current) =
            self.inner
                .store
                .read(|state| (state.music.repeat, state.music.current_index));
        if repeat {
            self.inner.restart();
        } else {
            self.inner.advance_from(current);
        }
    }

    /// Periodic playhead report. Ignored while the user drags the seek control.
    pub fn handle_time_update(&self, current_time: f64, duration: f64) {
        if self.inner.store.read(|state| state.music.is_seeking) {
            return;
        }
        self.inner.store.set_playback_time(current_time, duration);
    }

    pub fn handle_loaded_metadata(&self, duration: f64) {
        let current_time = self.inner.store.read(|state| state.music.current_time);
        self.inner.store.set_playback_time(current_time, duration);
    }

    /// The current source failed to load. Skips to the next track after the guard delay; errors
    /// arriving while that track's skip is pending are ignored.
    pub fn handle_load_error(&self) {
        let inner = &self.inner;
        let failed = inner.store.read(|state| state.music.current_index);
        if inner.pending_skip.get().is_some() {
            return;
        }
        let token = inner.skip_tokens.get() + 1;
        inner.skip_tokens.set(token);
        inner.pending_skip.set(Some(token));
        logging::warn!(
            "music: track {failed} failed to load; skipping in {}ms",
            inner.load_guard_ms
        );
        let sleep = inner.scheduler.sleep(inner.load_guard_ms);
        let inner = inner.clone();
        self.inner.scheduler.spawn_local(Box::pin(async move {
            sleep.await;
            // A track change during the delay clears the pending skip and supersedes it.
            if inner.pending_skip.get() == Some(token) {
                inner.pending_skip.set(None);
                inner.advance_from(failed);
            }
        }));
    }
}
