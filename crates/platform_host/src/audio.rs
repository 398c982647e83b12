//! Audio element contracts used by the music binding layer.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use futures::future::LocalBoxFuture;
use thiserror::Error;

/// Failure reported by the underlying media element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// `play()` was refused, typically by an autoplay policy.
    #[error("playback rejected: {0}")]
    PlayRejected(String),
    /// The current source could not be loaded or decoded.
    #[error("media failed to load: {0}")]
    LoadFailed(String),
}

/// Pending result of a play attempt.
pub type AudioFuture = LocalBoxFuture<'static, Result<(), AudioError>>;

/// The audio-producing element owned by the binding layer.
pub trait AudioElement {
    /// Replaces the current source.
    fn load(&self, src: &str);

    /// Starts playback. Rejection is reported through the returned future.
    fn play(&self) -> AudioFuture;

    /// Pauses playback. Pausing a paused element is harmless.
    fn pause(&self);

    /// Sets output volume in `0.0..=1.0`.
    fn set_volume(&self, volume: f64);

    /// Moves the playhead.
    fn seek(&self, seconds: f64);
}

/// One recorded call on a [`MemoryAudioElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    /// `load(src)`.
    Load(String),
    /// `play()`.
    Play,
    /// `pause()`.
    Pause,
    /// `set_volume(volume)`.
    SetVolume(f64),
    /// `seek(seconds)`.
    Seek(f64),
}

#[derive(Debug, Default)]
struct MemoryAudioState {
    calls: Vec<AudioCall>,
    play_results: VecDeque<Result<(), AudioError>>,
}

/// In-memory audio element that records calls and replays scripted play outcomes.
#[derive(Debug, Clone, Default)]
pub struct MemoryAudioElement {
    state: Rc<RefCell<MemoryAudioState>>,
}

impl MemoryAudioElement {
    /// Queues the outcome of the next unscripted `play()` call. Unscripted calls succeed.
    pub fn script_play(&self, result: Result<(), AudioError>) {
        self.state.borrow_mut().play_results.push_back(result);
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<AudioCall> {
        self.state.borrow().calls.clone()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn record(&self, call: AudioCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl AudioElement for MemoryAudioElement {
    fn load(&self, src: &str) {
        self.record(AudioCall::Load(src.to_string()));
    }

    fn play(&self) -> AudioFuture {
        self.record(AudioCall::Play);
        let result = self
            .state
            .borrow_mut()
            .play_results
            .pop_front()
            .unwrap_or(Ok(()));
        Box::pin(futures::future::ready(result))
    }

    fn pause(&self) {
        self.record(AudioCall::Pause);
    }

    fn set_volume(&self, volume: f64) {
        self.record(AudioCall::SetVolume(volume));
    }

    fn seek(&self, seconds: f64) {
        self.record(AudioCall::Seek(seconds));
    }
}
