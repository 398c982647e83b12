//! Music player widget: transport controls over the shared store plus the `<audio>` element the
//! binding layer drives.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use leptos::ev::{self, MouseEvent, PointerEvent};
use leptos::*;
use music_runtime::{format_time, AudioBinding, MusicTransport, Track};
use platform_host::TaskScheduler;
use platform_host_web::WebAudioElement;

fn track_label(track: Option<&Track>) -> String {
    match track {
        Some(track) if track.artist.is_empty() => track.title.clone(),
        Some(track) => format!("{} - {}", track.title, track.artist),
        None => "No track loaded".to_string(),
    }
}

fn parse_slider(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

#[component]
/// Player controls plus the hidden audio element.
///
/// The binding between the store and the element is created once the `<audio>` node mounts and is
/// dropped with the widget.
pub fn MusicPlayer(
    /// Store-backed controls and the playlist.
    transport: MusicTransport,
    /// Scheduler used for play attempts and the load-failure delay.
    scheduler: Rc<dyn TaskScheduler>,
    /// Delay before skipping a track that failed to load.
    load_guard_ms: u32,
) -> impl IntoView {
    let store = transport.store().clone();
    let music = create_rw_signal(store.read(|state| state.music.clone()));
    let subscription = store.watch(
        |state| state.music.clone(),
        move |next| music.set(next.clone()),
    );
    on_cleanup(move || drop(subscription));

    let audio_ref = create_node_ref::<html::Audio>();
    let binding = store_value(None::<Rc<AudioBinding>>);
    let playlist = Rc::new(transport.playlist().clone());
    audio_ref.on_load({
        let store = store.clone();
        move |audio| {
            let element = WebAudioElement::new((*audio).clone());
            binding.set_value(Some(Rc::new(AudioBinding::attach(
                store,
                Rc::new(element),
                scheduler,
                playlist,
                load_guard_ms,
            ))));
        }
    });
    on_cleanup(move || binding.set_value(None));

    let with_binding = move |f: &dyn Fn(&AudioBinding)| {
        binding.with_value(|binding| {
            if let Some(binding) = binding {
                f(binding);
            }
        });
    };
    let on_time_update = move |_: ev::Event| {
        if let Some(audio) = audio_ref.get_untracked() {
            let (current, duration) = (audio.current_time(), audio.duration());
            with_binding(&|binding| binding.handle_time_update(current, duration));
        }
    };
    let on_loaded_metadata = move |_: ev::Event| {
        if let Some(audio) = audio_ref.get_untracked() {
            let duration = audio.duration();
            with_binding(&|binding| binding.handle_loaded_metadata(duration));
        }
    };

    let label = {
        let transport = transport.clone();
        move || {
            let index = music.get().current_index;
            track_label(transport.playlist().get(index))
        }
    };
    let toggle = {
        let transport = transport.clone();
        move |_: MouseEvent| {
            transport.toggle_play();
        }
    };
    let previous = {
        let transport = transport.clone();
        move |_: MouseEvent| transport.previous()
    };
    let next = {
        let transport = transport.clone();
        move |_: MouseEvent| transport.next()
    };
    let shuffle = {
        let transport = transport.clone();
        move |_: MouseEvent| {
            transport.toggle_shuffle();
        }
    };
    let repeat = {
        let transport = transport.clone();
        move |_: MouseEvent| {
            transport.toggle_repeat();
        }
    };
    let mute = {
        let transport = transport.clone();
        move |_: MouseEvent| {
            transport.toggle_mute();
        }
    };
    let volume = {
        let transport = transport.clone();
        move |ev: ev::Event| {
            if let Some(value) = parse_slider(&event_target_value(&ev)) {
                transport.set_volume(value);
            }
        }
    };
    let seek_start = {
        let transport = transport.clone();
        move |_: PointerEvent| transport.begin_seek()
    };
    let seek_preview = {
        let transport = transport.clone();
        move |ev: ev::Event| {
            if let Some(value) = parse_slider(&event_target_value(&ev)) {
                transport.update_seek(value);
            }
        }
    };
    let seek_commit = move |ev: ev::Event| {
        if let Some(value) = parse_slider(&event_target_value(&ev)) {
            transport.commit_seek(value);
        }
    };

    view! {
        <div class="music-player" role="region" aria-label="Music player">
            <audio
                node_ref=audio_ref
                preload="metadata"
                on:ended=move |_| with_binding(&|binding| binding.handle_ended())
                on:timeupdate=on_time_update
                on:loadedmetadata=on_loaded_metadata
                on:error=move |_| with_binding(&|binding| binding.handle_load_error())
            ></audio>

            <div class="music-track">{label}</div>

            <div class="music-progress">
                <span class="music-time">{move || format_time(music.get().current_time)}</span>
                <input
                    type="range"
                    class="music-seek"
                    min="0"
                    step="0.1"
                    max=move || music.get().duration.to_string()
                    prop:value=move || music.get().current_time.to_string()
                    on:pointerdown=seek_start
                    on:input=seek_preview
                    on:change=seek_commit
                    aria-label="Seek"
                />
                <span class="music-time">{move || format_time(music.get().duration)}</span>
            </div>

            <div class="music-controls">
                <button
                    type="button"
                    class="app-action"
                    aria-pressed=move || music.get().shuffle.to_string()
                    on:click=shuffle
                >
                    "Shuffle"
                </button>
                <button type="button" class="app-action" on:click=previous>"Prev"</button>
                <button type="button" class="app-action" on:click=toggle>
                    {move || if music.get().is_playing { "Pause" } else { "Play" }}
                </button>
                <button type="button" class="app-action" on:click=next>"Next"</button>
                <button
                    type="button"
                    class="app-action"
                    aria-pressed=move || music.get().repeat.to_string()
                    on:click=repeat
                >
                    "Repeat"
                </button>
            </div>

            <div class="music-volume">
                <button type="button" class="app-action" on:click=mute>
                    {move || if music.get().muted { "Unmute" } else { "Mute" }}
                </button>
                <input
                    type="range"
                    class="music-volume-slider"
                    min="0"
                    max="1"
                    step="0.01"
                    prop:value=move || music.get().volume.to_string()
                    on:input=volume
                    aria-label="Volume"
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn track_label_handles_missing_parts() {
        assert_eq!(track_label(None), "No track loaded");
        assert_eq!(
            track_label(Some(&Track::new("Night Drive", "", "/a.mp3"))),
            "Night Drive"
        );
        assert_eq!(
            track_label(Some(&Track::new("Night Drive", "Lo-Fi", "/a.mp3"))),
            "Night Drive - Lo-Fi"
        );
    }

    #[test]
    fn slider_values_must_be_finite_numbers() {
        assert_eq!(parse_slider(" 12.5 "), Some(12.5));
        assert_eq!(parse_slider("NaN"), None);
        assert_eq!(parse_slider("abc"), None);
    }
}
