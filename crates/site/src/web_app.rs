use leptos::ev::{self, KeyboardEvent};
use leptos::*;
use leptos_meta::*;
use platform_host_web::{build_host_services, load_saved_theme};
use portfolio_app_command_palette::CommandPalette;
use portfolio_app_music_player::MusicPlayer;
use portfolio_app_terminal::TerminalApp;
use portfolio_commands::SiteConfig;
use portfolio_store::{ModalId, Store};

use crate::runtime::build_runtime;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let runtime = match build_runtime(
        build_host_services(),
        SiteConfig::embedded(),
        load_saved_theme(),
    ) {
        Ok(runtime) => runtime,
        Err(err) => {
            logging::warn!("terminal registry failed: {err}");
            return view! {
                <main class="site-root">
                    <p class="site-error">"The terminal is unavailable right now."</p>
                </main>
            }
            .into_view();
        }
    };
    runtime.store.set_mounted(true);

    let store = runtime.store.clone();
    let matrix = create_rw_signal(store.read(|state| state.ui.matrix_enabled));
    let monitor_open = create_rw_signal(store.read(|state| state.ui.system_monitor_open));
    reflect_matrix(matrix.get_untracked());
    let subscriptions = vec![
        store.watch(
            |state| state.ui.matrix_enabled,
            move |enabled| {
                reflect_matrix(*enabled);
                matrix.set(*enabled);
            },
        ),
        store.watch(
            |state| state.ui.system_monitor_open,
            move |open| monitor_open.set(*open),
        ),
    ];
    on_cleanup(move || drop(subscriptions));

    let shortcut = window_event_listener(ev::keydown, {
        let store = store.clone();
        move |ev: KeyboardEvent| {
            if (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("k") {
                ev.prevent_default();
                store.toggle_modal(ModalId::Search);
            }
        }
    });
    on_cleanup(move || shortcut.remove());

    let title = format!("{} | {}", runtime.config.profile.name, runtime.config.profile.role);
    let description = runtime.config.profile.summary.join(" ");

    view! {
        <Title text=title />
        <Meta name="description" content=description />

        <main class="site-root" class:matrix-enabled=move || matrix.get()>
            <CommandPalette
                entries=runtime.palette_entries()
                navigation=runtime.services.navigation.clone()
            />
            <section class="site-terminal">
                <TerminalApp controller=runtime.terminal_controller() />
            </section>
            <Show when=move || monitor_open.get() fallback=|| ()>
                <SystemMonitor store=store.clone() />
            </Show>
            <aside class="site-music">
                <MusicPlayer
                    transport=runtime.transport()
                    scheduler=runtime.services.scheduler.clone()
                    load_guard_ms=runtime.config.music.load_failure_guard_ms
                />
            </aside>
        </main>
    }
    .into_view()
}

#[component]
fn SystemMonitor(store: Store) -> impl IntoView {
    let stats = create_rw_signal(monitor_stats(&store));
    let subscription = store.subscribe({
        let store = store.clone();
        move |_| stats.set(monitor_stats(&store))
    });
    on_cleanup(move || drop(subscription));

    view! {
        <div class="system-monitor" role="status" aria-label="System monitor">
            <For each=move || stats.get() key=|(label, value)| (*label, value.clone()) let:row>
                <div class="system-monitor-row">
                    <span class="system-monitor-label">{row.0}</span>
                    <span class="system-monitor-value">{row.1}</span>
                </div>
            </For>
        </div>
    }
}

fn monitor_stats(store: &Store) -> Vec<(&'static str, String)> {
    store.read(|state| {
        vec![
            ("route", state.ui.route.clone()),
            ("theme", state.ui.theme.to_string()),
            ("terminal lines", state.terminal.lines.len().to_string()),
            ("history", state.terminal.history.len().to_string()),
            ("track", state.music.current_index.to_string()),
            (
                "playback",
                if state.music.is_playing { "playing" } else { "paused" }.to_string(),
            ),
            ("subscribers", store.subscriber_count().to_string()),
        ]
    })
}

/// Mirrors the matrix flag onto `<html data-matrix=...>` for the rain overlay styles.
fn reflect_matrix(enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            let _ = root.set_attribute("data-matrix", if enabled { "on" } else { "off" });
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = enabled;
    }
}
