//! Application wiring shared by the browser entry point and headless tests.

use std::rc::Rc;

use music_runtime::{MusicTransport, Playlist, Track};
use platform_host::HostServices;
use portfolio_app_command_palette::{default_entries, PaletteEntry};
use portfolio_app_terminal::TerminalController;
use portfolio_commands::{config::MusicConfig, SiteConfig};
use portfolio_store::Store;
use terminal_contract::ThemeMode;
use terminal_shell::{RegistryError, ShellEngine};

/// Everything the widgets share.
#[derive(Clone)]
pub struct SiteRuntime {
    pub store: Store,
    pub services: HostServices,
    pub config: Rc<SiteConfig>,
    pub engine: ShellEngine,
    pub playlist: Rc<Playlist>,
}

pub fn playlist_from_config(music: &MusicConfig) -> Playlist {
    Playlist::new(
        music
            .tracks
            .iter()
            .map(|track| Track::new(&track.title, &track.artist, &track.src))
            .collect(),
    )
}

/// Seeds the store from `config` and the remembered theme, then builds the interpreter.
pub fn build_runtime(
    services: HostServices,
    config: SiteConfig,
    saved_theme: Option<ThemeMode>,
) -> Result<SiteRuntime, RegistryError> {
    let store = Store::global();
    store.set_volume(config.music.initial_volume);
    if let Some(mode) = saved_theme {
        services.theme.set_theme(mode);
        store.set_theme(mode);
    }

    let config = Rc::new(config);
    let engine =
        portfolio_commands::build_engine(store.clone(), services.clone(), config.clone())?;
    let playlist = Rc::new(playlist_from_config(&config.music));
    Ok(SiteRuntime {
        store,
        services,
        config,
        engine,
        playlist,
    })
}

impl SiteRuntime {
    pub fn terminal_controller(&self) -> TerminalController {
        TerminalController::new(
            self.store.clone(),
            self.engine.clone(),
            self.services.scheduler.clone(),
            &self.config,
        )
    }

    pub fn transport(&self) -> MusicTransport {
        MusicTransport::new(self.store.clone(), self.playlist.clone())
    }

    pub fn palette_entries(&self) -> Vec<PaletteEntry> {
        default_entries(&self.engine.registry().descriptors())
    }
}
