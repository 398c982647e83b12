//! Site configuration embedded at build time.
//!
//! Every section is `#[serde(default)]`, so a partial document only overrides the keys it names.

use leptos::logging;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_SITE_TOML: &str = include_str!("../content/site.toml");

/// Configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the schema.
    #[error("invalid site config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub user: String,
    pub host: String,
    /// Virtual working directory shown in the prompt.
    pub cwd: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            host: "portfolio".to_string(),
            cwd: "~".to_string(),
        }
    }
}

impl PromptConfig {
    /// `user@host:cwd$`
    pub fn prefix(&self) -> String {
        format!("{}@{}:{}$", self.user, self.host, self.cwd)
    }

    /// Path printed by `pwd`.
    pub fn home_path(&self) -> String {
        format!("/home/{}", self.user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub role: String,
    pub location: String,
    pub summary: Vec<String>,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    pub skills: Vec<SkillGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Lines typed out before the first prompt.
    pub intro_lines: Vec<String>,
    /// Pause after each intro line.
    pub intro_step_delay_ms: u32,
    pub sudo_delay_ms: u32,
    /// Pause between lines of the `rm /` sequence.
    pub panic_step_delay_ms: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            intro_lines: vec!["Welcome! Type 'help' to see available commands.".to_string()],
            intro_step_delay_ms: 250,
            sudo_delay_ms: 1500,
            panic_step_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub title: String,
    pub artist: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub initial_volume: f64,
    /// Delay before skipping a track that failed to load.
    pub load_failure_guard_ms: u32,
    pub tracks: Vec<TrackConfig>,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            initial_volume: portfolio_store::DEFAULT_VOLUME,
            load_failure_guard_ms: 1500,
            tracks: Vec::new(),
        }
    }
}

/// Whole-site configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub prompt: PromptConfig,
    pub profile: ProfileConfig,
    pub terminal: TerminalConfig,
    pub music: MusicConfig,
}

impl SiteConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// The document shipped with the crate, or defaults if it does not parse.
    pub fn embedded() -> Self {
        match Self::from_toml_str(EMBEDDED_SITE_TOML) {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("{err}; falling back to default site config");
                Self::default()
            }
        }
    }
}
