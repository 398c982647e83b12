//! Shared terminal command contracts used by the lexer, the shell engine, the built-in command
//! table, and the terminal widget.
//!
//! This crate is intentionally runtime-agnostic. It defines serializable command metadata,
//! error classification, and execution summaries without depending on Leptos, browser APIs, or
//! the application store.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Help grouping for a registered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandCategory {
    /// Commands that move around the site or open content.
    Navigation,
    /// Everything else.
    Utility,
}

impl CommandCategory {
    /// Heading used by `help`.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Utility => "Utility",
        }
    }
}

/// Visibility policy for registered commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandVisibility {
    /// Command is listed in help and completion.
    Public,
    /// Command is callable but omitted from normal listings.
    Hidden,
}

/// Full command registration metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Unique registry key typed by the user.
    pub name: String,
    /// One-line help text.
    pub description: String,
    /// Help grouping.
    pub category: CommandCategory,
    /// Usage string displayed in help output, such as `cd [dir]`.
    pub usage: String,
    /// Visibility policy.
    pub visibility: CommandVisibility,
}

impl CommandDescriptor {
    /// Creates a public descriptor.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: CommandCategory,
        usage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            usage: usage.into(),
            visibility: CommandVisibility::Public,
        }
    }

    /// Marks the descriptor as hidden from help and completion.
    pub fn hidden(mut self) -> Self {
        self.visibility = CommandVisibility::Hidden;
        self
    }

    /// Returns whether help and completion should list this command.
    pub fn is_public(&self) -> bool {
        self.visibility == CommandVisibility::Public
    }
}

/// Color scheme accepted by the `theme` command and the host theme service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    /// Light palette.
    Light,
    /// Dark palette.
    #[default]
    Dark,
    /// Follow the operating system preference.
    System,
}

impl ThemeMode {
    /// Parses the exact lowercase names `light`, `dark`, and `system`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Stable lowercase token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured shell error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellErrorCode {
    /// The input line could not be split into pipeline stages.
    Parse,
    /// User input violated command usage.
    Usage,
    /// The command was not found.
    NotFound,
    /// The caller lacks permission to perform the action.
    PermissionDenied,
    /// Internal command or runtime failure.
    Internal,
}

/// Error emitted by shell parsing, lookup, or handlers.
///
/// The message is exactly the line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ShellError {
    /// Error category.
    pub code: ShellErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl ShellError {
    /// Creates a new shell error.
    pub fn new(code: ShellErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Malformed pipeline or quoting.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Parse, format!("parse error: {}", message.into()))
    }

    /// Unknown command name.
    pub fn not_found(name: &str) -> Self {
        Self::new(ShellErrorCode::NotFound, format!("{name}: command not found"))
    }

    /// Missing or invalid arguments; `message` is usually a usage line.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Usage, message)
    }

    /// Refused operation.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::PermissionDenied, message)
    }

    /// Handler failure that is not the user's fault.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Internal, message)
    }

    /// Converts the error into a conventional exit code.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ShellErrorCode::Parse | ShellErrorCode::Usage => 2,
            ShellErrorCode::NotFound => 127,
            ShellErrorCode::PermissionDenied => 126,
            ShellErrorCode::Internal => 1,
        }
    }
}

/// Shell exit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellExit {
    /// Numeric exit code.
    pub code: i32,
    /// Optional explanatory message.
    pub message: Option<String>,
}

impl ShellExit {
    /// Successful command completion.
    pub fn success() -> Self {
        Self {
            code: 0,
            message: None,
        }
    }

    /// Exit status derived from an error.
    pub fn from_error(error: &ShellError) -> Self {
        Self {
            code: error.exit_code(),
            message: Some(error.message.clone()),
        }
    }

    /// Returns whether the run completed without error.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Final execution result metadata for one submitted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Name of the last stage that ran, if any stage was resolved.
    pub command: Option<String>,
    /// Number of pipeline stages in the submitted line.
    pub stages: usize,
    /// Process-style exit metadata.
    pub exit: ShellExit,
}

impl ExecutionSummary {
    /// Summary for a blank line.
    pub fn empty() -> Self {
        Self {
            command: None,
            stages: 0,
            exit: ShellExit::success(),
        }
    }
}

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Text inserted into the input line.
    pub value: String,
    /// Optional short description.
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn theme_mode_parses_only_exact_names() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("system"), Some(ThemeMode::System));
        assert_eq!(ThemeMode::parse("Dark"), None);
        assert_eq!(ThemeMode::parse("neon"), None);
    }

    #[test]
    fn not_found_message_names_the_command() {
        let err = ShellError::not_found("frobnicate");
        assert_eq!(err.to_string(), "frobnicate: command not found");
        assert_eq!(ShellExit::from_error(&err).code, 127);
    }

    #[test]
    fn descriptor_serializes_category_kebab_case() {
        let descriptor =
            CommandDescriptor::new("cd", "Change directory", CommandCategory::Navigation, "cd [dir]");
        let json = serde_json::to_value(&descriptor).expect("serialize");
        assert_eq!(json["category"], "navigation");
        assert_eq!(json["visibility"], "public");
        assert!(!descriptor.hidden().is_public());
    }
}
