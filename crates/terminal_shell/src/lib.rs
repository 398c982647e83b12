//! Runtime-agnostic command interpreter for the portfolio terminal.
//!
//! The crate is split the same way the interpreter is used:
//!
//! - [`CommandRegistry`] is the immutable name-to-command table, assembled once with a
//!   [`CommandRegistryBuilder`].
//! - [`CommandContext`] is the capability bundle every handler receives. Handlers never touch
//!   global state; everything they may do goes through the [`ShellHost`] behind the context.
//! - [`ShellEngine`] parses a line, resolves every stage, runs the pipeline, and converts
//!   failures (parse, lookup, handler error, handler panic) into single terminal lines.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod context;
mod engine;
mod registry;

pub use context::{CommandContext, ShellHost};
pub use engine::ShellEngine;
pub use registry::{
    ArgCompletion, CommandFuture, CommandHandler, CommandRegistration, CommandRegistry,
    CommandRegistryBuilder, RegisteredCommand, RegistryError,
};
