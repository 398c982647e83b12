//! The single shared UI state store for the portfolio site.
//!
//! [`AppState`] holds every piece of cross-widget state (terminal, music, UI flags, shelf
//! selections, search, randomizer). Mutations are expressed as [`StoreAction`] values applied by
//! the pure [`reduce_store`] transition function; [`Store`] wraps the state in the process-wide
//! observable container that widgets subscribe to.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod model;
pub mod reducer;
pub mod store;

pub use model::*;
pub use reducer::{reduce_store, StoreAction, MAX_TERMINAL_HISTORY};
pub use store::{Store, Subscription};
