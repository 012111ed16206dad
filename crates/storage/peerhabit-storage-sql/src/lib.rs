//! Peer-habit SQL storage
//!
//! SQLite implementation of the registry's key-value contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-exports
pub use peerhabit_core;

pub mod sqlite;

pub use sqlite::{SqliteStore, DEFAULT_DATABASE_URL, ENV_DATABASE_URL};
