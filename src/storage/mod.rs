//! Storage layer for session secrets and preferences.
//!
//! This module provides the key/value abstraction the auth session and the
//! theme preference are persisted through.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation
//! - `models`: well-known keys and the on-disk entry record
//! - `preferences`: typed access to the theme preference

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;
pub mod preferences;

pub use backend::KeyValueStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use models::StoredEntry;
pub use preferences::Preferences;
