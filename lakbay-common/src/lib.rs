//! # Lakbay Common Library
//!
//! Shared code for the Lakbay crates including:
//! - Error and result types
//! - Bootstrap configuration loading and root folder resolution
//! - Key-value store abstraction (in-memory and SQLite-backed)

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod kv;

pub use error::{Error, Result};
pub use kv::{KeyValueStore, MemoryStore};
