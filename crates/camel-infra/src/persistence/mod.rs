//! Persistence implementations
//!
//! This module provides file-based implementations of the storage traits.

mod file_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
