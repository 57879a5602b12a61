//! Persistent store for the weigh entry ledger
//!
//! The ledger lives in a key-value store under two fixed keys: one for the
//! entry collection (JSON array) and one for the check-number counter.

pub mod kv;
pub mod ledger;

pub use kv::{KeyValueStore, MemoryKeyValueStore};
pub use ledger::{LedgerStore, CHECK_SEQ_KEY, ENTRIES_KEY};
