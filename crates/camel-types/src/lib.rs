//! Core types for the camel weigh-station ledger

mod error;
mod types;

pub use error::*;
pub use types::*;
