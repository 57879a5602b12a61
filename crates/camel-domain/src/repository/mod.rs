//! Repository trait definitions for data persistence

use camel_types::Result;

use crate::model::WeighEntry;

/// Repository for the weigh entry collection
///
/// Reads never fail: missing or unreadable data is an empty ledger.
pub trait WeighEntryRepository {
    /// Load all entries in stored order (newest first)
    fn load_entries(&self) -> Vec<WeighEntry>;

    /// Overwrite the stored collection
    fn save_entries(&mut self, entries: &[WeighEntry]) -> Result<()>;
}

/// Persisted check-number counter
pub trait CheckSequence {
    /// Next check number without advancing the counter
    fn peek_next_check_no(&self) -> u64;

    /// Return the next check number and persist the advanced counter
    fn consume_next_check_no(&mut self) -> Result<u64>;
}
