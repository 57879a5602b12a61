//! Ledger store: entry collection and check sequence over a key-value store

use tracing::{debug, warn};

use camel_domain::model::WeighEntry;
use camel_domain::repository::{CheckSequence, WeighEntryRepository};
use camel_types::{Error, Result};

use crate::kv::KeyValueStore;

/// Key holding the JSON array of entries
pub const ENTRIES_KEY: &str = "camel-weigh-entries-v1";

/// Key holding the next check number as text
pub const CHECK_SEQ_KEY: &str = "camel-weigh-check-seq";

const FIRST_CHECK_NO: u64 = 1;

/// Durable ledger storage
///
/// Read failures degrade to an empty ledger / first check number so that a
/// fresh or damaged store still opens.
#[derive(Debug)]
pub struct LedgerStore<S> {
    kv: S,
}

impl<S: KeyValueStore> LedgerStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }
}

impl<S: KeyValueStore> WeighEntryRepository for LedgerStore<S> {
    fn load_entries(&self) -> Vec<WeighEntry> {
        let Some(raw) = self.kv.get(ENTRIES_KEY) else {
            debug!("no stored entries under {}", ENTRIES_KEY);
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("stored entries under {} are unreadable, starting empty: {}", ENTRIES_KEY, e);
                Vec::new()
            }
        }
    }

    fn save_entries(&mut self, entries: &[WeighEntry]) -> Result<()> {
        let content = serde_json::to_string(entries)?;
        self.kv.set(ENTRIES_KEY, &content)?;
        debug!("saved {} entries", entries.len());
        Ok(())
    }
}

impl<S: KeyValueStore> CheckSequence for LedgerStore<S> {
    fn peek_next_check_no(&self) -> u64 {
        let Some(raw) = self.kv.get(CHECK_SEQ_KEY) else {
            return FIRST_CHECK_NO;
        };
        match raw.trim().parse::<u64>() {
            Ok(next) => next,
            Err(_) => {
                warn!("check sequence value {:?} is not a number, using {}", raw, FIRST_CHECK_NO);
                FIRST_CHECK_NO
            }
        }
    }

    fn consume_next_check_no(&mut self) -> Result<u64> {
        let next = self.peek_next_check_no();
        let Some(after) = next.checked_add(1) else {
            warn!("check sequence exhausted at {}", next);
            return Err(Error::Storage(format!(
                "check sequence under {} is exhausted ({})",
                CHECK_SEQ_KEY, next
            )));
        };
        self.kv.set(CHECK_SEQ_KEY, &after.to_string())?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKeyValueStore;
    use camel_domain::model::{Rate, WeighDetails};
    use chrono::NaiveDate;

    fn entry(id: &str, check_no: u64, plate: &str) -> WeighEntry {
        WeighEntry::create(
            id.to_string(),
            check_no,
            WeighDetails {
                plate_number: plate.to_string(),
                gross_weight: 42000.0,
                tare_weight: 12000.5,
                date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
                rate: Rate::Premium,
            },
        )
    }

    #[test]
    fn test_empty_store_defaults() {
        let store = LedgerStore::new(MemoryKeyValueStore::new());
        assert!(store.load_entries().is_empty());
        assert_eq!(store.peek_next_check_no(), 1);
    }

    #[test]
    fn test_save_then_load_preserves_order_and_values() {
        let mut store = LedgerStore::new(MemoryKeyValueStore::new());
        let entries = vec![entry("b", 2, "second"), entry("a", 1, "first")];
        store.save_entries(&entries).unwrap();
        assert_eq!(store.load_entries(), entries);
    }

    #[test]
    fn test_corrupt_entries_degrade_to_empty() {
        let store = LedgerStore::new(MemoryKeyValueStore::with_values([(ENTRIES_KEY, "{not json")]));
        assert!(store.load_entries().is_empty());
    }

    #[test]
    fn test_unknown_rate_makes_collection_unreadable() {
        let raw = r#"[{"id":"x","checkNo":1,"plateNumber":"P","yukBilan":1,"yuksiz":0,
            "sofVazin":1,"date":"2026-10-18","rate":35000,"price":35000}]"#;
        let store = LedgerStore::new(MemoryKeyValueStore::with_values([(ENTRIES_KEY, raw)]));
        assert!(store.load_entries().is_empty());
    }

    #[test]
    fn test_consume_advances_peek_does_not() {
        let mut store = LedgerStore::new(MemoryKeyValueStore::new());
        assert_eq!(store.peek_next_check_no(), 1);
        assert_eq!(store.peek_next_check_no(), 1);
        assert_eq!(store.consume_next_check_no().unwrap(), 1);
        assert_eq!(store.consume_next_check_no().unwrap(), 2);
        assert_eq!(store.peek_next_check_no(), 3);
        assert_eq!(store.kv().get(CHECK_SEQ_KEY).as_deref(), Some("3"));
    }

    #[test]
    fn test_exhausted_counter_is_storage_error() {
        let max = u64::MAX.to_string();
        let mut store =
            LedgerStore::new(MemoryKeyValueStore::with_values([(CHECK_SEQ_KEY, max.as_str())]));
        assert_eq!(store.peek_next_check_no(), u64::MAX);
        assert!(matches!(store.consume_next_check_no(), Err(Error::Storage(_))));
        assert_eq!(store.kv().get(CHECK_SEQ_KEY), Some(max));
    }

    #[test]
    fn test_counter_stored_as_text() {
        let store = LedgerStore::new(MemoryKeyValueStore::with_values([(CHECK_SEQ_KEY, "41")]));
        assert_eq!(store.peek_next_check_no(), 41);
        let store = LedgerStore::new(MemoryKeyValueStore::with_values([(CHECK_SEQ_KEY, "forty")]));
        assert_eq!(store.peek_next_check_no(), 1);
    }
}
