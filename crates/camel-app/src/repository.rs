//! Store openers and ledger wiring

use std::path::PathBuf;

use camel_domain::service::AlarmEvaluator;
use camel_infra::{FileKeyValueStore, SystemClock, TerminalBell, UuidGenerator};
use camel_store::{KeyValueStore, LedgerStore, MemoryKeyValueStore};
use camel_types::Result;

use crate::app::LedgerManager;
use crate::config::Config;

/// Ledger manager over any key-value store, boxed so callers can pick one at runtime
pub type Ledger = LedgerManager<LedgerStore<Box<dyn KeyValueStore>>>;

/// Open the file-backed ledger store from config
pub fn open_ledger_store(config: &Config) -> Result<LedgerStore<FileKeyValueStore>> {
    let store_dir = config.store_dir()?;
    open_ledger_store_at(store_dir)
}

/// Open the file-backed ledger store at a custom directory
pub fn open_ledger_store_at(store_dir: PathBuf) -> Result<LedgerStore<FileKeyValueStore>> {
    Ok(LedgerStore::new(FileKeyValueStore::open(store_dir)?))
}

/// Ledger manager over the configured store with system collaborators
pub fn open_ledger(config: &Config) -> Result<Ledger> {
    let kv: Box<dyn KeyValueStore> = Box::new(open_ledger_store(config)?.into_inner());
    Ok(build_ledger(kv, config))
}

/// Ledger manager that keeps everything in memory (nothing is written to disk)
pub fn open_ephemeral_ledger(config: &Config) -> Ledger {
    build_ledger(Box::new(MemoryKeyValueStore::new()), config)
}

fn build_ledger(kv: Box<dyn KeyValueStore>, config: &Config) -> Ledger {
    let alarm = AlarmEvaluator::new(Box::new(TerminalBell::new(config.alarm_bell)))
        .with_enabled(config.alarm_enabled);
    LedgerManager::new(
        LedgerStore::new(kv),
        Box::new(UuidGenerator),
        Box::new(SystemClock),
        alarm,
    )
}
