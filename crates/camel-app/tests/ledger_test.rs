//! End-to-end ledger behaviour over the file-backed store

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use camel_app::app::{LedgerManager, SubmitOutcome};
use camel_app::repository::open_ledger_store_at;
use camel_domain::model::{Rate, WeighEntry};
use camel_domain::provider::{Clock, IdGenerator, Notifier};
use camel_domain::repository::{CheckSequence, WeighEntryRepository};
use camel_domain::service::{AlarmEvaluator, AlarmSignal};
use camel_infra::FileKeyValueStore;
use camel_store::{LedgerStore, CHECK_SEQ_KEY, ENTRIES_KEY};
use camel_types::NotifyError;
use chrono::NaiveDate;
use tempfile::tempdir;

struct SequentialIds(Cell<u32>);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.0.get() + 1;
        self.0.set(n);
        format!("entry-{}", n)
    }
}

struct FixedClock;

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }
}

/// Always fails, like a muted speaker
struct BrokenSpeaker(Rc<Cell<usize>>);

impl Notifier for BrokenSpeaker {
    fn notify(&self) -> Result<(), NotifyError> {
        self.0.set(self.0.get() + 1);
        Err(NotifyError::Disabled)
    }
}

type FileLedger = LedgerManager<LedgerStore<FileKeyValueStore>>;

fn open(dir: &Path, id_offset: u32) -> (FileLedger, Rc<Cell<usize>>) {
    let attempts = Rc::new(Cell::new(0));
    let store = open_ledger_store_at(dir.to_path_buf()).unwrap();
    let manager = LedgerManager::new(
        store,
        Box::new(SequentialIds(Cell::new(id_offset))),
        Box::new(FixedClock),
        AlarmEvaluator::new(Box::new(BrokenSpeaker(Rc::clone(&attempts)))),
    );
    (manager, attempts)
}

fn submit_new(
    manager: &mut FileLedger,
    plate: &str,
    gross: &str,
    tare: &str,
    rate: Rate,
) -> WeighEntry {
    manager.set_plate_number(plate);
    manager.set_weights(gross, tare);
    manager.set_rate(rate);
    match manager.submit().unwrap() {
        SubmitOutcome::Created(entry) => entry,
        other => panic!("expected Created, got {:?}", other),
    }
}

#[test]
fn test_created_entries_survive_restart() {
    let dir = tempdir().unwrap();
    let (mut manager, _) = open(dir.path(), 0);
    let first = submit_new(&mut manager, "01 A 234 BC", "42000", "12000", Rate::Standard);
    let second = submit_new(&mut manager, "10 B 777 XY", "20000", "8000", Rate::Premium);
    assert_eq!(first.check_no, 1);
    assert_eq!(second.check_no, 2);
    drop(manager);

    let (reopened, _) = open(dir.path(), 100);
    assert_eq!(reopened.entries(), &[second, first]);
    assert_eq!(reopened.form().check_no(), 3);
}

#[test]
fn test_on_disk_layout() {
    let dir = tempdir().unwrap();
    let (mut manager, _) = open(dir.path(), 0);
    submit_new(&mut manager, "01 A 234 BC", "42000", "12000", Rate::Standard);

    let counter = std::fs::read_to_string(dir.path().join(CHECK_SEQ_KEY)).unwrap();
    assert_eq!(counter, "2");

    let raw = std::fs::read_to_string(dir.path().join(ENTRIES_KEY)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value[0];
    assert_eq!(record["id"], "entry-1");
    assert_eq!(record["checkNo"], 1);
    assert_eq!(record["plateNumber"], "01 A 234 BC");
    assert_eq!(record["sofVazin"], 30000.0);
    assert_eq!(record["rate"], 30000);
    assert_eq!(record["price"], 900000000.0);
}

#[test]
fn test_within_range_entry_never_rings() {
    let dir = tempdir().unwrap();
    let (mut manager, attempts) = open(dir.path(), 0);
    submit_new(&mut manager, "01 A 234 BC", "42000", "12000", Rate::Standard);
    assert_eq!(attempts.get(), 0);
}

#[test]
fn test_out_of_range_entry_saved_and_alarm_failure_swallowed() {
    let dir = tempdir().unwrap();
    let (mut manager, attempts) = open(dir.path(), 0);
    manager.set_plate_number("NEG");
    manager.set_gross_weight("12000");
    manager.set_tare_weight("42000");
    assert_eq!(manager.alarm_signal(), AlarmSignal::Raised);
    assert!(attempts.get() >= 1);

    let SubmitOutcome::Created(entry) = manager.submit().unwrap() else {
        panic!("expected Created");
    };
    assert_eq!(entry.net_weight, -30000.0);
    assert_eq!(entry.price, -900_000_000.0);
}

#[test]
fn test_edit_plate_only_keeps_counter() {
    let dir = tempdir().unwrap();
    let (mut manager, _) = open(dir.path(), 0);
    let original = submit_new(&mut manager, "01 A 234 BC", "42000", "12000", Rate::Standard);

    manager.start_edit(&original.id);
    manager.set_plate_number("  01 A 234 BD ");
    let SubmitOutcome::Updated(updated) = manager.submit().unwrap() else {
        panic!("expected Updated");
    };
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.check_no, original.check_no);
    assert_eq!(updated.plate_number, "01 A 234 BD");
    assert_eq!(updated.gross_weight, original.gross_weight);
    assert_eq!(updated.net_weight, original.net_weight);
    assert_eq!(updated.price, original.price);

    let store = open_ledger_store_at(dir.path().to_path_buf()).unwrap();
    assert_eq!(store.peek_next_check_no(), 2);
    assert_eq!(store.load_entries(), vec![updated]);
}

#[test]
fn test_delete_persists_and_search_sees_rest() {
    let dir = tempdir().unwrap();
    let (mut manager, _) = open(dir.path(), 0);
    let a = submit_new(&mut manager, "AAA 1", "1000", "100", Rate::Standard);
    let b = submit_new(&mut manager, "BBB 2", "2000", "200", Rate::Standard);
    let c = submit_new(&mut manager, "aaa 3", "3000", "300", Rate::Standard);

    manager.delete(&b.id).unwrap();
    manager.set_search("AaA");
    let visible: Vec<_> = manager.visible_entries().into_iter().cloned().collect();
    assert_eq!(visible, vec![c.clone(), a.clone()]);

    let (reopened, _) = open(dir.path(), 0);
    assert_eq!(reopened.entries(), &[c, a]);
}

#[test]
fn test_reload_picks_up_external_changes() {
    let dir = tempdir().unwrap();
    let (mut manager, _) = open(dir.path(), 0);
    submit_new(&mut manager, "A", "10", "1", Rate::Standard);

    let (mut other, _) = open(dir.path(), 50);
    submit_new(&mut other, "B", "20", "2", Rate::Premium);

    assert_eq!(manager.entries().len(), 1);
    manager.reload();
    assert_eq!(manager.entries().len(), 2);
    assert_eq!(manager.entries()[0].plate_number, "B");
}

#[test]
fn test_corrupted_files_start_fresh() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(ENTRIES_KEY), "[{broken").unwrap();
    std::fs::write(dir.path().join(CHECK_SEQ_KEY), "not-a-number").unwrap();

    let (mut manager, _) = open(dir.path(), 0);
    assert!(manager.entries().is_empty());
    assert_eq!(manager.form().check_no(), 1);

    let entry = submit_new(&mut manager, "P", "5", "1", Rate::Standard);
    assert_eq!(entry.check_no, 1);
}
