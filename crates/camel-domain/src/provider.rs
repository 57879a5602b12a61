//! Collaborator interfaces consumed by the ledger

use chrono::NaiveDate;

use camel_types::NotifyError;

/// Source of opaque, collision-resistant entry identifiers
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Best-effort alarm side effect (bell, sound, flash)
pub trait Notifier {
    fn notify(&self) -> Result<(), NotifyError>;
}
