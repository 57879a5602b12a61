//! Infrastructure layer - concrete collaborators for the ledger

pub mod clock;
pub mod id;
pub mod notifier;
pub mod persistence;

pub use clock::SystemClock;
pub use id::UuidGenerator;
pub use notifier::TerminalBell;
pub use persistence::FileKeyValueStore;
