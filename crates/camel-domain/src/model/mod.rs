//! Domain model types

pub mod form_state;
pub mod rate;
pub mod weigh_entry;

pub use form_state::{FormState, Rejection};
pub use rate::Rate;
pub use weigh_entry::{WeighDetails, WeighEntry};
