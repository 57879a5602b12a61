use chrono::{NaiveDate, Utc};

use camel_domain::provider::Clock;

/// Today's date in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
