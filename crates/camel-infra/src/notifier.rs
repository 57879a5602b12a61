//! Terminal bell used as the audible alarm

use std::io::{self, Write};

use camel_domain::provider::Notifier;
use camel_types::NotifyError;

/// Rings the terminal bell (BEL) on stderr
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for TerminalBell {
    fn notify(&self) -> Result<(), NotifyError> {
        if !self.enabled {
            return Err(NotifyError::Disabled);
        }
        let mut stderr = io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}
