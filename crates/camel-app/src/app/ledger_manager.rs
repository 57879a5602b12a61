//! Ledger Manager - the weigh-station form, the entry collection and its view
//!
//! All operations run to completion synchronously. Every committed change is
//! written through the repository before the in-memory collection is replaced,
//! so a failed write leaves the ledger as it was.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use camel_domain::model::{FormState, Rate, Rejection, WeighEntry};
use camel_domain::provider::{Clock, IdGenerator};
use camel_domain::repository::{CheckSequence, WeighEntryRepository};
use camel_domain::service::search::{filter_entries, project_rows, LedgerRow};
use camel_domain::service::{AlarmEvaluator, AlarmSignal};
use camel_types::Result;

/// What a submit did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A new entry was prepended to the ledger
    Created(WeighEntry),
    /// The entry under edit was rewritten in place
    Updated(WeighEntry),
    /// Required input missing or not numeric; nothing persisted
    Rejected(Rejection),
    /// The entry under edit no longer exists; nothing persisted
    StaleEdit(String),
}

pub struct LedgerManager<R> {
    store: R,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    alarm: AlarmEvaluator,
    entries: Vec<WeighEntry>,
    form: FormState,
    search: String,
}

impl<R: WeighEntryRepository + CheckSequence> LedgerManager<R> {
    /// Load the ledger and start with a create-mode form
    pub fn new(
        store: R,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
        alarm: AlarmEvaluator,
    ) -> Self {
        let entries = store.load_entries();
        let form = FormState::blank(store.peek_next_check_no(), clock.today());
        let mut manager = Self {
            store,
            ids,
            clock,
            alarm,
            entries,
            form,
            search: String::new(),
        };
        manager.evaluate_alarm();
        manager
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[WeighEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&WeighEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn find_by_check_no(&self, check_no: u64) -> Option<&WeighEntry> {
        self.entries.iter().find(|entry| entry.check_no == check_no)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn next_check_no(&self) -> u64 {
        self.store.peek_next_check_no()
    }

    // ------------------------------------------------------------------
    // Alarm
    // ------------------------------------------------------------------

    pub fn alarm_signal(&self) -> AlarmSignal {
        self.alarm.signal()
    }

    pub fn alarm_enabled(&self) -> bool {
        self.alarm.is_enabled()
    }

    pub fn set_alarm_enabled(&mut self, enabled: bool) -> AlarmSignal {
        self.alarm.set_enabled(enabled, self.form.net_weight_value())
    }

    pub fn toggle_alarm(&mut self) -> AlarmSignal {
        let enabled = !self.alarm.is_enabled();
        self.set_alarm_enabled(enabled)
    }

    fn evaluate_alarm(&mut self) -> AlarmSignal {
        self.alarm.evaluate(self.form.net_weight_value())
    }

    // ------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------

    /// Apply a form change; the alarm is re-evaluated when net weight moved
    fn change_form(&mut self, change: impl FnOnce(&mut FormState)) {
        let previous_net = self.form.net_weight().to_string();
        change(&mut self.form);
        if self.form.net_weight() != previous_net {
            debug!("net weight {} -> {}", previous_net, self.form.net_weight());
            self.evaluate_alarm();
        }
    }

    /// Reset the form to create mode with the next check number and today's date
    pub fn start_create(&mut self) {
        let form = FormState::blank(self.store.peek_next_check_no(), self.clock.today());
        self.change_form(|current| *current = form);
    }

    /// Load an entry into the form for editing; false if no such entry
    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(form) = self.entry(id).map(FormState::from_entry) else {
            debug!("edit requested for unknown entry {}", id);
            return false;
        };
        self.change_form(|current| *current = form);
        true
    }

    pub fn set_plate_number(&mut self, plate_number: impl Into<String>) {
        self.form.set_plate_number(plate_number);
    }

    pub fn set_gross_weight(&mut self, text: impl Into<String>) {
        self.change_form(|form| form.set_gross_weight(text));
    }

    pub fn set_tare_weight(&mut self, text: impl Into<String>) {
        self.change_form(|form| form.set_tare_weight(text));
    }

    /// Set gross and tare together; the alarm sees only the resulting net
    pub fn set_weights(&mut self, gross: impl Into<String>, tare: impl Into<String>) {
        self.change_form(|form| form.set_weights(gross, tare));
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.form.set_date(date);
    }

    pub fn set_rate(&mut self, rate: Rate) {
        self.form.set_rate(rate);
    }

    /// Validate the form and commit it as a new or updated entry
    ///
    /// A rejected form is left untouched so the operator can correct it;
    /// every other outcome resets the form to create mode.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let details = match self.form.validate() {
            Ok(details) => details,
            Err(rejection) => {
                debug!("submit rejected: {}", rejection);
                return Ok(SubmitOutcome::Rejected(rejection));
            }
        };

        let outcome = match self.form.editing_id().map(str::to_string) {
            Some(id) => {
                let mut next = self.entries.clone();
                match next.iter().position(|entry| entry.id == id) {
                    Some(index) => {
                        next[index].apply(details);
                        let updated = next[index].clone();
                        self.store.save_entries(&next)?;
                        self.entries = next;
                        info!(
                            "updated entry {} (check no {}), net {} kg",
                            updated.id, updated.check_no, updated.net_weight
                        );
                        SubmitOutcome::Updated(updated)
                    }
                    None => {
                        warn!("entry {} disappeared while being edited", id);
                        SubmitOutcome::StaleEdit(id)
                    }
                }
            }
            None => {
                // The counter is persisted before the collection; a failed
                // collection write leaves a gap in the check numbers.
                let check_no = self.store.consume_next_check_no()?;
                let created = WeighEntry::create(self.ids.next_id(), check_no, details);
                let mut next = Vec::with_capacity(self.entries.len() + 1);
                next.push(created.clone());
                next.extend(self.entries.iter().cloned());
                self.store.save_entries(&next)?;
                self.entries = next;
                info!(
                    "created entry {} (check no {}), net {} kg",
                    created.id, created.check_no, created.net_weight
                );
                SubmitOutcome::Created(created)
            }
        };

        self.start_create();
        Ok(outcome)
    }

    /// Remove an entry; resets the form if it was the one being edited
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let next: Vec<WeighEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        let removed = next.len() != self.entries.len();
        if removed {
            self.store.save_entries(&next)?;
            self.entries = next;
            info!("deleted entry {}", id);
        } else {
            debug!("delete requested for unknown entry {}", id);
        }

        if self.form.editing_id() == Some(id) {
            self.start_create();
        }
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Entries matching the current search, newest first
    pub fn visible_entries(&self) -> Vec<&WeighEntry> {
        filter_entries(&self.entries, &self.search)
    }

    /// Display rows for the current search with matches marked
    pub fn rows(&self) -> Vec<LedgerRow> {
        project_rows(&self.entries, &self.search)
    }

    /// Re-read the ledger from storage; the form is kept as is
    pub fn reload(&mut self) {
        self.entries = self.store.load_entries();
        debug!("reloaded {} entries", self.entries.len());
    }
}

impl<R> std::fmt::Debug for LedgerManager<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerManager")
            .field("entries", &self.entries.len())
            .field("form", &self.form)
            .field("search", &self.search)
            .field("alarm", &self.alarm)
            .finish_non_exhaustive()
    }
}
