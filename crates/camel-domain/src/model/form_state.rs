//! The active entry form (create or edit mode)

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Rate, WeighDetails, WeighEntry};
use crate::service::weight_calculator::{format_number, net_from_input, parse_weight};

/// Why a submit was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Plate number is required")]
    EmptyPlateNumber,

    #[error("Gross weight (yuk bilan) must be a number")]
    InvalidGrossWeight,

    #[error("Tare weight (yuksiz) must be a number")]
    InvalidTareWeight,
}

/// Raw, pre-validation form input
///
/// Fields are private so that the net weight can only change through the
/// weight setters, which recompute it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    check_no: u64,
    plate_number: String,
    gross_weight: String,
    tare_weight: String,
    net_weight: String,
    date: NaiveDate,
    rate: Rate,
    editing_id: Option<String>,
}

impl FormState {
    /// Fresh create-mode form
    pub fn blank(check_no: u64, date: NaiveDate) -> Self {
        let mut form = Self {
            check_no,
            plate_number: String::new(),
            gross_weight: String::new(),
            tare_weight: String::new(),
            net_weight: String::new(),
            date,
            rate: Rate::default(),
            editing_id: None,
        };
        form.recompute_net();
        form
    }

    /// Edit-mode form populated from a stored entry
    pub fn from_entry(entry: &WeighEntry) -> Self {
        let mut form = Self {
            check_no: entry.check_no,
            plate_number: entry.plate_number.clone(),
            gross_weight: format_number(entry.gross_weight),
            tare_weight: format_number(entry.tare_weight),
            net_weight: String::new(),
            date: entry.date,
            rate: entry.rate,
            editing_id: Some(entry.id.clone()),
        };
        form.recompute_net();
        form
    }

    pub fn check_no(&self) -> u64 {
        self.check_no
    }

    pub fn plate_number(&self) -> &str {
        &self.plate_number
    }

    pub fn gross_weight(&self) -> &str {
        &self.gross_weight
    }

    pub fn tare_weight(&self) -> &str {
        &self.tare_weight
    }

    /// Display text of the derived net weight
    pub fn net_weight(&self) -> &str {
        &self.net_weight
    }

    /// Numeric net weight; an empty display reads as 0
    pub fn net_weight_value(&self) -> f64 {
        parse_weight(&self.net_weight).unwrap_or(0.0)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn set_plate_number(&mut self, plate_number: impl Into<String>) {
        self.plate_number = plate_number.into();
    }

    pub fn set_gross_weight(&mut self, text: impl Into<String>) {
        self.gross_weight = text.into();
        self.recompute_net();
    }

    pub fn set_tare_weight(&mut self, text: impl Into<String>) {
        self.tare_weight = text.into();
        self.recompute_net();
    }

    /// Set both weights with a single net recomputation
    pub fn set_weights(&mut self, gross: impl Into<String>, tare: impl Into<String>) {
        self.gross_weight = gross.into();
        self.tare_weight = tare.into();
        self.recompute_net();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_rate(&mut self, rate: Rate) {
        self.rate = rate;
    }

    fn recompute_net(&mut self) {
        self.net_weight = format_number(net_from_input(&self.gross_weight, &self.tare_weight));
    }

    /// Check required fields and convert to typed details
    pub fn validate(&self) -> Result<WeighDetails, Rejection> {
        let plate_number = self.plate_number.trim();
        if plate_number.is_empty() {
            return Err(Rejection::EmptyPlateNumber);
        }
        let gross_weight = parse_weight(&self.gross_weight).ok_or(Rejection::InvalidGrossWeight)?;
        let tare_weight = parse_weight(&self.tare_weight).ok_or(Rejection::InvalidTareWeight)?;

        Ok(WeighDetails {
            plate_number: plate_number.to_string(),
            gross_weight,
            tare_weight,
            date: self.date,
            rate: self.rate,
        })
    }
}
