//! Free-text search over the ledger and row projection for display

use std::ops::Range;

use serde::Serialize;

use crate::model::WeighEntry;
use crate::service::weight_calculator::{format_grouped, format_number};

/// Column titles of the ledger table, in display order
pub const COLUMN_TITLES: [&str; 7] = [
    "Check_No",
    "Plate_Number",
    "Yuk_bilan",
    "Sana (Date)",
    "Yuksiz",
    "Sof_Vazin",
    "Price",
];

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// True when any stored field contains the query, ignoring case
pub fn matches(entry: &WeighEntry, query: &str) -> bool {
    let query = normalize_query(query);
    if query.is_empty() {
        return true;
    }
    entry
        .field_texts()
        .iter()
        .any(|text| text.to_lowercase().contains(&query))
}

/// Entries matching the query, in their original order
pub fn filter_entries<'a>(entries: &'a [WeighEntry], query: &str) -> Vec<&'a WeighEntry> {
    entries.iter().filter(|entry| matches(entry, query)).collect()
}

/// Byte range of the first case-insensitive occurrence of `needle`
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    'start: for (start, _) in haystack.char_indices() {
        let mut remaining = needle.as_slice();
        for (offset, ch) in haystack[start..].char_indices() {
            for lower in ch.to_lowercase() {
                match remaining.split_first() {
                    Some((&expected, rest)) if expected == lower => remaining = rest,
                    Some(_) => continue 'start,
                    None => break,
                }
            }
            if remaining.is_empty() {
                return Some(start..start + offset + ch.len_utf8());
            }
        }
    }
    None
}

/// A display cell with its first query match marked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Range<usize>>,
}

impl HighlightedText {
    pub fn new(text: String, query: &str) -> Self {
        let mark = find_case_insensitive(&text, query.trim());
        Self { text, mark }
    }

    pub fn plain(text: String) -> Self {
        Self { text, mark: None }
    }

    /// Text split into (before, marked, after)
    pub fn parts(&self) -> (&str, &str, &str) {
        match &self.mark {
            Some(range) => (
                &self.text[..range.start],
                &self.text[range.clone()],
                &self.text[range.end..],
            ),
            None => (&self.text, "", ""),
        }
    }
}

/// One visible ledger row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    pub id: String,
    pub check_no: HighlightedText,
    pub plate_number: HighlightedText,
    pub gross_weight: HighlightedText,
    pub date: HighlightedText,
    pub tare_weight: HighlightedText,
    pub net_weight: HighlightedText,
    pub price: HighlightedText,
}

impl LedgerRow {
    pub fn from_entry(entry: &WeighEntry, query: &str) -> Self {
        let cell = |text: String| HighlightedText::new(text, query);
        Self {
            id: entry.id.clone(),
            check_no: cell(entry.check_no.to_string()),
            plate_number: cell(entry.plate_number.clone()),
            gross_weight: cell(format_number(entry.gross_weight)),
            date: cell(entry.date.to_string()),
            tare_weight: cell(format_number(entry.tare_weight)),
            net_weight: cell(format_number(entry.net_weight)),
            price: cell(format_grouped(entry.price)),
        }
    }

    /// Cells in the order of [`COLUMN_TITLES`]
    pub fn cells(&self) -> [&HighlightedText; 7] {
        [
            &self.check_no,
            &self.plate_number,
            &self.gross_weight,
            &self.date,
            &self.tare_weight,
            &self.net_weight,
            &self.price,
        ]
    }
}

/// Visible rows for a query
pub fn project_rows(entries: &[WeighEntry], query: &str) -> Vec<LedgerRow> {
    filter_entries(entries, query)
        .into_iter()
        .map(|entry| LedgerRow::from_entry(entry, query))
        .collect()
}
