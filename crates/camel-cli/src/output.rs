//! Output formatting module

use camel_domain::model::{FormState, WeighEntry};
use camel_domain::service::search::{HighlightedText, LedgerRow, COLUMN_TITLES};
use camel_domain::service::{format_grouped, format_number, AlarmSignal};
use camel_types::{OutputFormat, Result};

const MARK_START: &str = "\x1b[7m";
const MARK_END: &str = "\x1b[0m";

/// Columns printed right-aligned (check no, weights, price)
const NUMERIC_COLUMNS: [bool; 7] = [true, false, true, false, true, true, true];

#[derive(Debug, Clone, Copy, Default)]
pub struct TableStyle {
    /// Wrap search matches in reverse video
    pub highlight: bool,
    /// Leading ID column, used to pick rows for edit/delete
    pub with_ids: bool,
}

fn render_cell(cell: &HighlightedText, highlight: bool) -> String {
    let (before, marked, after) = cell.parts();
    if highlight && !marked.is_empty() {
        format!("{}{}{}{}{}", before, MARK_START, marked, MARK_END, after)
    } else {
        cell.text.clone()
    }
}

fn pad(rendered: String, visible_width: usize, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width));
    if right {
        format!("{}{}", fill, rendered)
    } else {
        format!("{}{}", rendered, fill)
    }
}

/// Ledger rows as a fixed-width text table
pub fn render_table(rows: &[LedgerRow], style: TableStyle) -> String {
    let mut titles: Vec<&str> = Vec::with_capacity(8);
    if style.with_ids {
        titles.push("ID");
    }
    titles.extend(COLUMN_TITLES);

    let mut right_aligned: Vec<bool> = Vec::with_capacity(8);
    if style.with_ids {
        right_aligned.push(false);
    }
    right_aligned.extend(NUMERIC_COLUMNS);

    // (rendered, visible width) per cell
    let body: Vec<Vec<(String, usize)>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(titles.len());
            if style.with_ids {
                cells.push((row.id.clone(), row.id.chars().count()));
            }
            for cell in row.cells() {
                cells.push((render_cell(cell, style.highlight), cell.text.chars().count()));
            }
            cells
        })
        .collect();

    let widths: Vec<usize> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            body.iter()
                .map(|cells| cells[i].1)
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| pad(title.to_string(), title.chars().count(), widths[i], right_aligned[i]))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');

    if body.is_empty() {
        out.push_str("No records.\n");
        return out;
    }

    for cells in body {
        let line: Vec<String> = cells
            .into_iter()
            .enumerate()
            .map(|(i, (rendered, visible))| pad(rendered, visible, widths[i], right_aligned[i]))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Current form, with the alarm warning when raised
pub fn render_form(form: &FormState, signal: AlarmSignal, alarm_enabled: bool) -> String {
    let mut out = String::new();
    match form.editing_id() {
        Some(id) => out.push_str(&format!("Editing entry {}\n", id)),
        None => out.push_str("New entry\n"),
    }
    out.push_str(&format!("  Check No:        {}\n", form.check_no()));
    out.push_str(&format!("  Plate Number:    {}\n", form.plate_number()));
    out.push_str(&format!("  Yuk bilan (kg):  {}\n", form.gross_weight()));
    out.push_str(&format!("  Yuksiz (kg):     {}\n", form.tare_weight()));
    out.push_str(&format!("  Sof Vazin (kg):  {}\n", form.net_weight()));
    out.push_str(&format!("  Date:            {}\n", form.date()));
    out.push_str(&format!("  Price Rate:      {}\n", form.rate().label()));
    out.push_str(&format!(
        "  Alarm:           {}\n",
        if alarm_enabled { "ON" } else { "OFF" }
    ));
    if let Some(message) = signal.message() {
        out.push_str(&format!("  !! {}\n", message));
    }
    out
}

/// One saved entry
pub fn output_entry(output_format: OutputFormat, action: &str, entry: &WeighEntry) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(entry)?;
        println!("{}", content);
    } else {
        println!("{} check no {}", action, entry.check_no);
        println!("  ID:              {}", entry.id);
        println!("  Plate Number:    {}", entry.plate_number);
        println!("  Yuk bilan (kg):  {}", format_number(entry.gross_weight));
        println!("  Yuksiz (kg):     {}", format_number(entry.tare_weight));
        println!("  Sof Vazin (kg):  {}", format_number(entry.net_weight));
        println!("  Date:            {}", entry.date);
        println!("  Price Rate:      {}", entry.rate.label());
        println!("  Price:           {}", format_grouped(entry.price));
    }
    Ok(())
}

/// Entries as a JSON array
pub fn output_entries_json(entries: &[&WeighEntry]) -> Result<()> {
    let content = serde_json::to_string_pretty(entries)?;
    println!("{}", content);
    Ok(())
}
