//! Command handlers

use std::io::{self, IsTerminal};

use camel_app::app::SubmitOutcome;
use camel_app::config::Config;
use camel_app::repository::{open_ephemeral_ledger, open_ledger, Ledger};
use camel_domain::model::{Rate, WeighEntry};
use camel_types::{Error, OutputFormat, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::output::{output_entries_json, output_entry, render_table, TableStyle};
use crate::session::run_session;

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref store_dir) = cli.store_dir {
        config.store_dir = Some(store_dir.clone());
    }
    if cli.no_alarm {
        config.alarm_enabled = false;
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Add {
            plate,
            gross,
            tare,
            date,
            rate,
        } => {
            let mut ledger = open(cli.ephemeral, &config)?;
            let input = NewEntry {
                plate,
                gross,
                tare,
                date,
                rate,
            };
            cmd_add(&mut ledger, output_format, input)
        }

        Commands::Edit {
            target,
            plate,
            gross,
            tare,
            date,
            rate,
        } => {
            let mut ledger = open(cli.ephemeral, &config)?;
            let changes = EntryChanges {
                plate,
                gross,
                tare,
                date,
                rate,
            };
            cmd_edit(&mut ledger, output_format, &target, changes)
        }

        Commands::Delete { target } => {
            let mut ledger = open(cli.ephemeral, &config)?;
            cmd_delete(&mut ledger, &target)
        }

        Commands::List { search, limit } => {
            let mut ledger = open(cli.ephemeral, &config)?;
            cmd_list(&mut ledger, output_format, search, limit)
        }

        Commands::Print { search } => {
            let mut ledger = open(cli.ephemeral, &config)?;
            cmd_print(&mut ledger, output_format, search)
        }

        Commands::Next => {
            let ledger = open(cli.ephemeral, &config)?;
            println!("{}", ledger.next_check_no());
            Ok(())
        }

        Commands::Session => {
            let mut ledger = open(cli.ephemeral, &config)?;
            cmd_session(&mut ledger)
        }

        Commands::Config {
            show,
            set_store_dir,
            set_alarm,
            set_bell,
            set_output,
            reset,
        } => cmd_config(show, set_store_dir, set_alarm, set_bell, set_output, reset),
    }
}

fn open(ephemeral: bool, config: &Config) -> Result<Ledger> {
    if ephemeral {
        debug!("using in-memory ledger");
        Ok(open_ephemeral_ledger(config))
    } else {
        let store_dir = config.store_dir()?;
        debug!("opening ledger store at {}", store_dir.display());
        open_ledger(config)
    }
}

/// Find an entry by exact id, check number, or unique id prefix
pub fn resolve_entry_id(ledger: &Ledger, token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if let Some(entry) = ledger.entry(token) {
        return Some(entry.id.clone());
    }
    if let Ok(check_no) = token.parse::<u64>() {
        if let Some(entry) = ledger.find_by_check_no(check_no) {
            return Some(entry.id.clone());
        }
    }

    let mut matches = ledger
        .entries()
        .iter()
        .filter(|entry| entry.id.starts_with(token));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Some(entry.id.clone()),
        _ => None,
    }
}

fn require_entry_id(ledger: &Ledger, token: &str) -> Result<String> {
    resolve_entry_id(ledger, token)
        .ok_or_else(|| Error::InvalidInput(format!("no single entry matches {}", token)))
}

/// Saved entry plus the alarm warning that was showing when it was submitted
type Saved = (WeighEntry, Option<&'static str>);

fn warn_if_alarm(warning: Option<&str>) {
    if let Some(message) = warning {
        eprintln!("Warning: {}", message);
    }
}

/// Values given on the command line for a new entry
struct NewEntry {
    plate: String,
    gross: String,
    tare: String,
    date: Option<NaiveDate>,
    rate: Option<Rate>,
}

fn add_entry(ledger: &mut Ledger, input: NewEntry) -> Result<Saved> {
    ledger.start_create();
    ledger.set_plate_number(input.plate);
    ledger.set_weights(input.gross, input.tare);
    if let Some(date) = input.date {
        ledger.set_date(date);
    }
    if let Some(rate) = input.rate {
        ledger.set_rate(rate);
    }
    // submit resets the form, and with it the signal
    let warning = ledger.alarm_signal().message();

    match ledger.submit()? {
        SubmitOutcome::Created(entry) => Ok((entry, warning)),
        SubmitOutcome::Rejected(rejection) => Err(Error::InvalidInput(rejection.to_string())),
        other => Err(Error::InvalidInput(format!("unexpected result: {:?}", other))),
    }
}

fn cmd_add(ledger: &mut Ledger, output_format: OutputFormat, input: NewEntry) -> Result<()> {
    let (entry, warning) = add_entry(ledger, input)?;
    warn_if_alarm(warning);
    output_entry(output_format, "Added", &entry)
}

/// Fields given on the command line for an edit
struct EntryChanges {
    plate: Option<String>,
    gross: Option<String>,
    tare: Option<String>,
    date: Option<NaiveDate>,
    rate: Option<Rate>,
}

fn edit_entry(ledger: &mut Ledger, target: &str, changes: EntryChanges) -> Result<Saved> {
    let id = require_entry_id(ledger, target)?;
    ledger.start_edit(&id);

    if let Some(plate) = changes.plate {
        ledger.set_plate_number(plate);
    }
    if changes.gross.is_some() || changes.tare.is_some() {
        let gross = changes
            .gross
            .unwrap_or_else(|| ledger.form().gross_weight().to_string());
        let tare = changes
            .tare
            .unwrap_or_else(|| ledger.form().tare_weight().to_string());
        ledger.set_weights(gross, tare);
    }
    if let Some(date) = changes.date {
        ledger.set_date(date);
    }
    if let Some(rate) = changes.rate {
        ledger.set_rate(rate);
    }
    let warning = ledger.alarm_signal().message();

    match ledger.submit()? {
        SubmitOutcome::Updated(entry) => Ok((entry, warning)),
        SubmitOutcome::Rejected(rejection) => Err(Error::InvalidInput(rejection.to_string())),
        SubmitOutcome::StaleEdit(id) => {
            Err(Error::InvalidInput(format!("entry {} no longer exists", id)))
        }
        SubmitOutcome::Created(entry) => Err(Error::InvalidInput(format!(
            "edit created a new entry {} instead",
            entry.id
        ))),
    }
}

fn cmd_edit(
    ledger: &mut Ledger,
    output_format: OutputFormat,
    target: &str,
    changes: EntryChanges,
) -> Result<()> {
    let (entry, warning) = edit_entry(ledger, target, changes)?;
    warn_if_alarm(warning);
    output_entry(output_format, "Updated", &entry)
}

fn cmd_delete(ledger: &mut Ledger, target: &str) -> Result<()> {
    let id = require_entry_id(ledger, target)?;
    if ledger.delete(&id)? {
        println!("Deleted {}", id);
    }
    Ok(())
}

fn cmd_list(
    ledger: &mut Ledger,
    output_format: OutputFormat,
    search: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    ledger.set_search(search.unwrap_or_default());
    let limit = limit.unwrap_or(usize::MAX);

    if output_format == OutputFormat::Json {
        let entries: Vec<_> = ledger.visible_entries().into_iter().take(limit).collect();
        return output_entries_json(&entries);
    }

    let mut rows = ledger.rows();
    let total = rows.len();
    rows.truncate(limit);
    let style = TableStyle {
        highlight: io::stdout().is_terminal(),
        with_ids: true,
    };
    print!("{}", render_table(&rows, style));
    if rows.len() < total {
        println!("({} of {} entries shown)", rows.len(), total);
    }
    Ok(())
}

fn cmd_print(ledger: &mut Ledger, output_format: OutputFormat, search: Option<String>) -> Result<()> {
    ledger.set_search(search.unwrap_or_default());

    if output_format == OutputFormat::Json {
        return output_entries_json(&ledger.visible_entries());
    }

    println!("Camel Weigh Station");
    println!();
    print!("{}", render_table(&ledger.rows(), TableStyle::default()));
    Ok(())
}

fn cmd_session(ledger: &mut Ledger) -> Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = io::stdout();
    let style = TableStyle {
        highlight: stdout.is_terminal(),
        with_ids: true,
    };
    run_session(ledger, stdin.lock(), &mut stdout, style, prompt)
}

fn cmd_config(
    show: bool,
    set_store_dir: Option<std::path::PathBuf>,
    set_alarm: Option<bool>,
    set_bell: Option<bool>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(store_dir) = set_store_dir {
        config.store_dir = Some(store_dir);
        modified = true;
    }

    if let Some(enabled) = set_alarm {
        config.alarm_enabled = enabled;
        modified = true;
    }

    if let Some(bell) = set_bell {
        config.alarm_bell = bell;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
