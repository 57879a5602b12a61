//! Interactive form session
//!
//! One command per line, tokenized like a shell line. The form and the ledger
//! stay live for the whole session; every change prints the updated form.

use std::io::{BufRead, Write};

use camel_app::app::SubmitOutcome;
use camel_app::repository::Ledger;
use camel_domain::model::Rate;
use camel_domain::service::{format_grouped, format_number};
use camel_types::Result;
use chrono::NaiveDate;

use crate::commands::resolve_entry_id;
use crate::output::{render_form, render_table, TableStyle};

const HELP: &str = "\
Commands:
  plate <text>          set plate number
  gross <kg>            set gross weight (yuk bilan)
  tare <kg>             set tare weight (yuksiz)
  date <YYYY-MM-DD>     set date
  rate <30000|40000>    set price rate
  submit                save the form (add or update)
  new                   discard the form and start a new entry
  edit <id|check no>    load an entry into the form
  delete <id|check no>  remove an entry
  search [text]         filter the ledger (no text clears)
  alarm [on|off]        toggle or set the out-of-range alarm
  reload                re-read the ledger from storage
  list                  show the ledger with ids
  print                 show the printable ledger
  form                  show the form
  help                  show this help
  quit                  leave the session
";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Plate(String),
    Gross(String),
    Tare(String),
    Date(NaiveDate),
    Rate(Rate),
    Submit,
    New,
    Edit(String),
    Delete(String),
    Search(String),
    Alarm(Option<bool>),
    Reload,
    List,
    Print,
    Form,
    Help,
    Quit,
}

fn single_arg(name: &str, args: &[String]) -> std::result::Result<String, String> {
    match args {
        [arg] => Ok(arg.clone()),
        [] => Err(format!("{} needs a value", name)),
        _ => Err(format!("{} takes one value", name)),
    }
}

/// Parse one input line; `Ok(None)` for blank lines and comments
pub fn parse_command(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let tokens = shell_words::split(trimmed).map_err(|e| format!("cannot read line: {}", e))?;
    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "plate" => SessionCommand::Plate(args.join(" ")),
        "gross" => SessionCommand::Gross(single_arg("gross", args)?),
        "tare" => SessionCommand::Tare(single_arg("tare", args)?),
        "date" => {
            let value = single_arg("date", args)?;
            let date = value
                .parse::<NaiveDate>()
                .map_err(|_| format!("not a date (YYYY-MM-DD): {}", value))?;
            SessionCommand::Date(date)
        }
        "rate" => {
            let value = single_arg("rate", args)?;
            SessionCommand::Rate(value.parse::<Rate>().map_err(|e| e.to_string())?)
        }
        "submit" | "save" | "add" => SessionCommand::Submit,
        "new" | "cancel" => SessionCommand::New,
        "edit" => SessionCommand::Edit(single_arg("edit", args)?),
        "delete" | "rm" => SessionCommand::Delete(single_arg("delete", args)?),
        "search" => SessionCommand::Search(args.join(" ")),
        "alarm" => match args.first().map(|a| a.to_lowercase()).as_deref() {
            None => SessionCommand::Alarm(None),
            Some("on") => SessionCommand::Alarm(Some(true)),
            Some("off") => SessionCommand::Alarm(Some(false)),
            Some(other) => return Err(format!("alarm takes on or off, not {}", other)),
        },
        "reload" => SessionCommand::Reload,
        "list" | "ls" => SessionCommand::List,
        "print" => SessionCommand::Print,
        "form" | "show" => SessionCommand::Form,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {} (try help)", other)),
    };
    Ok(Some(command))
}

/// Run commands from `input` until it ends or `quit`
pub fn run_session<I: BufRead, O: Write>(
    ledger: &mut Ledger,
    input: I,
    out: &mut O,
    style: TableStyle,
    prompt: bool,
) -> Result<()> {
    writeln!(out, "Camel Weigh Station. Type help for commands.")?;
    write!(out, "{}", render_form(ledger.form(), ledger.alarm_signal(), ledger.alarm_enabled()))?;

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };
        if command == SessionCommand::Quit {
            break;
        }
        apply(ledger, command, out, style)?;
    }
    Ok(())
}

fn show_form<O: Write>(ledger: &Ledger, out: &mut O) -> Result<()> {
    write!(out, "{}", render_form(ledger.form(), ledger.alarm_signal(), ledger.alarm_enabled()))?;
    Ok(())
}

fn apply<O: Write>(
    ledger: &mut Ledger,
    command: SessionCommand,
    out: &mut O,
    style: TableStyle,
) -> Result<()> {
    match command {
        SessionCommand::Plate(plate) => {
            ledger.set_plate_number(plate);
            show_form(ledger, out)?;
        }
        SessionCommand::Gross(text) => {
            ledger.set_gross_weight(text);
            show_form(ledger, out)?;
        }
        SessionCommand::Tare(text) => {
            ledger.set_tare_weight(text);
            show_form(ledger, out)?;
        }
        SessionCommand::Date(date) => {
            ledger.set_date(date);
            show_form(ledger, out)?;
        }
        SessionCommand::Rate(rate) => {
            ledger.set_rate(rate);
            show_form(ledger, out)?;
        }
        SessionCommand::Submit => {
            match ledger.submit()? {
                SubmitOutcome::Created(entry) => writeln!(
                    out,
                    "Added check no {} ({}), net {} kg, price {}",
                    entry.check_no,
                    entry.plate_number,
                    format_number(entry.net_weight),
                    format_grouped(entry.price)
                )?,
                SubmitOutcome::Updated(entry) => writeln!(
                    out,
                    "Saved check no {} ({}), net {} kg, price {}",
                    entry.check_no,
                    entry.plate_number,
                    format_number(entry.net_weight),
                    format_grouped(entry.price)
                )?,
                SubmitOutcome::Rejected(rejection) => writeln!(out, "Not saved: {}", rejection)?,
                SubmitOutcome::StaleEdit(id) => {
                    writeln!(out, "Not saved: entry {} no longer exists", id)?
                }
            }
            show_form(ledger, out)?;
        }
        SessionCommand::New => {
            ledger.start_create();
            show_form(ledger, out)?;
        }
        SessionCommand::Edit(target) => match resolve_entry_id(ledger, &target) {
            Some(id) => {
                ledger.start_edit(&id);
                show_form(ledger, out)?;
            }
            None => writeln!(out, "No entry matches {}", target)?,
        },
        SessionCommand::Delete(target) => match resolve_entry_id(ledger, &target) {
            Some(id) => {
                ledger.delete(&id)?;
                writeln!(out, "Deleted {}", id)?;
                show_form(ledger, out)?;
            }
            None => writeln!(out, "No entry matches {}", target)?,
        },
        SessionCommand::Search(query) => {
            ledger.set_search(query);
            let with_ids = TableStyle {
                with_ids: true,
                ..style
            };
            write!(out, "{}", render_table(&ledger.rows(), with_ids))?;
        }
        SessionCommand::Alarm(setting) => {
            match setting {
                Some(enabled) => ledger.set_alarm_enabled(enabled),
                None => ledger.toggle_alarm(),
            };
            show_form(ledger, out)?;
        }
        SessionCommand::Reload => {
            ledger.reload();
            writeln!(out, "Reloaded {} entries", ledger.entries().len())?;
        }
        SessionCommand::List => {
            let with_ids = TableStyle {
                with_ids: true,
                ..style
            };
            write!(out, "{}", render_table(&ledger.rows(), with_ids))?;
        }
        SessionCommand::Print => {
            let printable = TableStyle {
                with_ids: false,
                highlight: false,
            };
            write!(out, "{}", render_table(&ledger.rows(), printable))?;
        }
        SessionCommand::Form => show_form(ledger, out)?,
        SessionCommand::Help => write!(out, "{}", HELP)?,
        SessionCommand::Quit => {}
    }
    Ok(())
}
