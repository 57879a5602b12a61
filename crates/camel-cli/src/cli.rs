//! CLI definition using clap

use camel_domain::model::Rate;
use camel_types::OutputFormat;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "camel-weigh")]
#[command(version)]
#[command(about = "Camel weigh-station ledger: record weighings, price net weight, search and print")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Ledger store directory. Uses config value if not specified.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Keep the ledger in memory only (nothing is written to disk)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Start with the out-of-range alarm switched off
    #[arg(long, global = true)]
    pub no_alarm: bool,

    /// Verbose output (-v ledger changes, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new weighing
    Add {
        /// Plate number (e.g., "01 A 234 BC")
        #[arg(long, short = 'p')]
        plate: String,

        /// Gross weight with load, kg (yuk bilan)
        #[arg(long, short = 'g', allow_hyphen_values = true)]
        gross: String,

        /// Tare weight without load, kg (yuksiz)
        #[arg(long, short = 't', allow_hyphen_values = true)]
        tare: String,

        /// Weighing date (YYYY-MM-DD). Defaults to today.
        #[arg(long, short = 'd')]
        date: Option<NaiveDate>,

        /// Price per kg (30000 or 40000). Defaults to 30000.
        #[arg(long, short = 'r')]
        rate: Option<Rate>,
    },

    /// Change a recorded weighing (by id, id prefix, or check number)
    Edit {
        /// Entry id, unique id prefix, or check number
        target: String,

        /// New plate number
        #[arg(long, short = 'p')]
        plate: Option<String>,

        /// New gross weight, kg
        #[arg(long, short = 'g', allow_hyphen_values = true)]
        gross: Option<String>,

        /// New tare weight, kg
        #[arg(long, short = 't', allow_hyphen_values = true)]
        tare: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long, short = 'd')]
        date: Option<NaiveDate>,

        /// New price per kg (30000 or 40000)
        #[arg(long, short = 'r')]
        rate: Option<Rate>,
    },

    /// Remove a recorded weighing
    Delete {
        /// Entry id, unique id prefix, or check number
        target: String,
    },

    /// Show the ledger, newest first
    List {
        /// Only show entries containing this text (any field, case-insensitive)
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Limit number of entries shown
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Print the ledger for paper (no ids)
    Print {
        /// Only print entries containing this text
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show the check number the next weighing will get
    Next,

    /// Interactive form session reading commands from stdin
    Session,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set ledger store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Enable/disable the out-of-range alarm at startup
        #[arg(long)]
        set_alarm: Option<bool>,

        /// Enable/disable the terminal bell when the alarm fires
        #[arg(long)]
        set_bell: Option<bool>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
