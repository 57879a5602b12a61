//! Camel Weigh Station - weigh-station ledger in the terminal
//!
//! Records gross and tare weighings, prices the net weight, and keeps a
//! searchable, printable ledger on local disk.

mod cli;
mod commands;
mod logging;
mod output;
mod session;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(logging::Verbosity::from_flags(cli.quiet, cli.verbose));

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
