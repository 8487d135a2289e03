pub mod cli;
pub mod commands;

pub use autoblob_core::{config, error, generator};

use autoblob_core::error::AutoblobError;
use clap::{CommandFactory, Parser, error::ErrorKind};
use cli::Cli;
use std::ffi::OsString;
use std::io::{IsTerminal, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses `args`, generates the C file and returns the process exit status.
///
/// Diagnostics for the user are written to `err`; progress goes through
/// `tracing`.
pub fn run<I, T>(args: I, err: &mut dyn Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return 0;
            }
            _ => {
                let _ = write!(err, "{}", e.render());
                return 1;
            }
        },
    };

    init_tracing(&cli);
    info!("Autoblob GenerateInputCFile");

    match commands::generate::run(&cli) {
        Ok(_) => 0,
        Err(e) => {
            report_error(err, &e);
            1
        }
    }
}

// Set RUST_LOG to override the level chosen by -v/-q.
fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    // A subscriber may already be installed when run is called more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .try_init();
}

fn report_error(err: &mut dyn Write, error: &AutoblobError) {
    let _ = if error.is_usage() {
        writeln!(err, "{}\n\n{}", error, Cli::command().render_usage())
    } else {
        writeln!(err, "Error: {}", error)
    };
}
