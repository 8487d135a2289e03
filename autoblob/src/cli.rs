//! Command-line interface definitions for Autoblob.

use autoblob_core::error::{AutoblobError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Number of positional arguments: the config file and the output file.
pub const EXPECTED_NUMBER_OF_ARGUMENTS: usize = 2;

/// Autoblob GenerateInputCFile - writes a C file including every configured header
#[derive(Parser, Debug)]
#[command(name = "autoblob")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "autoblob [OPTIONS] <CONFIG> <OUTPUT>")]
pub struct Cli {
    /// Configuration file, followed by the C file to generate.
    /// Put `--` before the paths when one of them starts with '-'
    #[arg(value_name = "FILE", num_args = 0..)]
    pub files: Vec<PathBuf>,

    /// Platform section whose headers are appended to the common list
    #[arg(short, long, env = "AUTOBLOB_PLATFORM")]
    pub platform: Option<String>,

    /// Enable verbose output (-v, -vv for increasing verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The configuration and output paths, or a usage error when the
    /// positional argument count is wrong.
    pub fn paths(&self) -> Result<(&Path, &Path)> {
        match self.files.as_slice() {
            [config, output] => Ok((config.as_path(), output.as_path())),
            other => Err(AutoblobError::usage(format!(
                "Unexpected number of arguments. Expected {}, actually got {}",
                EXPECTED_NUMBER_OF_ARGUMENTS,
                other.len()
            ))),
        }
    }

    /// Default log directive derived from the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
