//! Generate command - loads the configuration and writes the C include file.

use crate::cli::Cli;
use autoblob_core::{
    config::Configuration,
    error::Result,
    generator::{CFileGenerator, GeneratedFile},
};
use tracing::{debug, error, info};

/// Runs the generate command.
///
/// The output path is only touched once the arguments are valid and the
/// configuration has loaded.
pub fn run(cli: &Cli) -> Result<GeneratedFile> {
    let (config_path, output_path) = cli.paths()?;
    debug!(
        "Config: {:?}, output: {:?}, platform: {:?}",
        config_path, output_path, cli.platform
    );

    let config = match Configuration::load(config_path, cli.platform.as_deref()) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let report = CFileGenerator::new().generate(output_path, &config)?;
    info!(
        "Include directives written to {:?}: {}",
        report.path, report.include_count
    );
    Ok(report)
}
