//! Config command implementation

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, ConversionOptions, sample_config};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the sample configuration file into `dir`
pub fn handle_config_init(dir: &Path, force: bool) -> Result<PathBuf, CliError> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }

    std::fs::write(&path, sample_config())
        .map_err(|e| CliError::InvalidArgument(format!("Failed to write {}: {}", path.display(), e)))?;
    info!("Wrote sample configuration to {}", path.display());
    println!("Created {}", path.display());
    Ok(path)
}

/// Print the effective options for `dir` (file plus environment) as TOML
pub fn handle_config_show(dir: &Path) -> Result<String, CliError> {
    let options = ConversionOptions::load(dir)?;
    let rendered = options.to_toml()?;
    println!("{}", rendered);
    Ok(rendered)
}
