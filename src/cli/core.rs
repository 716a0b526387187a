
use anyhow::{bail, ensure};
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::batch::BatchSettings;
use crate::cli::pair::PairSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.1.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.1.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string
    pub static ref AFTER_HELP: String = format!("Copyright (C) {}
This program comes with ABSOLUTELY NO WARRANTY.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// Realign, affine-gap global realignment of short high-scoring fragment pairs.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Realigns a single source/target pair provided on the command line
    Pair(Box<PairSettings>),
    /// Realigns every pair in a TSV file and writes a summary
    Batch(Box<BatchSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Checks that an output file has one of the allowed extensions
/// # Arguments
/// * `filename` - the file path to check
/// * `allowed` - accepted extensions, without the leading "."
/// * `label` - the label to use for error messages
pub fn check_output_extension(filename: &Path, allowed: &[&str], label: &str) -> anyhow::Result<()> {
    let extension = filename.extension().unwrap_or_default().to_string_lossy();
    ensure!(
        allowed.iter().any(|&a| a == extension),
        "{} must end with one of {:?}: \"{}\"", label, allowed, filename.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_output_extension() {
        assert!(check_output_extension(Path::new("out.tsv"), &["tsv", "csv"], "Output").is_ok());
        assert!(check_output_extension(Path::new("out.csv"), &["tsv", "csv"], "Output").is_ok());
        assert!(check_output_extension(Path::new("out.txt"), &["tsv", "csv"], "Output").is_err());
        assert!(check_output_extension(Path::new("out"), &["tsv", "csv"], "Output").is_err());
    }

    #[test]
    fn test_check_required_filename() {
        assert!(check_required_filename(Path::new("/this/path/does/not/exist.tsv"), "Input").is_err());
        assert!(check_required_filename(&std::env::temp_dir(), "Temp").is_ok());
    }
}
