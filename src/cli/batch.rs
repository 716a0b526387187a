
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::alignment_args::AlignmentArgs;
use crate::cli::core::{check_output_extension, check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::data_types::scoring::AlignerConfig;

#[derive(Args, Clone, Debug, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct BatchSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    realign_version: String,

    /// Input pairs (TSV, optionally gzipped): pair ID, source, target; no header
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_fn: PathBuf,

    /// Output summary file (CSV/TSV)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_fn: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    #[command(flatten)]
    pub alignment: AlignmentArgs,

    /// Number of threads to use for realignment
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Validates the batch settings and resolves the aligner configuration, logging everything along the way
/// # Errors
/// * if the input file is missing
/// * if the output file does not end in .csv or .tsv
/// * if the scoring options are invalid
pub fn check_batch_settings(mut settings: BatchSettings) -> anyhow::Result<(BatchSettings, AlignerConfig)> {
    // hard code the version in
    settings.realign_version = FULL_VERSION.clone();
    info!("Realign version: {:?}", &settings.realign_version);
    info!("Sub-command: batch");
    info!("Inputs:");

    check_required_filename(&settings.input_fn, "Input pairs")?;
    info!("\tInput pairs: {:?}", &settings.input_fn);

    info!("Outputs:");
    check_output_extension(&settings.output_fn, &["csv", "tsv"], "Output summary")?;
    info!("\tSummary: {:?}", &settings.output_fn);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }

    info!("Scoring parameters:");
    let config = settings.alignment.build_config()?;

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::{Cli, Commands};
    use crate::data_types::scoring::AlignmentMode;
    use clap::Parser;

    fn parse_batch(args: &[&str]) -> BatchSettings {
        match Cli::parse_from(args).command {
            Commands::Batch(settings) => *settings,
            Commands::Pair(_) => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_check_batch_settings() {
        let input_fn = std::env::temp_dir().join(format!("realign_test_batch_{}.tsv", std::process::id()));
        std::fs::write(&input_fn, "hsp_1\tACGT\tACGT\n").unwrap();
        let input = input_fn.to_string_lossy().to_string();

        let settings = parse_batch(&["realign", "batch", "-i", &input, "-o", "out.tsv", "--threads", "0", "--mode", "best_endpoint"]);
        let (settings, config) = check_batch_settings(settings).unwrap();
        assert_eq!(settings.threads, 1);
        assert_eq!(config.mode(), AlignmentMode::BestEndpoint);

        // bad output extension
        let settings = parse_batch(&["realign", "batch", "-i", &input, "-o", "out.json"]);
        assert!(check_batch_settings(settings).is_err());
        std::fs::remove_file(&input_fn).unwrap();

        // missing input
        let settings = parse_batch(&["realign", "batch", "-i", &input, "-o", "out.tsv"]);
        assert!(check_batch_settings(settings).is_err());
    }
}
