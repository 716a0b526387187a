
use anyhow::ensure;
use clap::Args;
use log::info;
use serde::Serialize;

use crate::cli::alignment_args::AlignmentArgs;
use crate::cli::core::{AFTER_HELP, FULL_VERSION};
use crate::data_types::scoring::AlignerConfig;

#[derive(Args, Clone, Debug, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct PairSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    realign_version: String,

    /// Source sequence
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "source")]
    #[clap(value_name = "SEQ")]
    #[clap(help_heading = Some("Input"))]
    pub source: String,

    /// Target sequence
    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "target")]
    #[clap(value_name = "SEQ")]
    #[clap(help_heading = Some("Input"))]
    pub target: String,

    #[command(flatten)]
    pub alignment: AlignmentArgs,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Validates the pair settings and resolves the aligner configuration, logging everything along the way
/// # Errors
/// * if the sequences are not ASCII
/// * if the scoring options are invalid
pub fn check_pair_settings(mut settings: PairSettings) -> anyhow::Result<(PairSettings, AlignerConfig)> {
    // hard code the version in
    settings.realign_version = FULL_VERSION.clone();
    info!("Realign version: {:?}", &settings.realign_version);
    info!("Sub-command: pair");
    info!("Inputs:");

    ensure!(settings.source.is_ascii(), "--source must be an ASCII sequence");
    ensure!(settings.target.is_ascii(), "--target must be an ASCII sequence");
    info!("\tSource: {} bp", settings.source.len());
    info!("\tTarget: {} bp", settings.target.len());

    info!("Scoring parameters:");
    let config = settings.alignment.build_config()?;
    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_parse_pair() {
        let cli = Cli::parse_from(["realign", "pair", "-s", "GATTACA", "-t", "GCATGCU", "--gap-open", "-3", "-vv"]);
        let settings = match cli.command {
            Commands::Pair(settings) => *settings,
            Commands::Batch(_) => panic!("wrong subcommand"),
        };
        assert_eq!(settings.source, "GATTACA");
        assert_eq!(settings.verbosity, 2);

        let (settings, config) = check_pair_settings(settings).unwrap();
        assert_eq!(settings.realign_version, *FULL_VERSION);
        assert_eq!(config.scoring().gap_open(), -3);
    }
}
