
use anyhow::{ensure, Context};
use clap::Args;
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::check_required_filename;
use crate::data_types::scoring::{
    AlignerConfig, AlignerConfigBuilder, AlignmentMode, DpRecurrence, ScoringConfig, ScoringConfigBuilder,
    DEFAULT_GAP_EXTEND, DEFAULT_GAP_OPEN, DEFAULT_MATCH, DEFAULT_MISMATCH, DEFAULT_WILDCARD_MATCH
};
use crate::util::file_io::load_json;

/// Scoring and alignment options shared by every subcommand
#[derive(Args, Clone, Debug, Serialize)]
pub struct AlignmentArgs {
    /// Score for identical, non-wildcard characters
    #[clap(long = "match")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(allow_negative_numbers = true)]
    #[clap(default_value_t = DEFAULT_MATCH)]
    pub match_score: i32,

    /// Score for differing characters
    #[clap(long = "mismatch")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(allow_negative_numbers = true)]
    #[clap(default_value_t = DEFAULT_MISMATCH)]
    pub mismatch: i32,

    /// Score when either character is the wildcard
    #[clap(long = "wildcard-match")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(allow_negative_numbers = true)]
    #[clap(default_value_t = DEFAULT_WILDCARD_MATCH)]
    pub wildcard_match: i32,

    /// Score for opening a gap
    #[clap(long = "gap-open")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(allow_negative_numbers = true)]
    #[clap(default_value_t = DEFAULT_GAP_OPEN)]
    pub gap_open: i32,

    /// Score for extending an open gap
    #[clap(long = "gap-extend")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(allow_negative_numbers = true)]
    #[clap(default_value_t = DEFAULT_GAP_EXTEND)]
    pub gap_extend: i32,

    /// Wildcard symbol, must be a single ASCII character
    #[clap(long = "wildcard")]
    #[clap(value_name = "CHAR")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(default_value = "N")]
    pub wildcard: char,

    /// Scoring configuration (JSON); overrides all other scoring options
    #[clap(long = "scoring")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Scoring"))]
    pub scoring_fn: Option<PathBuf>,

    /// Selects the terminal cell for the alignment
    #[clap(long = "mode")]
    #[clap(value_name = "MODE")]
    #[clap(help_heading = Some("Alignment"))]
    #[clap(default_value = "global")]
    pub mode: AlignmentMode,

    /// Selects the DP formulation
    #[clap(long = "recurrence")]
    #[clap(value_name = "DP")]
    #[clap(help_heading = Some("Alignment"))]
    #[clap(default_value = "three_state")]
    pub recurrence: DpRecurrence,
}

impl AlignmentArgs {
    /// Resolves the options into an aligner configuration, logging the final values.
    /// # Errors
    /// * if the scoring JSON is missing or invalid
    /// * if the wildcard is not a single ASCII character
    pub fn build_config(&self) -> anyhow::Result<AlignerConfig> {
        let scoring: ScoringConfig = if let Some(scoring_fn) = self.scoring_fn.as_deref() {
            check_required_filename(scoring_fn, "Scoring JSON")?;
            info!("\tScoring file: {scoring_fn:?}");
            load_json(scoring_fn)?
        } else {
            ensure!(self.wildcard.is_ascii(), "--wildcard must be an ASCII character, got {:?}", self.wildcard);
            ScoringConfigBuilder::default()
                .match_score(self.match_score)
                .mismatch(self.mismatch)
                .wildcard_match(self.wildcard_match)
                .gap_open(self.gap_open)
                .gap_extend(self.gap_extend)
                .wildcard(self.wildcard as u8)
                .build()
                .context("Error while building scoring configuration:")?
        };

        info!("\tMatch: {}", scoring.match_score());
        info!("\tMismatch: {}", scoring.mismatch());
        info!("\tWildcard match: {}", scoring.wildcard_match());
        info!("\tGap open: {}", scoring.gap_open());
        info!("\tGap extend: {}", scoring.gap_extend());
        info!("\tWildcard: {:?}", char::from(scoring.wildcard()));
        if scoring.gap_extend() < scoring.gap_open() {
            warn!("Gap extension ({}) is more expensive than gap opening ({})", scoring.gap_extend(), scoring.gap_open());
        }

        info!("Alignment parameters:");
        info!("\tMode: {}", self.mode);
        info!("\tRecurrence: {}", self.recurrence);

        let config = AlignerConfigBuilder::default()
            .scoring(scoring)
            .mode(self.mode)
            .recurrence(self.recurrence)
            .build()
            .context("Error while building aligner configuration:")?;
        Ok(config)
    }
}
