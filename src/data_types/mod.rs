
/// Alignment ops and the views derived from them (re-scoring, segments, padding, CIGAR)
pub mod alignment;
/// DP table storage, cell types, and step tags
pub mod dp_table;
/// A single named source/target pair to realign
pub mod hsp_pair;
/// Scoring parameters and aligner configuration
pub mod scoring;
