/*!
# Parsing module
Contains the logic for loading realignment inputs from files.
*/
/// Loads batches of named source/target pairs from TSV
pub mod hsp_pairs;
