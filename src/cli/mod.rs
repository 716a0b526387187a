/*!
# CLI module
Command line interface functionality for the realign binary.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// Shared scoring and mode options for every subcommand
pub mod alignment_args;
/// The batch CLI subcommand
pub mod batch;
/// The single pair CLI subcommand
pub mod pair;
