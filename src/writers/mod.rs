/*!
# Writers module
Contains the logic for writing the batch realignment outputs.
*/
/// Generates the per-pair realignment summary; each line corresponds to one HSP pair
pub mod realign_summary;
