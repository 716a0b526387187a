/*!
# Aligner module
Affine-gap global alignment of two short sequences, typically a high-scoring fragment pair (HSP) that needs base-pair level refinement.
Every call allocates its own DP table, fills it, picks the terminal cell, and walks the recorded steps back to the origin.
No state is shared between calls, so the aligner can be driven from any number of threads at once.

Two fills are available via `DpRecurrence`:
* `ThreeState` (default) - one score per affine state in each cell; always returns the exact affine optimum.
* `SingleMatrix` - one score and one step tag per cell; when a gap would reopen at a tie it can miss the optimum, but the returned ops always re-score to the returned score.

Ties are broken with a fixed priority of diagonal, then gap in target, then gap in source, so identical inputs always produce identical output.

## Example usage
```rust
use realign::aligner::realign;
use realign::data_types::scoring::ScoringConfig;

let scoring = ScoringConfig::default();
let alignment = realign(b"GATTACA", b"GCATGCU", &scoring).unwrap();
assert_eq!(alignment.score(), -1);
assert_eq!(alignment.cigar(), "1=2X1=1X1=1X");
assert_eq!(alignment.rescore(b"GATTACA", b"GCATGCU", &scoring), Some(alignment.score()));
```
*/
/// Single-matrix fill with one step tag per cell
pub mod single_matrix;
/// Three-state (Gotoh) fill
pub mod three_state;

use log::trace;

use crate::data_types::alignment::Alignment;
use crate::data_types::dp_table::DpTable;
use crate::data_types::scoring::{AlignerConfig, AlignmentMode, DpRecurrence, ScoringConfig};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RealignError {
    #[error("unable to allocate a {rows}x{cols} DP table")]
    ResourceExhaustion { rows: usize, cols: usize },
}

/// The terminal cell for the backtrace
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BestCell {
    pub score: i32,
    pub row: usize,
    pub col: usize,
}

/// Aligns `src` against `tgt` in strict global mode with the exact three-state fill.
/// # Arguments
/// * `src` - the source sequence, any bytes, may be empty
/// * `tgt` - the target sequence, any bytes, may be empty
/// * `scoring` - per-column scores
/// # Errors
/// * if the DP table cannot be allocated
pub fn realign(src: &[u8], tgt: &[u8], scoring: &ScoringConfig) -> Result<Alignment, RealignError> {
    let config = AlignerConfig::from(*scoring);
    realign_with_config(src, tgt, &config)
}

/// Aligns `src` against `tgt` with full control over the mode and fill.
/// # Arguments
/// * `src` - the source sequence, any bytes, may be empty
/// * `tgt` - the target sequence, any bytes, may be empty
/// * `config` - scoring, mode, and recurrence
/// # Errors
/// * if the DP table cannot be allocated
pub fn realign_with_config(src: &[u8], tgt: &[u8], config: &AlignerConfig) -> Result<Alignment, RealignError> {
    trace!("Realigning {}x{} with {:?}", src.len(), tgt.len(), config);
    let alignment = match config.recurrence() {
        DpRecurrence::ThreeState => three_state::align(src, tgt, config.scoring(), config.mode())?,
        DpRecurrence::SingleMatrix => single_matrix::align(src, tgt, config.scoring(), config.mode())?,
    };
    trace!("Realigned score={}, cigar={}", alignment.score(), alignment.cigar());
    Ok(alignment)
}

/// Finds the terminal cell for the backtrace.
/// In global mode this is always the bottom-right corner.
/// In best-endpoint mode the corner is the starting candidate, then the last row is scanned right-to-left followed by the last column bottom-to-top;
/// a candidate only replaces the current best if it is strictly greater.
/// # Arguments
/// * `table` - a filled DP table
/// * `mode` - the alignment mode
/// * `cell_score` - extracts the best score of a cell
pub fn select_best_cell<C: Copy>(table: &DpTable<C>, mode: AlignmentMode, cell_score: impl Fn(&C) -> i32) -> BestCell {
    let last_row = table.rows() - 1;
    let last_col = table.cols() - 1;
    let mut best = BestCell {
        score: cell_score(table.get(last_row, last_col)),
        row: last_row,
        col: last_col,
    };

    match mode {
        AlignmentMode::Global => {},
        AlignmentMode::BestEndpoint => {
            let last_row_cells = (0..last_col).rev().map(|col| (last_row, col));
            let last_col_cells = (0..last_row).rev().map(|row| (row, last_col));
            for (row, col) in last_row_cells.chain(last_col_cells) {
                let score = cell_score(table.get(row, col));
                if score > best.score {
                    best = BestCell { score, row, col };
                }
            }
        }
    };

    trace!("Best cell: {best:?}");
    best
}
