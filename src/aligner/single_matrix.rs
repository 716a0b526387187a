
use log::trace;

use crate::aligner::{select_best_cell, BestCell, RealignError};
use crate::data_types::alignment::{AlignOp, Alignment};
use crate::data_types::dp_table::{pick_best, DpEvent, DpTable, TaggedCell};
use crate::data_types::scoring::{AlignmentMode, ScoringConfig};

/// Runs the single-matrix fill, best-cell selection, and backtrace.
/// # Arguments
/// * `src` - the source sequence (rows)
/// * `tgt` - the target sequence (columns)
/// * `scoring` - per-column scores
/// * `mode` - terminal cell selection
/// # Errors
/// * if the DP table cannot be allocated
pub fn align(src: &[u8], tgt: &[u8], scoring: &ScoringConfig, mode: AlignmentMode) -> Result<Alignment, RealignError> {
    let table = fill_table(src, tgt, scoring)?;
    let best = select_best_cell(&table, mode, |cell| cell.score);
    let ops = backtrace(&table, src, tgt, best);
    Ok(Alignment::new(best.score, ops, src.len(), tgt.len(), best.row, best.col))
}

/// Builds and fills the single-matrix DP table.
/// Each cell keeps only the winning score and the step that produced it.
/// Whether a gap step opens or extends is decided from the predecessor cell's tag alone.
/// # Errors
/// * if the DP table cannot be allocated
pub fn fill_table(src: &[u8], tgt: &[u8], scoring: &ScoringConfig) -> Result<DpTable<TaggedCell>, RealignError> {
    let mut table = DpTable::try_new(src.len(), tgt.len(), TaggedCell::default())?;

    // boundaries; (0, 0) stays as the diagonal start sentinel
    for i in 1..table.rows() {
        table.set(i, 0, TaggedCell { score: scoring.gap_run_score(i), event: DpEvent::GapInTarget });
    }
    for j in 1..table.cols() {
        table.set(0, j, TaggedCell { score: scoring.gap_run_score(j), event: DpEvent::GapInSource });
    }

    for (i, &s) in src.iter().enumerate() {
        let row = i + 1;
        for (j, &t) in tgt.iter().enumerate() {
            let col = j + 1;
            let diag = table.get(row - 1, col - 1).score.saturating_add(scoring.pair_score(s, t));

            let up_cell = table.get(row - 1, col);
            let up = up_cell.score.saturating_add(scoring.gap_score(up_cell.event == DpEvent::GapInTarget));

            let left_cell = table.get(row, col - 1);
            let left = left_cell.score.saturating_add(scoring.gap_score(left_cell.event == DpEvent::GapInSource));

            let (score, event) = pick_best([
                (diag, DpEvent::Diagonal),
                (up, DpEvent::GapInTarget),
                (left, DpEvent::GapInSource),
            ]);
            table.set(row, col, TaggedCell { score, event });
        }
    }

    Ok(table)
}

/// Walks the step tags from `best` back to the origin and returns the ops in left-to-right order
pub fn backtrace(table: &DpTable<TaggedCell>, src: &[u8], tgt: &[u8], best: BestCell) -> Vec<AlignOp> {
    let mut ops = Vec::with_capacity(best.row + best.col);
    let (mut row, mut col) = (best.row, best.col);
    while row > 0 || col > 0 {
        let event = table.get(row, col).event;
        let op = match event {
            DpEvent::Diagonal => AlignOp::from_event(event, src[row - 1], tgt[col - 1]),
            _ => AlignOp::from_event(event, 0, 0)
        };
        ops.push(op);
        (row, col) = event.predecessor(row, col);
    }
    ops.reverse();
    trace!("Single-matrix backtrace produced {} ops", ops.len());
    ops
}
