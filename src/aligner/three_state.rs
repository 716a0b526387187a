
use log::trace;

use crate::aligner::{select_best_cell, BestCell, RealignError};
use crate::data_types::alignment::{AlignOp, Alignment};
use crate::data_types::dp_table::{DpEvent, DpTable, StateCell};
use crate::data_types::scoring::{AlignmentMode, ScoringConfig};

/// Runs the three-state fill, best-cell selection, and backtrace.
/// # Arguments
/// * `src` - the source sequence (rows)
/// * `tgt` - the target sequence (columns)
/// * `scoring` - per-column scores
/// * `mode` - terminal cell selection
/// # Errors
/// * if the DP table cannot be allocated
pub fn align(src: &[u8], tgt: &[u8], scoring: &ScoringConfig, mode: AlignmentMode) -> Result<Alignment, RealignError> {
    let table = fill_table(src, tgt, scoring)?;
    let best = select_best_cell(&table, mode, |cell| cell.best().map_or(i32::MIN, |(score, _)| score));
    let ops = backtrace(&table, src, tgt, best);
    Ok(Alignment::new(best.score, ops, src.len(), tgt.len(), best.row, best.col))
}

/// Builds and fills the three-state DP table.
/// For every cell we track the best score of paths ending in a diagonal step, a gap in the target, and a gap in the source.
/// A gap state only extends from the same gap state in the predecessor cell, every other transition opens.
/// Unreachable predecessor states are skipped, and sums saturate at the `i32` range instead of wrapping.
/// # Errors
/// * if the DP table cannot be allocated
pub fn fill_table(src: &[u8], tgt: &[u8], scoring: &ScoringConfig) -> Result<DpTable<StateCell>, RealignError> {
    let mut table = DpTable::try_new(src.len(), tgt.len(), StateCell::default())?;

    // the origin is a diagonal-state start, so the first gap from it opens
    table.get_mut(0, 0).set(DpEvent::Diagonal, 0, DpEvent::Diagonal);

    for row in 0..table.rows() {
        for col in 0..table.cols() {
            if row == 0 && col == 0 {
                continue;
            }

            let mut cell = StateCell::default();
            if row > 0 && col > 0 {
                if let Some((score, from)) = table.get(row - 1, col - 1).best() {
                    cell.set(DpEvent::Diagonal, score.saturating_add(scoring.pair_score(src[row - 1], tgt[col - 1])), from);
                }
            }
            if row > 0 {
                if let Some((score, from)) = transition(table.get(row - 1, col), DpEvent::GapInTarget, scoring) {
                    cell.set(DpEvent::GapInTarget, score, from);
                }
            }
            if col > 0 {
                if let Some((score, from)) = transition(table.get(row, col - 1), DpEvent::GapInSource, scoring) {
                    cell.set(DpEvent::GapInSource, score, from);
                }
            }
            table.set(row, col, cell);
        }
    }

    Ok(table)
}

/// Best way to enter `gap_state` from the reachable states of the predecessor cell.
/// Candidates are visited in `DpEvent::PRIORITY` order, so a later state only wins when strictly greater.
fn transition(previous: &StateCell, gap_state: DpEvent, scoring: &ScoringConfig) -> Option<(i32, DpEvent)> {
    DpEvent::PRIORITY.into_iter()
        .filter_map(|state| {
            previous.score(state)
                .map(|score| (score.saturating_add(scoring.gap_score(state == gap_state)), state))
        })
        .fold(None, |best, candidate| match best {
            Some((best_score, _)) if candidate.0 <= best_score => best,
            _ => Some(candidate)
        })
}

/// Follows the per-state predecessors from `best` back to the origin and returns the ops in left-to-right order
pub fn backtrace(table: &DpTable<StateCell>, src: &[u8], tgt: &[u8], best: BestCell) -> Vec<AlignOp> {
    let mut ops = Vec::with_capacity(best.row + best.col);
    let (mut row, mut col) = (best.row, best.col);
    let mut state = table.get(row, col).best().map_or(DpEvent::Diagonal, |(_, state)| state);
    while row > 0 || col > 0 {
        let from = table.get(row, col).from(state);
        let op = match state {
            DpEvent::Diagonal => AlignOp::from_event(state, src[row - 1], tgt[col - 1]),
            _ => AlignOp::from_event(state, 0, 0)
        };
        ops.push(op);
        (row, col) = state.predecessor(row, col);
        state = from;
    }
    ops.reverse();
    trace!("Three-state backtrace produced {} ops", ops.len());
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::scoring::ScoringConfigBuilder;

    #[test]
    fn test_boundaries() {
        let scoring = ScoringConfig::default();
        let table = fill_table(b"AAA", b"AA", &scoring).unwrap();
        assert_eq!(table.get(0, 0).best(), Some((0, DpEvent::Diagonal)));
        assert_eq!(table.get(1, 0).best(), Some((-2, DpEvent::GapInTarget)));
        assert_eq!(table.get(3, 0).best(), Some((-4, DpEvent::GapInTarget)));
        assert_eq!(table.get(0, 2).best(), Some((-3, DpEvent::GapInSource)));

        // states that cannot be reached on the boundary stay unset
        assert_eq!(table.get(3, 0).score(DpEvent::Diagonal), None);
        assert_eq!(table.get(3, 0).score(DpEvent::GapInSource), None);
        assert_eq!(table.get(0, 2).score(DpEvent::GapInTarget), None);
        assert_eq!(table.get(0, 0).score(DpEvent::GapInTarget), None);
    }

    #[test]
    fn test_reopen_through_losing_state() {
        // the exact optimum needs to extend a gap whose state lost the cell-level comparison
        let scoring = ScoringConfig::default();
        let src = b"CCNANG";
        let tgt = b"CNNG";
        let alignment = align(src, tgt, &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(alignment.score(), -1);
        assert_eq!(alignment.cigar(), "1=2D1X2=");
        assert_eq!(alignment.rescore(src, tgt, &scoring), Some(-1));
    }

    #[test]
    fn test_large_penalties() {
        let scoring = ScoringConfigBuilder::default()
            .gap_open(-1_000_000)
            .gap_extend(-1_000)
            .build().unwrap();
        let alignment = align(b"ACGT", b"A", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(alignment.score(), 1 - 1_000_000 - 2 * 1_000);
        assert_eq!(alignment.cigar(), "1=3D");
    }

    #[test]
    fn test_penalties_past_half_range() {
        // a single gap can cost more than half of the i32 range
        let scoring = ScoringConfigBuilder::default()
            .gap_open(-1_100_000_000)
            .build().unwrap();
        let alignment = align(b"A", b"", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(alignment.score(), -1_100_000_000);
        assert_eq!(alignment.cigar(), "1D");

        let alignment = align(b"AC", b"A", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(alignment.score(), 1 - 1_100_000_000);
        assert_eq!(alignment.cigar(), "1=1D");
    }

    #[test]
    fn test_saturating_scores() {
        // totals below i32::MIN saturate instead of wrapping, and the backtrace stays on reachable states
        let scoring = ScoringConfigBuilder::default()
            .gap_open(i32::MIN + 5)
            .gap_extend(-1_000_000_000)
            .build().unwrap();
        let alignment = align(b"AAA", b"", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(alignment.score(), i32::MIN);
        assert_eq!(alignment.cigar(), "3D");

        let alignment = align(b"", b"CC", &scoring, AlignmentMode::BestEndpoint).unwrap();
        assert_eq!(alignment.score(), 0);
        assert_eq!(alignment.cigar(), "");
    }
}
