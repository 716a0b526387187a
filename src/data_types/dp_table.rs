
use crate::aligner::RealignError;

/// How a DP cell (or state within a cell) was reached.
/// Variant order is also the tie-break order: the earlier variant wins on equal scores.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DpEvent {
    /// Diagonal step; consumes one source and one target character. Also the start sentinel at (0, 0).
    #[default]
    Diagonal,
    /// Vertical step; consumes one source character against a gap in the target
    GapInTarget,
    /// Horizontal step; consumes one target character against a gap in the source
    GapInSource,
}

impl DpEvent {
    /// All events, in tie-break priority order
    pub const PRIORITY: [DpEvent; 3] = [DpEvent::Diagonal, DpEvent::GapInTarget, DpEvent::GapInSource];

    /// Index into per-state arrays
    pub fn index(&self) -> usize {
        match self {
            DpEvent::Diagonal => 0,
            DpEvent::GapInTarget => 1,
            DpEvent::GapInSource => 2,
        }
    }

    /// Returns the (row, col) of the predecessor cell when leaving (row, col) through this event.
    /// Only valid for cells that are not on the boundary this event would cross.
    pub fn predecessor(&self, row: usize, col: usize) -> (usize, usize) {
        match self {
            DpEvent::Diagonal => (row - 1, col - 1),
            DpEvent::GapInTarget => (row - 1, col),
            DpEvent::GapInSource => (row, col - 1),
        }
    }
}

/// Picks the best (score, event) pair, honoring the `DpEvent::PRIORITY` tie-break.
/// Candidates must be provided in priority order; later candidates only win when strictly greater.
pub fn pick_best(candidates: [(i32, DpEvent); 3]) -> (i32, DpEvent) {
    let mut best = candidates[0];
    for &candidate in candidates[1..].iter() {
        if candidate.0 > best.0 {
            best = candidate;
        }
    }
    best
}

/// Single-matrix cell: the best score reaching this cell and which step won.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TaggedCell {
    pub score: i32,
    pub event: DpEvent,
}

/// Three-state cell: one score per affine state (indexed by the `DpEvent` that ended the path),
/// and for each state the state of the predecessor cell that produced it.
/// A state with no score cannot be reached, e.g. a diagonal state on the first row.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StateCell {
    scores: [Option<i32>; 3],
    from: [DpEvent; 3],
}

impl StateCell {
    /// Score of the best path that ends in `state`, None if no path does
    pub fn score(&self, state: DpEvent) -> Option<i32> {
        self.scores[state.index()]
    }

    /// State of the predecessor cell for the best path ending in `state`
    pub fn from(&self, state: DpEvent) -> DpEvent {
        self.from[state.index()]
    }

    pub fn set(&mut self, state: DpEvent, score: i32, from: DpEvent) {
        self.scores[state.index()] = Some(score);
        self.from[state.index()] = from;
    }

    /// Best score over the reachable states, with the winning state.
    /// Ties follow `DpEvent::PRIORITY`. None if no state has been set.
    pub fn best(&self) -> Option<(i32, DpEvent)> {
        let mut best: Option<(i32, DpEvent)> = None;
        for state in DpEvent::PRIORITY {
            match (self.score(state), best) {
                (Some(score), Some((best_score, _))) if score <= best_score => {},
                (Some(score), _) => best = Some((score, state)),
                (None, _) => {}
            }
        }
        best
    }
}

/// Row-major DP grid of (src_len + 1) x (tgt_len + 1) cells.
/// Rows track the consumed source prefix, columns the consumed target prefix.
#[derive(Clone, Debug)]
pub struct DpTable<C> {
    cells: Vec<C>,
    rows: usize,
    cols: usize,
}

impl<C: Copy> DpTable<C> {
    /// Allocates a table for the two sequence lengths, filled with `init`.
    /// # Arguments
    /// * `src_len` - source length; the table gets `src_len + 1` rows
    /// * `tgt_len` - target length; the table gets `tgt_len + 1` columns
    /// * `init` - initial value for every cell
    /// # Errors
    /// * if the cell count overflows `usize` or the allocation fails
    pub fn try_new(src_len: usize, tgt_len: usize, init: C) -> Result<Self, RealignError> {
        let exhausted = || RealignError::ResourceExhaustion { rows: src_len.saturating_add(1), cols: tgt_len.saturating_add(1) };
        let rows = src_len.checked_add(1).ok_or_else(exhausted)?;
        let cols = tgt_len.checked_add(1).ok_or_else(exhausted)?;
        let num_cells = rows.checked_mul(cols).ok_or_else(exhausted)?;

        let mut cells: Vec<C> = Vec::new();
        cells.try_reserve_exact(num_cells).map_err(|_e| exhausted())?;
        cells.resize(num_cells, init);

        Ok(Self {
            cells, rows, cols
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &C {
        &self.cells[row * self.cols + col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut C {
        &mut self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: C) {
        self.cells[row * self.cols + col] = cell;
    }
}
