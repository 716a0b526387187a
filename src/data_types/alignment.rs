
use itertools::Itertools;

use crate::data_types::dp_table::DpEvent;
use crate::data_types::scoring::ScoringConfig;

/// A single column of an alignment
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::AsRefStr)]
pub enum AlignOp {
    /// Diagonal step where both characters are literally identical
    #[strum(serialize = "=")]
    Match,
    /// Diagonal step where the characters differ; wildcard pairings land here when the bytes differ
    #[strum(serialize = "X")]
    Mismatch,
    /// Source character aligned against a gap in the target
    #[strum(serialize = "D")]
    GapInTarget,
    /// Target character aligned against a gap in the source
    #[strum(serialize = "I")]
    GapInSource,
}

impl AlignOp {
    /// Builds the op for leaving a cell through `event`.
    /// # Arguments
    /// * `event` - the DP step being taken
    /// * `src_char` - source character for a diagonal step (ignored otherwise)
    /// * `tgt_char` - target character for a diagonal step (ignored otherwise)
    pub fn from_event(event: DpEvent, src_char: u8, tgt_char: u8) -> Self {
        match event {
            DpEvent::Diagonal => if src_char == tgt_char { AlignOp::Match } else { AlignOp::Mismatch },
            DpEvent::GapInTarget => AlignOp::GapInTarget,
            DpEvent::GapInSource => AlignOp::GapInSource,
        }
    }

    /// True if this op consumes a source character
    pub fn consumes_source(&self) -> bool {
        match self {
            AlignOp::Match |
            AlignOp::Mismatch |
            AlignOp::GapInTarget => true,
            AlignOp::GapInSource => false,
        }
    }

    /// True if this op consumes a target character
    pub fn consumes_target(&self) -> bool {
        match self {
            AlignOp::Match |
            AlignOp::Mismatch |
            AlignOp::GapInSource => true,
            AlignOp::GapInTarget => false,
        }
    }

    /// Single-character CIGAR code for this op
    pub fn cigar_code(&self) -> &str {
        self.as_ref()
    }

    /// True for either gap kind
    pub fn is_gap(&self) -> bool {
        !(self.consumes_source() && self.consumes_target())
    }
}

/// An ungapped run of diagonal steps, using 0-based half-open coordinates
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AlignedSegment {
    pub src_start: usize,
    pub src_end: usize,
    pub tgt_start: usize,
    pub tgt_end: usize,
}

impl AlignedSegment {
    /// Number of aligned columns in this segment
    pub fn len(&self) -> usize {
        self.src_end - self.src_start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Human-readable rendering of an alignment
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PaddedAlignment {
    /// Source with `-` inserted at target-only columns
    pub source: String,
    /// `|` for identical characters, `:` for wildcard pairings, ` ` otherwise
    pub midline: String,
    /// Target with `-` inserted at source-only columns
    pub target: String,
}

/// Column counts for an alignment
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    /// Number of distinct gap runs
    pub gap_opens: usize,
    /// Total number of gap columns
    pub gap_positions: usize,
}

impl AlignmentStats {
    /// Total number of alignment columns
    pub fn columns(&self) -> usize {
        self.matches + self.mismatches + self.gap_positions
    }

    /// Fraction of columns that are identical, if there are any columns
    pub fn identity(&self) -> Option<f64> {
        let denom = self.columns();
        if denom > 0 {
            Some(self.matches as f64 / denom as f64)
        } else {
            None
        }
    }
}

/// Result of one realignment: the optimal score plus the ops that realize it.
/// Ops are in left-to-right order and start at the beginning of both sequences.
/// They end at (`src_end`, `tgt_end`); anything after that is unaligned trailing overhang (best-endpoint mode only).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alignment {
    /// Optimal score
    score: i32,
    /// Alignment columns, left to right
    ops: Vec<AlignOp>,
    /// Full source length
    src_len: usize,
    /// Full target length
    tgt_len: usize,
    /// Source prefix length covered by `ops`
    src_end: usize,
    /// Target prefix length covered by `ops`
    tgt_end: usize,
}

impl Alignment {
    /// Constructor; only the aligners build alignments, so `ops` always fit the lengths
    pub(crate) fn new(score: i32, ops: Vec<AlignOp>, src_len: usize, tgt_len: usize, src_end: usize, tgt_end: usize) -> Self {
        Self {
            score, ops, src_len, tgt_len, src_end, tgt_end
        }
    }

    /// Re-computes the score of `ops` against the sequences.
    /// A gap column extends when the previous column is a gap of the same kind; otherwise it opens.
    /// Returns None if the ops walk off the end of either sequence.
    /// # Arguments
    /// * `src` - the source sequence that was aligned
    /// * `tgt` - the target sequence that was aligned
    /// * `scoring` - the scoring used for the alignment
    pub fn rescore(&self, src: &[u8], tgt: &[u8], scoring: &ScoringConfig) -> Option<i32> {
        let mut total: i32 = 0;
        let mut src_index = 0;
        let mut tgt_index = 0;
        let mut previous: Option<AlignOp> = None;
        for &op in self.ops.iter() {
            let column = match op {
                AlignOp::Match |
                AlignOp::Mismatch => scoring.pair_score(*src.get(src_index)?, *tgt.get(tgt_index)?),
                AlignOp::GapInTarget => {
                    src.get(src_index)?;
                    scoring.gap_score(previous == Some(op))
                },
                AlignOp::GapInSource => {
                    tgt.get(tgt_index)?;
                    scoring.gap_score(previous == Some(op))
                }
            };
            total = total.saturating_add(column);
            if op.consumes_source() {
                src_index += 1;
            }
            if op.consumes_target() {
                tgt_index += 1;
            }
            previous = Some(op);
        }
        Some(total)
    }

    /// For every source position, the target position it is aligned to (if any).
    /// Gapped and overhanging source positions are None.
    pub fn target_positions(&self) -> Vec<Option<usize>> {
        let mut positions = vec![None; self.src_len];
        let mut src_index = 0;
        let mut tgt_index = 0;
        for op in self.ops.iter() {
            if op.consumes_source() && op.consumes_target() {
                if let Some(position) = positions.get_mut(src_index) {
                    *position = Some(tgt_index);
                }
            }
            if op.consumes_source() {
                src_index += 1;
            }
            if op.consumes_target() {
                tgt_index += 1;
            }
        }
        positions
    }

    /// Maximal ungapped runs of diagonal steps
    pub fn segments(&self) -> Vec<AlignedSegment> {
        let mut segments = vec![];
        let mut current: Option<AlignedSegment> = None;
        let mut src_index = 0;
        let mut tgt_index = 0;
        for op in self.ops.iter() {
            if op.is_gap() {
                if let Some(segment) = current.take() {
                    segments.push(segment);
                }
            } else {
                let segment = current.get_or_insert(AlignedSegment {
                    src_start: src_index, src_end: src_index,
                    tgt_start: tgt_index, tgt_end: tgt_index
                });
                segment.src_end += 1;
                segment.tgt_end += 1;
            }
            if op.consumes_source() {
                src_index += 1;
            }
            if op.consumes_target() {
                tgt_index += 1;
            }
        }
        segments.extend(current);
        segments
    }

    /// Renders the gapped source/target strings with a midline.
    /// Only the aligned span is rendered; trailing overhang is left out.
    /// # Arguments
    /// * `src` - the source sequence that was aligned
    /// * `tgt` - the target sequence that was aligned
    /// * `scoring` - provides the wildcard for the midline
    pub fn padded(&self, src: &[u8], tgt: &[u8], scoring: &ScoringConfig) -> PaddedAlignment {
        let mut source = Vec::with_capacity(self.ops.len());
        let mut midline = Vec::with_capacity(self.ops.len());
        let mut target = Vec::with_capacity(self.ops.len());
        let mut src_iter = src.iter().copied();
        let mut tgt_iter = tgt.iter().copied();
        for op in self.ops.iter() {
            let s = if op.consumes_source() { src_iter.next().unwrap_or(b'?') } else { b'-' };
            let t = if op.consumes_target() { tgt_iter.next().unwrap_or(b'?') } else { b'-' };
            let m = if op.is_gap() {
                b' '
            } else if scoring.is_wildcard_pair(s, t) {
                b':'
            } else if s == t {
                b'|'
            } else {
                b' '
            };
            source.push(s);
            midline.push(m);
            target.push(t);
        }
        PaddedAlignment {
            source: String::from_utf8_lossy(&source).into_owned(),
            midline: String::from_utf8_lossy(&midline).into_owned(),
            target: String::from_utf8_lossy(&target).into_owned(),
        }
    }

    /// Run-length encoding of the ops with the source treated as the reference (`=`, `X`, `D`, `I`)
    pub fn cigar(&self) -> String {
        self.ops.iter()
            .dedup_with_count()
            .map(|(count, op)| format!("{count}{}", op.cigar_code()))
            .collect()
    }

    /// Counts the alignment columns by kind
    pub fn stats(&self) -> AlignmentStats {
        let mut stats = AlignmentStats::default();
        let mut previous: Option<AlignOp> = None;
        for &op in self.ops.iter() {
            match op {
                AlignOp::Match => stats.matches += 1,
                AlignOp::Mismatch => stats.mismatches += 1,
                AlignOp::GapInTarget |
                AlignOp::GapInSource => {
                    stats.gap_positions += 1;
                    if previous != Some(op) {
                        stats.gap_opens += 1;
                    }
                }
            };
            previous = Some(op);
        }
        stats
    }

    /// True if both sequences were consumed completely
    pub fn is_full_length(&self) -> bool {
        self.src_end == self.src_len && self.tgt_end == self.tgt_len
    }

    // getters
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn ops(&self) -> &[AlignOp] {
        &self.ops
    }

    pub fn src_len(&self) -> usize {
        self.src_len
    }

    pub fn tgt_len(&self) -> usize {
        self.tgt_len
    }

    pub fn src_end(&self) -> usize {
        self.src_end
    }

    pub fn tgt_end(&self) -> usize {
        self.tgt_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    use super::AlignOp::{GapInSource as I, GapInTarget as D, Match as M, Mismatch as X};

    /// CCNANG vs CNNG, the exact affine optimum
    fn wildcard_alignment() -> Alignment {
        Alignment::new(-1, vec![M, D, D, X, M, M], 6, 4, 6, 4)
    }

    #[test]
    fn test_rescore() {
        let scoring = ScoringConfig::default();
        let alignment = wildcard_alignment();
        assert_eq!(alignment.rescore(b"CCNANG", b"CNNG", &scoring), Some(-1));

        // two separate gaps both pay the open penalty
        let alignment = Alignment::new(-3, vec![M, I, M, D, M], 3, 3, 3, 3);
        assert_eq!(alignment.rescore(b"ACT", b"AGC", &scoring), None);
        assert_eq!(alignment.rescore(b"ACGT", b"AGCT", &scoring), Some(1 - 2 + 1 - 2 + 1));

        // a gap in source followed by a gap in target does not extend
        let alignment = Alignment::new(-4, vec![I, D], 1, 1, 1, 1);
        assert_eq!(alignment.rescore(b"A", b"C", &scoring), Some(-4));

        // ops that run past the sequences
        let alignment = Alignment::new(0, vec![M, M], 2, 2, 2, 2);
        assert_eq!(alignment.rescore(b"A", b"AA", &scoring), None);
    }

    #[test]
    fn test_target_positions() {
        let alignment = wildcard_alignment();
        assert_eq!(alignment.target_positions(), vec![Some(0), None, None, Some(1), Some(2), Some(3)]);

        // overhang positions stay unaligned
        let alignment = Alignment::new(2, vec![M, I, M], 4, 3, 2, 3);
        assert_eq!(alignment.target_positions(), vec![Some(0), Some(2), None, None]);

        // ops that run past the source length are ignored rather than indexed
        let alignment = Alignment::new(2, vec![M, M, M], 1, 3, 1, 3);
        assert_eq!(alignment.target_positions(), vec![Some(0)]);
    }

    #[test]
    fn test_segments() {
        let alignment = wildcard_alignment();
        assert_eq!(alignment.segments(), vec![
            AlignedSegment { src_start: 0, src_end: 1, tgt_start: 0, tgt_end: 1 },
            AlignedSegment { src_start: 3, src_end: 6, tgt_start: 1, tgt_end: 4 },
        ]);
        assert_eq!(alignment.segments()[1].len(), 3);

        let all_gaps = Alignment::new(-5, vec![I, I, I, I], 0, 4, 0, 4);
        assert!(all_gaps.segments().is_empty());
        assert!(Alignment::new(0, vec![], 0, 0, 0, 0).segments().is_empty());
    }

    #[test]
    fn test_padded() {
        let scoring = ScoringConfig::default();
        let padded = wildcard_alignment().padded(b"CCNANG", b"CNNG", &scoring);
        assert_eq!(padded.source, "CCNANG");
        assert_eq!(padded.midline, "|  ::|");
        assert_eq!(padded.target, "C--NNG");

        let alignment = Alignment::new(-1, vec![M, X, X, M, X, M, X], 7, 7, 7, 7);
        let padded = alignment.padded(b"GATTACA", b"GCATGCU", &scoring);
        assert_eq!(padded.source, "GATTACA");
        assert_eq!(padded.midline, "|  | | ");
        assert_eq!(padded.target, "GCATGCU");
    }

    #[test]
    fn test_cigar() {
        assert_eq!(wildcard_alignment().cigar(), "1=2D1X2=");
        assert_eq!(Alignment::new(-5, vec![I, I, I, I], 0, 4, 0, 4).cigar(), "4I");
        assert_eq!(Alignment::new(0, vec![], 0, 0, 0, 0).cigar(), "");
    }

    #[test]
    fn test_stats() {
        let stats = wildcard_alignment().stats();
        assert_eq!(stats, AlignmentStats { matches: 3, mismatches: 1, gap_opens: 1, gap_positions: 2 });
        assert_eq!(stats.columns(), 6);
        assert_approx_eq!(stats.identity().unwrap(), 0.5);

        let stats = Alignment::new(-4, vec![I, D], 1, 1, 1, 1).stats();
        assert_eq!(stats.gap_opens, 2);
        assert_approx_eq!(stats.identity().unwrap(), 0.0);

        assert_eq!(AlignmentStats::default().identity(), None);
    }

    #[test]
    fn test_op_properties() {
        assert_eq!(AlignOp::from_event(DpEvent::Diagonal, b'A', b'A'), M);
        assert_eq!(AlignOp::from_event(DpEvent::Diagonal, b'A', b'N'), X);
        assert_eq!(AlignOp::from_event(DpEvent::GapInTarget, b'A', b'A'), D);
        assert_eq!(AlignOp::from_event(DpEvent::GapInSource, b'A', b'A'), I);
        assert!(D.consumes_source() && !D.consumes_target() && D.is_gap());
        assert!(!I.consumes_source() && I.consumes_target() && I.is_gap());
        assert!(!M.is_gap() && !X.is_gap());
    }
}
