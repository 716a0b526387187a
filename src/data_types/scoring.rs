
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

/// Default score for identical, non-wildcard characters
pub const DEFAULT_MATCH: i32 = 1;
/// Default score for differing characters
pub const DEFAULT_MISMATCH: i32 = -1;
/// Default score when either character is the wildcard
pub const DEFAULT_WILDCARD_MATCH: i32 = 0;
/// Default score for opening a gap
pub const DEFAULT_GAP_OPEN: i32 = -2;
/// Default score for extending an open gap
pub const DEFAULT_GAP_EXTEND: i32 = -1;
/// Default wildcard symbol
pub const DEFAULT_WILDCARD: u8 = b'N';

/// Scoring parameters for a single realignment.
/// All values are *added* to the running score, so penalties are expected to be negative.
/// Nothing is validated here beyond the type range; callers conventionally keep `gap_extend` cheaper than `gap_open`.
#[derive(Builder, Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct ScoringConfig {
    /// Score for two identical characters, neither of which is the wildcard
    match_score: i32,
    /// Score for two differing characters
    mismatch: i32,
    /// Score whenever either character is the wildcard, regardless of the other character
    wildcard_match: i32,
    /// Score for the first position of a gap
    gap_open: i32,
    /// Score for each additional consecutive position of a gap
    gap_extend: i32,
    /// The wildcard symbol, serialized as a single-character string
    #[serde(with = "wildcard_symbol")]
    wildcard: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch: DEFAULT_MISMATCH,
            wildcard_match: DEFAULT_WILDCARD_MATCH,
            gap_open: DEFAULT_GAP_OPEN,
            gap_extend: DEFAULT_GAP_EXTEND,
            wildcard: DEFAULT_WILDCARD,
        }
    }
}

impl ScoringConfigBuilder {
    /// The wildcard must round-trip through JSON as a single character
    fn validate(&self) -> Result<(), String> {
        match self.wildcard {
            Some(wildcard) if !wildcard.is_ascii() => Err(format!("wildcard must be an ASCII character, got byte {wildcard:#04x}")),
            _ => Ok(())
        }
    }
}

impl ScoringConfig {
    /// Scores a single aligned column of two characters.
    /// The wildcard check takes priority, so `N` vs `N` is still a `wildcard_match`.
    /// # Arguments
    /// * `a` - character from the source
    /// * `b` - character from the target
    pub fn pair_score(&self, a: u8, b: u8) -> i32 {
        if self.is_wildcard_pair(a, b) {
            self.wildcard_match
        } else if a == b {
            self.match_score
        } else {
            self.mismatch
        }
    }

    /// Scores one gap position.
    /// # Arguments
    /// * `extending` - if true, the previous column was a gap of the same kind
    pub fn gap_score(&self, extending: bool) -> i32 {
        if extending {
            self.gap_extend
        } else {
            self.gap_open
        }
    }

    /// Score of a single gap run of `length` positions, 0 for an empty run.
    /// Saturates at the `i32` range.
    pub fn gap_run_score(&self, length: usize) -> i32 {
        match length {
            0 => 0,
            l => {
                let extensions = i32::try_from(l - 1).unwrap_or(i32::MAX);
                self.gap_open.saturating_add(self.gap_extend.saturating_mul(extensions))
            }
        }
    }

    /// Returns true if either character is the configured wildcard
    pub fn is_wildcard_pair(&self, a: u8, b: u8) -> bool {
        a == self.wildcard || b == self.wildcard
    }

    // getters
    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    pub fn mismatch(&self) -> i32 {
        self.mismatch
    }

    pub fn wildcard_match(&self) -> i32 {
        self.wildcard_match
    }

    pub fn gap_open(&self) -> i32 {
        self.gap_open
    }

    pub fn gap_extend(&self) -> i32 {
        self.gap_extend
    }

    pub fn wildcard(&self) -> u8 {
        self.wildcard
    }
}

/// Controls which DP cell the backtrace starts from
#[derive(Clone, Copy, Default, Debug, Deserialize, Eq, Hash, PartialEq, Serialize, strum_macros::Display, EnumString, clap::ValueEnum)]
pub enum AlignmentMode {
    /// Strict global alignment; both sequences are fully consumed
    #[default]
    #[strum(ascii_case_insensitive, serialize = "global")]
    #[clap(name = "global")]
    Global,
    /// Picks the best cell from the last row or last column, allowing trailing overhang on one sequence
    #[strum(ascii_case_insensitive, serialize = "best_endpoint")]
    #[clap(name = "best_endpoint")]
    BestEndpoint,
}

/// Selects the DP formulation used to fill the table
#[derive(Clone, Copy, Default, Debug, Deserialize, Eq, Hash, PartialEq, Serialize, strum_macros::Display, EnumString, clap::ValueEnum)]
pub enum DpRecurrence {
    /// Three affine states per cell; exact optimum over all affine alignments
    #[default]
    #[strum(ascii_case_insensitive, serialize = "three_state")]
    #[clap(name = "three_state")]
    ThreeState,
    /// One score and one event tag per cell; smaller, but can miss the optimum when a gap reopens at a tie
    #[strum(ascii_case_insensitive, serialize = "single_matrix")]
    #[clap(name = "single_matrix")]
    SingleMatrix,
}

/// Everything the aligner needs for one call
#[derive(Builder, Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(default)]
pub struct AlignerConfig {
    /// Per-column scores
    scoring: ScoringConfig,
    /// Strict global or best-endpoint
    mode: AlignmentMode,
    /// DP formulation
    recurrence: DpRecurrence,
}

impl From<ScoringConfig> for AlignerConfig {
    fn from(scoring: ScoringConfig) -> Self {
        Self {
            scoring,
            ..Default::default()
        }
    }
}

impl AlignerConfig {
    // mostly getters
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    pub fn recurrence(&self) -> DpRecurrence {
        self.recurrence
    }
}

/// Serde helper so the wildcard reads as `"N"` in JSON instead of `78`
mod wildcard_symbol {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(wildcard: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&char::from(*wildcard).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        match symbol.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(D::Error::custom(format!("wildcard must be a single ASCII character, got {symbol:?}")))
        }
    }
}
