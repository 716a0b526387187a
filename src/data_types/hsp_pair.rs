
use crate::aligner::{realign_with_config, RealignError};
use crate::data_types::alignment::Alignment;
use crate::data_types::scoring::AlignerConfig;

/// A named high-scoring fragment pair as handed over by an upstream search step
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HspPair {
    /// Caller-provided identifier, carried through to the output
    pair_id: String,
    /// Source fragment
    source: Vec<u8>,
    /// Target fragment
    target: Vec<u8>,
}

impl HspPair {
    /// Constructor
    pub fn new(pair_id: String, source: Vec<u8>, target: Vec<u8>) -> Self {
        Self {
            pair_id, source, target
        }
    }

    /// Realigns the two fragments with the given configuration.
    /// # Errors
    /// * if the DP table cannot be allocated
    pub fn realign(&self, config: &AlignerConfig) -> Result<Alignment, RealignError> {
        realign_with_config(&self.source, &self.target, config)
    }

    // getters
    pub fn pair_id(&self) -> &str {
        &self.pair_id
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realign_pair() {
        let pair = HspPair::new("hsp_1".to_string(), b"GATTACA".to_vec(), b"GCATGCU".to_vec());
        let alignment = pair.realign(&AlignerConfig::default()).unwrap();
        assert_eq!(pair.pair_id(), "hsp_1");
        assert_eq!(alignment.score(), -1);
        assert_eq!(alignment.src_len(), pair.source().len());
        assert_eq!(alignment.tgt_len(), pair.target().len());
    }
}
