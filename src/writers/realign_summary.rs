
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::aligner::RealignError;
use crate::data_types::alignment::Alignment;
use crate::data_types::hsp_pair::HspPair;

/// This is a wrapper for writing out one summary row per realigned pair
pub struct RealignSummaryWriter {
    /// Handle on the writer
    csv_writer: csv::Writer<File>,
    /// Number of rows with an alignment
    aligned_pairs: u64,
    /// Number of rows where the realignment failed
    failed_pairs: u64,
}

/// Contains all the data written to each row of our summary file
#[derive(Serialize)]
struct RealignSummaryRow {
    /// Caller-provided pair identifier
    pair_id: String,
    /// Full source length
    source_len: usize,
    /// Full target length
    target_len: usize,
    /// Source prefix covered by the alignment; less than `source_len` only with trailing overhang
    source_end: Option<usize>,
    /// Target prefix covered by the alignment; less than `target_len` only with trailing overhang
    target_end: Option<usize>,
    /// Optimal alignment score
    score: Option<i32>,
    /// Alignment as a CIGAR string with the source as reference
    cigar: Option<String>,
    /// Number of identical columns
    matches: Option<usize>,
    /// Number of differing columns
    mismatches: Option<usize>,
    /// Number of gap runs
    gap_opens: Option<usize>,
    /// Number of gap columns
    gap_positions: Option<usize>,
    /// matches / columns
    identity: Option<f64>,
    /// Error message if the pair could not be realigned
    error: Option<String>,
}

impl RealignSummaryRow {
    /// Creates a new row for a successful realignment
    fn from_alignment(pair: &HspPair, alignment: &Alignment) -> Self {
        let stats = alignment.stats();
        Self {
            pair_id: pair.pair_id().to_string(),
            source_len: alignment.src_len(),
            target_len: alignment.tgt_len(),
            source_end: Some(alignment.src_end()),
            target_end: Some(alignment.tgt_end()),
            score: Some(alignment.score()),
            cigar: Some(alignment.cigar()),
            matches: Some(stats.matches),
            mismatches: Some(stats.mismatches),
            gap_opens: Some(stats.gap_opens),
            gap_positions: Some(stats.gap_positions),
            identity: stats.identity(),
            error: None,
        }
    }

    /// Creates a new row for a failed realignment
    fn from_error(pair: &HspPair, error: &RealignError) -> Self {
        Self {
            pair_id: pair.pair_id().to_string(),
            source_len: pair.source().len(),
            target_len: pair.target().len(),
            source_end: None,
            target_end: None,
            score: None,
            cigar: None,
            matches: None,
            mismatches: None,
            gap_opens: None,
            gap_positions: None,
            identity: None,
            error: Some(error.to_string()),
        }
    }
}

impl RealignSummaryWriter {
    /// Creates a new writer for the per-pair summary
    /// # Arguments
    /// * `filename` - path to the filename that will get opened, must be .csv/.tsv
    pub fn new(filename: &Path) -> csv::Result<Self> {
        // modify the delimiter to "," if it ends with .csv
        let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(filename)?;
        Ok(Self {
            csv_writer,
            aligned_pairs: 0,
            failed_pairs: 0
        })
    }

    /// Writes the row for a single pair
    /// # Arguments
    /// * `pair` - the pair that was realigned
    /// * `result` - the realignment result for that pair
    pub fn write_result(&mut self, pair: &HspPair, result: &Result<Alignment, RealignError>) -> csv::Result<()> {
        let row = match result {
            Ok(alignment) => {
                self.aligned_pairs += 1;
                RealignSummaryRow::from_alignment(pair, alignment)
            },
            Err(e) => {
                self.failed_pairs += 1;
                RealignSummaryRow::from_error(pair, e)
            }
        };
        self.csv_writer.serialize(&row)
    }

    /// Flushes any buffered rows to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.csv_writer.flush()
    }

    pub fn aligned_pairs(&self) -> u64 {
        self.aligned_pairs
    }

    pub fn failed_pairs(&self) -> u64 {
        self.failed_pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::scoring::AlignerConfig;

    #[test]
    fn test_write_summary() {
        let out_fn = std::env::temp_dir().join(format!("realign_test_summary_{}.csv", std::process::id()));
        let pair = HspPair::new("hsp_1".to_string(), b"ACGTTTACGT".to_vec(), b"ACGTACGT".to_vec());
        let failed = HspPair::new("hsp_2".to_string(), b"A".to_vec(), b"C".to_vec());
        {
            let mut writer = RealignSummaryWriter::new(&out_fn).unwrap();
            writer.write_result(&pair, &pair.realign(&AlignerConfig::default())).unwrap();
            writer.write_result(&failed, &Err(RealignError::ResourceExhaustion { rows: 2, cols: 2 })).unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.aligned_pairs(), 1);
            assert_eq!(writer.failed_pairs(), 1);
        }

        let content = std::fs::read_to_string(&out_fn).unwrap();
        std::fs::remove_file(&out_fn).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "pair_id,source_len,target_len,source_end,target_end,score,cigar,matches,mismatches,gap_opens,gap_positions,identity,error");
        assert_eq!(lines[1], "hsp_1,10,8,10,8,5,3=2D5=,8,0,1,2,0.8,");
        assert_eq!(lines[2], "hsp_2,1,1,,,,,,,,,,unable to allocate a 2x2 DP table");
    }
}
