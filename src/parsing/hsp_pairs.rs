
use anyhow::{anyhow, bail, Context};
use log::debug;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::data_types::hsp_pair::HspPair;
use crate::util::file_io::open_reader;

/// Loads all pairs from a TSV file that is expected to have three columns and no header: pair ID, source, target.
/// Lines starting with `#` are skipped, and `.gz` files are decompressed on the fly.
/// Empty source or target fields are allowed, they simply align against all gaps.
/// # Arguments
/// * `filename` - the TSV (or TSV.GZ) to load
/// # Errors
/// * if the file cannot be opened or read
/// * if a row is missing one of the three columns
/// * if a pair ID is duplicated
pub fn load_hsp_pairs(filename: &Path) -> anyhow::Result<Vec<HspPair>> {
    let reader = open_reader(filename)?;
    parse_hsp_pairs(reader)
        .with_context(|| format!("Error while reading {filename:?}:"))
}

/// Parses pairs from any reader, see `load_hsp_pairs(...)` for the format.
/// # Arguments
/// * `reader` - the TSV content
/// # Errors
/// * if a row is missing one of the three columns, or a pair ID is duplicated
pub fn parse_hsp_pairs<R: Read>(reader: R) -> anyhow::Result<Vec<HspPair>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // no headers in the file, disable so we do not skip first row
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut pair_ids: BTreeSet<String> = Default::default();
    let mut pairs = vec![];
    for result in csv_reader.byte_records() {
        let row = result?;
        let pair_id = row.get(0)
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .ok_or(anyhow!("Missing pair ID on row: {row:?}"))?;
        if !pair_ids.insert(pair_id.clone()) {
            bail!("Duplicate pair ID found: {pair_id}");
        }

        let source = row.get(1).ok_or(anyhow!("Missing source sequence for {pair_id:?}"))?;
        let target = row.get(2).ok_or(anyhow!("Missing target sequence for {pair_id:?}"))?;
        pairs.push(HspPair::new(pair_id, source.to_vec(), target.to_vec()));
    }

    debug!("Loaded {} HSP pairs", pairs.len());
    Ok(pairs)
}
