
use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Returns true if the path ends in `.gz`
pub fn is_gzipped(filename: &Path) -> bool {
    filename.extension().unwrap_or_default() == "gz"
}

/// Opens a file for reading, transparently decompressing `.gz` files.
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open properly
pub fn open_reader(filename: &Path) -> anyhow::Result<Box<dyn Read>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn Read> = if is_gzipped(filename) {
        Box::new(flate2::read::MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// Creates a file for writing, compressing the output if the path ends in `.gz`.
/// # Arguments
/// * `filename` - the file path to create
/// # Errors
/// * if the file cannot be created
pub fn create_writer(filename: &Path) -> anyhow::Result<Box<dyn Write>> {
    let file = File::create(filename)
        .with_context(|| format!("Error while creating {filename:?}:"))?;
    let writer: Box<dyn Write> = if is_gzipped(filename) {
        Box::new(flate2::write::GzEncoder::new(file, flate2::Compression::best()))
    } else {
        Box::new(file)
    };
    Ok(writer)
}

/// Loads a JSON file into some type, e.g., a scoring configuration
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> anyhow::Result<T> {
    let reader = open_reader(filename)?;
    serde_json::from_reader(reader)
        .with_context(|| format!("Error while deserializing {filename:?}:"))
}

/// Saves a serializable struct to (pretty) JSON.
/// # Arguments
/// * `data` - the data in memory
/// * `out_filename` - user provided path to write to
/// # Errors
/// * if opening or writing to the file throw errors
/// * if JSON serialization throws errors
pub fn save_json<T: serde::Serialize>(data: &T, out_filename: &Path) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(create_writer(out_filename)?);
    serde_json::to_writer_pretty(&mut writer, data)
        .with_context(|| format!("Error while serializing {out_filename:?}:"))?;
    writer.flush()
        .with_context(|| format!("Error while flushing output to {out_filename:?}:"))?;
    Ok(())
}
