//! JSON document sink

use crate::catalog::CatalogDocument;
use crate::output::{OutputError, OutputResult};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Builds the output file name for a run started at `timestamp`
///
/// # Examples
///
/// ```
/// use chrono::{Local, TimeZone};
/// use swatch_ripple::output::output_filename;
///
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(output_filename("zline_range_series", at), "zline_range_series_20240309_140507.json");
/// ```
pub fn output_filename(prefix: &str, timestamp: DateTime<Local>) -> String {
    format!("{}_{}.json", prefix, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes a catalog document as pretty-printed JSON
///
/// The output directory is created if it does not exist. Non-ASCII text is
/// written as UTF-8, not escaped.
///
/// # Arguments
///
/// * `document` - The catalog document to persist
/// * `directory` - Directory the file is written into
/// * `prefix` - File name prefix
/// * `timestamp` - Time used to stamp the file name
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Failed to create, serialize, or flush the file
pub fn write_document(
    document: &CatalogDocument,
    directory: &Path,
    prefix: &str,
    timestamp: DateTime<Local>,
) -> OutputResult<PathBuf> {
    if directory.exists() && !directory.is_dir() {
        return Err(OutputError::Write(format!(
            "{} is not a directory",
            directory.display()
        )));
    }
    fs::create_dir_all(directory)?;

    let path = directory.join(output_filename(prefix, timestamp));
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Catalog written to {}", path.display());
    Ok(path)
}
