//! `key: value` metadata listings.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::sources::SessionMetadata;

/// Render a metadata value for the text listing.
///
/// Strings are written raw, booleans as `True`/`False` and null as `None`.
pub fn format_metadata_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(b) => super::csv::format_bool(*b).to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Write metadata as one `key: value` line per entry, in insertion order.
pub fn write_metadata(path: &Path, metadata: &SessionMetadata) -> Result<()> {
    let err = |e| Error::MetadataFile {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(err)?);
    for (key, value) in metadata.iter() {
        writeln!(writer, "{key}: {}", format_metadata_value(value)).map_err(err)?;
    }
    writer.flush().map_err(err)
}

/// Read a listing back as raw `(key, value)` strings, in file order.
///
/// Lines without a `": "` separator are skipped.
pub fn read_metadata_entries(path: &Path) -> Result<Vec<(String, String)>> {
    let err = |e| Error::MetadataFile {
        path: path.to_path_buf(),
        source: e,
    };

    let reader = BufReader::new(File::open(path).map_err(err)?);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(err)?;
        if let Some((key, value)) = line.split_once(": ") {
            entries.push((key.to_string(), value.to_string()));
        }
    }
    Ok(entries)
}

/// Read a listing into [`SessionMetadata`].
///
/// Values are kept as the text found in the file so that a later
/// [`write_metadata`] reproduces them verbatim. Numeric keys are read with
/// [`SessionMetadata::get_f64`], which accepts numeric strings.
pub fn read_metadata(path: &Path) -> Result<SessionMetadata> {
    Ok(read_metadata_entries(path)?
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect())
}
