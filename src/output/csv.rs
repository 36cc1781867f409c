//! CSV tables for annotations and clips.
//!
//! Booleans are written as `True`/`False` so the tables stay readable by the
//! dataframe tooling that consumes them; the readers accept either case.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::annotation::Annotation;
use crate::clips::Clip;
use crate::error::{Error, Result};

/// Column order for `annotations.csv`.
pub const ANNOTATION_COLUMNS: [&str; 6] = [
    "layer",
    "annotator",
    "description",
    "type",
    "start_time_usec",
    "end_time_usec",
];

/// Clip columns following the row index.
pub const CLIP_COLUMNS: [&str; 7] = [
    "start_time_usec",
    "end_time_usec",
    "has_events",
    "events",
    "annotators",
    "layers",
    "close_to_event",
];

/// Index header used once clips carry calendar labels.
pub const TIMESTAMP_INDEX: &str = "timestamp";

/// Internal record for clip deserialization.
#[derive(Debug, Deserialize)]
struct ClipRecord {
    #[serde(default, rename = "timestamp")]
    timestamp_label: Option<String>,
    start_time_usec: i64,
    end_time_usec: i64,
    #[serde(deserialize_with = "de_bool")]
    has_events: bool,
    #[serde(default)]
    events: String,
    #[serde(default)]
    annotators: String,
    #[serde(default)]
    layers: String,
    #[serde(deserialize_with = "de_bool")]
    close_to_event: bool,
    #[serde(default, deserialize_with = "de_opt_bool")]
    is_night: Option<bool>,
}

impl From<ClipRecord> for Clip {
    fn from(record: ClipRecord) -> Self {
        Self {
            start_time_usec: record.start_time_usec,
            end_time_usec: record.end_time_usec,
            has_events: record.has_events,
            events: record.events,
            annotators: record.annotators,
            layers: record.layers,
            close_to_event: record.close_to_event,
            timestamp_label: record.timestamp_label.filter(|s| !s.is_empty()),
            is_night: record.is_night,
        }
    }
}

/// Format a boolean the way the downstream dataframe tooling writes it.
pub const fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Parse `True`/`False`, `true`/`false` or `1`/`0`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "True" | "true" | "TRUE" | "1" => Some(true),
        "False" | "false" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

fn de_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_bool(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid boolean '{raw}'")))
}

fn de_opt_bool<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<bool>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_bool(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean '{raw}'"))),
    }
}

fn write_err(path: &Path) -> impl Fn(csv::Error) -> Error + '_ {
    move |e| Error::CsvWrite {
        path: path.to_path_buf(),
        source: e,
    }
}

fn read_err(path: &Path) -> impl Fn(csv::Error) -> Error + '_ {
    move |e| Error::CsvRead {
        path: path.to_path_buf(),
        source: e,
    }
}

/// Write annotations without a row index.
///
/// The header is always written, even for an empty table.
pub fn write_annotations(path: &Path, annotations: &[Annotation]) -> Result<()> {
    let err = write_err(path);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(&err)?;

    writer.write_record(ANNOTATION_COLUMNS).map_err(&err)?;
    for annotation in annotations {
        writer.serialize(annotation).map_err(&err)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read an annotations table.
pub fn read_annotations(path: &Path) -> Result<Vec<Annotation>> {
    let err = read_err(path);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(&err)?;

    reader
        .deserialize::<Annotation>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(err)
}

/// Write clips with a leading row index.
///
/// Localized tables are indexed by timestamp label and carry `is_night`;
/// otherwise the index is the row position under an empty header. The
/// layout follows `localized` even when `clips` is empty.
pub fn write_clips(path: &Path, clips: &[Clip], localized: bool) -> Result<()> {
    let err = write_err(path);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(&err)?;

    let mut header = vec![if localized { TIMESTAMP_INDEX } else { "" }];
    header.extend(CLIP_COLUMNS);
    if localized {
        header.push("is_night");
    }
    writer.write_record(&header).map_err(&err)?;

    for (position, clip) in clips.iter().enumerate() {
        let index = if localized {
            clip.timestamp_label.clone().unwrap_or_default()
        } else {
            position.to_string()
        };

        let mut record = vec![
            index,
            clip.start_time_usec.to_string(),
            clip.end_time_usec.to_string(),
            format_bool(clip.has_events).to_string(),
            clip.events.clone(),
            clip.annotators.clone(),
            clip.layers.clone(),
            format_bool(clip.close_to_event).to_string(),
        ];
        if localized {
            record.push(clip.is_night.map(format_bool).unwrap_or_default().to_string());
        }
        writer.write_record(&record).map_err(&err)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a clips table written by [`write_clips`].
pub fn read_clips(path: &Path) -> Result<Vec<Clip>> {
    let err = read_err(path);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(&err)?;

    reader
        .deserialize::<ClipRecord>()
        .map(|r| r.map(Clip::from))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(err)
}
