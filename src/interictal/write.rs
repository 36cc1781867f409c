//! Interictal output files.

use std::fs;
use std::path::Path;

use super::InterictalClip;
use crate::error::{Error, Result};
use crate::output::{CLIP_COLUMNS, TIMESTAMP_INDEX, format_bool};

/// Column order for `clips_interictal.csv`.
pub const INTERICTAL_COLUMNS: [&str; 3] = ["is_night", "day_num", "mark_for_extraction"];

/// Write selected clips without a row index; the timestamp label is the
/// first column.
pub fn write_interictal_clips(path: &Path, clips: &[InterictalClip]) -> Result<()> {
    let err = |e| Error::CsvWrite {
        path: path.to_path_buf(),
        source: e,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(err)?;

    let mut header = vec![TIMESTAMP_INDEX];
    header.extend(CLIP_COLUMNS);
    header.extend(INTERICTAL_COLUMNS);
    writer.write_record(&header).map_err(err)?;

    for entry in clips {
        let clip = &entry.clip;
        writer
            .write_record([
                clip.timestamp_label.clone().unwrap_or_default(),
                clip.start_time_usec.to_string(),
                clip.end_time_usec.to_string(),
                format_bool(clip.has_events).to_string(),
                clip.events.clone(),
                clip.annotators.clone(),
                clip.layers.clone(),
                format_bool(clip.close_to_event).to_string(),
                clip.is_night.map(format_bool).unwrap_or_default().to_string(),
                entry.day_num.to_string(),
                format_bool(entry.mark_for_extraction).to_string(),
            ])
            .map_err(err)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a summary text file, creating its directory.
pub fn write_summary(path: &Path, summary: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, summary)?;
    Ok(())
}
