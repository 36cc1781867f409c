//! File-backed collaborators reading CSV exports from an input directory.
//!
//! Layout under the input directory:
//!
//! - `sessions.csv`: `record_id`, `dataset_name` (or `ieegportalsubjno`)
//! - `start_times.csv`: `record_id`, subject name, then one column per session
//! - `seizure_times.csv`: `record_id`, `source`, `start`, `end` (seconds)
//! - `<record_id>/<dataset_name>/`: `annotations.csv`, `metadata.txt`, and
//!   optionally `channels.csv` and `clips.csv`

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    BaseMetadataSource, BaseSessionData, Channel, ManualSeizureSource, SessionDataSource,
    SessionRow, StartTimeSource, StartTimeTable, normalize_record_id,
};
use crate::annotation::RawSeizureEvent;
use crate::constants::{input_files, output_files};
use crate::error::{Error, Result};
use crate::output::{read_annotations, read_clips, read_metadata};

/// Serves every upstream contract from CSV exports on disk.
#[derive(Debug, Clone)]
pub struct LocalExportSource {
    input_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SeizureRecord {
    record_id: String,
    source: String,
    start: Option<f64>,
    end: Option<f64>,
}

impl LocalExportSource {
    /// Create a source rooted at `input_dir`.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }

    /// The input directory.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    fn table_path(&self, name: &str) -> Result<PathBuf> {
        let path = self.input_dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::upstream(
                name,
                format!("export not found at {}", path.display()),
            ))
        }
    }
}

/// Open a CSV file with headers, trimming whitespace around fields.
fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Normalized subject filter; empty means "all subjects".
fn subject_filter(subject_ids: &[String]) -> Vec<String> {
    subject_ids.iter().map(|s| normalize_record_id(s)).collect()
}

fn is_wanted(filter: &[String], record_id: &str) -> bool {
    filter.is_empty() || filter.iter().any(|s| s == record_id)
}

impl SessionDataSource for LocalExportSource {
    fn get_sessions(&self, subject_ids: &[String]) -> Result<Vec<SessionRow>> {
        let path = self.table_path(input_files::SESSIONS)?;
        let filter = subject_filter(subject_ids);
        let mut reader = open_csv(&path)?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<SessionRow>() {
            let mut row = result.map_err(|e| Error::CsvRead {
                path: path.clone(),
                source: e,
            })?;
            row.record_id = normalize_record_id(&row.record_id);

            if !is_wanted(&filter, &row.record_id) {
                continue;
            }
            if row.dataset_name.is_empty() {
                warn!("Session row for {} has no dataset name, skipping", row.record_id);
                continue;
            }
            rows.push(row);
        }

        // stable: sessions of one subject keep their export order
        rows.sort_by(|a, b| a.record_id.cmp(&b.record_id));
        debug!("Loaded {} session row(s) from {}", rows.len(), path.display());
        Ok(rows)
    }
}

impl StartTimeSource for LocalExportSource {
    fn get_start_times(&self, subject_ids: &[String]) -> Result<StartTimeTable> {
        let path = self.table_path(input_files::START_TIMES)?;
        let filter = subject_filter(subject_ids);
        let mut reader = open_csv(&path)?;
        let csv_err = |e| Error::CsvRead {
            path: path.clone(),
            source: e,
        };

        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_err)?;
            let record_id = normalize_record_id(record.get(0).unwrap_or_default());
            if is_wanted(&filter, &record_id) {
                rows.push(record.iter().map(str::to_string).collect());
            }
        }

        Ok(StartTimeTable::new(columns, rows))
    }
}

impl ManualSeizureSource for LocalExportSource {
    fn get_seizure_events(&self, subject_ids: &[String]) -> Result<Vec<RawSeizureEvent>> {
        let path = self.table_path(input_files::SEIZURE_TIMES)?;
        let filter = subject_filter(subject_ids);
        let mut reader = open_csv(&path)?;

        let mut events = Vec::new();
        for result in reader.deserialize::<SeizureRecord>() {
            let record = result.map_err(|e| Error::CsvRead {
                path: path.clone(),
                source: e,
            })?;
            if !is_wanted(&filter, &normalize_record_id(&record.record_id)) {
                continue;
            }
            // Blank cells become NaN so validation reports them as malformed.
            events.push(RawSeizureEvent::new(
                record.source,
                record.start.unwrap_or(f64::NAN),
                record.end.unwrap_or(f64::NAN),
            ));
        }

        Ok(events)
    }
}

impl BaseMetadataSource for LocalExportSource {
    fn get_base_session_data(
        &self,
        record_id: &str,
        dataset_name: &str,
    ) -> Result<BaseSessionData> {
        let dir = self.input_dir.join(record_id).join(dataset_name);
        if !dir.is_dir() {
            return Err(Error::upstream(
                "session metadata",
                format!("no base data for {record_id}/{dataset_name} at {}", dir.display()),
            ));
        }

        let channels_path = dir.join(input_files::CHANNELS);
        let channels = if channels_path.is_file() {
            let mut reader = open_csv(&channels_path)?;
            reader
                .deserialize::<Channel>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| Error::CsvRead {
                    path: channels_path.clone(),
                    source: e,
                })?
        } else {
            Vec::new()
        };

        let annotations = read_annotations(&dir.join(output_files::ANNOTATIONS))?;
        let metadata = read_metadata(&dir.join(output_files::METADATA))?;

        let clips_path = dir.join(output_files::CLIPS);
        let clips = if clips_path.is_file() {
            read_clips(&clips_path)?
        } else {
            Vec::new()
        };

        Ok(BaseSessionData {
            channels,
            annotations,
            metadata,
            clips,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_sessions_normalized_filtered_sorted() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "sessions.csv",
            "record_id,ieegportalsubjno,hupsubjno\n\
             222,HUP222_phaseII_D02,222\n\
             31,HUP031_phaseII,31\n\
             222,HUP222_phaseII_D01,222\n\
             999,HUP999_phaseII,999\n",
        );
        let source = LocalExportSource::new(dir.path());

        let rows = source
            .get_sessions(&["RID0222".to_string(), "sub-RID0031".to_string()])
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.dataset_name.as_str()).collect();
        assert_eq!(
            names,
            ["HUP031_phaseII", "HUP222_phaseII_D02", "HUP222_phaseII_D01"]
        );
        assert_eq!(rows[0].record_id, "sub-RID0031");
    }

    #[test]
    fn test_missing_export_is_upstream_error() {
        let dir = TempDir::new().unwrap();
        let source = LocalExportSource::new(dir.path());
        assert!(matches!(
            source.get_sessions(&[]),
            Err(Error::UpstreamFetch { .. })
        ));
    }

    #[test]
    fn test_start_times_filtered_by_subject() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "start_times.csv",
            "record_id,name,day1,day2\n\
             sub-RID0001,HUP001,2023-01-01 10:00:00,\n\
             sub-RID0002,HUP002,2023-02-01 08:00:00,2023-02-02 08:00:00\n",
        );
        let source = LocalExportSource::new(dir.path());

        let table = source.get_start_times(&["sub-RID0002".to_string()]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 3), Some("2023-02-02 08:00:00"));
    }

    #[test]
    fn test_seizure_events_blank_becomes_nan() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "seizure_times.csv",
            "record_id,source,start,end\n\
             sub-RID0001,alice,10.5,20.0\n\
             sub-RID0001,bob,30.0,\n\
             sub-RID0002,carol,1.0,2.0\n",
        );
        let source = LocalExportSource::new(dir.path());

        let events = source
            .get_seizure_events(&["sub-RID0001".to_string()])
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].source, "alice");
        assert!(events[1].end.is_nan());
    }

    #[test]
    fn test_base_session_data_requires_directory() {
        let dir = TempDir::new().unwrap();
        let source = LocalExportSource::new(dir.path());
        assert!(matches!(
            source.get_base_session_data("sub-RID0001", "HUP001_phaseII"),
            Err(Error::UpstreamFetch { .. })
        ));
    }

    #[test]
    fn test_base_session_data_reads_files() {
        let dir = TempDir::new().unwrap();
        let session_dir = dir.path().join("sub-RID0001").join("HUP001_phaseII");
        fs::create_dir_all(&session_dir).unwrap();
        write(
            &session_dir,
            "annotations.csv",
            "layer,annotator,description,type,start_time_usec,end_time_usec\n\
             Imported,tech,Event,note,1000000,2000000\n",
        );
        write(&session_dir, "metadata.txt", "sampling_rate: 512.0\nduration_sec: 3600.0\n");
        write(&session_dir, "channels.csv", "label,index\nLA1,0\nLA2,1\n");

        let source = LocalExportSource::new(dir.path());
        let data = source
            .get_base_session_data("sub-RID0001", "HUP001_phaseII")
            .unwrap();
        assert_eq!(data.channels.len(), 2);
        assert_eq!(data.annotations.len(), 1);
        assert_eq!(data.annotations[0].annotation_type, "note");
        assert_eq!(data.metadata.get_f64("duration_sec"), Some(3600.0));
        assert!(data.clips.is_empty());
    }
}
