//! Interictal selection over persisted sessions.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{
    mark_segments, select_with_fallback, summarize, write_interictal_clips, write_summary,
};
use crate::clips::{Clip, event_window_usec};
use crate::constants::{interictal, output_files};
use crate::error::{Error, Result};
use crate::output::{read_annotations, read_clips, sanitize_component};
use crate::sources::normalize_record_id;

/// Selection and segmentation parameters.
#[derive(Debug, Clone, Copy)]
pub struct InterictalOptions {
    /// Largest gap between clip starts within one segment.
    pub max_gap_secs: u32,
    /// Segments spanning this long or less are not marked.
    pub min_segment_secs: u32,
    /// Event window used when overlaps are recomputed.
    pub event_window_hours: f64,
}

impl Default for InterictalOptions {
    fn default() -> Self {
        Self {
            max_gap_secs: interictal::DEFAULT_MAX_GAP_SECS,
            min_segment_secs: interictal::DEFAULT_MIN_SEGMENT_SECS,
            event_window_hours: crate::constants::DEFAULT_EVENT_WINDOW_HOURS,
        }
    }
}

/// Outcome for one session.
#[derive(Debug, Clone)]
pub struct InterictalSessionReport {
    /// Portal dataset name.
    pub dataset_name: String,
    /// Number of clips selected as interictal.
    pub selected: usize,
    /// Number of selected clips marked for extraction.
    pub marked: usize,
    /// Written `clips_interictal.csv`, if any clip was selected.
    pub output: Option<PathBuf>,
}

/// Runs interictal selection over the validated output tree.
#[derive(Debug, Clone)]
pub struct InterictalExtractor {
    output_dir: PathBuf,
    options: InterictalOptions,
}

impl InterictalExtractor {
    /// Create an extractor over `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, options: InterictalOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
        }
    }

    /// Where the summary for one session is written.
    pub fn summary_path(&self, record_id: &str, dataset_name: &str) -> PathBuf {
        self.output_dir
            .join(output_files::INTERICTAL_SUMMARY_DIR)
            .join(sanitize_component(&format!("{record_id}_{dataset_name}_summary.txt")))
    }

    /// Process every persisted session of one subject.
    pub fn process_subject(&self, subject_id: &str) -> Result<Vec<InterictalSessionReport>> {
        let record_id = normalize_record_id(subject_id);
        let subject_dir = self.output_dir.join(sanitize_component(&record_id));
        if !subject_dir.is_dir() {
            return Err(Error::upstream(
                "validated sessions",
                format!("nothing written for {record_id} at {}", subject_dir.display()),
            ));
        }

        let mut session_dirs = Vec::new();
        for entry in fs::read_dir(&subject_dir)? {
            let path = entry?.path();
            if path.join(output_files::CLIPS).is_file() {
                session_dirs.push(path);
            }
        }
        session_dirs.sort();

        if session_dirs.is_empty() {
            warn!("No clip tables found under {}", subject_dir.display());
        }

        session_dirs
            .iter()
            .map(|dir| self.process_session(&record_id, dir))
            .collect()
    }

    fn process_session(
        &self,
        record_id: &str,
        session_dir: &Path,
    ) -> Result<InterictalSessionReport> {
        let dataset_name = session_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut report = InterictalSessionReport {
            dataset_name: dataset_name.clone(),
            selected: 0,
            marked: 0,
            output: None,
        };

        let clips = read_clips(&session_dir.join(output_files::CLIPS))?;
        if !clips.iter().any(Clip::is_localized) {
            warn!("{record_id}/{dataset_name}: clips are not localized, skipping");
            return Ok(report);
        }

        let annotations_path = session_dir.join(output_files::ANNOTATIONS);
        let annotations = if annotations_path.is_file() {
            read_annotations(&annotations_path)?
        } else {
            Vec::new()
        };

        let selected = select_with_fallback(
            &clips,
            &annotations,
            event_window_usec(self.options.event_window_hours),
        );
        if selected.is_empty() {
            info!("No interictal clips found for {record_id}/{dataset_name}");
            return Ok(report);
        }

        let marked = mark_segments(
            selected,
            self.options.max_gap_secs,
            self.options.min_segment_secs,
        )?;

        let output = session_dir.join(output_files::CLIPS_INTERICTAL);
        write_interictal_clips(&output, &marked)?;

        let summary = summarize(record_id, &dataset_name, &marked);
        write_summary(&self.summary_path(record_id, &dataset_name), &summary)?;
        debug!("{summary}");

        report.selected = marked.len();
        report.marked = marked.iter().filter(|c| c.mark_for_extraction).count();
        report.output = Some(output);
        info!(
            "{record_id}/{dataset_name}: {} interictal clip(s), {} marked for extraction",
            report.selected, report.marked
        );

        Ok(report)
    }
}
