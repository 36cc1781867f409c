//! Per-subject session processing.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::annotation::{Annotation, merge_annotations, normalize, normalize_checked};
use crate::clips::localize;
use crate::constants::metadata_keys::ACTUAL_START_TIME;
use crate::error::Result;
use crate::output::ValidatedMetadataWriter;
use crate::sources::{
    BaseMetadataSource, ClipDeriver, ManualSeizureSource, SessionDataSource, SessionRow,
    StartTimeSource, StartTimeTable, start_time_for_session,
};
use crate::utils::date::parse_start_time;

/// Injected collaborators used by [`SessionOrchestrator`].
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Session rows and daily expansion.
    pub sessions: &'a dyn SessionDataSource,
    /// Clinical start-time table.
    pub start_times: &'a dyn StartTimeSource,
    /// Manually validated seizure events.
    pub seizures: &'a dyn ManualSeizureSource,
    /// Per-session base data.
    pub base_metadata: &'a dyn BaseMetadataSource,
    /// Clip derivation.
    pub clip_deriver: &'a dyn ClipDeriver,
}

/// Options controlling subject processing.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorOptions {
    /// Reject malformed seizure events instead of passing them through.
    pub strict_annotations: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            strict_annotations: true,
        }
    }
}

/// Outcome of one persisted session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Subject record id.
    pub record_id: String,
    /// Portal dataset name.
    pub dataset_name: String,
    /// Directory the artifacts were written to.
    pub output_dir: PathBuf,
    /// Number of merged annotations written.
    pub annotations: usize,
    /// Number of clips written.
    pub clips: usize,
    /// Whether clips were localized against a start time.
    pub localized: bool,
}

/// Outcome of one subject.
#[derive(Debug, Clone, Default)]
pub struct SubjectReport {
    /// Subject id as requested.
    pub subject_id: String,
    /// Sessions written, in processing order.
    pub sessions: Vec<SessionReport>,
}

impl SubjectReport {
    /// Number of sessions whose clips were localized.
    pub fn localized_sessions(&self) -> usize {
        self.sessions.iter().filter(|s| s.localized).count()
    }
}

/// Merges manual seizure annotations into every session of a subject,
/// derives and localizes clips, and persists the result.
pub struct SessionOrchestrator<'a> {
    sources: Collaborators<'a>,
    writer: ValidatedMetadataWriter,
    options: OrchestratorOptions,
}

impl<'a> SessionOrchestrator<'a> {
    /// Create an orchestrator over the given collaborators and writer.
    pub fn new(
        sources: Collaborators<'a>,
        writer: ValidatedMetadataWriter,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            sources,
            writer,
            options,
        }
    }

    /// Process every session of one subject.
    ///
    /// Upstream tables are fetched once; base data is fetched once per
    /// session. The first failure aborts the subject, and sessions already
    /// written stay on disk.
    pub fn process_subject(&self, subject_id: &str) -> Result<SubjectReport> {
        let subjects = [subject_id.to_string()];

        let rows = self.sources.sessions.get_sessions(&subjects)?;
        let sessions = self.sources.sessions.expand_to_daily_rows(rows)?;
        let start_times = self.sources.start_times.get_start_times(&subjects)?;
        let raw_events = self.sources.seizures.get_seizure_events(&subjects)?;

        let manual = if self.options.strict_annotations {
            normalize_checked(&raw_events)?
        } else {
            normalize(&raw_events)
        };

        if sessions.is_empty() {
            warn!("No sessions found for subject {subject_id}");
        }
        if start_times.is_empty() {
            info!("No start times for subject {subject_id}, clips will not be localized");
        }
        debug!(
            "Subject {subject_id}: {} session(s), {} manual annotation(s)",
            sessions.len(),
            manual.len()
        );

        let mut report = SubjectReport {
            subject_id: subject_id.to_string(),
            sessions: Vec::with_capacity(sessions.len()),
        };

        for (index, session) in sessions.iter().enumerate() {
            let session_report = self.process_session(session, index, &manual, &start_times)?;
            report.sessions.push(session_report);
        }

        Ok(report)
    }

    fn process_session(
        &self,
        session: &SessionRow,
        index: usize,
        manual: &[Annotation],
        start_times: &StartTimeTable,
    ) -> Result<SessionReport> {
        let SessionRow {
            record_id,
            dataset_name,
        } = session;

        let base = self
            .sources
            .base_metadata
            .get_base_session_data(record_id, dataset_name)?;
        debug!(
            "{record_id}/{dataset_name}: {} channel(s), {} base annotation(s), {} base clip(s)",
            base.channels.len(),
            base.annotations.len(),
            base.clips.len()
        );

        let annotations = merge_annotations(&base.annotations, manual);
        let mut metadata = base.metadata;
        let mut clips = self.sources.clip_deriver.derive_clips(&annotations, &metadata)?;

        let localized = match start_time_for_session(start_times, index) {
            Some(value) => {
                metadata.insert(ACTUAL_START_TIME, Value::String(value.to_string()));
                let start_time = parse_start_time(value)?;
                clips = localize(&clips, start_time)?;
                true
            }
            None => {
                if metadata.remove(ACTUAL_START_TIME).is_some() {
                    debug!("{record_id}/{dataset_name}: dropped stale actual_start_time");
                }
                debug!("{record_id}/{dataset_name}: no start time, skipping localization");
                false
            }
        };

        let output_dir =
            self.writer
                .write(record_id, dataset_name, &annotations, &clips, &metadata)?;

        info!(
            "{record_id}/{dataset_name}: wrote {} annotation(s), {} clip(s){}",
            annotations.len(),
            clips.len(),
            if localized { ", localized" } else { "" }
        );

        Ok(SessionReport {
            record_id: record_id.clone(),
            dataset_name: dataset_name.clone(),
            output_dir,
            annotations: annotations.len(),
            clips: clips.len(),
            localized,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::annotation::RawSeizureEvent;
    use crate::clips::MinuteClipDeriver;
    use crate::error::Error;
    use crate::sources::{BaseSessionData, SessionMetadata};
    use serde_json::json;
    use tempfile::TempDir;

    struct Fixture {
        rows: Vec<SessionRow>,
        start_times: StartTimeTable,
        events: Vec<RawSeizureEvent>,
        stale_start_time: bool,
    }

    impl SessionDataSource for Fixture {
        fn get_sessions(&self, _subject_ids: &[String]) -> Result<Vec<SessionRow>> {
            Ok(self.rows.clone())
        }
    }

    impl StartTimeSource for Fixture {
        fn get_start_times(&self, _subject_ids: &[String]) -> Result<StartTimeTable> {
            Ok(self.start_times.clone())
        }
    }

    impl ManualSeizureSource for Fixture {
        fn get_seizure_events(&self, _subject_ids: &[String]) -> Result<Vec<RawSeizureEvent>> {
            Ok(self.events.clone())
        }
    }

    impl BaseMetadataSource for Fixture {
        fn get_base_session_data(
            &self,
            _record_id: &str,
            _dataset_name: &str,
        ) -> Result<BaseSessionData> {
            let mut metadata = SessionMetadata::new();
            metadata.insert("duration_sec", json!(180.0));
            if self.stale_start_time {
                metadata.insert(ACTUAL_START_TIME, json!("1999-01-01 00:00:00"));
            }
            Ok(BaseSessionData {
                metadata,
                ..BaseSessionData::default()
            })
        }
    }

    fn run(fixture: &Fixture, options: OrchestratorOptions) -> (TempDir, Result<SubjectReport>) {
        let dir = TempDir::new().unwrap();
        let deriver = MinuteClipDeriver::default();
        let sources = Collaborators {
            sessions: fixture,
            start_times: fixture,
            seizures: fixture,
            base_metadata: fixture,
            clip_deriver: &deriver,
        };
        let orchestrator =
            SessionOrchestrator::new(sources, ValidatedMetadataWriter::new(dir.path()), options);
        let result = orchestrator.process_subject("sub-RID0001");
        (dir, result)
    }

    #[test]
    fn test_start_time_indexed_per_session() {
        let fixture = Fixture {
            rows: vec![
                SessionRow::new("sub-RID0001", "HUP001_D01"),
                SessionRow::new("sub-RID0001", "HUP001_D02"),
            ],
            start_times: StartTimeTable::new(
                vec!["record_id".into(), "name".into(), "d1".into(), "d2".into()],
                vec![vec![
                    "sub-RID0001".into(),
                    "HUP001".into(),
                    "2023-01-01 10:00:00".into(),
                    "NaN".into(),
                ]],
            ),
            events: vec![],
            stale_start_time: false,
        };

        let (_dir, result) = run(&fixture, OrchestratorOptions::default());
        let report = result.unwrap();
        assert_eq!(report.sessions.len(), 2);
        assert!(report.sessions[0].localized);
        assert!(!report.sessions[1].localized);
        assert_eq!(report.localized_sessions(), 1);
        assert_eq!(report.sessions[0].clips, 3);
    }

    #[test]
    fn test_strict_rejects_malformed_events() {
        let fixture = Fixture {
            rows: vec![SessionRow::new("sub-RID0001", "HUP001")],
            start_times: StartTimeTable::default(),
            events: vec![RawSeizureEvent::new("A", 10.0, 5.0)],
            stale_start_time: false,
        };

        let (_dir, result) = run(&fixture, OrchestratorOptions::default());
        assert!(matches!(result, Err(Error::MalformedAnnotation { .. })));

        let lenient = OrchestratorOptions {
            strict_annotations: false,
        };
        let (_dir, result) = run(&fixture, lenient);
        assert_eq!(result.unwrap().sessions[0].annotations, 1);
    }

    #[test]
    fn test_missing_start_time_drops_base_actual_start_time() {
        let fixture = Fixture {
            rows: vec![SessionRow::new("sub-RID0001", "HUP001")],
            start_times: StartTimeTable::default(),
            events: vec![],
            stale_start_time: true,
        };

        let (dir, result) = run(&fixture, OrchestratorOptions::default());
        let report = result.unwrap();
        assert!(!report.sessions[0].localized);

        let session = dir.path().join("sub-RID0001/HUP001");
        let metadata =
            crate::output::read_metadata_entries(&session.join("metadata.txt")).unwrap();
        assert!(metadata.iter().all(|(k, _)| k != ACTUAL_START_TIME));
        let clips = std::fs::read_to_string(session.join("clips.csv")).unwrap();
        assert!(clips.starts_with(",start_time_usec,"));
    }
}
