//! Upstream coverage audit.

use crate::error::Result;
use crate::sources::{ManualSeizureSource, SessionDataSource, StartTimeSource};

/// Upstream coverage for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Subject id as requested.
    pub subject_id: String,
    /// Session rows after daily expansion.
    pub sessions: usize,
    /// Whether the start-time table has a row for the subject.
    pub has_start_times: bool,
    /// Validated seizure events on record.
    pub seizure_events: usize,
}

impl AuditEntry {
    /// Sessions exist but clips could never be localized.
    pub fn missing_start_times(&self) -> bool {
        self.sessions > 0 && !self.has_start_times
    }

    /// Sessions exist but no validated seizure timing was recorded.
    pub fn missing_seizure_times(&self) -> bool {
        self.sessions > 0 && self.seizure_events == 0
    }

    /// Whether anything is missing.
    pub fn is_complete(&self) -> bool {
        !self.missing_start_times() && !self.missing_seizure_times()
    }
}

/// Check what each upstream source holds for one subject.
pub fn audit_subject(
    sessions: &dyn SessionDataSource,
    start_times: &dyn StartTimeSource,
    seizures: &dyn ManualSeizureSource,
    subject_id: &str,
) -> Result<AuditEntry> {
    let subjects = [subject_id.to_string()];
    let rows = sessions.expand_to_daily_rows(sessions.get_sessions(&subjects)?)?;

    Ok(AuditEntry {
        subject_id: subject_id.to_string(),
        sessions: rows.len(),
        has_start_times: !start_times.get_start_times(&subjects)?.is_empty(),
        seizure_events: seizures.get_seizure_events(&subjects)?.len(),
    })
}
