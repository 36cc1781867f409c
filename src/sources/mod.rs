//! External collaborators consumed by the session pipeline.
//!
//! The pipeline only sees these traits. Remote services (clinical records,
//! the data-custody portal) sit behind them; [`LocalExportSource`] serves the
//! same contracts from CSV exports on disk.

mod expand;
mod local;
mod start_times;
mod types;

pub use expand::{expand_daily_rows, normalize_record_id};
pub use local::LocalExportSource;
pub use start_times::{StartTimeTable, start_time_for_session};
pub use types::{BaseSessionData, Channel, SessionMetadata, SessionRow};

use crate::annotation::{Annotation, RawSeizureEvent};
use crate::clips::Clip;
use crate::error::Result;

/// Session rows for subjects.
pub trait SessionDataSource {
    /// Fetch session rows for the given subjects, ordered by record id.
    fn get_sessions(&self, subject_ids: &[String]) -> Result<Vec<SessionRow>>;

    /// Expand multi-day rows into one row per recording day.
    fn expand_to_daily_rows(&self, rows: Vec<SessionRow>) -> Result<Vec<SessionRow>> {
        expand_daily_rows(rows)
    }
}

/// Clinical start-time table.
pub trait StartTimeSource {
    /// Fetch start-time rows for the given subjects.
    fn get_start_times(&self, subject_ids: &[String]) -> Result<StartTimeTable>;
}

/// Manually validated seizure timing.
pub trait ManualSeizureSource {
    /// Fetch every validated seizure event for the given subjects.
    fn get_seizure_events(&self, subject_ids: &[String]) -> Result<Vec<RawSeizureEvent>>;
}

/// Per-session base data (channels, machine annotations, metadata, clips).
pub trait BaseMetadataSource {
    /// Fetch base data for one recording session.
    fn get_base_session_data(&self, record_id: &str, dataset_name: &str)
    -> Result<BaseSessionData>;
}

/// Builds clip windows from annotations.
pub trait ClipDeriver {
    /// Derive clips for a session.
    fn derive_clips(&self, annotations: &[Annotation], metadata: &SessionMetadata)
    -> Result<Vec<Clip>>;
}
