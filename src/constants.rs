//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "ieeg-clips";

/// Microseconds per second.
pub const USEC_PER_SEC: i64 = 1_000_000;

/// Seconds per day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Default clip length in seconds.
pub const DEFAULT_CLIP_DURATION_SECS: u32 = 60;

/// Default window (hours) around an event within which clips are "close".
pub const DEFAULT_EVENT_WINDOW_HOURS: f64 = 2.0;

/// Default input directory for upstream CSV exports.
pub const DEFAULT_INPUT_DIR: &str = "data/raw";

/// Default output directory for validated metadata.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Fixed tags for manually validated seizure annotations.
pub mod manual {
    /// Annotation layer.
    pub const LAYER: &str = "manual_validation";
    /// Annotation description.
    pub const DESCRIPTION: &str = "seizure";
    /// Annotation type.
    pub const TYPE: &str = "seizure";
}

/// Night window on the wall clock: `[START_HOUR:00, END_HOUR:00)`.
pub mod night {
    /// First hour counted as night.
    pub const START_HOUR: u32 = 19;
    /// First hour counted as day again.
    pub const END_HOUR: u32 = 8;
}

/// Start-time table layout.
pub mod start_times {
    /// Column of the first session's start time.
    ///
    /// Column 0 is the record id and column 1 the clinical subject name, so
    /// session `i` (0-based) lives in column `i + 2`.
    pub const SESSION_COLUMN_OFFSET: usize = 2;

    /// Cell values treated as a missing start time.
    pub const MISSING_MARKERS: &[&str] = &["", "nan", "nat", "none", "null"];
}

/// Metadata keys.
pub mod metadata_keys {
    /// Calendar start of the recording.
    pub const ACTUAL_START_TIME: &str = "actual_start_time";
    /// Recording duration in seconds.
    pub const DURATION_SEC: &str = "duration_sec";
}

/// Upstream CSV export file names under the input directory.
pub mod input_files {
    /// Session rows, one per subject or per recording range.
    pub const SESSIONS: &str = "sessions.csv";
    /// Clinical start-time table.
    pub const START_TIMES: &str = "start_times.csv";
    /// Manually validated seizure times.
    pub const SEIZURE_TIMES: &str = "seizure_times.csv";
    /// Per-session channel list.
    pub const CHANNELS: &str = "channels.csv";
}

/// Output file names inside `<base>/<record_id>/<dataset_name>/`.
pub mod output_files {
    /// Merged annotations (no row index).
    pub const ANNOTATIONS: &str = "annotations.csv";
    /// Clip table (row index included).
    pub const CLIPS: &str = "clips.csv";
    /// `key: value` metadata listing.
    pub const METADATA: &str = "metadata.txt";
    /// Interictal clip selection.
    pub const CLIPS_INTERICTAL: &str = "clips_interictal.csv";
    /// Directory (under the output root) collecting interictal summaries.
    pub const INTERICTAL_SUMMARY_DIR: &str = "interictal_clips";
}

/// Interictal selection defaults.
pub mod interictal {
    /// Largest gap between consecutive clips that keeps a segment continuous.
    pub const DEFAULT_MAX_GAP_SECS: u32 = 60;
    /// Segments spanning this long or less are not marked for extraction.
    pub const DEFAULT_MIN_SEGMENT_SECS: u32 = 3600;
    /// Annotation text that does not count as a clinical event.
    pub const TECH_NOTATION: &str = "tech notation: video/eeg monitoring taking place";
    /// Word that marks an annotation as interictal commentary.
    pub const INTERICTAL_WORD: &str = "interictal";
}
