//! Error types for ieeg-clips.

use std::path::PathBuf;

/// Result type alias for ieeg-clips operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for ieeg-clips.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    // Upstream data errors
    /// An external data source failed or returned malformed data.
    #[error("failed to fetch {source_name}: {message}")]
    UpstreamFetch {
        /// Name of the data source (e.g. "sessions", "start times").
        source_name: String,
        /// Description of the failure.
        message: String,
    },

    /// Failed to read a CSV table.
    #[error("failed to read CSV file '{path}'")]
    CsvRead {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A required metadata key is absent or has the wrong type.
    #[error("session metadata is missing required field '{key}'")]
    MissingMetadataField {
        /// The missing key.
        key: String,
    },

    // Annotation and timing errors
    /// A seizure event has unusable timing.
    #[error("malformed annotation at row {index}: {reason} (start={start}, end={end})")]
    MalformedAnnotation {
        /// Position of the event in the input sequence.
        index: usize,
        /// Start time in seconds.
        start: f64,
        /// End time in seconds.
        end: f64,
        /// Why the event was rejected.
        reason: String,
    },

    /// The recording start time could not be parsed.
    #[error("invalid recording start time: '{value}'")]
    InvalidStartTime {
        /// The raw value.
        value: String,
    },

    /// A clip starts before the recording origin.
    #[error("clip starts before recording origin (start_time_usec={start_time_usec})")]
    NegativeClipOffset {
        /// Offending clip start.
        start_time_usec: i64,
    },

    /// A clip offset lands outside the representable calendar range.
    #[error("clip offset out of range from {start_time} (start_time_usec={start_time_usec})")]
    ClipOffsetOutOfRange {
        /// Offending clip start.
        start_time_usec: i64,
        /// Recording start the offset was added to.
        start_time: String,
    },

    /// A clip timestamp label could not be parsed.
    #[error("invalid clip timestamp label: '{label}'")]
    InvalidTimestampLabel {
        /// The raw label.
        label: String,
    },

    // Persistence errors
    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a CSV table.
    #[error("failed to write CSV file '{path}'")]
    CsvWrite {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write or read a metadata listing.
    #[error("failed to access metadata file '{path}'")]
    MetadataFile {
        /// Path to the metadata file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// One or more subjects in a batch failed.
    #[error("{failed} of {total} subject(s) failed")]
    BatchFailed {
        /// Number of failed subjects.
        failed: usize,
        /// Number of subjects attempted.
        total: usize,
    },
}

impl Error {
    /// Build an [`Error::UpstreamFetch`] for the named source.
    pub fn upstream(source_name: &str, message: impl Into<String>) -> Self {
        Self::UpstreamFetch {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}
