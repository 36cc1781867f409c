//! Configuration type definitions.

use crate::constants::{
    DEFAULT_CLIP_DURATION_SECS, DEFAULT_EVENT_WINDOW_HOURS, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
    interictal,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Clip derivation settings.
    #[serde(default)]
    pub clips: ClipsConfig,

    /// Manual annotation handling.
    #[serde(default)]
    pub annotations: AnnotationsConfig,

    /// Interictal selection settings.
    #[serde(default)]
    pub interictal: InterictalConfig,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the upstream CSV exports.
    pub input_dir: PathBuf,

    /// Base directory for validated output.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Clip derivation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipsConfig {
    /// Clip length in seconds.
    pub duration_secs: u32,

    /// Hours before and after an annotated clip counted as close to the event.
    pub event_window_hours: f64,
}

impl Default for ClipsConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_CLIP_DURATION_SECS,
            event_window_hours: DEFAULT_EVENT_WINDOW_HOURS,
        }
    }
}

/// Manual annotation handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationsConfig {
    /// Reject seizure events with unusable timing instead of passing them on.
    pub strict: bool,
}

impl Default for AnnotationsConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Interictal selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterictalConfig {
    /// Largest gap between consecutive clips within one segment.
    pub max_gap_secs: u32,

    /// Segments spanning this long or less are not marked for extraction.
    pub min_segment_secs: u32,
}

impl Default for InterictalConfig {
    fn default() -> Self {
        Self {
            max_gap_secs: interictal::DEFAULT_MAX_GAP_SECS,
            min_segment_secs: interictal::DEFAULT_MIN_SEGMENT_SECS,
        }
    }
}
