//! Clip data type.

/// A derived time window used for downstream analysis.
///
/// Offsets are microseconds from the recording's t=0. `timestamp_label` and
/// `is_night` are only set once the clip has been localized against a known
/// recording start time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clip {
    /// Start offset in microseconds.
    pub start_time_usec: i64,
    /// End offset in microseconds.
    pub end_time_usec: i64,
    /// Whether any annotation overlaps this clip.
    pub has_events: bool,
    /// Unique overlapping annotation descriptions, comma separated.
    pub events: String,
    /// Unique overlapping annotators, comma separated.
    pub annotators: String,
    /// Unique overlapping annotation layers, comma separated.
    pub layers: String,
    /// Whether this clip lies within the event window of an annotated clip.
    pub close_to_event: bool,
    /// `Day N HH:MM:SS` label, present once localized.
    pub timestamp_label: Option<String>,
    /// Night flag, present once localized.
    pub is_night: Option<bool>,
}

impl Clip {
    /// Create an un-annotated, un-localized clip.
    pub fn new(start_time_usec: i64, end_time_usec: i64) -> Self {
        Self {
            start_time_usec,
            end_time_usec,
            ..Self::default()
        }
    }

    /// Whether the clip carries calendar labels.
    pub const fn is_localized(&self) -> bool {
        self.timestamp_label.is_some()
    }

    /// Clear all annotation-derived fields.
    pub fn reset_events(&mut self) {
        self.has_events = false;
        self.events.clear();
        self.annotators.clear();
        self.layers.clear();
        self.close_to_event = false;
    }
}
