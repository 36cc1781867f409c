//! Annotation data types.

use serde::{Deserialize, Serialize};

/// A labeled time interval attached to a recording.
///
/// Times are integer microseconds from the recording's t=0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation layer (e.g. `manual_validation`).
    pub layer: String,
    /// Who or what produced the annotation.
    pub annotator: String,
    /// Free-text description.
    pub description: String,
    /// Annotation type.
    #[serde(rename = "type")]
    pub annotation_type: String,
    /// Start offset in microseconds.
    pub start_time_usec: i64,
    /// End offset in microseconds.
    pub end_time_usec: i64,
}

impl Annotation {
    /// Whether this annotation overlaps the half-open window `[start, end)`.
    ///
    /// An annotation overlaps when it starts inside the window, ends inside
    /// it, or covers it entirely.
    pub fn overlaps(&self, start_usec: i64, end_usec: i64) -> bool {
        (self.start_time_usec >= start_usec && self.start_time_usec < end_usec)
            || (self.end_time_usec > start_usec && self.end_time_usec <= end_usec)
            || (self.start_time_usec <= start_usec && self.end_time_usec >= end_usec)
    }
}

/// A seizure event from the manually curated table, timed in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeizureEvent {
    /// Who validated the event.
    pub source: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl RawSeizureEvent {
    /// Create a new event.
    pub fn new(source: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            source: source.into(),
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(start: i64, end: i64) -> Annotation {
        Annotation {
            layer: "l".to_string(),
            annotator: "a".to_string(),
            description: "d".to_string(),
            annotation_type: "t".to_string(),
            start_time_usec: start,
            end_time_usec: end,
        }
    }

    #[test]
    fn test_overlap_starts_inside() {
        assert!(annotation(10, 100).overlaps(0, 20));
    }

    #[test]
    fn test_overlap_ends_inside() {
        assert!(annotation(0, 20).overlaps(10, 100));
    }

    #[test]
    fn test_overlap_covers_window() {
        assert!(annotation(0, 100).overlaps(10, 20));
    }

    #[test]
    fn test_no_overlap_when_touching_end() {
        // Window is half-open: an annotation starting at `end` is outside.
        assert!(!annotation(20, 30).overlaps(10, 20));
        // Ending exactly at the window start is outside as well.
        assert!(!annotation(0, 10).overlaps(10, 20));
    }
}
