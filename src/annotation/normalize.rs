//! Manual seizure table normalization.

use super::{Annotation, RawSeizureEvent};
use crate::constants::{USEC_PER_SEC, manual};
use crate::error::{Error, Result};

/// Convert manually curated seizure events into canonical annotations.
///
/// Times are scaled to microseconds and truncated toward zero. The output is
/// sorted by `start_time_usec`; ties keep their input order. No validation is
/// performed, see [`normalize_checked`].
pub fn normalize(events: &[RawSeizureEvent]) -> Vec<Annotation> {
    let mut annotations: Vec<Annotation> = events
        .iter()
        .map(|event| Annotation {
            layer: manual::LAYER.to_string(),
            annotator: event.source.clone(),
            description: manual::DESCRIPTION.to_string(),
            annotation_type: manual::TYPE.to_string(),
            start_time_usec: seconds_to_usec(event.start),
            end_time_usec: seconds_to_usec(event.end),
        })
        .collect();

    // sort_by_key is stable
    annotations.sort_by_key(|a| a.start_time_usec);
    annotations
}

/// Reject events with non-finite times or `start > end`.
pub fn validate_events(events: &[RawSeizureEvent]) -> Result<()> {
    for (index, event) in events.iter().enumerate() {
        let reason = if !event.start.is_finite() || !event.end.is_finite() {
            Some("times must be finite numbers")
        } else if event.start > event.end {
            Some("start is after end")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(Error::MalformedAnnotation {
                index,
                start: event.start,
                end: event.end,
                reason: reason.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate, then [`normalize`].
pub fn normalize_checked(events: &[RawSeizureEvent]) -> Result<Vec<Annotation>> {
    validate_events(events)?;
    Ok(normalize(events))
}

/// Append manual annotations after the base set.
///
/// The result is not re-sorted: manual entries stay trailing even when they
/// start earlier than base entries.
pub fn merge_annotations(base: &[Annotation], manual: &[Annotation]) -> Vec<Annotation> {
    let mut merged = Vec::with_capacity(base.len() + manual.len());
    merged.extend_from_slice(base);
    merged.extend_from_slice(manual);
    merged
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn seconds_to_usec(seconds: f64) -> i64 {
    (seconds * USEC_PER_SEC as f64).trunc() as i64
}
