//! Fixed-length clip derivation.

use tracing::debug;

use super::Clip;
use crate::annotation::Annotation;
use crate::constants::{DEFAULT_CLIP_DURATION_SECS, DEFAULT_EVENT_WINDOW_HOURS, USEC_PER_SEC};
use crate::constants::metadata_keys::DURATION_SEC;
use crate::error::{Error, Result};
use crate::sources::{ClipDeriver, SessionMetadata};

/// Splits a recording into back-to-back clips of fixed length and tags each
/// with the annotations it overlaps.
#[derive(Debug, Clone, Copy)]
pub struct MinuteClipDeriver {
    clip_duration_secs: u32,
    event_window_hours: f64,
}

impl MinuteClipDeriver {
    /// Create a deriver with the given clip length and event window.
    pub const fn new(clip_duration_secs: u32, event_window_hours: f64) -> Self {
        Self {
            clip_duration_secs,
            event_window_hours,
        }
    }

    /// Build the empty clip grid covering `duration_sec` seconds.
    ///
    /// A trailing partial clip is dropped.
    pub fn clip_grid(&self, duration_sec: f64) -> Vec<Clip> {
        if self.clip_duration_secs == 0 || !duration_sec.is_finite() || duration_sec <= 0.0 {
            return Vec::new();
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (duration_sec / f64::from(self.clip_duration_secs)) as u64;
        let step = i64::from(self.clip_duration_secs) * USEC_PER_SEC;

        (0..count)
            .map(|i| {
                #[allow(clippy::cast_possible_wrap)]
                let start = i as i64 * step;
                Clip::new(start, start + step)
            })
            .collect()
    }

    fn window_usec(&self) -> i64 {
        event_window_usec(self.event_window_hours)
    }
}

/// Convert an event window in hours to microseconds.
#[allow(clippy::cast_possible_truncation)]
pub fn event_window_usec(hours: f64) -> i64 {
    (hours * 3600.0 * 1_000_000.0) as i64
}

impl Default for MinuteClipDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_CLIP_DURATION_SECS, DEFAULT_EVENT_WINDOW_HOURS)
    }
}

impl ClipDeriver for MinuteClipDeriver {
    fn derive_clips(
        &self,
        annotations: &[Annotation],
        metadata: &SessionMetadata,
    ) -> Result<Vec<Clip>> {
        let duration_sec = metadata
            .get_f64(DURATION_SEC)
            .ok_or_else(|| Error::MissingMetadataField {
                key: DURATION_SEC.to_string(),
            })?;

        let mut clips = self.clip_grid(duration_sec);
        mark_overlaps(&mut clips, annotations, self.window_usec());

        debug!(
            "Derived {} clips ({} with events) from {} annotations",
            clips.len(),
            clips.iter().filter(|c| c.has_events).count(),
            annotations.len()
        );

        Ok(clips)
    }
}

/// Tag clips with the annotations they overlap.
///
/// Clips whose window lies within `window_usec` of an overlapping clip are
/// marked `close_to_event`. Existing event fields are overwritten only for
/// clips that overlap something; call [`Clip::reset_events`] first to
/// recompute from scratch.
pub fn mark_overlaps(clips: &mut [Clip], annotations: &[Annotation], window_usec: i64) {
    let mut event_windows = Vec::new();

    for clip in clips.iter_mut() {
        let overlapping: Vec<&Annotation> = annotations
            .iter()
            .filter(|a| a.overlaps(clip.start_time_usec, clip.end_time_usec))
            .collect();

        if overlapping.is_empty() {
            continue;
        }

        clip.has_events = true;
        clip.events = join_unique(overlapping.iter().map(|a| a.description.as_str()));
        clip.annotators = join_unique(overlapping.iter().map(|a| a.annotator.as_str()));
        clip.layers = join_unique(overlapping.iter().map(|a| a.layer.as_str()));
        event_windows.push((
            clip.start_time_usec - window_usec,
            clip.end_time_usec + window_usec,
        ));
    }

    for (lo, hi) in event_windows {
        for clip in clips.iter_mut() {
            if clip.start_time_usec >= lo && clip.end_time_usec <= hi {
                clip.close_to_event = true;
            }
        }
    }
}

/// Join distinct values in first-seen order.
fn join_unique<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.join(", ")
}
