//! Continuous-segment marking for interictal clips.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::TimeDelta;

use crate::clips::{Clip, TimestampLabel};
use crate::error::Result;
use crate::output::format_bool;

/// An interictal clip with its recording day and extraction flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterictalClip {
    /// The selected clip.
    pub clip: Clip,
    /// 1-based recording day parsed from the label.
    pub day_num: u32,
    /// Whether the clip sits in a segment long enough to extract.
    pub mark_for_extraction: bool,
}

/// Mark continuous segments for extraction.
///
/// Within each day, clips are ordered by wall-clock time. A gap between
/// consecutive clip starts larger than `max_gap_secs` opens a new segment.
/// Clips in segments whose first-to-last start span is at most
/// `min_segment_secs` are not marked. Output keeps input order.
pub fn mark_segments(
    clips: Vec<Clip>,
    max_gap_secs: u32,
    min_segment_secs: u32,
) -> Result<Vec<InterictalClip>> {
    let mut labels = Vec::with_capacity(clips.len());
    for clip in &clips {
        let label: TimestampLabel = clip.timestamp_label.as_deref().unwrap_or_default().parse()?;
        labels.push(label);
    }

    let mut by_day: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        by_day.entry(label.day).or_default().push(i);
    }

    let max_gap = TimeDelta::seconds(i64::from(max_gap_secs));
    let min_span = TimeDelta::seconds(i64::from(min_segment_secs));
    let mut marks = vec![true; clips.len()];

    for indices in by_day.values_mut() {
        indices.sort_by_key(|&i| labels[i].time);

        let mut segment: Vec<usize> = Vec::new();
        for &i in indices.iter() {
            if let Some(&prev) = segment.last()
                && labels[i].time - labels[prev].time > max_gap
            {
                close_segment(&segment, &labels, min_span, &mut marks);
                segment.clear();
            }
            segment.push(i);
        }
        close_segment(&segment, &labels, min_span, &mut marks);
    }

    Ok(clips
        .into_iter()
        .zip(labels)
        .zip(marks)
        .map(|((clip, label), mark_for_extraction)| InterictalClip {
            clip,
            day_num: label.day,
            mark_for_extraction,
        })
        .collect())
}

fn close_segment(
    segment: &[usize],
    labels: &[TimestampLabel],
    min_span: TimeDelta,
    marks: &mut [bool],
) {
    let (Some(&first), Some(&last)) = (segment.first(), segment.last()) else {
        return;
    };
    if labels[last].time - labels[first].time <= min_span {
        for &i in segment {
            marks[i] = false;
        }
    }
}

/// Per-day counts of marked and unmarked clips.
pub fn summarize(record_id: &str, dataset_name: &str, clips: &[InterictalClip]) -> String {
    let mut counts: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for clip in clips {
        let entry = counts.entry(clip.day_num).or_default();
        if clip.mark_for_extraction {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let mut summary = format!("Summary for {record_id} or {dataset_name}:\n");
    summary.push_str("day_num  mark_for_extraction  count\n");
    for (day, (marked, unmarked)) in counts {
        for (flag, count) in [(true, marked), (false, unmarked)] {
            if count > 0 {
                let _ = writeln!(summary, "{day:<8} {:<20} {count}", format_bool(flag));
            }
        }
    }
    summary
}
