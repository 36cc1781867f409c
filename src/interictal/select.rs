//! Interictal selection rules.

use crate::annotation::Annotation;
use crate::clips::{Clip, TimestampLabel, mark_overlaps};
use crate::constants::interictal::{INTERICTAL_WORD, TECH_NOTATION};

/// Whether a localized clip qualifies as interictal.
///
/// Un-localized clips and clips with an unparseable label never qualify.
pub fn is_interictal(clip: &Clip) -> bool {
    let Some(label) = clip.timestamp_label.as_deref() else {
        return false;
    };
    let Ok(label) = label.parse::<TimestampLabel>() else {
        return false;
    };

    !clip.close_to_event && clip.is_night == Some(false) && label.day != 1
}

/// Clips that qualify as interictal, in input order.
pub fn select_interictal(clips: &[Clip]) -> Vec<Clip> {
    clips.iter().filter(|c| is_interictal(c)).cloned().collect()
}

/// Whether an annotation only records routine monitoring and should not block
/// interictal selection.
///
/// Matches the video/EEG monitoring tech note or the standalone word
/// "interictal", ignoring case.
pub fn is_redundant_annotation(description: &str) -> bool {
    let lower = description.to_lowercase();
    if lower.contains(TECH_NOTATION) {
        return true;
    }

    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|word| word == INTERICTAL_WORD)
}

/// Select interictal clips, retrying without redundant annotations when the
/// first pass finds nothing.
///
/// The retry recomputes every clip's event fields from the remaining
/// annotations using `window_usec` as the event window.
pub fn select_with_fallback(
    clips: &[Clip],
    annotations: &[Annotation],
    window_usec: i64,
) -> Vec<Clip> {
    let selected = select_interictal(clips);
    if !selected.is_empty() {
        return selected;
    }

    let kept: Vec<Annotation> = annotations
        .iter()
        .filter(|a| !is_redundant_annotation(&a.description))
        .cloned()
        .collect();

    let mut recomputed = clips.to_vec();
    for clip in &mut recomputed {
        clip.reset_events();
    }
    mark_overlaps(&mut recomputed, &kept, window_usec);

    select_interictal(&recomputed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(label: &str, is_night: bool, close: bool) -> Clip {
        Clip {
            timestamp_label: Some(label.to_string()),
            is_night: Some(is_night),
            close_to_event: close,
            ..Clip::new(0, 60_000_000)
        }
    }

    fn note(description: &str, start_s: i64, end_s: i64) -> Annotation {
        Annotation {
            layer: "Imported".to_string(),
            annotator: "tech".to_string(),
            description: description.to_string(),
            annotation_type: "note".to_string(),
            start_time_usec: start_s * 1_000_000,
            end_time_usec: end_s * 1_000_000,
        }
    }

    #[test]
    fn test_selection_rules() {
        assert!(is_interictal(&clip("Day 2 10:00:00", false, false)));
        assert!(!is_interictal(&clip("Day 1 10:00:00", false, false)));
        assert!(!is_interictal(&clip("Day 2 20:00:00", true, false)));
        assert!(!is_interictal(&clip("Day 2 10:00:00", false, true)));
        assert!(!is_interictal(&Clip::new(0, 60_000_000)));
    }

    #[test]
    fn test_day_one_does_not_match_day_eleven() {
        assert!(is_interictal(&clip("Day 11 10:00:00", false, false)));
    }

    #[test]
    fn test_redundant_annotation_matching() {
        assert!(is_redundant_annotation(
            "*Tech notation: Video/EEG monitoring taking place"
        ));
        assert!(is_redundant_annotation("Interictal spikes, left"));
        assert!(!is_redundant_annotation("preinterictal"));
        assert!(!is_redundant_annotation("seizure onset"));
    }

    #[test]
    fn test_fallback_drops_redundant_annotations() {
        // Two clips on day 2; a tech note covers both and marks them busy.
        let mut clips = vec![
            clip("Day 2 10:00:00", false, true),
            clip("Day 2 10:01:00", false, true),
        ];
        clips[1].start_time_usec = 60_000_000;
        clips[1].end_time_usec = 120_000_000;

        let annotations = vec![note("Tech notation: video/EEG monitoring taking place", 0, 120)];
        let selected = select_with_fallback(&clips, &annotations, 0);
        assert_eq!(selected.len(), 2);
        assert!(!selected[0].has_events);
        assert!(selected[0].events.is_empty());
    }

    #[test]
    fn test_fallback_keeps_real_events() {
        let clips = vec![clip("Day 2 10:00:00", false, true)];
        let annotations = vec![note("seizure", 10, 20)];
        assert!(select_with_fallback(&clips, &annotations, 0).is_empty());
    }
}
