//! Validated-metadata writer behavior on disk.

#![allow(clippy::unwrap_used)]

use ieeg_clips::annotation::{Annotation, normalize};
use ieeg_clips::annotation::RawSeizureEvent;
use ieeg_clips::clips::Clip;
use ieeg_clips::output::{ValidatedMetadataWriter, read_metadata_entries};
use ieeg_clips::sources::{BaseMetadataSource, LocalExportSource, SessionMetadata};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn sample_annotations() -> Vec<Annotation> {
    normalize(&[
        RawSeizureEvent::new("B", 3.0, 4.0),
        RawSeizureEvent::new("A", 1.5, 2.25),
    ])
}

fn sample_clips(count: i64) -> Vec<Clip> {
    (0..count)
        .map(|i| Clip::new(i * 60_000_000, (i + 1) * 60_000_000))
        .collect()
}

fn sample_metadata() -> SessionMetadata {
    let mut metadata = SessionMetadata::new();
    metadata.insert("subject", json!("HUP001"));
    metadata.insert("duration_sec", json!(3600.0));
    metadata.insert("has_video", json!(true));
    metadata.insert("notes", json!(null));
    metadata.insert("actual_start_time", json!("2023-01-01 10:00:00"));
    metadata
}

#[test]
fn test_layout_under_base_path() {
    let dir = TempDir::new().unwrap();
    let writer = ValidatedMetadataWriter::new(dir.path());

    let session_dir = writer
        .write("sub-RID0001", "HUP001_phaseII", &[], &[], &SessionMetadata::new())
        .unwrap();

    assert_eq!(session_dir, dir.path().join("sub-RID0001").join("HUP001_phaseII"));
    for name in ["annotations.csv", "clips.csv", "metadata.txt"] {
        assert!(session_dir.join(name).is_file(), "missing {name}");
    }
}

#[test]
fn test_metadata_round_trip_keeps_insertion_order() {
    let dir = TempDir::new().unwrap();
    let writer = ValidatedMetadataWriter::new(dir.path());
    let session_dir = writer
        .write("sub-RID0001", "HUP001", &[], &[], &sample_metadata())
        .unwrap();

    let entries = read_metadata_entries(&session_dir.join("metadata.txt")).unwrap();
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        ["subject", "duration_sec", "has_video", "notes", "actual_start_time"]
    );
    assert_eq!(entries[2].1, "True");
    assert_eq!(entries[3].1, "None");
    assert_eq!(entries[4].1, "2023-01-01 10:00:00");
}

#[test]
fn test_second_write_overwrites_without_residue() {
    let dir = TempDir::new().unwrap();
    let writer = ValidatedMetadataWriter::new(dir.path());

    let first = writer
        .write("sub-RID0001", "HUP001", &sample_annotations(), &sample_clips(5), &sample_metadata())
        .unwrap();
    let snapshot: Vec<String> = ["annotations.csv", "clips.csv", "metadata.txt"]
        .iter()
        .map(|n| fs::read_to_string(first.join(n)).unwrap())
        .collect();

    let second = writer
        .write("sub-RID0001", "HUP001", &sample_annotations(), &sample_clips(5), &sample_metadata())
        .unwrap();
    let again: Vec<String> = ["annotations.csv", "clips.csv", "metadata.txt"]
        .iter()
        .map(|n| fs::read_to_string(second.join(n)).unwrap())
        .collect();
    assert_eq!(snapshot, again);

    writer
        .write("sub-RID0001", "HUP001", &[], &sample_clips(2), &SessionMetadata::new())
        .unwrap();
    let clips = fs::read_to_string(first.join("clips.csv")).unwrap();
    assert_eq!(clips.lines().count(), 3);
    assert_eq!(fs::read_to_string(first.join("metadata.txt")).unwrap(), "");
}

#[test]
fn test_annotations_written_in_normalized_order() {
    let dir = TempDir::new().unwrap();
    let writer = ValidatedMetadataWriter::new(dir.path());
    let session_dir = writer
        .write("sub-RID0001", "HUP001", &sample_annotations(), &[], &SessionMetadata::new())
        .unwrap();

    let contents = fs::read_to_string(session_dir.join("annotations.csv")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "layer,annotator,description,type,start_time_usec,end_time_usec",
            "manual_validation,A,seizure,seizure,1500000,2250000",
            "manual_validation,B,seizure,seizure,3000000,4000000",
        ]
    );
}

#[test]
fn test_localized_session_without_clips_keeps_timestamp_header() {
    let dir = TempDir::new().unwrap();
    let session_dir = ValidatedMetadataWriter::new(dir.path())
        .write("sub-RID0001", "HUP001", &[], &[], &sample_metadata())
        .unwrap();

    let contents = fs::read_to_string(session_dir.join("clips.csv")).unwrap();
    let header = contents.lines().next().unwrap();
    assert!(header.starts_with("timestamp,start_time_usec,"));
    assert!(header.ends_with(",is_night"));
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn test_base_metadata_is_written_verbatim() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("raw");
    let base_session = input.join("sub-RID0001").join("HUP001_phaseII");
    fs::create_dir_all(&base_session).unwrap();
    fs::write(
        base_session.join("annotations.csv"),
        "layer,annotator,description,type,start_time_usec,end_time_usec\n",
    )
    .unwrap();
    let listing = "patient_code: 0042\n\
                   sampling_rate: 512.00\n\
                   gain: 1e-05\n\
                   serial: 12345678901234567890\n\
                   duration_sec: 120\n";
    fs::write(base_session.join("metadata.txt"), listing).unwrap();

    let base = LocalExportSource::new(&input)
        .get_base_session_data("sub-RID0001", "HUP001_phaseII")
        .unwrap();
    let session_dir = ValidatedMetadataWriter::new(dir.path().join("out"))
        .write("sub-RID0001", "HUP001_phaseII", &base.annotations, &[], &base.metadata)
        .unwrap();

    assert_eq!(fs::read_to_string(session_dir.join("metadata.txt")).unwrap(), listing);
}
