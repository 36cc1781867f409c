//! Shared CSV export fixture for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::fs;
use std::path::Path;

/// Write a two-subject export tree under `input`.
///
/// `sub-RID0001` has two daily sessions, a start time for the first only, and
/// two validated seizures. `sub-RID0002` has a session row but no base data,
/// so processing it fails.
pub fn write_exports(input: &Path) {
    fs::create_dir_all(input).unwrap();
    fs::write(
        input.join("sessions.csv"),
        "record_id,ieegportalsubjno\n\
         2,HUP002_phaseII\n\
         1,HUP001_phaseII_D01-D02\n",
    )
    .unwrap();
    fs::write(
        input.join("start_times.csv"),
        "record_id,name,session_1,session_2\n\
         sub-RID0001,HUP001,2023-01-01 10:00:00,NaT\n",
    )
    .unwrap();
    fs::write(
        input.join("seizure_times.csv"),
        "record_id,source,start,end\n\
         sub-RID0001,alice,120.5,150.25\n\
         sub-RID0001,bob,30,40\n",
    )
    .unwrap();

    for day in ["D01", "D02"] {
        let dir = input.join("sub-RID0001").join(format!("HUP001_phaseII_{day}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("annotations.csv"),
            "layer,annotator,description,type,start_time_usec,end_time_usec\n\
             Imported Natus ENT annotations,tech,Spike,note,400000000,401000000\n",
        )
        .unwrap();
        fs::write(
            dir.join("metadata.txt"),
            "duration_sec: 600.0\nsampling_rate: 512\n",
        )
        .unwrap();
        fs::write(dir.join("channels.csv"), "label,index\nLA1,0\nLA2,1\n").unwrap();
    }
}
