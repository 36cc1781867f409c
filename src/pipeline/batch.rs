//! Batch loop over subjects with per-subject failure isolation.

use std::time::Instant;

use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::output::progress;

/// A subject that failed during a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFailure {
    /// Subject id as requested.
    pub subject_id: String,
    /// Rendered error message.
    pub message: String,
}

/// Result of running a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Subjects that completed, in order.
    pub succeeded: Vec<String>,
    /// Subjects that failed, in order.
    pub failures: Vec<SubjectFailure>,
}

impl BatchSummary {
    /// Number of subjects attempted.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }

    /// Whether every subject succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Convert into an error when any subject failed.
    pub fn into_result(self) -> Result<()> {
        if self.all_succeeded() {
            Ok(())
        } else {
            Err(Error::BatchFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Run `process` for every subject, continuing past failures.
///
/// Each subject gets one `OK`/`FAILED` line on stdout. Failures are also
/// logged at error level with the subject id.
pub fn process_batch<T, F>(
    subject_ids: &[String],
    progress_enabled: bool,
    mut process: F,
) -> BatchSummary
where
    F: FnMut(&str) -> Result<T>,
{
    let start = Instant::now();
    let pb = progress::create_subject_progress(subject_ids.len(), progress_enabled);
    let mut summary = BatchSummary::default();

    for subject_id in subject_ids {
        progress::set_progress_message(pb.as_ref(), subject_id);

        match process(subject_id.as_str()) {
            Ok(_) => {
                progress::print_line(pb.as_ref(), &format!("OK      {subject_id}"));
                summary.succeeded.push(subject_id.clone());
            }
            Err(e) => {
                error!("Failed to process subject {subject_id}: {e}");
                progress::print_line(pb.as_ref(), &format!("FAILED  {subject_id}: {e}"));
                summary.failures.push(SubjectFailure {
                    subject_id: subject_id.clone(),
                    message: e.to_string(),
                });
            }
        }

        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(
        pb,
        if summary.all_succeeded() {
            "Complete"
        } else {
            "Completed with errors"
        },
    );

    info!(
        "Complete: {} succeeded, {} failed in {:.2}s",
        summary.succeeded.len(),
        summary.failures.len(),
        start.elapsed().as_secs_f64()
    );
    if !summary.all_succeeded() {
        warn!("{} subject(s) had errors", summary.failures.len());
    }

    summary
}
