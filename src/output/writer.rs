//! Validated-metadata writer.
//!
//! Writes one session's merged annotations, clips and metadata under
//! `<base>/<record_id>/<dataset_name>/`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{write_annotations, write_clips, write_metadata};
use crate::annotation::Annotation;
use crate::clips::Clip;
use crate::constants::metadata_keys::ACTUAL_START_TIME;
use crate::constants::output_files;
use crate::error::{Error, Result};
use crate::sources::SessionMetadata;

/// Persists validated session artifacts below a base directory.
///
/// The three files are written one after another with no transactional
/// guarantee: a failure part-way leaves earlier files in place. Existing files
/// are truncated and rewritten.
#[derive(Debug, Clone)]
pub struct ValidatedMetadataWriter {
    base_path: PathBuf,
}

impl ValidatedMetadataWriter {
    /// Create a writer rooted at `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// The base directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding one session's artifacts.
    pub fn session_dir(&self, record_id: &str, dataset_name: &str) -> PathBuf {
        self.base_path
            .join(sanitize_component(record_id))
            .join(sanitize_component(dataset_name))
    }

    /// Write `annotations.csv`, `clips.csv` and `metadata.txt` for a session.
    ///
    /// A session counts as localized when `metadata` carries
    /// `actual_start_time` or any clip has a timestamp label; that decides the
    /// `clips.csv` layout even for an empty clip table. Returns the session
    /// directory.
    pub fn write(
        &self,
        record_id: &str,
        dataset_name: &str,
        annotations: &[Annotation],
        clips: &[Clip],
        metadata: &SessionMetadata,
    ) -> Result<PathBuf> {
        let dir = self.session_dir(record_id, dataset_name);
        // create_dir_all tolerates concurrent creation
        fs::create_dir_all(&dir).map_err(|e| Error::OutputDirCreateFailed {
            path: dir.clone(),
            source: e,
        })?;

        write_annotations(&dir.join(output_files::ANNOTATIONS), annotations)?;
        let localized =
            metadata.get(ACTUAL_START_TIME).is_some() || clips.iter().any(Clip::is_localized);
        write_clips(&dir.join(output_files::CLIPS), clips, localized)?;
        write_metadata(&dir.join(output_files::METADATA), metadata)?;

        debug!(
            "Wrote {} annotations, {} clips, {} metadata entries to {}",
            annotations.len(),
            clips.len(),
            metadata.len(),
            dir.display()
        );

        Ok(dir)
    }
}

/// Sanitize a string for use as a single directory name.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
pub fn sanitize_component(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}
