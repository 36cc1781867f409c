//! Canonical annotation schema and the manual-validation normalizer.
//!
//! Manually curated seizure tables arrive in seconds with a single source
//! label. They are normalized into the same microsecond schema used by
//! machine-derived annotations and then appended to each session's base set.

mod normalize;
mod types;

pub use normalize::{merge_annotations, normalize, normalize_checked, validate_events};
pub use types::{Annotation, RawSeizureEvent};
