//! Interictal clip selection.
//!
//! Picks localized clips away from any annotated event, outside the night
//! window and after the first recording day, then marks continuous daytime
//! stretches long enough to be worth extracting.

mod command;
mod segments;
mod select;
mod write;

pub use command::{InterictalExtractor, InterictalOptions, InterictalSessionReport};
pub use segments::{InterictalClip, mark_segments, summarize};
pub use select::{is_interictal, is_redundant_annotation, select_interictal, select_with_fallback};
pub use write::{INTERICTAL_COLUMNS, write_interictal_clips, write_summary};
