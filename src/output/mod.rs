//! Persistence of validated session artifacts.

mod csv;
mod metadata;
pub mod progress;
mod writer;

pub use csv::{
    ANNOTATION_COLUMNS, CLIP_COLUMNS, TIMESTAMP_INDEX, format_bool, parse_bool, read_annotations,
    read_clips, write_annotations, write_clips,
};
pub use metadata::{format_metadata_value, read_metadata, read_metadata_entries, write_metadata};
pub use writer::{ValidatedMetadataWriter, sanitize_component};
