//! Clip windows: derivation from annotations and calendar localization.

mod derive;
mod localize;
mod types;

pub use derive::{MinuteClipDeriver, event_window_usec, mark_overlaps};
pub use localize::{TimestampLabel, is_night_hour, localize, localize_offset};
pub use types::Clip;
