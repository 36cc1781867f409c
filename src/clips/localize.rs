//! Calendar localization of clip offsets.
//!
//! Offsets are mapped onto the recording's wall clock with naive local time
//! arithmetic: no timezone conversion and no daylight-saving adjustment.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use super::Clip;
use crate::constants::{SECONDS_PER_DAY, USEC_PER_SEC, night};
use crate::error::{Error, Result};

/// A parsed `Day N HH:MM:SS` clip label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimestampLabel {
    /// 1-based recording day.
    pub day: u32,
    /// Wall-clock time of day.
    pub time: NaiveTime,
}

impl fmt::Display for TimestampLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {} {}", self.day, self.time.format("%H:%M:%S"))
    }
}

impl FromStr for TimestampLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTimestampLabel {
            label: s.to_string(),
        };

        let mut parts = s.split_whitespace();
        if parts.next() != Some("Day") {
            return Err(invalid());
        }
        let day = parts
            .next()
            .and_then(|d| d.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let time = parts
            .next()
            .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M:%S").ok())
            .ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { day, time })
    }
}

/// Whether an hour of the day falls in the night window `[19:00, 08:00)`.
pub const fn is_night_hour(hour: u32) -> bool {
    hour >= night::START_HOUR || hour < night::END_HOUR
}

/// Compute the calendar label and night flag for one clip offset.
///
/// The sub-second part of the offset is discarded before it is added to the
/// start time.
pub fn localize_offset(
    start_time: NaiveDateTime,
    start_time_usec: i64,
) -> Result<(TimestampLabel, bool)> {
    if start_time_usec < 0 {
        return Err(Error::NegativeClipOffset { start_time_usec });
    }

    let elapsed_secs = start_time_usec / USEC_PER_SEC;
    let elapsed_days = elapsed_secs / SECONDS_PER_DAY;

    let out_of_range = || Error::ClipOffsetOutOfRange {
        start_time_usec,
        start_time: start_time.to_string(),
    };

    let absolute = TimeDelta::try_seconds(elapsed_secs)
        .and_then(|delta| start_time.checked_add_signed(delta))
        .ok_or_else(out_of_range)?;

    let day = u32::try_from(elapsed_days + 1).map_err(|_| out_of_range())?;

    let label = TimestampLabel {
        day,
        time: absolute.time().with_nanosecond(0).unwrap_or_else(|| absolute.time()),
    };

    Ok((label, is_night_hour(absolute.hour())))
}

/// Attach `timestamp_label` and `is_night` to every clip.
///
/// Clip order is preserved; existing labels are overwritten.
pub fn localize(clips: &[Clip], start_time: NaiveDateTime) -> Result<Vec<Clip>> {
    clips
        .iter()
        .map(|clip| {
            let (label, is_night) = localize_offset(start_time, clip.start_time_usec)?;
            Ok(Clip {
                timestamp_label: Some(label.to_string()),
                is_night: Some(is_night),
                ..clip.clone()
            })
        })
        .collect()
}
