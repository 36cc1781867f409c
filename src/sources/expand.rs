//! Session row normalization and per-day expansion.

use tracing::warn;

use super::SessionRow;
use crate::error::{Error, Result};

/// Normalize a subject/record id to the `sub-RIDNNNN` form.
///
/// Bare numeric ids are zero-padded to four digits; ids without the `sub-`
/// prefix gain it.
pub fn normalize_record_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("sub-") {
        trimmed.to_string()
    } else if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("sub-RID{trimmed:0>4}")
    } else {
        format!("sub-{trimmed}")
    }
}

/// Expand rows whose dataset name ends in a day range (`_D04-D07`) into one
/// row per day (`_D04`, `_D05`, ...).
///
/// Rows without a day range pass through unchanged. A reversed range yields
/// no rows.
pub fn expand_daily_rows(rows: Vec<SessionRow>) -> Result<Vec<SessionRow>> {
    let mut expanded = Vec::with_capacity(rows.len());

    for row in rows {
        if !row.dataset_name.contains("-D") {
            expanded.push(row);
            continue;
        }

        let (base, first, last) = parse_day_range(&row.dataset_name)?;
        if last < first {
            warn!(
                "Dataset {} has a reversed day range, no sessions produced",
                row.dataset_name
            );
        }

        for day in first..=last {
            expanded.push(SessionRow {
                record_id: row.record_id.clone(),
                dataset_name: format!("{base}_D{day:02}"),
            });
        }
    }

    Ok(expanded)
}

/// Split `HUP123_phaseII_D04-D07` into (`HUP123_phaseII`, 4, 7).
fn parse_day_range(name: &str) -> Result<(&str, u32, u32)> {
    let malformed = || Error::upstream("sessions", format!("malformed day range in '{name}'"));

    let (base, range) = name.rsplit_once('_').ok_or_else(malformed)?;
    let (first, last) = range.split_once('-').ok_or_else(malformed)?;
    let parse_day = |s: &str| s.replace('D', "").parse::<u32>().map_err(|_| malformed());

    Ok((base, parse_day(first)?, parse_day(last)?))
}
