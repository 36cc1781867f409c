//! Clinical start-time table.

use tracing::warn;

use crate::constants::start_times::{MISSING_MARKERS, SESSION_COLUMN_OFFSET};

/// Start-time rows as exported by the clinical records system.
///
/// Cells are kept verbatim; the column layout is positional (see
/// [`start_time_for_session`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartTimeTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl StartTimeTable {
    /// Create a table from a header and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Raw cell value.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

/// Start time recorded for the session at 0-based `session_index`.
///
/// Reads the first row at column `session_index + SESSION_COLUMN_OFFSET`.
/// Returns `None` when the table is empty, the cell is a missing marker, or
/// the column does not exist.
pub fn start_time_for_session(table: &StartTimeTable, session_index: usize) -> Option<&str> {
    if table.is_empty() {
        return None;
    }

    let column = session_index + SESSION_COLUMN_OFFSET;
    let Some(value) = table.cell(0, column) else {
        warn!(
            "Start-time table has no column {column} for session {session_index} ({} columns)",
            table.columns().len()
        );
        return None;
    };

    let trimmed = value.trim();
    if MISSING_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cells: &[&str]) -> StartTimeTable {
        let columns = (0..cells.len()).map(|i| format!("c{i}")).collect();
        StartTimeTable::new(
            columns,
            vec![cells.iter().map(|s| (*s).to_string()).collect()],
        )
    }

    #[test]
    fn test_first_session_reads_third_column() {
        let t = table(&["sub-RID0001", "HUP001", "2023-01-01 10:00:00", "2023-01-02 09:00:00"]);
        assert_eq!(start_time_for_session(&t, 0), Some("2023-01-01 10:00:00"));
        assert_eq!(start_time_for_session(&t, 1), Some("2023-01-02 09:00:00"));
    }

    #[test]
    fn test_missing_markers() {
        let t = table(&["sub-RID0001", "HUP001", "", "NaN", "NaT", " None "]);
        for session in 0..4 {
            assert_eq!(start_time_for_session(&t, session), None);
        }
    }

    #[test]
    fn test_column_out_of_range_is_missing() {
        let t = table(&["sub-RID0001", "HUP001", "2023-01-01 10:00:00"]);
        assert_eq!(start_time_for_session(&t, 5), None);
    }

    #[test]
    fn test_empty_table() {
        let t = StartTimeTable::new(vec!["record_id".to_string()], Vec::new());
        assert!(t.is_empty());
        assert_eq!(start_time_for_session(&t, 0), None);
    }
}
