//! CLI argument validators.

/// Parse and validate a bounded float value.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
/// * `name` - Name of the parameter for error messages
pub fn parse_bounded_float(s: &str, min: f64, max: f64, name: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(min..=max).contains(&value) {
        return Err(format!(
            "{name} must be between {min} and {max}, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate the event window in hours (0.0 to 48.0).
pub fn parse_window_hours(s: &str) -> Result<f64, String> {
    parse_bounded_float(s, 0.0, 48.0, "event window")
}

/// Parse a subject identifier (`sub-RID0031`, `RID0031` or `31`).
pub fn parse_subject_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("subject id must not be empty".to_string());
    }
    if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
        return Err(format!("'{s}' is not a valid subject id"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_hours() {
        assert_eq!(parse_window_hours("2").ok(), Some(2.0));
        assert_eq!(parse_window_hours("0.5").ok(), Some(0.5));
        assert!(parse_window_hours("-1").is_err());
        assert!(parse_window_hours("72").is_err());
        assert!(parse_window_hours("abc").is_err());
    }

    #[test]
    fn test_parse_subject_id() {
        assert_eq!(parse_subject_id(" sub-RID0031 ").ok(), Some("sub-RID0031".to_string()));
        assert_eq!(parse_subject_id("31").ok(), Some("31".to_string()));
        assert!(parse_subject_id("").is_err());
        assert!(parse_subject_id("../etc").is_err());
        assert!(parse_subject_id("a/b").is_err());
    }
}
