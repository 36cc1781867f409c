//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_paths(config)?;
    validate_clips(config)?;
    validate_interictal(config)?;
    Ok(())
}

fn validate_paths(config: &Config) -> Result<()> {
    if config.paths.input_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "paths.input_dir must not be empty".to_string(),
        });
    }
    if config.paths.output_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "paths.output_dir must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_clips(config: &Config) -> Result<()> {
    let clips = &config.clips;

    if clips.duration_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "clips.duration_secs must be at least 1".to_string(),
        });
    }

    if !clips.event_window_hours.is_finite() || clips.event_window_hours < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "clips.event_window_hours must be non-negative, got {}",
                clips.event_window_hours
            ),
        });
    }

    Ok(())
}

fn validate_interictal(config: &Config) -> Result<()> {
    if config.interictal.max_gap_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "interictal.max_gap_secs must be at least 1".to_string(),
        });
    }
    Ok(())
}
