//! CLI argument validation functions
//!
//! Custom value parsers for arguments that need more than clap's built-in
//! type checks.

use std::fs;
use std::path::PathBuf;

/// Validate that a configuration file exists and is readable
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate rollback steps is between 1 and 100
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!("Rollback steps must be a valid positive number, got: '{}'", steps_str)
    })?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }

    if steps > 100 {
        return Err("Rollback steps cannot exceed 100".to_string());
    }

    Ok(steps)
}

/// Validate an age bound is a non-negative integer
pub fn validate_age(age_str: &str) -> Result<i32, String> {
    let age: i32 = age_str
        .parse()
        .map_err(|_| format!("Age must be a whole number, got: '{}'", age_str))?;

    if age < 0 {
        return Err(format!("Age must not be negative, got: {}", age));
    }

    Ok(age)
}
