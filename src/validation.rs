//! Validation helpers for run options.
use crate::output::OutputCompression;
use std::ops::RangeInclusive;
use std::path::Path;

/// Validates if a given string is usable as a file path.
///
/// # Arguments
///
/// * `path` - The string to validate.
///
/// # Returns
///
/// * `Ok(())` if the file path is valid.
/// * `Err(&'static str)` if the file path is invalid.
pub fn is_valid_path(path: &str) -> Result<(), &'static str> {
    if path.trim().is_empty() {
        return Err("Please insert a proper file name");
    }
    if path.contains('\0') {
        return Err("File path cannot contain null bytes");
    }
    Ok(())
}

/// Validates that an input file exists and is a regular file.
///
/// # Arguments
///
/// * `path` - The path to check.
///
/// # Returns
///
/// * `Ok(())` if the file exists.
/// * `Err(String)` naming the missing file otherwise.
pub fn is_existing_file(path: &Path) -> Result<(), String> {
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("File {} does not exist", path.display()))
    }
}

/// Validates an output file name and derives its compression.
///
/// # Arguments
///
/// * `path` - The output path, which must end in `.mtscan` or `.mtscan.gz`.
///
/// # Returns
///
/// * `Ok(OutputCompression)` for a supported extension.
/// * `Err(&'static str)` otherwise.
pub fn output_compression(path: &Path) -> Result<OutputCompression, &'static str> {
    OutputCompression::from_path(path)
        .ok_or("Improper output file name. Please specify .mtscan or .mtscan.gz extension")
}

/// Validates that a date window is not inverted.
///
/// # Arguments
///
/// * `from` - Optional start, epoch seconds.
/// * `to` - Optional end, epoch seconds.
///
/// # Returns
///
/// * `Ok(())` if either bound is open or `to >= from`.
/// * `Err(&'static str)` if the end lies before the start.
pub fn is_valid_date_range(from: Option<i64>, to: Option<i64>) -> Result<(), &'static str> {
    match (from, to) {
        (Some(from), Some(to)) if to < from => {
            Err("Please check if dates are properly specified")
        }
        _ => Ok(()),
    }
}

/// Validates if a given value is within a specified numeric range.
///
/// # Arguments
///
/// * `value` - The value to validate.
/// * `range` - The inclusive range to validate against.
///
/// # Returns
///
/// * `Ok(())` if the value is within the range.
/// * `Err(&'static str)` if the value is outside the range.
pub fn is_in_range<T: PartialOrd>(value: T, range: RangeInclusive<T>) -> Result<(), &'static str> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err("Value is outside the specified range")
    }
}

/// Validates that a value is one of the allowed choices.
///
/// # Arguments
///
/// * `value` - The value to validate.
/// * `allowed` - Accepted values, compared case-insensitively.
///
/// # Returns
///
/// * `Ok(())` if the value is allowed.
/// * `Err(String)` listing the allowed values otherwise.
pub fn is_one_of(value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        Ok(())
    } else {
        Err(format!(
            "Invalid value '{}'. Must be one of: {}",
            value,
            allowed.join(", ")
        ))
    }
}
