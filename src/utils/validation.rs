use crate::utils::error::{AssignError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AssignError::InvalidInput {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AssignError::InvalidInput {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Registration codes are a fixed prefix followed by a fixed-length numeric
/// suffix, e.g. "EE2021001" for prefix "EE" and 7 digits.
pub fn validate_code(field_name: &str, code: &str, prefix: &str, digits: usize) -> Result<()> {
    validate_non_empty_string(field_name, code)?;

    let pattern = format!("^{}[0-9]{{{}}}$", regex::escape(prefix), digits);
    let re = Regex::new(&pattern).map_err(|e| AssignError::ConfigError {
        message: format!("invalid code pattern '{}': {}", pattern, e),
    })?;

    if !re.is_match(code) {
        return Err(AssignError::InvalidInput {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: format!("Code must match prefix '{}' plus {} digits", prefix, digits),
        });
    }
    Ok(())
}
