//! Parsing of loosely-typed form values.

use super::AppError;

/// Split a comma-separated string into trimmed, non-empty tokens.
///
/// Order and duplicates are preserved.
pub fn split_list(input: &str) -> Vec<String> {
    input.split(',').map(str::trim).filter(|token| !token.is_empty()).map(String::from).collect()
}

/// Split a comma-separated string and parse every token as an integer.
///
/// `field` is only used for the error message.
pub fn split_numbers(field: &str, input: &str) -> Result<Vec<i64>, AppError> {
    split_list(input).iter().map(|token| parse_number(field, token)).collect()
}

/// Parse a single integer value such as a Unix timestamp.
pub fn parse_number(field: &str, input: &str) -> Result<i64, AppError> {
    input.trim().parse::<i64>().map_err(|_| AppError::InvalidNumber {
        field: field.to_string(),
        value: input.to_string(),
    })
}

/// Returns the value when it carries any non-whitespace content.
///
/// Form fields that are absent, empty or blank count as "not specified".
pub fn specified(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
