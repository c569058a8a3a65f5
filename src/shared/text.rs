//! Text field helpers

use super::error::SharedError;

/// Trim `value` and reject it when nothing is left.
pub fn required_text<'a>(field: &str, value: &'a str) -> Result<&'a str, SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}
