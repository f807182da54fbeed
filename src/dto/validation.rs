//! Validation helpers for DTOs.

use validator::ValidationError;

/// Rejects values made only of whitespace.
///
/// # Examples
///
/// ```ignore
/// validate_not_blank("Cozy games") // Ok
/// validate_not_blank("   ")        // Err
/// ```
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must contain at least one visible character".into());
        return Err(err);
    }
    Ok(())
}
