//! Validation helpers shared across the weather service

/// Validate a location code: 3-12 characters, uppercase letters, digits
/// and underscores only (e.g. `NYC_USA`, `DELHI_IN`).
pub fn validate_location_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 3 || code.len() > 12 {
        return Err("Location code must be between 3 and 12 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        return Err("Location code may only contain A-Z, 0-9 and underscore");
    }
    Ok(())
}

/// Validate an ISO 3166-1 alpha-2 country code
pub fn validate_country_code(code: &str) -> Result<(), &'static str> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err("Country code must be two uppercase letters");
    }
    Ok(())
}
