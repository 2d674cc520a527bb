//! Validation utilities for the Kisan Express advisory platform

// ============================================================================
// Request Field Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a district name is usable as a lookup key
pub fn validate_district(district: &str) -> Result<(), &'static str> {
    if district.trim().is_empty() {
        return Err("District cannot be empty");
    }
    if district.len() > 64 {
        return Err("District name too long");
    }
    Ok(())
}

/// Validate a free-text question for the expert query endpoint
pub fn validate_question(question: &str) -> Result<(), &'static str> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err("Question cannot be empty");
    }
    if trimmed.len() > 4000 {
        return Err("Question too long");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("farmer@example.com").is_ok());
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("x@y").is_err());
    }

    #[test]
    fn test_district_validation() {
        assert!(validate_district("Kottayam").is_ok());
        assert!(validate_district("   ").is_err());
        assert!(validate_district(&"K".repeat(65)).is_err());
    }

    #[test]
    fn test_question_validation() {
        assert!(validate_question("When should I sow paddy?").is_ok());
        assert!(validate_question("  \n ").is_err());
        assert!(validate_question(&"q".repeat(4001)).is_err());
    }
}
