//! Form checks done before any request is sent.

use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
}

pub fn validate_login(identifier: &str, password: &str) -> Result<(), ValidationError> {
    if identifier.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

/// Checks run in order: missing fields, mismatch, then length.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    if [name, email, password, confirm].iter().any(|field| field.is_empty()) {
        return Err(ValidationError::MissingFields);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_needs_both_fields() {
        assert_eq!(validate_login("", "x"), Err(ValidationError::MissingFields));
        assert_eq!(validate_login("a", ""), Err(ValidationError::MissingFields));
        assert_eq!(validate_login("a", "x"), Ok(()));
    }

    #[test]
    fn signup_checks_in_order() {
        assert_eq!(
            validate_signup("", "e", "abc", "abd"),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_signup("n", "e", "abc", "abd"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_signup("n", "e", "abcde", "abcde"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_signup("n", "e", "abcdef", "abcdef"), Ok(()));
    }

    #[test]
    fn messages() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters long"
        );
    }
}
