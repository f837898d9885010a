//! Input validation for registration and login

use regex::Regex;
use std::sync::OnceLock;

/// Longest accepted username, matching the `users.username` column
pub const MAX_USERNAME_LENGTH: usize = 80;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username must be at most {} characters long",
            MAX_USERNAME_LENGTH
        ));
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^\S+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username must not contain whitespace".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at most {} characters long",
            MAX_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a").is_ok());
        assert!(validate_username("élodie.m-42").is_ok());
        assert!(validate_username(&"x".repeat(80)).is_ok());

        assert_eq!(validate_username("").unwrap_err(), "Username is required");
        assert!(validate_username(&"x".repeat(81)).is_err());
        assert!(validate_username("two words").is_err());
        assert!(validate_username(" padded").is_err());
        assert!(validate_username("tab\there").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("with spaces ok").is_ok());
        assert!(validate_password(&"p".repeat(128)).is_ok());

        assert_eq!(validate_password("").unwrap_err(), "Password is required");
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }
}
