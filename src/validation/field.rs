//! Per-field validation rules.
//!
//! Each schema takes an already-sanitized value and either returns the
//! normalized value or fails with the user-facing message for the violated
//! constraint. The messages are part of the external contract surfaced to
//! end users.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_GITHUB_LENGTH: usize = 38;
pub const MAX_DISCORD_LENGTH: usize = 31;
pub const MAX_INTEREST_LENGTH: usize = 500;
pub const MAX_DETAILS_LENGTH: usize = 2000;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 127;
pub const MIN_EXPERIENCE_LEVEL: i64 = 1;
pub const MAX_EXPERIENCE_LEVEL: i64 = 100;

/// local@domain.tld, no whitespace or extra @.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Letters (including accented), spaces, hyphens, apostrophes.
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L} '\-]+$").expect("name regex"));

static GITHUB_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-]*$").expect("github regex"));

static DISCORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._]*$").expect("discord regex"));

pub fn email(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("Email is required".to_string());
    }
    if value.chars().count() > MAX_EMAIL_LENGTH {
        return Err(format!("Email must be at most {MAX_EMAIL_LENGTH} characters"));
    }
    if !EMAIL_REGEX.is_match(value) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(value.to_string())
}

pub fn name(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Ok(String::new());
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(format!("Name must be at most {MAX_NAME_LENGTH} characters"));
    }
    if !NAME_REGEX.is_match(value) {
        return Err("Name can only contain letters, spaces, hyphens, and apostrophes".to_string());
    }
    Ok(value.to_string())
}

pub fn experience_level(value: &str) -> Result<u8, String> {
    if value.is_empty() {
        return Err("Experience level is required".to_string());
    }
    let level: i64 = value
        .parse()
        .map_err(|_| "Experience level must be a number".to_string())?;
    if level < MIN_EXPERIENCE_LEVEL {
        return Err(format!("Experience level must be at least {MIN_EXPERIENCE_LEVEL}"));
    }
    if level > MAX_EXPERIENCE_LEVEL {
        return Err(format!("Experience level must be at most {MAX_EXPERIENCE_LEVEL}"));
    }
    Ok(level as u8)
}

pub fn github_username(value: &str) -> Result<String, String> {
    if value.chars().count() > MAX_GITHUB_LENGTH {
        return Err(format!("GitHub username must be at most {MAX_GITHUB_LENGTH} characters"));
    }
    if !GITHUB_REGEX.is_match(value) {
        return Err("GitHub username can only contain letters, numbers, and hyphens".to_string());
    }
    Ok(value.to_string())
}

/// Accepts only http(s) URLs whose host is exactly a LinkedIn domain.
/// Look-alike hosts and other schemes are rejected.
pub fn linkedin_url(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Ok(String::new());
    }
    let parsed = Url::parse(value).map_err(|_| "LinkedIn URL must be a valid URL".to_string())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("LinkedIn URL must be a LinkedIn profile URL".to_string());
    }
    match parsed.host_str() {
        Some("linkedin.com") | Some("www.linkedin.com") => Ok(value.to_string()),
        _ => Err("LinkedIn URL must be a LinkedIn profile URL".to_string()),
    }
}

pub fn discord_username(value: &str) -> Result<String, String> {
    if value.chars().count() > MAX_DISCORD_LENGTH {
        return Err(format!("Discord username must be at most {MAX_DISCORD_LENGTH} characters"));
    }
    if !DISCORD_REGEX.is_match(value) {
        return Err(
            "Discord username can only contain letters, numbers, periods, and underscores"
                .to_string(),
        );
    }
    Ok(value.to_string())
}

pub fn project_interest(value: &str) -> Result<String, String> {
    if value.chars().count() > MAX_INTEREST_LENGTH {
        return Err(format!("Project interest must be at most {MAX_INTEREST_LENGTH} characters"));
    }
    Ok(value.to_string())
}

pub fn project_details(value: &str) -> Result<String, String> {
    if value.chars().count() > MAX_DETAILS_LENGTH {
        return Err(format!("Project details must be at most {MAX_DETAILS_LENGTH} characters"));
    }
    Ok(value.to_string())
}

pub fn password(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("Password is required".to_string());
    }
    let length = value.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(format!("Password must be at most {MAX_PASSWORD_LENGTH} characters"));
    }

    let has_lowercase = value.chars().any(|c| c.is_lowercase());
    let has_uppercase = value.chars().any(|c| c.is_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !has_lowercase || !has_uppercase || !has_digit {
        return Err(
            "Password must contain at least one lowercase letter, one uppercase letter, and one number"
                .to_string(),
        );
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::sanitize::sanitize_email;

    #[test]
    fn email_accepts_sanitized_valid_addresses() {
        for raw in ["  Jane@Example.com ", "a@b.co", "first.last@sub.domain.org"] {
            let cleaned = sanitize_email(raw);
            let accepted = email(&cleaned).expect("valid email rejected");
            assert_eq!(accepted, cleaned);
            assert_eq!(accepted, accepted.to_lowercase());
        }
    }

    #[test]
    fn email_rejections() {
        assert_eq!(email("").unwrap_err(), "Email is required");
        assert_eq!(email("no-at-sign").unwrap_err(), "Please enter a valid email address");
        assert_eq!(email("two@@example.com").unwrap_err(), "Please enter a valid email address");
        assert_eq!(email("missing@tld").unwrap_err(), "Please enter a valid email address");

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(email(&long).unwrap_err(), "Email must be at most 254 characters");
    }

    #[test]
    fn name_allows_accented_letters_and_punctuation() {
        assert!(name("Jane Doe").is_ok());
        assert!(name("Anne-Marie O'Brien").is_ok());
        assert!(name("José Núñez").is_ok());
        assert!(name("").is_ok());
    }

    #[test]
    fn name_rejects_digits_and_overlong() {
        assert_eq!(
            name("R2D2").unwrap_err(),
            "Name can only contain letters, spaces, hyphens, and apostrophes"
        );
        assert_eq!(
            name(&"a".repeat(101)).unwrap_err(),
            "Name must be at most 100 characters"
        );
        assert!(name(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn experience_level_bounds() {
        assert_eq!(experience_level("1"), Ok(1));
        assert_eq!(experience_level("100"), Ok(100));
        assert_eq!(experience_level("").unwrap_err(), "Experience level is required");
        assert_eq!(
            experience_level("abc").unwrap_err(),
            "Experience level must be a number"
        );
        assert_eq!(
            experience_level("0").unwrap_err(),
            "Experience level must be at least 1"
        );
        assert_eq!(
            experience_level("101").unwrap_err(),
            "Experience level must be at most 100"
        );
    }

    #[test]
    fn github_username_charset_and_length() {
        assert!(github_username("octo-cat42").is_ok());
        assert!(github_username("").is_ok());
        assert_eq!(
            github_username("under_score").unwrap_err(),
            "GitHub username can only contain letters, numbers, and hyphens"
        );
        assert!(github_username(&"a".repeat(38)).is_ok());
        assert_eq!(
            github_username(&"a".repeat(39)).unwrap_err(),
            "GitHub username must be at most 38 characters"
        );
    }

    #[test]
    fn linkedin_url_host_checking() {
        assert_eq!(
            linkedin_url("https://linkedin.com/in/janedoe"),
            Ok("https://linkedin.com/in/janedoe".to_string())
        );
        assert!(linkedin_url("https://www.linkedin.com/in/janedoe").is_ok());
        assert!(linkedin_url("").is_ok());

        let err = linkedin_url("https://github.com/user").unwrap_err();
        assert!(err.contains("must be a LinkedIn profile URL"), "got: {err}");

        // Look-alike hosts and non-http schemes are not LinkedIn.
        assert!(linkedin_url("https://linkedin.com.evil.example/in/x").is_err());
        assert!(linkedin_url("https://notlinkedin.com/in/x").is_err());
        assert!(linkedin_url("javascript:alert(1)").is_err());
        assert!(linkedin_url("not a url").is_err());
    }

    #[test]
    fn discord_username_charset_and_length() {
        assert!(discord_username("jane.doe_42").is_ok());
        assert_eq!(
            discord_username("jane#doe").unwrap_err(),
            "Discord username can only contain letters, numbers, periods, and underscores"
        );
        assert!(discord_username(&"a".repeat(31)).is_ok());
        assert!(discord_username(&"a".repeat(32)).is_err());
    }

    #[test]
    fn free_text_length_only() {
        assert!(project_interest("Backend & tooling, maybe infra?").is_ok());
        assert!(project_interest(&"x".repeat(500)).is_ok());
        assert!(project_interest(&"x".repeat(501)).is_err());
        assert!(project_details(&"x".repeat(2000)).is_ok());
        assert!(project_details(&"x".repeat(2001)).is_err());
    }

    #[test]
    fn password_rules() {
        assert!(password("Sup3rSecret").is_ok());
        assert_eq!(password("").unwrap_err(), "Password is required");
        assert_eq!(
            password("Ab1").unwrap_err(),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            password(&format!("Ab1{}", "x".repeat(125))).unwrap_err(),
            "Password must be at most 127 characters"
        );
        assert!(password(&format!("Ab1{}", "x".repeat(124))).is_ok());
        for weak in ["alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
            assert_eq!(
                password(weak).unwrap_err(),
                "Password must contain at least one lowercase letter, one uppercase letter, and one number"
            );
        }
    }
}
