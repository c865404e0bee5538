//! Composite request schemas and the form-data adapter.
//!
//! The adapter takes the loosely-typed key/value payload of a decoded form
//! body, sanitizes each value, applies the per-field schemas, and returns
//! either the fully-typed request data or a field-keyed error map. Validation
//! runs field by field and collects every failing field (first error per
//! field), so the caller can report all problems at once.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::validation::field;
use crate::validation::sanitize::{sanitize_email, sanitize_string, sanitize_url};

/// Decoded form body: string keys, string values, last value wins.
pub type FormPayload = HashMap<String, String>;

/// Field name → first validation failure message for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first error for a field; later errors for the same field
    /// are ignored.
    pub fn push(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_insert(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A cleaned, fully-populated signup submission.
///
/// Optional fields are always present, normalized to the empty string when
/// the submitter left them blank, so downstream consumers never need
/// presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub email: String,
    pub name: String,
    pub experience_level: u8,
    pub project_interest: String,
    pub project_details: String,
    pub github_username: String,
    pub linkedin_url: String,
    pub discord_username: String,
}

/// A cleaned login submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember: Option<bool>,
}

/// A whole-request validation schema over a decoded form payload.
pub trait FormSchema {
    type Output;

    fn parse(payload: &FormPayload) -> Result<Self::Output, FieldErrors>;
}

/// Apply a composite schema to a raw form payload.
pub fn validate_form_data<S: FormSchema>(payload: &FormPayload) -> Result<S::Output, FieldErrors> {
    S::parse(payload)
}

fn raw<'a>(payload: &'a FormPayload, key: &str) -> &'a str {
    payload.get(key).map(String::as_str).unwrap_or("")
}

fn collect<T>(errors: &mut FieldErrors, field_name: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field_name, message);
            None
        }
    }
}

pub struct SignupSchema;

impl FormSchema for SignupSchema {
    type Output = SignupData;

    fn parse(payload: &FormPayload) -> Result<SignupData, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = collect(&mut errors, "email", field::email(&sanitize_email(raw(payload, "email"))));
        let name = collect(&mut errors, "name", field::name(&sanitize_string(raw(payload, "name"))));
        let experience_level = collect(
            &mut errors,
            "experienceLevel",
            field::experience_level(&sanitize_string(raw(payload, "experienceLevel"))),
        );
        let project_interest = collect(
            &mut errors,
            "projectInterest",
            field::project_interest(&sanitize_string(raw(payload, "projectInterest"))),
        );
        let project_details = collect(
            &mut errors,
            "projectDetails",
            field::project_details(&sanitize_string(raw(payload, "projectDetails"))),
        );
        let github_username = collect(
            &mut errors,
            "githubUsername",
            field::github_username(&sanitize_string(raw(payload, "githubUsername"))),
        );
        let linkedin_url = collect(
            &mut errors,
            "linkedinUrl",
            field::linkedin_url(&sanitize_url(&sanitize_string(raw(payload, "linkedinUrl")))),
        );
        let discord_username = collect(
            &mut errors,
            "discordUsername",
            field::discord_username(&sanitize_string(raw(payload, "discordUsername"))),
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        // All unwraps are guarded by the emptiness check above: a None field
        // always records an error.
        Ok(SignupData {
            email: email.unwrap_or_default(),
            name: name.unwrap_or_default(),
            experience_level: experience_level.unwrap_or_default(),
            project_interest: project_interest.unwrap_or_default(),
            project_details: project_details.unwrap_or_default(),
            github_username: github_username.unwrap_or_default(),
            linkedin_url: linkedin_url.unwrap_or_default(),
            discord_username: discord_username.unwrap_or_default(),
        })
    }
}

pub struct LoginSchema;

impl FormSchema for LoginSchema {
    type Output = LoginData;

    fn parse(payload: &FormPayload) -> Result<LoginData, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = collect(&mut errors, "email", field::email(&sanitize_email(raw(payload, "email"))));
        // Passwords are validated as submitted; sanitizing could silently
        // alter the credential.
        let password = collect(&mut errors, "password", field::password(raw(payload, "password")));

        // Checkbox semantics: "on" means checked, anything else means the
        // flag was never submitted. Never coerced to Some(false).
        let remember = match payload.get("remember").map(String::as_str) {
            Some("on") => Some(true),
            _ => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LoginData {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
            remember,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(pairs: &[(&str, &str)]) -> FormPayload {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn valid_signup_populates_every_field() {
        let data = validate_form_data::<SignupSchema>(&payload(&[
            ("email", "  Jane@Example.COM "),
            ("experienceLevel", "42"),
        ]))
        .expect("minimal valid signup rejected");

        assert_eq!(data.email, "jane@example.com");
        assert_eq!(data.experience_level, 42);
        // Optional fields are present as empty strings, not omitted.
        assert_eq!(data.name, "");
        assert_eq!(data.project_interest, "");
        assert_eq!(data.project_details, "");
        assert_eq!(data.github_username, "");
        assert_eq!(data.linkedin_url, "");
        assert_eq!(data.discord_username, "");
    }

    #[test]
    fn full_signup_round_trip() {
        let data = validate_form_data::<SignupSchema>(&payload(&[
            ("email", "jane@example.com"),
            ("name", "Jane  Doe"),
            ("experienceLevel", "7"),
            ("projectInterest", "Backend tooling"),
            ("projectDetails", "A CLI for wrangling fixtures."),
            ("githubUsername", "janedoe"),
            ("linkedinUrl", "https://linkedin.com/in/janedoe"),
            ("discordUsername", "jane.doe"),
        ]))
        .expect("valid signup rejected");

        assert_eq!(data.name, "Jane Doe");
        assert_eq!(data.linkedin_url, "https://linkedin.com/in/janedoe");
        assert_eq!(data.discord_username, "jane.doe");
    }

    #[test]
    fn collects_all_failing_fields() {
        let errors = validate_form_data::<SignupSchema>(&payload(&[
            ("email", "not-an-email"),
            ("name", "Jane99"),
            ("experienceLevel", "5"),
        ]))
        .unwrap_err();

        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(
            errors.get("name"),
            Some("Name can only contain letters, spaces, hyphens, and apostrophes")
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn missing_required_fields_are_both_reported() {
        let errors = validate_form_data::<SignupSchema>(&payload(&[])).unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("experienceLevel"), Some("Experience level is required"));
    }

    #[test]
    fn non_numeric_experience_level_is_a_validation_failure() {
        let errors = validate_form_data::<SignupSchema>(&payload(&[
            ("email", "jane@example.com"),
            ("experienceLevel", "ten"),
        ]))
        .unwrap_err();
        assert_eq!(errors.get("experienceLevel"), Some("Experience level must be a number"));
    }

    #[test]
    fn login_remember_coercion() {
        let base = [("email", "jane@example.com"), ("password", "Sup3rSecret")];

        let data = validate_form_data::<LoginSchema>(&payload(&base)).unwrap();
        assert_eq!(data.remember, None);

        let mut with_on = payload(&base);
        with_on.insert("remember".into(), "on".into());
        let data = validate_form_data::<LoginSchema>(&with_on).unwrap();
        assert_eq!(data.remember, Some(true));

        // Any non-checkbox value is treated as unchecked, never Some(false).
        let mut with_true = payload(&base);
        with_true.insert("remember".into(), "true".into());
        let data = validate_form_data::<LoginSchema>(&with_true).unwrap();
        assert_eq!(data.remember, None);
    }

    #[test]
    fn login_collects_email_and_password_errors() {
        let errors =
            validate_form_data::<LoginSchema>(&payload(&[("email", "bad"), ("password", "short")]))
                .unwrap_err();
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn signup_data_serializes_with_form_field_names() {
        let data = SignupData {
            email: "jane@example.com".into(),
            name: String::new(),
            experience_level: 3,
            project_interest: String::new(),
            project_details: String::new(),
            github_username: String::new(),
            linkedin_url: String::new(),
            discord_username: String::new(),
        };
        let json = serde_json::to_value(&data).expect("serialize");
        assert_eq!(json["experienceLevel"], 3);
        assert_eq!(json["githubUsername"], "");
    }

    #[test]
    fn login_password_never_serialized() {
        let data = LoginData {
            email: "jane@example.com".into(),
            password: "Sup3rSecret".into(),
            remember: Some(true),
        };
        let json = serde_json::to_string(&data).expect("serialize");
        assert!(!json.contains("Sup3rSecret"));
        assert!(!json.contains("password"));
    }
}
