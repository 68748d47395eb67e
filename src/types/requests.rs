//! Request bodies as sent by clients, before validation.
//!
//! Every field is optional on the wire so that a missing value produces a
//! per-field message instead of a body rejection.

use serde::Deserialize;

use crate::db::models::{CourseContent, NewAccount};
use crate::error::ApiError;

fn required(value: &Option<String>, field: &str, errors: &mut Vec<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => value.clone().unwrap_or_default(),
        _ => {
            errors.push(format!("Please provide a value for \"{field}\""));
            String::new()
        }
    }
}

/// `local@domain.tld` with no whitespace.
pub fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

impl AccountInput {
    /// Returns the account with its plaintext password; hashing is the caller's job.
    pub fn validate(self) -> Result<NewAccount, ApiError> {
        let mut errors = Vec::new();
        let first_name = required(&self.first_name, "firstName", &mut errors);
        let last_name = required(&self.last_name, "lastName", &mut errors);
        let email_address = match self.email_address.as_deref() {
            Some(e) if looks_like_email(e) => e.to_string(),
            _ => {
                errors.push("Please provide a value for \"emailAddress\"".to_string());
                String::new()
            }
        };
        let password = required(&self.password, "password", &mut errors);

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(NewAccount {
            first_name,
            last_name,
            email_address,
            password,
        })
    }
}

/// Course body for create and update. Any `userId` sent by the client is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl CourseInput {
    pub fn validate(self) -> Result<CourseContent, ApiError> {
        let mut errors = Vec::new();
        let title = required(&self.title, "title", &mut errors);
        let description = required(&self.description, "description", &mut errors);

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(CourseContent {
            title,
            description,
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
        })
    }
}
