//! Record validation.
//!
//! A draft is checked in full before either store is written; all violations
//! are collected and reported together.

use super::client::{ClientDraft, ClientRecord};
use super::error::{FieldViolation, ValidationError};

/// Validate a create payload into a canonical record.
///
/// # Errors
/// Returns [`ValidationError`] listing every violated constraint when
/// `company_id` is missing, `client_name` is empty, `client_email` is not an
/// email address, or a metadata entry has an empty key or value.
pub fn validate(draft: ClientDraft) -> Result<ClientRecord, ValidationError> {
    let mut violations = Vec::new();

    if draft.company_id.is_none() {
        violations.push(FieldViolation::new("company_id", "is required"));
    }

    let client_name = draft.client_name.unwrap_or_default();
    if client_name.trim().is_empty() {
        violations.push(FieldViolation::new("client_name", "must not be empty"));
    }

    let client_email = draft.client_email.unwrap_or_default();
    if client_email.is_empty() {
        violations.push(FieldViolation::new("client_email", "is required"));
    } else if !is_email(&client_email) {
        violations.push(FieldViolation::new(
            "client_email",
            "is not a valid email address",
        ));
    }

    let metadata = draft.metadata.unwrap_or_default();
    for (index, entry) in metadata.iter().enumerate() {
        if entry.key.is_empty() {
            violations.push(FieldViolation::new(
                format!("metadata[{index}].key"),
                "must not be empty",
            ));
        }
        if entry.value.is_empty() {
            violations.push(FieldViolation::new(
                format!("metadata[{index}].value"),
                "must not be empty",
            ));
        }
    }

    match draft.company_id {
        Some(company_id) if violations.is_empty() => Ok(ClientRecord {
            company_id,
            client_name,
            client_email,
            metadata,
        }),
        _ => Err(ValidationError::new(violations)),
    }
}

/// Syntactic email check: one `@`, a non-empty local part, and a dotted
/// domain whose labels are non-empty and do not start or end with `-`.
#[must_use]
pub fn is_email(candidate: &str) -> bool {
    if candidate.len() > 254 || candidate.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}
