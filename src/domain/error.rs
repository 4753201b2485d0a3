//! Domain errors raised before any store is touched.
//!
//! These cover the three ways a request can be rejected locally: the record
//! itself is invalid, the identifier does not fit the addressed store, or a
//! relational metadata blob cannot be decoded.
//!
//! # Examples
//!
//! ```
//! use clientdb::domain::error::IdentifierError;
//! use clientdb::domain::id::{ClientId, StoreKind};
//!
//! let result = ClientId::parse("abc", StoreKind::Relational);
//! assert!(matches!(result, Err(IdentifierError::NotAnInteger { .. })));
//! ```

use std::fmt;

use thiserror::Error;

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path of the offending field, e.g. `metadata[2].key`.
    pub field: String,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// The client record failed validation. Carries every violation found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid client record: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    #[must_use]
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An external client id does not match the grammar of the addressed store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Relational ids are decimal integers.
    #[error("client id '{raw}' is not an integer; the relational store expects a numeric id")]
    NotAnInteger { raw: String },

    /// Document ids are 24-character hexadecimal object ids.
    #[error("client id '{raw}' is not a valid object id for the document store")]
    MalformedObjectId { raw: String },
}

/// A relational metadata blob could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed metadata blob: {reason}")]
pub struct MetadataError {
    pub reason: String,
}

impl MetadataError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_violation() {
        let err = ValidationError::new(vec![
            FieldViolation::new("client_name", "must not be empty"),
            FieldViolation::new("client_email", "is not a valid email address"),
        ]);
        let message = err.to_string();
        assert!(message.contains("client_name: must not be empty"));
        assert!(message.contains("client_email: is not a valid email address"));
    }

    #[test]
    fn identifier_error_quotes_the_raw_id() {
        let err = IdentifierError::NotAnInteger { raw: "abc".into() };
        assert!(err.to_string().contains("'abc'"));

        let err = IdentifierError::MalformedObjectId { raw: "42".into() };
        assert!(err.to_string().contains("document store"));
    }
}
