//! Query-string parameters and their boundary checks.

use serde::{Deserialize, Deserializer};

use crate::domain::error::{FieldViolation, ValidationError};
use crate::domain::{ListRequest, Page, StoreKind, MAX_PAGE_LIMIT};

/// Parse the loose boolean spellings accepted for `use_sql_database`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "use_sql_database: '{raw}' is not a boolean (expected true/false, 1/0, on/off, yes/no)"
        ))
    })
}

/// `GET /client/clients` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub metadata_key: Option<String>,
    pub metadata_value: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub use_sql_database: bool,
}

impl ListQuery {
    /// Apply defaults and range checks.
    ///
    /// # Errors
    /// Returns every violated bound: `offset < 0`, `limit < 0`, or
    /// `limit > 100`.
    pub fn into_request(self) -> Result<ListRequest, ValidationError> {
        let mut violations = Vec::new();
        let default = Page::default();

        let offset = match self.offset {
            None => default.offset,
            Some(value) => u64::try_from(value).unwrap_or_else(|_| {
                violations.push(FieldViolation::new(
                    "offset",
                    "must be greater than or equal to 0",
                ));
                0
            }),
        };

        let limit = match self.limit {
            None => default.limit,
            Some(value) => match u64::try_from(value) {
                Ok(limit) if limit <= MAX_PAGE_LIMIT => limit,
                Ok(_) => {
                    violations.push(FieldViolation::new(
                        "limit",
                        format!("must be less than or equal to {MAX_PAGE_LIMIT}"),
                    ));
                    0
                }
                Err(_) => {
                    violations.push(FieldViolation::new(
                        "limit",
                        "must be greater than or equal to 0",
                    ));
                    0
                }
            },
        };

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(ListRequest {
            use_sql_database: self.use_sql_database,
            metadata_key: self.metadata_key,
            metadata_value: self.metadata_value,
            page: Page::new(offset, limit),
        })
    }
}

/// `GET /client/{client_id}` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct GetQuery {
    #[serde(default, deserialize_with = "flexible_bool")]
    pub use_sql_database: bool,
}

impl GetQuery {
    #[must_use]
    pub const fn store(&self) -> StoreKind {
        StoreKind::from_sql_flag(self.use_sql_database)
    }
}
