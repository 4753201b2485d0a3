//! Listing parameters.

use super::client::MetadataEntry;
use super::id::StoreKind;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Offset/limit window over a store scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, MAX_PAGE_LIMIT)
    }
}

/// A listing request after boundary checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub use_sql_database: bool,
    pub metadata_key: Option<String>,
    pub metadata_value: Option<String>,
    pub page: Page,
}

impl ListRequest {
    #[must_use]
    pub const fn store(&self) -> StoreKind {
        StoreKind::from_sql_flag(self.use_sql_database)
    }

    /// The single-pair filter, present only when both key and value are set.
    #[must_use]
    pub fn metadata_filter(&self) -> Option<MetadataEntry> {
        match (&self.metadata_key, &self.metadata_value) {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                Some(MetadataEntry::new(key.clone(), value.clone()))
            }
            _ => None,
        }
    }
}
