//! Metadata codec between native entries and the relational text blob.
//!
//! The relational schema has no array column, so the entry sequence is stored
//! as a JSON object wrapping the sequence under a `metadata` field:
//!
//! ```text
//! {"metadata":[{"key":"tier","value":"gold"}]}
//! ```
//!
//! The document store keeps entries natively and never goes through this
//! codec.

use serde::{Deserialize, Serialize};

use super::client::MetadataEntry;
use super::error::MetadataError;

/// Blob stored for a record without metadata.
pub const EMPTY_METADATA_BLOB: &str = r#"{"metadata":[]}"#;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    metadata: &'a [MetadataEntry],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Envelope { metadata: Vec<MetadataEntry> },
    // Rows written with the old column default hold a bare array.
    Bare(Vec<MetadataEntry>),
}

/// Serialize entries into the relational blob, preserving order.
#[must_use]
pub fn encode_for_relational(entries: &[MetadataEntry]) -> String {
    // Serializing a slice of string pairs into a String cannot fail.
    serde_json::to_string(&EnvelopeRef { metadata: entries })
        .unwrap_or_else(|_| EMPTY_METADATA_BLOB.to_string())
}

/// Parse a relational blob back into entries.
///
/// # Errors
/// Returns [`MetadataError`] when the blob is not JSON, or is JSON of the
/// wrong shape.
pub fn decode_from_relational(blob: &str) -> Result<Vec<MetadataEntry>, MetadataError> {
    let stored: StoredBlob =
        serde_json::from_str(blob).map_err(|e| MetadataError::new(e.to_string()))?;
    Ok(match stored {
        StoredBlob::Envelope { metadata } | StoredBlob::Bare(metadata) => metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<MetadataEntry> {
        vec![
            MetadataEntry::new("tier", "gold"),
            MetadataEntry::new("region", "eu"),
            MetadataEntry::new("tier", "silver"),
        ]
    }

    #[test]
    fn encode_wraps_sequence_in_metadata_field() {
        let blob = encode_for_relational(&[MetadataEntry::new("tier", "gold")]);
        assert_eq!(blob, r#"{"metadata":[{"key":"tier","value":"gold"}]}"#);
    }

    #[test]
    fn empty_sequence_round_trips() {
        let blob = encode_for_relational(&[]);
        assert_eq!(blob, EMPTY_METADATA_BLOB);
        assert!(decode_from_relational(&blob).unwrap().is_empty());
    }

    #[test]
    fn round_trip_preserves_order_and_duplicates() {
        let original = entries();
        let decoded = decode_from_relational(&encode_for_relational(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn round_trip_preserves_unicode_and_quotes() {
        let original = vec![MetadataEntry::new("note \"quoted\"", "naïve ✓ {}[]")];
        let decoded = decode_from_relational(&encode_for_relational(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_accepts_bare_array() {
        assert!(decode_from_relational("[]").unwrap().is_empty());
        let decoded = decode_from_relational(r#"[{"key":"a","value":"b"}]"#).unwrap();
        assert_eq!(decoded, vec![MetadataEntry::new("a", "b")]);
    }

    #[test]
    fn decode_rejects_non_json() {
        assert!(decode_from_relational("tier=gold").is_err());
        assert!(decode_from_relational("").is_err());
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        assert!(decode_from_relational(r#"{"other":[]}"#).is_err());
        assert!(decode_from_relational(r#"{"metadata":"tier"}"#).is_err());
        assert!(decode_from_relational("42").is_err());
    }
}
