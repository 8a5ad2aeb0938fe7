use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sources::Mode;

/// Serialize a rank as its number, or as `""` for unmatched rows
/// (wire compatibility with the published endpoint)
fn serialize_sort_index<S>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(idx) => serializer.serialize_u64(*idx as u64),
        None => serializer.serialize_str(""),
    }
}

/// Deserialize a rank from a number or an empty string
fn deserialize_sort_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IndexValue {
        Int(usize),
        String(String),
        Null,
    }

    match IndexValue::deserialize(deserializer)? {
        IndexValue::Int(i) => Ok(Some(i)),
        IndexValue::String(s) if s.is_empty() => Ok(None),
        IndexValue::String(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|_| Error::custom(format!("Invalid sort index: {}", s))),
        IndexValue::Null => Ok(None),
    }
}

/// One output row per input name, matched or not
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRow {
    /// The name as the caller supplied it
    pub original: String,

    /// Matched player's display name, or the original when unmatched
    pub player: String,

    /// Matched player's rating; `None` when unmatched
    pub rating: Option<f64>,

    /// 1-based rank among matched rows; `None` (serialized `""`) when unmatched
    #[serde(
        rename = "sortIndex",
        serialize_with = "serialize_sort_index",
        deserialize_with = "deserialize_sort_index",
        default
    )]
    pub sort_index: Option<usize>,
}

impl MatchRow {
    /// Row for a resolved input
    pub fn matched(original: impl Into<String>, player: impl Into<String>, rating: f64) -> Self {
        Self {
            original: original.into(),
            player: player.into(),
            rating: Some(rating),
            sort_index: None,
        }
    }

    /// Row for an input no tier could resolve
    pub fn unmatched(original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            player: original.clone(),
            original,
            rating: None,
            sort_index: None,
        }
    }

    /// Whether a record was resolved for this row
    pub fn is_matched(&self) -> bool {
        self.rating.is_some()
    }
}

/// Resolution response with ranked rows and fetch metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// Which ranking list was consulted
    pub mode: Mode,

    /// One row per input name: matched rows ranked first, unmatched after
    pub rows: Vec<MatchRow>,

    /// When the source document was fetched
    pub fetched_at: DateTime<Utc>,

    /// End-to-end latency in milliseconds
    pub latency_ms: f64,

    /// Extraction strategy that produced the record list (markdown, html)
    pub extractor: String,
}

impl ResolveResponse {
    /// Count of rows that resolved to a record
    pub fn matched_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_matched()).count()
    }
}
