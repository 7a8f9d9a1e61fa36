//! Data models for API requests and responses.

use serde::{Deserialize, Serialize};

pub use snipshare_core::{CreateRequest, CreateResponse, PageData, Snippet};

/// Query string of the fetch endpoint
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct FetchQuery {
    pub id: Option<String>,
}

impl FetchQuery {
    /// Builds the query from decoded `key=value` pairs. A repeated `id`
    /// resolves to its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value);
        Self { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_id_wins() {
        let query = FetchQuery::from_pairs(pairs(&[("id", "first"), ("id", "second")]));
        assert_eq!(query.id.as_deref(), Some("first"));
    }

    #[test]
    fn other_keys_are_ignored() {
        let query = FetchQuery::from_pairs(pairs(&[("lang", "rust"), ("id", "abc")]));
        assert_eq!(query.id.as_deref(), Some("abc"));

        let query = FetchQuery::from_pairs(pairs(&[("lang", "rust")]));
        assert!(query.id.is_none());
    }
}

pub const MISSING_ID: &str = "Missing id";
pub const NOT_FOUND: &str = "Not found";
pub const INVALID_DATA: &str = "Invalid data";
pub const STORAGE_UNAVAILABLE: &str = "Storage unavailable";
pub const FETCH_FAILED: &str = "Failed to fetch code data";
pub const INVALID_BODY: &str = "Invalid request body";
