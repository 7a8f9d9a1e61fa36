use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// A snippet as held by the ephemeral store.
///
/// Only `code` is ever written by this crate. Anything else found in a stored
/// object is carried through untouched so reads return the record verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Snippet {
    pub code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snippet {
    pub fn new(code: String) -> Self {
        Self {
            code,
            extra: Map::new(),
        }
    }
}

/// Identifier of an ephemeral snippet.
///
/// Holding the id is enough to read the snippet, so it is drawn from the
/// OS random source (UUID v4) rather than anything sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnippetId(Uuid);

impl SnippetId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Full shape of a record in the durable `codes` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CodeRecord {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub title: String,
    pub description: String,
    pub code: String,
}

/// The `{title, code}` subset the share page needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CodeProjection {
    pub title: String,
    pub code: String,
}

impl From<CodeRecord> for CodeProjection {
    fn from(record: CodeRecord) -> Self {
        Self {
            title: record.title,
            code: record.code,
        }
    }
}

/// Data handed to whatever renders the share page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageData {
    pub title: String,
    pub code: String,
    pub url: String,
}

/// Body of a create request
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateRequest {
    pub code: String,
}

/// Body of a create response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generated_ids_are_hyphenated_v4() {
        let id = SnippetId::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(id.as_uuid().get_version_num(), 4);
        assert_eq!(text, text.to_lowercase());
    }

    #[test]
    fn new_snippet_serializes_to_code_only() {
        let encoded = serde_json::to_value(Snippet::new("fn main() {}".to_string())).unwrap();
        assert_eq!(encoded, json!({ "code": "fn main() {}" }));
    }

    #[test]
    fn unknown_fields_survive_a_read() {
        let snippet: Snippet =
            serde_json::from_value(json!({ "code": "x", "lang": "rust" })).unwrap();
        assert_eq!(snippet.code, "x");
        assert_eq!(snippet.extra.get("lang"), Some(&json!("rust")));
        assert_eq!(
            serde_json::to_value(&snippet).unwrap(),
            json!({ "code": "x", "lang": "rust" })
        );
    }

    #[test]
    fn non_textual_code_is_rejected() {
        assert!(serde_json::from_value::<Snippet>(json!({ "code": 42 })).is_err());
        assert!(serde_json::from_value::<Snippet>(json!({ "title": "t" })).is_err());
        assert!(serde_json::from_value::<Snippet>(json!(["code"])).is_err());
    }

    #[test]
    fn projection_drops_metadata() {
        let record = CodeRecord {
            id: "abc".to_string(),
            created_at: "2024-01-01 00:00:00.000Z".to_string(),
            updated_at: "2024-01-01 00:00:00.000Z".to_string(),
            title: "T".to_string(),
            description: "d".to_string(),
            code: "C".to_string(),
        };
        assert_eq!(
            CodeProjection::from(record),
            CodeProjection {
                title: "T".to_string(),
                code: "C".to_string()
            }
        );
    }
}
