//! Named JSON schemas consumed by the extractor at job time.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A named JSON object describing the expected structure of extraction output.
///
/// Deletion does not retroactively invalidate queued jobs that reference it;
/// a job whose schema has since been deleted fails at extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique name.
    pub name: String,
    /// Arbitrary JSON object content.
    pub content: Value,
    /// When this schema was created.
    pub created_at: Timestamp,
}

impl Schema {
    /// Creates a new schema, rejecting non-object content.
    pub fn new(name: impl Into<String>, content: Value) -> Result<Self> {
        if !content.is_object() {
            return Err(Error::validation("schema content must be a JSON object"));
        }
        Ok(Self {
            name: name.into(),
            content,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_content() {
        let err = Schema::new("bad", json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn accepts_object_content() {
        let schema = Schema::new("invoice_v1", json!({"type": "object"})).unwrap();
        assert_eq!(schema.name, "invoice_v1");
    }
}
