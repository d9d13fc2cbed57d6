// src/types/job.rs
//! Job offers are owned by the catalogue; this crate only carries them around.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::swipe::JobId;

/// An externally-owned job offer.
///
/// Only `id` is interpreted. Every other field is kept as-is so the
/// payload serializes back exactly as the store returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Job {
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Parse a stored JSON document, returning `None` when it is not a job object.
    pub fn from_payload(payload: &str) -> Option<Self> {
        serde_json::from_str::<Value>(payload)
            .ok()
            .and_then(Self::from_value)
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_fields_survive_untouched() {
        let raw = json!({
            "id": "j1",
            "title": "Backend engineer",
            "salary_min": 52000,
            "remote": true,
            "tags": ["rust", "sql"]
        });

        let job = Job::from_value(raw.clone()).unwrap();
        assert_eq!(job.id.as_str(), "j1");
        assert_eq!(job.field("salary_min"), Some(&json!(52000)));
        assert_eq!(serde_json::to_value(&job).unwrap(), raw);
    }

    #[test]
    fn test_non_object_payloads_are_rejected() {
        assert!(Job::from_payload("[]").is_none());
        assert!(Job::from_payload("null").is_none());
        assert!(Job::from_payload("not json").is_none());
        assert!(Job::from_payload(r#"{"title": "no id"}"#).is_none());
        assert!(Job::from_payload(r#"{"id": "j9"}"#).is_some());
    }
}
