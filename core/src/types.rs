//! Record DTOs and the wire envelope.
//!
//! # Design
//! Every field is a plain value that defaults to zero when absent on the
//! wire, and zero-valued fields are skipped on output, so the JSON never
//! carries `null`, `0` or `""` placeholders. The envelope types are the only
//! way a record crosses the wire. The API sends `null` for unset values
//! (notably `prio`), which reads as zero.

use serde::{Deserialize, Deserializer, Serialize};

/// A single DNS resource record under a domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Record {
    /// Server-assigned identifier.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero_u64")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Host label relative to the domain; empty for the apex.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero_u32")]
    pub ttl: u32,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub record_type: String,
    /// Only meaningful for priority-bearing types such as MX and SRV.
    #[serde(rename = "prio", deserialize_with = "null_as_default", skip_serializing_if = "is_zero_u32")]
    pub priority: u32,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero_u64")]
    pub domain_id: u64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

impl Record {
    /// A record ready to be created: name, type and content.
    pub fn new(name: impl Into<String>, record_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Copy of this record without the fields the server assigns.
    pub(crate) fn without_server_fields(&self) -> Self {
        Self {
            id: 0,
            domain_id: 0,
            created_at: String::new(),
            updated_at: String::new(),
            ..self.clone()
        }
    }
}

/// The only fields an update request may carry.
///
/// Building one from a [`Record`] drops the identifiers, the type and the
/// timestamps, whatever their values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecordUpdate {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub ttl: u32,
    #[serde(rename = "prio", skip_serializing_if = "is_zero_u32")]
    pub priority: u32,
}

impl From<&Record> for RecordUpdate {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
            priority: record.priority,
        }
    }
}

/// Single-key wrapper every record payload travels in: `{"record": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub record: T,
}

impl<T> Envelope<T> {
    pub fn new(record: T) -> Self {
        Self { record }
    }

    pub fn into_inner(self) -> T {
        self.record
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fields_are_omitted() {
        let record = Record::new("www", "A", "192.0.2.1");
        let json = serde_json::to_value(Envelope::new(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"record": {"name": "www", "record_type": "A", "content": "192.0.2.1"}})
        );
    }

    #[test]
    fn decodes_sparse_record_with_zero_defaults() {
        let json = r#"{"record":{"name":"www","content":"192.0.2.1","record_type":"A"}}"#;
        let record = serde_json::from_str::<Envelope<Record>>(json).unwrap().into_inner();
        assert_eq!(record.name, "www");
        assert_eq!(record.content, "192.0.2.1");
        assert_eq!(record.record_type, "A");
        assert_eq!(record.id, 0);
        assert_eq!(record.ttl, 0);
        assert_eq!(record.priority, 0);
        assert_eq!(record.domain_id, 0);
        assert!(record.created_at.is_empty());
        assert!(record.updated_at.is_empty());
    }

    #[test]
    fn decodes_full_server_record() {
        let json = r#"{
            "id": 31, "domain_id": 28, "name": "", "content": "mx.example.com",
            "ttl": 3600, "prio": 10, "record_type": "MX",
            "created_at": "2013-01-29T14:25:38Z", "updated_at": "2013-01-29T14:25:38Z"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 31);
        assert_eq!(record.domain_id, 28);
        assert_eq!(record.priority, 10);
        assert_eq!(record.ttl, 3600);
        assert!(record.name.is_empty());
    }

    #[test]
    fn nulls_read_as_zero() {
        let json = r#"{"id":1,"name":null,"prio":null,"ttl":null,"content":"192.0.2.1"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.priority, 0);
        assert_eq!(record.ttl, 0);
        assert!(record.name.is_empty());
        assert_eq!(record.content, "192.0.2.1");
    }

    #[test]
    fn priority_uses_prio_on_the_wire() {
        let record = Record::new("", "MX", "mx.example.com").with_priority(10);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["prio"], 10);
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn update_drops_immutable_fields() {
        let attrs = Record {
            id: 99,
            domain_id: 7,
            name: "a".to_string(),
            content: "1.2.3.4".to_string(),
            record_type: "A".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            ..Record::default()
        };
        let json = serde_json::to_value(RecordUpdate::from(&attrs)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "a", "content": "1.2.3.4"}));
    }

    #[test]
    fn without_server_fields_keeps_caller_values() {
        let record = Record {
            id: 5,
            domain_id: 6,
            updated_at: "later".to_string(),
            ..Record::new("mail", "MX", "mx.example.com").with_ttl(600).with_priority(20)
        };
        let stripped = record.without_server_fields();
        assert_eq!(stripped, Record::new("mail", "MX", "mx.example.com").with_ttl(600).with_priority(20));
    }
}
