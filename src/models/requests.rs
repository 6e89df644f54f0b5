//! Request DTOs for the command driver
//!
//! Each input line is one JSON object tagged by its `op` field.

use serde::Deserialize;

use crate::cache::{CacheItem, ItemId};

/// Maximum accepted header length in bytes
pub const MAX_HEADER_LENGTH: usize = 256;

/// A single driver command.
///
/// # Examples
/// - `{"op": "insert", "item": {"id": 1, "size": 50, "header": "a", "payload": "x"}, "policy": "mru"}`
/// - `{"op": "retrieve", "id": 1, "header": "a"}`
/// - `{"op": "update", "item": {"id": 1, "size": 20, "header": "a", "payload": "y"}}`
/// - `{"op": "clear"}`, `{"op": "stats"}`, `{"op": "snapshot"}`, `{"op": "dump"}`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Insert an item; `policy` is parsed leniently, absent means the default
    Insert {
        item: CacheItem,
        #[serde(default)]
        policy: Option<String>,
    },
    /// Check whether an id is cached in the shard its header routes to
    Retrieve { id: ItemId, header: String },
    /// Replace the cached item that has the same id
    Update { item: CacheItem },
    /// Empty every shard
    Clear,
    /// Aggregated statistics
    Stats,
    /// Structured contents of every shard
    Snapshot,
    /// Human-readable contents of every shard
    Dump,
}

impl Request {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let header = match self {
            Request::Insert { item, .. } | Request::Update { item } => item.header(),
            Request::Retrieve { header, .. } => header.as_str(),
            _ => return None,
        };
        if header.len() > MAX_HEADER_LENGTH {
            return Some(format!(
                "Header exceeds maximum length of {} bytes",
                MAX_HEADER_LENGTH
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_request_deserialize() {
        let json = r#"{"op": "insert", "item": {"id": 1, "size": 50, "header": "a", "payload": "x"}}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        match req {
            Request::Insert { item, policy } => {
                assert_eq!(item.id(), 1);
                assert_eq!(item.size(), 50);
                assert!(policy.is_none());
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_insert_request_with_policy() {
        let json = r#"{"op": "insert", "item": {"id": 1, "size": 5, "header": "a"}, "policy": "mru"}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert!(matches!(req, Request::Insert { policy: Some(p), .. } if p == "mru"));
    }

    #[test]
    fn test_unit_requests_deserialize() {
        let req: Request = serde_json::from_str(r#"{"op": "clear"}"#).unwrap();
        assert!(matches!(req, Request::Clear));
        let req: Request = serde_json::from_str(r#"{"op": "dump"}"#).unwrap();
        assert!(matches!(req, Request::Dump));
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"op": "delete", "id": 1}"#).is_err());
    }

    #[test]
    fn test_validate_long_header() {
        let req = Request::Retrieve {
            id: 1,
            header: "h".repeat(MAX_HEADER_LENGTH + 1),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = Request::Update {
            item: CacheItem::new(1, 10, "a", "x"),
        };
        assert!(req.validate().is_none());
        assert!(Request::Stats.validate().is_none());
    }
}
