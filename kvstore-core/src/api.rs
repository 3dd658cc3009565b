//! API models for the kvstore HTTP gateway
//!
//! Request and response bodies for the range and delete-range endpoints.
//! Keys and values travel as JSON arrays of bytes.

use serde::{Deserialize, Serialize};

use crate::keys::ZERO_KEY;
use crate::op::DeleteRequest;
use crate::types::{KeyValue, ResponseHeader};

/// Path of the range (get) endpoint, relative to the store endpoint.
pub const RANGE_PATH: &str = "/v3/kv/range";

/// Path of the delete-range endpoint, relative to the store endpoint.
pub const DELETE_RANGE_PATH: &str = "/v3/kv/deleterange";

/// Generic API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ApiResponse<T> {
    #[serde(rename = "success")]
    Success { data: T },
    #[serde(rename = "error")]
    Error { error: String },
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Create an error response
    pub fn error(error: String) -> Self {
        Self::Error { error }
    }
}

/// Range (get) request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRequest {
    /// First key of the range
    pub key: Vec<u8>,
    /// Exclusive end of the range; empty for a single key, `[0x00]` for no upper bound
    #[serde(default)]
    pub range_end: Vec<u8>,
    /// Maximum number of pairs to return; 0 means no limit
    #[serde(default)]
    pub limit: i64,
}

impl RangeRequest {
    /// Request covering the entire keyspace.
    pub fn all_keys() -> Self {
        Self {
            key: ZERO_KEY.to_vec(),
            range_end: ZERO_KEY.to_vec(),
            limit: 0,
        }
    }
}

/// Range (get) response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeResponse {
    #[serde(default)]
    pub header: ResponseHeader,
    /// Matching pairs in ascending key order
    #[serde(default)]
    pub kvs: Vec<KeyValue>,
    /// Total number of keys in the range, regardless of limit
    #[serde(default)]
    pub count: i64,
}

/// Delete-range request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRangeRequest {
    /// First key of the range
    pub key: Vec<u8>,
    /// Exclusive end of the range; empty for a single key, `[0x00]` for no upper bound
    #[serde(default)]
    pub range_end: Vec<u8>,
    /// Return the deleted pairs
    #[serde(default)]
    pub prev_kv: bool,
}

impl DeleteRangeRequest {
    /// Delete exactly one key.
    pub fn single(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            range_end: Vec::new(),
            prev_kv: false,
        }
    }
}

impl From<&DeleteRequest> for DeleteRangeRequest {
    fn from(req: &DeleteRequest) -> Self {
        Self {
            key: req.key.clone(),
            range_end: req.range_end_bytes().unwrap_or_default(),
            prev_kv: req.prev_kv,
        }
    }
}

/// Delete-range response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRangeResponse {
    #[serde(default)]
    pub header: ResponseHeader,
    /// Number of keys removed
    pub deleted: i64,
    /// Removed pairs, present only when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prev_kvs: Vec<KeyValue>,
}
