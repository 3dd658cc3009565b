//! Store entities returned by range and delete calls

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::keys::spaced_hex;

/// Metadata attached to every store response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Store revision at the time the request was applied
    #[serde(default)]
    pub revision: i64,
}

/// A key-value pair as stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Key bytes
    pub key: Vec<u8>,
    /// Value bytes
    pub value: Vec<u8>,
    /// Revision of the last creation of this key
    #[serde(default)]
    pub create_revision: i64,
    /// Revision of the last modification of this key
    #[serde(default)]
    pub mod_revision: i64,
    /// Number of writes since creation
    #[serde(default)]
    pub version: i64,
}

impl KeyValue {
    /// Create a key-value pair with zeroed revision metadata.
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Key rendered as text, invalid UTF-8 replaced.
    pub fn key_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }

    /// Value rendered as text, invalid UTF-8 replaced.
    pub fn value_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    /// Exact key bytes as space separated hex.
    pub fn key_hex(&self) -> String {
        spaced_hex(&self.key)
    }
}
