//! Delete request resolution
//!
//! Turns the positional arguments and flags of `del` into a single,
//! unambiguous [`DeleteRequest`]. Resolution is pure: it performs no I/O and
//! returns the same request for the same input.

use crate::error::{KvError, Result};
use crate::keys::{prefix_range_end, ZERO_KEY};

/// Flags accepted by the delete command.
///
/// Built once from parsed command-line arguments and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteFlags {
    /// Delete every key starting with the given key
    pub prefix: bool,
    /// Return the deleted key-value pairs
    pub prev_kv: bool,
    /// Delete every key greater than or equal to the given key
    pub from_key: bool,
    /// Scan the keyspace and delete keys containing this substring
    pub key_contains: String,
    /// Actually delete in key-contains mode instead of only listing matches
    pub execute: bool,
}

impl DeleteFlags {
    /// Whether the substring scan replaces the normal delete path.
    pub fn is_key_contains(&self) -> bool {
        !self.key_contains.is_empty()
    }
}

/// Upper bound of a resolved delete range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeEnd {
    /// Exclusive end given on the command line
    Explicit(Vec<u8>),
    /// Every key starting with the request key
    Prefix,
    /// Every key greater than or equal to the request key
    FromKey,
}

/// One resolved delete operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub key: Vec<u8>,
    /// `None` deletes exactly `key`
    pub range_end: Option<RangeEnd>,
    /// Ask the store to return the deleted pairs
    pub prev_kv: bool,
}

impl DeleteRequest {
    /// Delete a single key without returning previous values.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            range_end: None,
            prev_kv: false,
        }
    }

    /// Concrete range-end bytes for the store, `None` for a single key.
    pub fn range_end_bytes(&self) -> Option<Vec<u8>> {
        self.range_end.as_ref().map(|end| match end {
            RangeEnd::Explicit(bytes) => bytes.clone(),
            RangeEnd::Prefix => prefix_range_end(&self.key),
            RangeEnd::FromKey => ZERO_KEY.to_vec(),
        })
    }
}

/// Resolve `del` arguments and flags into a delete request.
///
/// # Errors
///
/// Returns [`KvError::BadArgument`] if:
/// - fewer than one or more than two arguments are given
/// - `--prefix` and `--from-key` are both set
/// - a range end is given together with `--prefix` or `--from-key`
pub fn resolve<S: AsRef<str>>(args: &[S], flags: &DeleteFlags) -> Result<DeleteRequest> {
    if args.is_empty() || args.len() > 2 {
        return Err(KvError::BadArgument(
            "del command needs one argument as key and an optional argument as range_end"
                .to_string(),
        ));
    }

    if flags.prefix && flags.from_key {
        return Err(KvError::BadArgument(
            "`--prefix` and `--from-key` cannot be set at the same time, choose one".to_string(),
        ));
    }

    let mut request = DeleteRequest::new(args[0].as_ref().as_bytes());

    if let Some(range_end) = args.get(1) {
        if flags.prefix || flags.from_key {
            return Err(KvError::BadArgument(
                "too many arguments, only accept one argument when `--prefix` or `--from-key` is set"
                    .to_string(),
            ));
        }
        request.range_end = Some(RangeEnd::Explicit(range_end.as_ref().as_bytes().to_vec()));
    }

    if flags.prefix {
        if request.key.is_empty() {
            // An empty prefix matches everything
            request.key = ZERO_KEY.to_vec();
            request.range_end = Some(RangeEnd::FromKey);
        } else {
            request.range_end = Some(RangeEnd::Prefix);
        }
    }

    request.prev_kv = flags.prev_kv;

    if flags.from_key {
        if request.key.is_empty() {
            request.key = ZERO_KEY.to_vec();
        }
        request.range_end = Some(RangeEnd::FromKey);
    }

    Ok(request)
}
