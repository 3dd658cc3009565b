//! Key-contains scan: full keyspace read, client-side substring filter, and
//! optional per-match delete.
//!
//! The store is never asked to filter, so the scan costs as much as the
//! keyspace is large regardless of how many keys match.

use kvstore_core::api::{DeleteRangeResponse, RangeRequest};
use kvstore_core::keys::contains_bytes;
use kvstore_core::{KeyValue, StoreError};
use tracing::{debug, info};

use super::executor::DeleteExecutor;
use super::DeleteReporter;
use crate::store::{KvStore, RequestContext};

/// Keys from one scan that contain the substring, in scan order.
///
/// Iterating does not consume the matches, so they can be walked again from
/// the start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    kvs: Vec<KeyValue>,
    scanned: usize,
}

impl Matches {
    /// Filter scanned pairs down to those whose key contains `needle`.
    pub fn filter(scanned: Vec<KeyValue>, needle: &[u8]) -> Self {
        let total = scanned.len();
        let kvs = scanned
            .into_iter()
            .filter(|kv| contains_bytes(&kv.key, needle))
            .collect();
        Self {
            kvs,
            scanned: total,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.kvs.iter()
    }

    pub fn len(&self) -> usize {
        self.kvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kvs.is_empty()
    }

    /// Number of pairs the scan returned before filtering.
    pub fn scanned(&self) -> usize {
        self.scanned
    }
}

impl<'a> IntoIterator for &'a Matches {
    type Item = &'a KeyValue;
    type IntoIter = std::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What happened to one matching key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Reported only (dry run)
    Skipped(KeyValue),
    /// Reported and deleted
    Deleted(KeyValue, DeleteRangeResponse),
}

impl MatchOutcome {
    pub fn kv(&self) -> &KeyValue {
        match self {
            MatchOutcome::Skipped(kv) | MatchOutcome::Deleted(kv, _) => kv,
        }
    }
}

/// Finds, and optionally deletes, every key containing a substring
pub struct ContainsScanner<'a, S: ?Sized> {
    store: &'a S,
    substring: Vec<u8>,
}

impl<'a, S: KvStore + ?Sized> ContainsScanner<'a, S> {
    pub fn new(store: &'a S, substring: impl Into<Vec<u8>>) -> Self {
        Self {
            store,
            substring: substring.into(),
        }
    }

    /// Read the whole keyspace in one call and keep the matching keys.
    pub async fn scan(&self, ctx: &RequestContext) -> Result<Matches, StoreError> {
        let response = ctx.run(self.store.get(RangeRequest::all_keys())).await?;
        let matches = Matches::filter(response.kvs, &self.substring);
        debug!(
            scanned = matches.scanned(),
            matched = matches.len(),
            substring = %String::from_utf8_lossy(&self.substring),
            "Key-contains scan finished"
        );
        Ok(matches)
    }

    /// Scan, report every match, and delete each one when `execute` is set.
    ///
    /// Deletes run one at a time in scan order. The first failed delete, or
    /// the first reporter error, stops the run; keys after it are neither
    /// reported nor deleted.
    pub async fn scan_and_delete<R: DeleteReporter + ?Sized>(
        &self,
        ctx: &RequestContext,
        execute: bool,
        reporter: &mut R,
    ) -> kvstore_core::Result<Vec<MatchOutcome>> {
        let matches = self.scan(ctx).await?;
        let executor = DeleteExecutor::new(self.store);
        let mut outcomes = Vec::with_capacity(matches.len());

        for kv in &matches {
            reporter.found(kv);

            if !execute {
                outcomes.push(MatchOutcome::Skipped(kv.clone()));
                continue;
            }

            reporter.deleting(kv);
            let response = executor.delete_key(ctx, &kv.key).await?;
            reporter.deleted(&response)?;
            outcomes.push(MatchOutcome::Deleted(kv.clone(), response));
        }

        if !execute && !matches.is_empty() {
            info!(
                "Dry run: {} key(s) matched, pass --execute to delete them",
                matches.len()
            );
        }

        Ok(outcomes)
    }
}
