//! The `del` command workflow
//!
//! - [`executor`] - one delete call per resolved request
//! - [`scanner`] - key-contains scan with optional per-match delete
//!
//! [`run_del`] picks exactly one of the two paths per invocation.

pub mod executor;
pub mod scanner;

use kvstore_core::api::DeleteRangeResponse;
use kvstore_core::{resolve, DeleteFlags, KeyValue, Result};
use tracing::debug;

use crate::store::{KvStore, RequestContext};
pub use executor::DeleteExecutor;
pub use scanner::{ContainsScanner, MatchOutcome, Matches};

/// Receives the observable events of a `del` run
pub trait DeleteReporter {
    /// A key matched the key-contains filter
    fn found(&mut self, kv: &KeyValue);

    /// A matched key is about to be deleted
    fn deleting(&mut self, kv: &KeyValue);

    /// A delete call succeeded.
    ///
    /// An error stops the run and is returned to the caller.
    fn deleted(&mut self, response: &DeleteRangeResponse) -> Result<()>;
}

/// Result of one `del` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelOutcome {
    /// Resolved request applied in a single delete call
    Deleted(DeleteRangeResponse),
    /// Key-contains scan, one entry per matching key
    Scanned(Vec<MatchOutcome>),
}

/// Run `del` with the given positional arguments and flags.
///
/// The arguments are always resolved first, so invalid arguments fail before
/// any store call in both modes. A non-empty `key_contains` then selects the
/// scan path, which discards the resolved request; only `execute` still
/// applies there.
///
/// # Errors
///
/// Returns [`kvstore_core::KvError::BadArgument`] for invalid arguments,
/// [`kvstore_core::KvError::Store`] for the first failed store call and
/// whatever the reporter returns from [`DeleteReporter::deleted`].
pub async fn run_del<S, R>(
    store: &S,
    ctx: &RequestContext,
    args: &[String],
    flags: &DeleteFlags,
    reporter: &mut R,
) -> Result<DelOutcome>
where
    S: KvStore + ?Sized,
    R: DeleteReporter + ?Sized,
{
    let request = resolve(args, flags)?;

    if flags.is_key_contains() {
        debug!("Key-contains mode, resolved range unused");
        let outcomes = ContainsScanner::new(store, flags.key_contains.as_bytes())
            .scan_and_delete(ctx, flags.execute, reporter)
            .await?;
        return Ok(DelOutcome::Scanned(outcomes));
    }

    debug!(?request, "Resolved delete request");

    let response = DeleteExecutor::new(store).execute(ctx, &request).await?;
    reporter.deleted(&response)?;
    Ok(DelOutcome::Deleted(response))
}
