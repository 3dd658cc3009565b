//! Single delete call against the store

use kvstore_core::api::{DeleteRangeRequest, DeleteRangeResponse};
use kvstore_core::{DeleteRequest, StoreError};
use tracing::debug;

use crate::store::{KvStore, RequestContext};

/// Issues resolved delete requests, one store call each
pub struct DeleteExecutor<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> DeleteExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Delete what `request` covers.
    ///
    /// Store failures are returned unchanged.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: &DeleteRequest,
    ) -> Result<DeleteRangeResponse, StoreError> {
        let wire = DeleteRangeRequest::from(request);
        debug!(
            key = %String::from_utf8_lossy(&wire.key),
            range_end = %String::from_utf8_lossy(&wire.range_end),
            prev_kv = wire.prev_kv,
            "Issuing delete"
        );

        let response = ctx.run(self.store.delete(wire)).await?;
        debug!(deleted = response.deleted, "Delete applied");
        Ok(response)
    }

    /// Delete exactly one key.
    pub async fn delete_key(
        &self,
        ctx: &RequestContext,
        key: &[u8],
    ) -> Result<DeleteRangeResponse, StoreError> {
        self.execute(ctx, &DeleteRequest::new(key)).await
    }
}
