//! Store abstraction and per-command request context
//!
//! [`KvStore`] is the seam between the delete workflows and the network
//! client, so the workflows can be driven by in-memory fakes in tests.
//! [`RequestContext`] bounds every call made on behalf of one command by a
//! shared deadline and a cancellation signal.

use async_trait::async_trait;
use kvstore_core::api::{DeleteRangeRequest, DeleteRangeResponse, RangeRequest, RangeResponse};
use kvstore_core::StoreError;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

/// Store operations used by the delete command
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the pairs covered by a range
    async fn get(&self, request: RangeRequest) -> Result<RangeResponse, StoreError>;

    /// Delete the pairs covered by a range
    async fn delete(&self, request: DeleteRangeRequest)
        -> Result<DeleteRangeResponse, StoreError>;
}

/// Deadline and cancellation shared by all store calls of one command
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Instant,
    cancelled: watch::Receiver<bool>,
}

/// Cancels the [`RequestContext`] it was created with
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Abort the in-flight call and every later call on the context.
    pub fn cancel(&self) {
        // Receivers may already be gone once the command finished
        let _ = self.sender.send(true);
    }
}

impl RequestContext {
    /// Create a context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> (Self, CancelHandle) {
        let (sender, cancelled) = watch::channel(false);
        let ctx = Self {
            deadline: Instant::now() + timeout,
            cancelled,
        };
        (ctx, CancelHandle { sender })
    }

    /// Instant after which calls fail with [`StoreError::DeadlineExceeded`].
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Run one store call under the context.
    ///
    /// The call is dropped if the deadline passes or the context is cancelled
    /// first. A context that is already cancelled never starts the call.
    pub async fn run<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        if self.is_cancelled() {
            return Err(StoreError::Canceled);
        }

        let mut cancelled = self.cancelled.clone();
        let cancellation = async move {
            if cancelled.wait_for(|c| *c).await.is_err() {
                // Handle dropped without cancelling: only the deadline applies
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = tokio::time::timeout_at(self.deadline, call) => match result {
                Ok(result) => result,
                Err(_) => {
                    debug!("Store call exceeded the command deadline");
                    Err(StoreError::DeadlineExceeded)
                }
            },
            _ = cancellation => {
                debug!("Store call cancelled");
                Err(StoreError::Canceled)
            }
        }
    }
}
