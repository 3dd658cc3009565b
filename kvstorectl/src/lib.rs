//! kvstore CLI Library
//!
//! This library provides the `del` workflow of the kvstorectl tool.
//!
//! # Public API
//!
//! [`client::KvClient`] talks to the store gateway and implements
//! [`store::KvStore`]. [`del::run_del`] drives one `del` invocation against
//! any store implementation.
//!
//! ```no_run
//! use kvstore_core::DeleteFlags;
//! use kvstorectl::client::KvClient;
//! use kvstorectl::del::{run_del, DelOutcome};
//! use kvstorectl::format::{OutputFormat, Printer};
//! use kvstorectl::store::RequestContext;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = KvClient::new("http://127.0.0.1:2379", 5)?;
//! let (ctx, _cancel) = RequestContext::with_timeout(Duration::from_secs(5));
//! let flags = DeleteFlags {
//!     prefix: true,
//!     ..DeleteFlags::default()
//! };
//! let mut printer = Printer::new(OutputFormat::Simple);
//!
//! let outcome = run_del(&client, &ctx, &["app/".to_string()], &flags, &mut printer).await?;
//! if let DelOutcome::Deleted(response) = outcome {
//!     println!("removed {} key(s)", response.deleted);
//! }
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for the store gateway.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

pub mod del;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Store seam and per-command request context.
pub mod store;

#[cfg(test)]
pub mod test_utils;
