//! kvstore Core Library
//!
//! Shared types, wire models, and delete resolution for the kvstore CLI.
//! Nothing in this crate performs I/O; the CLI crate supplies the store client.

pub mod api;
pub mod error;
pub mod keys;
pub mod op;
pub mod types;

// Re-export commonly used types
pub use error::*;
pub use op::{resolve, DeleteFlags, DeleteRequest, RangeEnd};
pub use types::*;
