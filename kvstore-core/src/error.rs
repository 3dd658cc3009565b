//! Error types for kvstore operations

use thiserror::Error;

/// Process exit code for a successful command.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code for store and configuration failures.
pub const EXIT_ERROR: i32 = 1;

/// Process exit code for argument and flag validation failures.
pub const EXIT_BAD_ARGS: i32 = 128;

/// Failure of a single store round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The request failed in transit
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success HTTP status
    #[error("HTTP {code} from {endpoint}: {message}")]
    Status {
        code: u16,
        endpoint: String,
        message: String,
    },

    /// The store answered with an error envelope
    #[error("server error at {endpoint}: {message}")]
    Server { endpoint: String, message: String },

    /// The response body could not be decoded
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The command deadline passed before the call completed
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// The command was cancelled while the call was in flight
    #[error("context canceled")]
    Canceled,
}

/// Core error type for kvstore commands
#[derive(Error, Debug)]
pub enum KvError {
    /// Wrong positional arguments or conflicting flags
    #[error("{0}")]
    BadArgument(String),

    /// A scan or delete call failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A result could not be rendered for output
    #[error("failed to render output: {0}")]
    Output(String),
}

impl KvError {
    /// Exit code the top-level dispatcher reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            KvError::BadArgument(_) => EXIT_BAD_ARGS,
            KvError::Store(_) | KvError::Config(_) | KvError::Output(_) => EXIT_ERROR,
        }
    }
}

/// Result type alias for kvstore operations
pub type Result<T> = std::result::Result<T, KvError>;
