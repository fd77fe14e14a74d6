//! Error types and retry classification.

use thiserror::Error;

/// Failure identifiers a caller-side retry policy may safely retry on a
/// fresh attempt. Everything else is terminal at this layer.
const RETRYABLE: [&str; 5] = [
    "DriverError",
    "PoolConnectionError",
    "ECONNRESET",
    "ENOTFOUND",
    "ECONNREFUSED",
];

/// Failure surfaced by the underlying client library.
///
/// Clients report a symbolic error name and, for socket-level failures, an
/// OS error code. Both are matched against the transient allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct ClientError {
    /// Symbolic name, e.g. `DriverError`.
    pub name: String,
    /// OS-level code when present, e.g. `ECONNRESET`.
    pub code: Option<String>,
    pub message: String,
}

impl ClientError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Whether this failure is transient and safe to retry elsewhere.
    pub fn is_transient(&self) -> bool {
        RETRYABLE.contains(&self.name.as_str())
            || self
                .code
                .as_deref()
                .is_some_and(|code| RETRYABLE.contains(&code))
    }
}

/// Adapter-level error.
#[derive(Debug, Clone, Error)]
pub enum CqlError {
    /// The pool connect failed; every pending waiter observes this error.
    #[error("connect failed: {0}")]
    Connect(#[source] ClientError),

    /// Statement execution failed; the client error is carried unchanged.
    #[error("execute failed: {0}")]
    Execute(#[source] ClientError),

    /// The pool was closed; no further requests are accepted.
    #[error("pool is closed")]
    PoolClosed,

    /// Consistency name not present in the mapping table.
    #[error("unknown consistency level: {0}")]
    UnknownConsistency(String),

    /// A composite parameter could not be serialized to JSON text.
    #[error("parameter encoding failed: {0}")]
    Encode(String),
}

/// Result type for adapter operations.
pub type CqlResult<T> = Result<T, CqlError>;

impl CqlError {
    /// Retry classification. The adapter never retries on its own; the
    /// caller's retry policy consults this before a fresh attempt.
    pub fn can_retry(&self) -> bool {
        match self {
            Self::Connect(err) | Self::Execute(err) => err.is_transient(),
            _ => false,
        }
    }
}
