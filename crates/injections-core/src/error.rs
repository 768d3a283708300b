//! Shared error type across injections crates.

use thiserror::Error;

/// Message used when a host handler fails without a usable description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Stable error codes, suitable for logs and host-side telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Provider method called before `enable()`.
    NotEnabled,
    /// Host handler reported a failure.
    Remote,
    /// Pending call hit its deadline.
    Timeout,
    /// Correlation key already in flight.
    DuplicateRequest,
    /// Malformed payload or envelope.
    BadRequest,
    /// Outbound channel refused the message.
    Transport,
    /// No webview left to deliver a response to.
    WebViewUnavailable,
    /// Invalid configuration.
    Config,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotEnabled => "NOT_ENABLED",
            ErrorCode::Remote => "REMOTE",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::DuplicateRequest => "DUPLICATE_REQUEST",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::WebViewUnavailable => "WEBVIEW_UNAVAILABLE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, InjectionError>;

/// Unified error type used by core and bridge.
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("Provider must be enabled before use")]
    NotEnabled,
    /// Carries the host's `error.message` verbatim.
    #[error("{0}")]
    Remote(String),
    #[error("request {id} ({msg_type}) timed out")]
    Timeout { id: u64, msg_type: &'static str },
    #[error("request {id} ({msg_type}) is already pending")]
    DuplicateRequest { id: u64, msg_type: &'static str },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("webview is no longer available")]
    WebViewUnavailable,
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl InjectionError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            InjectionError::NotEnabled => ErrorCode::NotEnabled,
            InjectionError::Remote(_) => ErrorCode::Remote,
            InjectionError::Timeout { .. } => ErrorCode::Timeout,
            InjectionError::DuplicateRequest { .. } => ErrorCode::DuplicateRequest,
            InjectionError::BadRequest(_) => ErrorCode::BadRequest,
            InjectionError::Transport(_) => ErrorCode::Transport,
            InjectionError::WebViewUnavailable => ErrorCode::WebViewUnavailable,
            InjectionError::Config(_) => ErrorCode::Config,
            InjectionError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<serde_json::Error> for InjectionError {
    fn from(e: serde_json::Error) -> Self {
        InjectionError::BadRequest(format!("json: {e}"))
    }
}
