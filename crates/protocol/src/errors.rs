//! The normalized error surfaced by every marketplace operation.
//!
//! [`A2eError`] has exactly two origins:
//!
//! - **Application**: the server answered with a non-zero envelope code. The
//!   caller can branch on [`A2eError::code`], which is the server code as a
//!   string (e.g. `"40001"`).
//! - **Transport**: anything else: connection failure, deadline exceeded,
//!   malformed JSON, a request that could not be built. [`A2eError::code`] is
//!   always [`A2eError::NETWORK_ERROR`]; [`TransportErrorKind`] refines the
//!   cause without changing the code.
//!
//! No error is fatal to a client instance. Nothing is retried.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Transport failure classification
// ---------------------------------------------------------------------------

/// What went wrong below the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    /// The configured deadline elapsed; the in-flight request was cancelled.
    Timeout,
    /// DNS resolution, TCP connect, TLS, or the connection dropped mid-call.
    Connect,
    /// The response body was not a valid envelope, or its payload did not match
    /// the expected result shape.
    Decode,
    /// The request could not be built or sent (bad URL, invalid header value,
    /// unserialisable body).
    Request,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Decode => "decode",
            Self::Request => "request",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Normalized error
// ---------------------------------------------------------------------------

/// The single failure type returned by [`crate::ServiceMarketplace`]
/// operations.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum A2eError {
    /// The server returned a non-zero envelope code.
    #[error("A2E error [{code}]: {message}")]
    Application {
        /// Envelope status code as sent by the server.
        code: i64,
        /// Server-provided human-readable message.
        message: String,
    },

    /// The call failed before a well-formed envelope was obtained.
    #[error("A2E error [NETWORK_ERROR] ({kind}): {message}")]
    Transport {
        /// Which layer the failure came from.
        kind: TransportErrorKind,
        /// Stringified description of the underlying cause.
        message: String,
    },
}

impl A2eError {
    /// Sentinel code shared by every transport-level failure.
    pub const NETWORK_ERROR: &'static str = "NETWORK_ERROR";

    /// Builds an error for a non-zero envelope code.
    pub fn application(code: i64, message: impl Into<String>) -> Self {
        Self::Application {
            code,
            message: message.into(),
        }
    }

    /// Builds a transport error of the given kind.
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    /// The normalized error code: the stringified server code for application
    /// errors, [`Self::NETWORK_ERROR`] for transport errors.
    pub fn code(&self) -> String {
        match self {
            Self::Application { code, .. } => code.to_string(),
            Self::Transport { .. } => Self::NETWORK_ERROR.to_string(),
        }
    }

    /// The server message, or the description of the transport failure.
    pub fn message(&self) -> &str {
        match self {
            Self::Application { message, .. } | Self::Transport { message, .. } => message,
        }
    }

    /// Returns `true` if the server rejected the call with a non-zero code.
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// Returns `true` if no well-formed envelope was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if the call was cancelled because its deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                kind: TransportErrorKind::Timeout,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_code_is_stringified_server_code() {
        for code in [1_i64, 40001, -7, 500_000] {
            let err = A2eError::application(code, "boom");
            assert_eq!(err.code(), code.to_string());
            assert_eq!(err.message(), "boom");
            assert!(err.is_application());
        }
    }

    #[test]
    fn transport_errors_share_sentinel_code() {
        for kind in [
            TransportErrorKind::Timeout,
            TransportErrorKind::Connect,
            TransportErrorKind::Decode,
            TransportErrorKind::Request,
        ] {
            let err = A2eError::transport(kind, "cause");
            assert_eq!(err.code(), "NETWORK_ERROR");
            assert!(err.is_transport());
            assert_eq!(err.is_timeout(), kind == TransportErrorKind::Timeout);
        }
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = A2eError::application(40001, "invalid code");
        assert_eq!(err.to_string(), "A2E error [40001]: invalid code");

        let err = A2eError::transport(TransportErrorKind::Timeout, "deadline of 5ms elapsed");
        assert_eq!(
            err.to_string(),
            "A2E error [NETWORK_ERROR] (timeout): deadline of 5ms elapsed"
        );
    }
}
