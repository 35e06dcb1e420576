//! Errors raised while talking to the remote record store.
//!
//! Only synchronization can fail. A `SyncError` never implies that local
//! word state was changed or rolled back.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The store answered with a non-success status.
    #[error("record store returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The request never produced a response (connect, timeout, TLS).
    #[error("record store unreachable: {0}")]
    Transport(String),
    /// The response body was not the expected JSON.
    #[error("malformed record store response: {0}")]
    Decode(String),
    /// Missing or invalid credentials or endpoint settings.
    #[error("record store misconfigured: {0}")]
    Config(String),
}

impl SyncError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SyncError::Http { status, .. } => *status == 429 || *status >= 500,
            SyncError::Transport(_) => true,
            SyncError::Decode(_) | SyncError::Config(_) => false,
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let rate_limited = SyncError::Http {
            status: 429,
            body: String::new(),
        };
        let server = SyncError::Http {
            status: 503,
            body: String::new(),
        };
        let forbidden = SyncError::Http {
            status: 403,
            body: String::new(),
        };
        assert!(rate_limited.is_transient());
        assert!(server.is_transient());
        assert!(!forbidden.is_transient());
        assert!(SyncError::Transport("reset".into()).is_transient());
        assert!(!SyncError::Decode("eof".into()).is_transient());
    }
}
