//! Error types for Lightning Address resolution.
//!
//! Every variant except [`LnAddrError::ConfigError`] describes a recoverable
//! resolution failure. The resolver's primary operations collapse all of them
//! into "unresolved"; the `try_*` variants surface them for diagnostics.

use thiserror::Error;

/// Result type alias using `LnAddrError`.
pub type Result<T> = std::result::Result<T, LnAddrError>;

/// Main error type for all resolution operations.
#[derive(Debug, Error)]
pub enum LnAddrError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input is not a `user@domain` Lightning Address.
    #[error("Malformed Lightning Address '{address}': {reason}")]
    MalformedAddress { address: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Connection refused, DNS failure, TLS failure, or any other transport error.
    #[error("HTTP request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// Request exceeded the configured timeout.
    #[error("HTTP request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    // ═══════════════════════════════════════════════════════════════════════════
    // RESPONSE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Response body was empty or whitespace only.
    #[error("Empty response body from {0}")]
    EmptyResponse(String),

    /// Response body was not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Response was JSON but not the expected protocol shape.
    #[error("Protocol mismatch: {0}")]
    ProtocolMismatch(String),

    /// Requested amount lies outside `[minSendable, maxSendable]`.
    #[error("Amount {amount_msats} msats outside sendable range [{min_sendable}, {max_sendable}]")]
    AmountOutOfRange {
        amount_msats: u64,
        min_sendable: u64,
        max_sendable: u64,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid resolver configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LnAddrError {
    /// Returns true if the request never produced a response body.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            LnAddrError::Transport { .. } | LnAddrError::Timeout { .. }
        )
    }

    /// Returns true if a response arrived but did not satisfy the protocol.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            LnAddrError::EmptyResponse(_)
                | LnAddrError::InvalidJson(_)
                | LnAddrError::ProtocolMismatch(_)
        )
    }

    pub(crate) fn malformed(address: &str, reason: impl Into<String>) -> Self {
        LnAddrError::MalformedAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LnAddrError::AmountOutOfRange {
            amount_msats: 999,
            min_sendable: 1000,
            max_sendable: 500_000,
        };
        assert!(err.to_string().contains("999"));
        assert!(err.to_string().contains("[1000, 500000]"));
    }

    #[test]
    fn test_error_classification() {
        let transport = LnAddrError::Transport {
            url: "https://x".into(),
            reason: "connection refused".into(),
        };
        assert!(transport.is_transport_error());
        assert!(!transport.is_protocol_error());

        let timeout = LnAddrError::Timeout {
            url: "https://x".into(),
            seconds: 10,
        };
        assert!(timeout.is_transport_error());

        assert!(LnAddrError::EmptyResponse("https://x".into()).is_protocol_error());
        assert!(LnAddrError::ProtocolMismatch("bad tag".into()).is_protocol_error());
        assert!(!LnAddrError::ConfigError("zero".into()).is_transport_error());
        assert!(!LnAddrError::malformed("nobody", "missing '@'").is_protocol_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{oops");
        let converted: Result<serde_json::Value> = json_result.map_err(LnAddrError::from);
        assert!(matches!(converted, Err(LnAddrError::InvalidJson(_))));
    }
}
