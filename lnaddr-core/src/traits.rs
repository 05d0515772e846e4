//! Transport interface for the resolver.
//!
//! The resolver never talks to the network directly. It hands every request
//! to an [`HttpRequester`], so production code can plug in a real client and
//! tests can plug in canned bodies.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// REQUEST / RESPONSE
// ═══════════════════════════════════════════════════════════════════════════════

/// HTTP method of a discovery request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters in the order they are appended to the URL.
pub type QueryParams = Vec<(String, String)>;

/// Raw HTTP response as seen by the resolver.
///
/// The status code is recorded for logging only; resolution decisions are
/// made on the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as text
    pub body: String,
}

impl HttpResponse {
    /// Creates a response from a status code and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// True if the body is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Decodes the body as JSON.
    ///
    /// A decode failure is an `Err`, never a default value.
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REQUESTER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for performing a single HTTP request.
///
/// Implementations must be safe to share across tasks; the resolver may be
/// cloned and used concurrently.
///
/// Errors returned here must be transport errors
/// ([`LnAddrError::Transport`](crate::LnAddrError::Transport) or
/// [`LnAddrError::Timeout`](crate::LnAddrError::Timeout)). Non-2xx statuses are
/// not errors at this layer.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    /// Issues `method url?params` and waits at most `timeout` for the body.
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(HttpResponse::new(200, "").is_blank());
        assert!(HttpResponse::new(200, " \n\t ").is_blank());
        assert!(!HttpResponse::new(200, "{}").is_blank());
    }

    #[test]
    fn test_json_distinguishes_failure() {
        let ok = HttpResponse::new(200, "{}");
        let value: serde_json::Value = ok.json().unwrap();
        assert!(value.as_object().unwrap().is_empty());

        let bad = HttpResponse::new(200, "<html>");
        assert!(bad.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
    }
}
