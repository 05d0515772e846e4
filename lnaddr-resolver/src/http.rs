//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use lnaddr_core::error::{LnAddrError, Result};
use lnaddr_core::traits::{HttpMethod, HttpRequester, HttpResponse};

/// [`HttpRequester`] over a shared `reqwest::Client`.
///
/// The timeout is applied per request, so one client can serve resolvers
/// with different configurations.
#[derive(Clone, Debug, Default)]
pub struct ReqwestRequester {
    http_client: reqwest::Client,
}

impl ReqwestRequester {
    /// Creates a requester with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a requester around an existing client (proxies, custom TLS roots).
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl HttpRequester for ReqwestRequester {
    #[instrument(skip(self, params))]
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let method = match method {
            HttpMethod::Get => reqwest::Method::GET,
        };

        let mut request = self.http_client.request(method, url).timeout(timeout);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(url, timeout, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(url, timeout, e))?;

        debug!(url, status, bytes = body.len(), "HTTP response received");
        Ok(HttpResponse::new(status, body))
    }
}

fn transport_error(url: &str, timeout: Duration, err: reqwest::Error) -> LnAddrError {
    if err.is_timeout() {
        LnAddrError::Timeout {
            url: url.to_string(),
            seconds: timeout.as_secs(),
        }
    } else {
        LnAddrError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
