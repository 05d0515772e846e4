//! Lightning Address resolver combining keysend and LNURL-pay discovery.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use lnaddr_core::constants::DEFAULT_TIMEOUT_SECONDS;
use lnaddr_core::error::{LnAddrError, Result};
use lnaddr_core::traits::{HttpMethod, HttpRequester};
use lnaddr_core::types::{KeysendResponse, LightningAddress, LnurlpResponse};

use crate::http::ReqwestRequester;
use crate::keysend::parse_keysend;
use crate::lnurlp::{parse_invoice, PayDiscovery};

/// Resolver configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Per-request timeout in seconds (must be positive)
    pub timeout_seconds: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration with the given timeout.
    pub fn new(timeout_seconds: u64) -> Self {
        Self { timeout_seconds }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Rejects a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(LnAddrError::ConfigError(
                "timeout_seconds must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Resolves Lightning Addresses into keysend targets or LNURL-pay invoices.
///
/// Resolution is optimistic: any recoverable failure (malformed address,
/// transport error, empty or non-JSON body, protocol mismatch, amount out of
/// range) yields `None` so the caller can fall through to another payment
/// method. Use the `try_*` variants to learn which step failed.
///
/// The resolver holds no mutable state and is cheap to clone; every call does
/// fresh network I/O.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = AddressResolver::new();
/// if let Some(target) = resolver.resolve_keysend("alice@example.com").await {
///     pay_keysend(target.pubkey, target.custom_data).await?;
/// } else if let Some(pay) = resolver
///     .resolve_lnurlp("alice@example.com", 21_000, "Bob", "thanks!")
///     .await
/// {
///     pay_invoice(&pay.invoice).await?;
/// }
/// ```
#[derive(Clone)]
pub struct AddressResolver {
    requester: Arc<dyn HttpRequester>,
    config: ResolverConfig,
}

impl AddressResolver {
    /// Creates a resolver with the default configuration and a reqwest transport.
    pub fn new() -> Self {
        Self {
            requester: Arc::new(ReqwestRequester::new()),
            config: ResolverConfig::default(),
        }
    }

    /// Creates a resolver with custom configuration and a reqwest transport.
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        Self::with_requester(Arc::new(ReqwestRequester::new()), config)
    }

    /// Creates a resolver over any transport.
    pub fn with_requester(requester: Arc<dyn HttpRequester>, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { requester, config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Looks up the keysend target for `address`.
    ///
    /// Returns `None` when the address cannot be resolved via keysend.
    #[instrument(skip(self))]
    pub async fn resolve_keysend(&self, address: &str) -> Option<KeysendResponse> {
        match self.try_resolve_keysend(address).await {
            Ok(response) => Some(response),
            Err(e) => {
                debug!(address, error = %e, "Keysend resolution failed");
                None
            }
        }
    }

    /// Looks up the keysend target for `address`, reporting why it failed.
    ///
    /// # Flow
    /// 1. Parse `user@domain`
    /// 2. `GET https://{domain}/.well-known/keysend/{user}`
    /// 3. Require a non-blank JSON body with `status == "OK"` and `tag == "keysend"`
    pub async fn try_resolve_keysend(&self, address: &str) -> Result<KeysendResponse> {
        let address = LightningAddress::parse(address)?;
        let url = address.keysend_url()?;

        let body = self.fetch_json(url.as_str(), &[]).await?;
        let response = parse_keysend(body)?;

        info!(
            %address,
            pubkey = response.pubkey.as_deref().unwrap_or("<none>"),
            custom_records = response.custom_data.len(),
            "Resolved keysend target"
        );
        Ok(response)
    }

    /// Requests an invoice for `amount_msats` from the LNURL-pay service of `address`.
    ///
    /// `sender_name` and `message` are forwarded only if non-empty and
    /// accepted by the receiver; an empty string means "not provided".
    /// Returns `None` when no invoice can be obtained.
    #[instrument(skip(self, message))]
    pub async fn resolve_lnurlp(
        &self,
        address: &str,
        amount_msats: u64,
        sender_name: &str,
        message: &str,
    ) -> Option<LnurlpResponse> {
        match self
            .try_resolve_lnurlp(address, amount_msats, sender_name, message)
            .await
        {
            Ok(response) => Some(response),
            Err(e) => {
                debug!(address, amount_msats, error = %e, "LNURL-pay resolution failed");
                None
            }
        }
    }

    /// Requests an invoice via LNURL-pay, reporting why it failed.
    ///
    /// # Flow
    /// 1. Parse `user@domain`
    /// 2. `GET https://{domain}/.well-known/lnurlp/{user}` and require `tag == "payRequest"`
    ///    with a non-empty `callback`
    /// 3. Check `minSendable <= amount_msats <= maxSendable`
    /// 4. `GET {callback}?amount=..[&name=..][&comment=..]`
    /// 5. Require a non-empty `pr`
    pub async fn try_resolve_lnurlp(
        &self,
        address: &str,
        amount_msats: u64,
        sender_name: &str,
        message: &str,
    ) -> Result<LnurlpResponse> {
        let address = LightningAddress::parse(address)?;
        let url = address.lnurlp_url()?;

        let discovery = PayDiscovery::parse(self.fetch_json(url.as_str(), &[]).await?)?;
        discovery.check_amount(amount_msats)?;

        let params = discovery.callback_params(amount_msats, sender_name, message);
        debug!(
            %address,
            callback = %discovery.callback,
            min_sendable = discovery.min_sendable,
            max_sendable = discovery.max_sendable,
            params = params.len(),
            "Requesting invoice"
        );

        let body = self.fetch_json(&discovery.callback, &params).await?;
        let response = parse_invoice(body)?;

        info!(%address, amount_msats, "Obtained LNURL-pay invoice");
        Ok(response)
    }

    /// Issues one GET and decodes a non-blank JSON body.
    async fn fetch_json(&self, url: &str, params: &[(String, String)]) -> Result<Value> {
        let response = self
            .requester
            .request(HttpMethod::Get, url, params, self.config.timeout())
            .await?;

        debug!(url, status = response.status, "Response received");

        if response.is_blank() {
            return Err(LnAddrError::EmptyResponse(url.to_string()));
        }

        Ok(response.json()?)
    }
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lnaddr_core::traits::HttpResponse;

    /// Panics if the resolver touches the network.
    struct NoNetwork;

    #[async_trait]
    impl HttpRequester for NoNetwork {
        async fn request(
            &self,
            _method: HttpMethod,
            url: &str,
            _params: &[(String, String)],
            _timeout: Duration,
        ) -> Result<HttpResponse> {
            panic!("unexpected request to {}", url);
        }
    }

    fn offline_resolver() -> AddressResolver {
        AddressResolver::with_requester(Arc::new(NoNetwork), ResolverConfig::default()).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = ResolverConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ResolverConfig::default().with_timeout(3);
        assert_eq!(config, ResolverConfig::new(3));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = AddressResolver::with_requester(Arc::new(NoNetwork), ResolverConfig::new(0));
        assert!(matches!(result, Err(LnAddrError::ConfigError(_))));
    }

    #[test]
    fn test_config_serde() {
        let config: ResolverConfig = serde_json::from_str(r#"{"timeout_seconds":30}"#).unwrap();
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_malformed_address_skips_network() {
        let resolver = offline_resolver();

        assert!(tokio_test::block_on(resolver.resolve_keysend("not-an-address")).is_none());
        assert!(
            tokio_test::block_on(resolver.resolve_lnurlp("not-an-address", 1000, "", "")).is_none()
        );

        let err = tokio_test::block_on(resolver.try_resolve_keysend("a@b@c")).unwrap_err();
        assert!(matches!(err, LnAddrError::MalformedAddress { .. }));
    }
}
