//! Lightning Address parsing and well-known URL construction.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::constants::{DISCOVERY_SCHEME, KEYSEND_SEGMENT, LNURLP_SEGMENT, WELL_KNOWN_SEGMENT};
use crate::error::{LnAddrError, Result};

/// A validated `username@domain` Lightning Address.
///
/// Parsing splits on the single `@`. The domain must form a bare
/// `https://{domain}/` origin (an optional port is allowed), so a crafted
/// address can never smuggle a path, query, or userinfo into the
/// discovery URL.
///
/// # Example
/// ```
/// use lnaddr_core::LightningAddress;
///
/// let address = LightningAddress::parse("satoshi@pay.example.com").unwrap();
/// assert_eq!(address.domain(), "pay.example.com");
/// assert_eq!(
///     address.lnurlp_url().unwrap().as_str(),
///     "https://pay.example.com/.well-known/lnurlp/satoshi"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LightningAddress {
    username: String,
    domain: String,
}

impl LightningAddress {
    /// Parses a Lightning Address.
    ///
    /// Fails with [`LnAddrError::MalformedAddress`] when the input has no `@`,
    /// more than one `@`, an empty side, whitespace, or a domain that is not
    /// a bare host.
    pub fn parse(input: &str) -> Result<Self> {
        let (username, domain) = input
            .split_once('@')
            .ok_or_else(|| LnAddrError::malformed(input, "missing '@'"))?;

        if domain.contains('@') {
            return Err(LnAddrError::malformed(input, "more than one '@'"));
        }
        if username.is_empty() {
            return Err(LnAddrError::malformed(input, "empty username"));
        }
        if domain.is_empty() {
            return Err(LnAddrError::malformed(input, "empty domain"));
        }
        if input.chars().any(char::is_whitespace) {
            return Err(LnAddrError::malformed(input, "contains whitespace"));
        }
        // Dot segments are dropped during path construction.
        if username == "." || username == ".." {
            return Err(LnAddrError::malformed(input, "username is a dot segment"));
        }

        let origin = origin_url(domain).map_err(|reason| LnAddrError::malformed(input, reason))?;
        let bare_host = origin.host_str().is_some()
            && origin.path() == "/"
            && origin.query().is_none()
            && origin.fragment().is_none()
            && origin.username().is_empty()
            && origin.password().is_none();
        if !bare_host {
            return Err(LnAddrError::malformed(input, "domain must be a bare host"));
        }

        Ok(Self {
            username: username.to_string(),
            domain: domain.to_string(),
        })
    }

    /// The part before the `@`.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `https://{domain}/.well-known/keysend/{username}`
    pub fn keysend_url(&self) -> Result<Url> {
        self.well_known_url(KEYSEND_SEGMENT)
    }

    /// `https://{domain}/.well-known/lnurlp/{username}`
    pub fn lnurlp_url(&self) -> Result<Url> {
        self.well_known_url(LNURLP_SEGMENT)
    }

    fn well_known_url(&self, segment: &str) -> Result<Url> {
        let mut url = origin_url(&self.domain).map_err(|reason| {
            LnAddrError::malformed(&self.to_string(), reason)
        })?;

        url.path_segments_mut()
            .map_err(|_| LnAddrError::malformed(&self.to_string(), "cannot-be-a-base URL"))?
            .clear()
            .extend([WELL_KNOWN_SEGMENT, segment, self.username.as_str()]);

        Ok(url)
    }
}

fn origin_url(domain: &str) -> std::result::Result<Url, String> {
    Url::parse(&format!("{}://{}/", DISCOVERY_SCHEME, domain))
        .map_err(|e| format!("invalid domain: {}", e))
}

impl FromStr for LightningAddress {
    type Err = LnAddrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LightningAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_parse_splits_on_at() {
        let address = LightningAddress::parse("alice@example.com").unwrap();
        assert_eq!(address.username(), "alice");
        assert_eq!(address.domain(), "example.com");
        assert_eq!(address.to_string(), "alice@example.com");
    }

    #[test]
    fn test_well_known_urls() {
        let address: LightningAddress = "alice@example.com".parse().unwrap();

        assert_eq!(
            address.keysend_url().unwrap().as_str(),
            "https://example.com/.well-known/keysend/alice"
        );
        assert_eq!(
            address.lnurlp_url().unwrap().as_str(),
            "https://example.com/.well-known/lnurlp/alice"
        );
    }

    #[test]
    fn test_domain_with_port() {
        let address = LightningAddress::parse("bob@localhost:8443").unwrap();
        assert_eq!(
            address.lnurlp_url().unwrap().as_str(),
            "https://localhost:8443/.well-known/lnurlp/bob"
        );
    }

    #[test]
    fn test_username_is_percent_encoded() {
        let address = LightningAddress::parse("a/b%c@example.com").unwrap();
        assert_eq!(
            address.keysend_url().unwrap().as_str(),
            "https://example.com/.well-known/keysend/a%2Fb%25c"
        );
    }

    #[test_case("alice.example.com" ; "missing at")]
    #[test_case("" ; "empty input")]
    #[test_case("@example.com" ; "empty username")]
    #[test_case("alice@" ; "empty domain")]
    #[test_case("a@b@example.com" ; "two ats")]
    #[test_case("alice @example.com" ; "whitespace")]
    #[test_case("alice@example.com/evil" ; "domain with path")]
    #[test_case("alice@example.com?x=1" ; "domain with query")]
    #[test_case("alice@example.com#frag" ; "domain with fragment")]
    #[test_case("..@example.com" ; "dot segment username")]
    fn test_parse_rejects(input: &str) {
        let err = LightningAddress::parse(input).unwrap_err();
        assert!(matches!(err, LnAddrError::MalformedAddress { .. }));
    }

    proptest! {
        #[test]
        fn prop_inputs_without_at_never_parse(input in "[^@]*") {
            prop_assert!(LightningAddress::parse(&input).is_err());
        }

        #[test]
        fn prop_simple_addresses_round_trip(
            user in "[a-z0-9._-]{1,16}",
            host in "[a-z][a-z0-9-]{0,20}\\.[a-z]{2,6}",
        ) {
            prop_assume!(user != "." && user != "..");
            let input = format!("{}@{}", user, host);
            let address = LightningAddress::parse(&input).unwrap();
            prop_assert_eq!(address.username(), user.as_str());
            prop_assert_eq!(address.to_string(), input);
        }
    }
}
