//! Resolution results handed to the payment layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A custom TLV record advertised by a keysend endpoint, as string pairs.
pub type CustomRecord = BTreeMap<String, String>;

/// Result of a successful keysend discovery.
///
/// The pubkey is passed through as published; checking that it is a valid
/// secp256k1 point is left to the payment layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysendResponse {
    /// Node public key to send to (absent if the endpoint omitted it)
    pub pubkey: Option<String>,
    /// Custom records to attach to the payment, in endpoint order
    #[serde(rename = "customData", default)]
    pub custom_data: Vec<CustomRecord>,
}

/// Result of a successful LNURL-pay flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LnurlpResponse {
    /// BOLT11 payment request returned by the callback (`pr`)
    pub invoice: String,
}

impl LnurlpResponse {
    /// Creates a response from an invoice string.
    pub fn new(invoice: impl Into<String>) -> Self {
        Self {
            invoice: invoice.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keysend_response_wire_names() {
        let response = KeysendResponse {
            pubkey: Some("02ab".into()),
            custom_data: vec![CustomRecord::from([("key".to_string(), "value".to_string())])],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pubkey"], "02ab");
        assert_eq!(json["customData"][0]["key"], "value");
    }

    #[test]
    fn test_keysend_response_defaults_custom_data() {
        let response: KeysendResponse = serde_json::from_str(r#"{"pubkey":null}"#).unwrap();
        assert!(response.pubkey.is_none());
        assert!(response.custom_data.is_empty());
    }
}
