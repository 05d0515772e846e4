//! Keysend discovery response handling.

use serde::Deserialize;
use serde_json::Value;

use lnaddr_core::constants::{STATUS_OK, TAG_KEYSEND};
use lnaddr_core::error::{LnAddrError, Result};
use lnaddr_core::types::{CustomRecord, KeysendResponse};

/// Body of `/.well-known/keysend/{user}`.
#[derive(Debug, Deserialize)]
struct KeysendDiscovery {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    pubkey: Option<String>,
    #[serde(rename = "customData", default)]
    custom_data: Option<Vec<CustomRecord>>,
}

/// Validates a decoded keysend discovery body.
///
/// Requires `status == "OK"` and `tag == "keysend"`. A missing pubkey is
/// passed through as `None`; missing or null `customData` becomes empty.
pub(crate) fn parse_keysend(body: Value) -> Result<KeysendResponse> {
    if !body.is_object() {
        return Err(LnAddrError::ProtocolMismatch(
            "keysend response is not a JSON object".into(),
        ));
    }

    let discovery: KeysendDiscovery = serde_json::from_value(body).map_err(|e| {
        LnAddrError::ProtocolMismatch(format!("unexpected keysend response shape: {}", e))
    })?;

    if discovery.status.as_deref() != Some(STATUS_OK) {
        return Err(LnAddrError::ProtocolMismatch(format!(
            "keysend status is {:?}, expected {:?}",
            discovery.status, STATUS_OK
        )));
    }

    if discovery.tag.as_deref() != Some(TAG_KEYSEND) {
        return Err(LnAddrError::ProtocolMismatch(format!(
            "keysend tag is {:?}, expected {:?}",
            discovery.tag, TAG_KEYSEND
        )));
    }

    Ok(KeysendResponse {
        pubkey: discovery.pubkey,
        custom_data: discovery.custom_data.unwrap_or_default(),
    })
}
