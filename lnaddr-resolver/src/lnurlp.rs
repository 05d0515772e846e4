//! LNURL-pay discovery and callback handling.
//!
//! The discovery body (LUD-06) carries the callback URL, the sendable range,
//! and the `payerData` schema (LUD-18) that decides which sender metadata is
//! forwarded. The callback body carries the invoice in `pr`.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use lnaddr_core::constants::{
    DEFAULT_MAX_SENDABLE_MSATS, DEFAULT_MIN_SENDABLE_MSATS, PARAM_AMOUNT, PARAM_COMMENT,
    PARAM_NAME, STATUS_ERROR, TAG_PAY_REQUEST,
};
use lnaddr_core::error::{LnAddrError, Result};
use lnaddr_core::traits::QueryParams;
use lnaddr_core::types::LnurlpResponse;

/// `payerData` key announcing that the receiver accepts a sender name.
const PAYER_DATA_NAME: &str = "name";

/// `payerData` key carrying the maximum comment length.
const PAYER_DATA_COMMENT_ALLOWED: &str = "commentAllowed";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayDiscoveryWire {
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    callback: Option<String>,
    #[serde(default)]
    min_sendable: Option<Number>,
    #[serde(default)]
    max_sendable: Option<Number>,
    #[serde(default)]
    payer_data: Option<Map<String, Value>>,
}

/// Validated discovery response. Lives for one resolution call.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PayDiscovery {
    pub(crate) callback: String,
    pub(crate) min_sendable: u64,
    pub(crate) max_sendable: u64,
    payer_data: Map<String, Value>,
}

impl PayDiscovery {
    /// Validates a decoded `/.well-known/lnurlp/{user}` body.
    pub(crate) fn parse(body: Value) -> Result<Self> {
        if !body.is_object() {
            return Err(LnAddrError::ProtocolMismatch(
                "lnurlp response is not a JSON object".into(),
            ));
        }

        let wire: PayDiscoveryWire = serde_json::from_value(body).map_err(|e| {
            LnAddrError::ProtocolMismatch(format!("unexpected lnurlp response shape: {}", e))
        })?;

        if wire.tag.as_deref() != Some(TAG_PAY_REQUEST) {
            return Err(LnAddrError::ProtocolMismatch(format!(
                "lnurlp tag is {:?}, expected {:?}",
                wire.tag, TAG_PAY_REQUEST
            )));
        }

        let callback = wire
            .callback
            .filter(|callback| !callback.is_empty())
            .ok_or_else(|| LnAddrError::ProtocolMismatch("lnurlp response has no callback".into()))?;

        let min_sendable = match wire.min_sendable {
            Some(number) => bound_msats("minSendable", &number, f64::ceil)?,
            None => DEFAULT_MIN_SENDABLE_MSATS,
        };
        let max_sendable = match wire.max_sendable {
            Some(number) => bound_msats("maxSendable", &number, f64::floor)?,
            None => DEFAULT_MAX_SENDABLE_MSATS,
        };

        Ok(Self {
            callback,
            min_sendable,
            max_sendable,
            payer_data: wire.payer_data.unwrap_or_default(),
        })
    }

    /// Checks `min_sendable <= amount_msats <= max_sendable`.
    pub(crate) fn check_amount(&self, amount_msats: u64) -> Result<()> {
        if amount_msats < self.min_sendable || amount_msats > self.max_sendable {
            return Err(LnAddrError::AmountOutOfRange {
                amount_msats,
                min_sendable: self.min_sendable,
                max_sendable: self.max_sendable,
            });
        }
        Ok(())
    }

    /// True if `payerData` declares a `name` entry, whatever its value.
    pub(crate) fn accepts_name(&self) -> bool {
        self.payer_data.contains_key(PAYER_DATA_NAME)
    }

    /// Maximum comment length in characters; 0 when comments are not accepted.
    pub(crate) fn comment_allowed(&self) -> usize {
        self.payer_data
            .get(PAYER_DATA_COMMENT_ALLOWED)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(|n| n.floor() as usize)
            .unwrap_or(0)
    }

    /// Builds the callback query: `amount`, then `name` and `comment` when
    /// both the caller supplied them and the receiver accepts them.
    pub(crate) fn callback_params(
        &self,
        amount_msats: u64,
        sender_name: &str,
        message: &str,
    ) -> QueryParams {
        let mut params = vec![(PARAM_AMOUNT.to_string(), amount_msats.to_string())];

        if !sender_name.is_empty() && self.accepts_name() {
            params.push((PARAM_NAME.to_string(), sender_name.to_string()));
        }

        let max_comment = self.comment_allowed();
        if !message.is_empty() && max_comment > 0 {
            params.push((
                PARAM_COMMENT.to_string(),
                truncate_chars(message, max_comment).to_string(),
            ));
        }

        params
    }
}

/// Converts a sendable bound to whole msats.
///
/// Integers pass through. Floats are rounded inward with `round` (ceil for
/// the lower bound, floor for the upper) so the inclusive comparison matches
/// a numeric one, and values beyond `u64::MAX` saturate. Negative bounds are
/// a protocol mismatch.
fn bound_msats(field: &str, number: &Number, round: fn(f64) -> f64) -> Result<u64> {
    if let Some(msats) = number.as_u64() {
        return Ok(msats);
    }

    let value = number
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| {
            LnAddrError::ProtocolMismatch(format!(
                "{} must be a non-negative number, got {}",
                field, number
            ))
        })?;

    let rounded = round(value);
    if rounded >= u64::MAX as f64 {
        Ok(u64::MAX)
    } else {
        Ok(rounded as u64)
    }
}

/// Cuts `text` to at most `max_chars` characters, on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Extracts the invoice from a decoded callback body.
pub(crate) fn parse_invoice(body: Value) -> Result<LnurlpResponse> {
    let object = body.as_object().ok_or_else(|| {
        LnAddrError::ProtocolMismatch("callback response is not a JSON object".into())
    })?;

    if let Some(invoice) = object
        .get("pr")
        .and_then(Value::as_str)
        .filter(|pr| !pr.is_empty())
    {
        return Ok(LnurlpResponse::new(invoice));
    }

    // LUD-06 error object: {"status": "ERROR", "reason": "..."}
    if object.get("status").and_then(Value::as_str) == Some(STATUS_ERROR) {
        let reason = object
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or("no reason given");
        return Err(LnAddrError::ProtocolMismatch(format!(
            "callback returned error: {}",
            reason
        )));
    }

    Err(LnAddrError::ProtocolMismatch(
        "callback response has no invoice".into(),
    ))
}
