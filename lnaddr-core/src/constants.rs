//! Protocol constants for Lightning Address resolution.
//!
//! Paths and tags follow the LNURL well-known conventions (LUD-06, LUD-16)
//! and the keysend discovery endpoint served by Lightning Address providers.

// ═══════════════════════════════════════════════════════════════════════════════
// WELL-KNOWN PATHS
// ═══════════════════════════════════════════════════════════════════════════════

/// Scheme used for every discovery request.
pub const DISCOVERY_SCHEME: &str = "https";

/// First path segment of every discovery endpoint.
pub const WELL_KNOWN_SEGMENT: &str = ".well-known";

/// Path segment of the keysend discovery endpoint.
pub const KEYSEND_SEGMENT: &str = "keysend";

/// Path segment of the LNURL-pay discovery endpoint.
pub const LNURLP_SEGMENT: &str = "lnurlp";

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE TAGS
// ═══════════════════════════════════════════════════════════════════════════════

/// `status` value of a successful keysend discovery response.
pub const STATUS_OK: &str = "OK";

/// `status` value of an LNURL error response.
pub const STATUS_ERROR: &str = "ERROR";

/// `tag` value of a keysend discovery response.
pub const TAG_KEYSEND: &str = "keysend";

/// `tag` value of an LNURL-pay discovery response.
pub const TAG_PAY_REQUEST: &str = "payRequest";

// ═══════════════════════════════════════════════════════════════════════════════
// CALLBACK PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Query parameter carrying the requested amount in millisatoshis.
pub const PARAM_AMOUNT: &str = "amount";

/// Query parameter carrying the sender name (LUD-18 payer data).
pub const PARAM_NAME: &str = "name";

/// Query parameter carrying the payer comment (LUD-12).
pub const PARAM_COMMENT: &str = "comment";

// ═══════════════════════════════════════════════════════════════════════════════
// DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// `minSendable` used when the discovery response omits it.
pub const DEFAULT_MIN_SENDABLE_MSATS: u64 = 0;

/// `maxSendable` used when the discovery response omits it.
/// Nothing compares greater, so an absent upper bound never rejects.
pub const DEFAULT_MAX_SENDABLE_MSATS: u64 = u64::MAX;
