//! Domain types for Lightning Address resolution.
//!
//! - [`LightningAddress`]: A validated `username@domain` identifier
//! - [`KeysendResponse`]: Pubkey and custom records for a keysend payment
//! - [`LnurlpResponse`]: Invoice obtained through the LNURL-pay callback

mod address;
mod response;

pub use address::*;
pub use response::*;
