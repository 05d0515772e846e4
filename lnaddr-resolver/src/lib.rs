//! # LNADDR Resolver
//!
//! Resolves Lightning Addresses (`user@domain`) into payable targets:
//!
//! - **Keysend**: `/.well-known/keysend/{user}` yields a node pubkey and custom records
//! - **LNURL-pay**: `/.well-known/lnurlp/{user}` yields a callback, which yields an invoice
//!
//! Every recoverable failure resolves to `None`. The `try_*` variants report
//! which step failed.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod http;
mod keysend;
mod lnurlp;
mod resolver;

pub use http::ReqwestRequester;
pub use resolver::{AddressResolver, ResolverConfig};

pub use lnaddr_core::{
    HttpMethod, HttpRequester, HttpResponse, KeysendResponse, LightningAddress, LnAddrError,
    LnurlpResponse,
};
