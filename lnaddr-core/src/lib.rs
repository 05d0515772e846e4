//! # LNADDR Core
//!
//! Core types, errors, and traits for resolving Lightning Addresses.
//!
//! This crate provides the building blocks shared by the resolver and the CLI:
//!
//! - **Types**: [`LightningAddress`] and the keysend / LNURL-pay result shapes
//! - **Errors**: The [`LnAddrError`] taxonomy of recoverable resolution failures
//! - **Constants**: Well-known paths, protocol tags, and defaults
//! - **Traits**: The [`HttpRequester`] transport seam
//!
//! ## Example
//!
//! ```rust
//! use lnaddr_core::LightningAddress;
//!
//! let address: LightningAddress = "alice@example.com".parse().unwrap();
//! assert_eq!(address.username(), "alice");
//! assert_eq!(
//!     address.keysend_url().unwrap().as_str(),
//!     "https://example.com/.well-known/keysend/alice"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{LnAddrError, Result};
pub use traits::*;
pub use types::*;
