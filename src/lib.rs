//! Creates client secrets for Sign in with Apple and other OAuth 2.0 servers
//! that authenticate clients with an EcDSA signed JWT.
//!
//! A client secret is a compact JWS whose header names the key (`alg`, `kid`)
//! and whose payload carries the `iss`, `iat`, `exp`, `aud` and `sub` claims.
//! The signature is created by a [`Signer`] that returns the usual ASN.1 DER
//! encoding, which is converted into the fixed width `R || S` form JWS
//! requires.
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use client_secret::{crypto::ec::PrivateKey, jwa::EcDSA, ClientSecretConfig};
//!
//! let key = PrivateKey::generate(EcDSA::Es256)?;
//! let mut signer = key.into_signer();
//!
//! let config = ClientSecretConfig::new("TEAM1", "K1", "com.example.app");
//! let token = config.sign_at(&mut signer, 1000)?;
//!
//! assert_eq!(token.len(), 3);
//! assert_eq!(token.to_string().matches('.').count(), 2);
//! # Ok(())
//! # }
//! ```
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]
#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod base64_url;
pub mod claims;
pub mod config;
pub mod crypto;
pub mod der;
pub mod format;
pub mod header;
pub mod jwa;
pub mod jws;

pub use base64_url::Base64UrlString;
pub use claims::Claims;
pub use config::ClientSecretConfig;
pub use format::Compact;
pub use header::JwsHeader;
pub use jws::{JsonWebSignature, SignError, Signer};
