//! Implementation of the JSON Web Algorithms (JWA) for EcDSA signatures as
//! defined in [section 3.4 of RFC 7518]
//!
//! [section 3.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.4>

mod ecdsa;

use alloc::string::String;

use thiserror::Error;

#[doc(inline)]
pub use self::ecdsa::EcDSA;

/// The error returned if an `alg` value does not name a supported EcDSA
/// algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported signing algorithm `{0}`, expected one of ES256, ES384, ES512 or ES256K")]
pub struct UnsupportedAlgorithm(pub String);
