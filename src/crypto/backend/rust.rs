//! This backend implements the primitives using the [RustCrypto] ecosystem.
//!
//! [RustCrypto]: https://github.com/RustCrypto

use thiserror::Error;

use super::interface;

pub(crate) mod ec;

// TODO: remove the `cfg_attr` once the RustCrypto crates implement
// the core::error::Error trait.

/// The errors that can be produced by the rust crypto backend.
#[derive(Debug, Error)]
pub(crate) enum BackendError {
    /// The curve is not implemented by the RustCrypto crates we depend on.
    #[error("the {0} curve is not supported by the RustCrypto backend")]
    CurveNotSupported(&'static str),

    /// The private scalar is zero, out of range or has the wrong length.
    #[error("invalid EC private key: {0}")]
    EllipticCurve(elliptic_curve::Error),

    /// The PKCS#8 document could not be parsed or is for another curve.
    #[error("invalid PKCS#8 private key: {0}")]
    Pkcs8(elliptic_curve::pkcs8::Error),

    /// EcDSA signing failed.
    #[cfg_attr(feature = "std", error("an EcDSA operation failed"))]
    #[cfg_attr(not(feature = "std"), error("an EcDSA operation failed: {0}"))]
    Ecdsa(#[cfg_attr(feature = "std", source)] signature::Error),
}

impl From<elliptic_curve::Error> for BackendError {
    fn from(x: elliptic_curve::Error) -> Self {
        Self::EllipticCurve(x)
    }
}

impl From<elliptic_curve::pkcs8::Error> for BackendError {
    fn from(x: elliptic_curve::pkcs8::Error) -> Self {
        Self::Pkcs8(x)
    }
}

impl From<signature::Error> for BackendError {
    fn from(x: signature::Error) -> Self {
        Self::Ecdsa(x)
    }
}

/// The [RustCrypto] based backend.
///
/// [RustCrypto]: https://github.com/RustCrypto
#[derive(Debug)]
pub(crate) enum Backend {}

impl interface::Backend for Backend {
    type EcPrivateKey = ec::PrivateKey;
    type Error = BackendError;
}
