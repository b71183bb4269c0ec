//! This backend implements the primitives using the [OpenSSL](openssl) library.

use alloc::string::String;

use thiserror::Error;

use super::interface;

pub(crate) mod ec;

#[allow(dead_code)] // may occurr when selecting different OpenSSL variant
#[derive(Debug, Error)]
pub(crate) enum BackendError {
    /// An error from the OpenSSL library.
    #[error(transparent)]
    OpenSsl(#[from] openssl::error::ErrorStack),

    /// The key inside a PKCS#8 document is for another curve.
    #[error("the private key is not on the {expected} curve")]
    CurveMismatch {
        /// The curve required by the algorithm.
        expected: &'static str,
    },

    /// A specific feature is not supported
    #[error("openssl variant does not support feature: {0}")]
    Unsupported(String),
}

/// The [OpenSSL](openssl) based backend.
#[derive(Debug)]
pub(crate) enum Backend {}

impl interface::Backend for Backend {
    type EcPrivateKey = ec::PrivateKey;
    type Error = BackendError;
}

/// Wrapper around a [`BigNum`](openssl::bn::BigNum) that is cleared on drop.
struct ZeroizingBigNum(openssl::bn::BigNum);

impl ZeroizingBigNum {
    fn from_slice(slice: &[u8]) -> Result<Self, BackendError> {
        let bn = openssl::bn::BigNum::from_slice(slice)?;
        Ok(Self(bn))
    }
}

impl Drop for ZeroizingBigNum {
    fn drop(&mut self) {
        self.0.clear();
    }
}
