//! The primitives for working with [EC (elliptic curve)](https://en.wikipedia.org/wiki/Elliptic-curve_cryptography)
//! private keys and the [`Signer`] that turns them into DER encoded EcDSA
//! signatures for a [`JsonWebSignature`](crate::JsonWebSignature).
//!
//! Which curves are available depends on the selected backend. The RustCrypto
//! backend supports P-256, P-384 and secp256k1. The OpenSSL backend
//! additionally supports P-521.

use alloc::vec::Vec;
use core::fmt;

use secrecy::SecretSlice;

use super::backend::{interface, Backend};
use crate::{
    crypto::{backend::interface::ec::PrivateKey as _, Result},
    jwa::EcDSA,
    jws, Base64UrlString,
};

type BackendPrivateKey = <Backend as interface::Backend>::EcPrivateKey;

/// An EC private key bound to one [`EcDSA`] algorithm.
///
/// The key material is never printed, the [`Debug`](fmt::Debug)
/// representation only shows the algorithm and the public point.
#[derive(Clone)]
pub struct PrivateKey {
    alg: EcDSA,
    inner: BackendPrivateKey,
}

impl PrivateKey {
    /// Generates a new random private key for the given algorithm.
    ///
    /// # Errors
    ///
    /// Fails if the backend does not support the curve of `alg`.
    pub fn generate(alg: EcDSA) -> Result<Self> {
        let inner = BackendPrivateKey::generate(alg)?;
        Ok(Self { alg, inner })
    }

    /// Creates a private key from the big endian encoded private scalar `d`.
    ///
    /// # Errors
    ///
    /// Fails if `d` is not a valid scalar for the curve of `alg`.
    pub fn from_bytes(alg: EcDSA, d: &[u8]) -> Result<Self> {
        let inner = BackendPrivateKey::new(alg, SecretSlice::from(d.to_vec()))?;
        Ok(Self { alg, inner })
    }

    /// Parses a DER encoded PKCS#8 private key.
    ///
    /// # Errors
    ///
    /// Fails if the document is malformed or holds a key for a curve other
    /// than the one of `alg`.
    pub fn from_pkcs8_der(alg: EcDSA, der: &[u8]) -> Result<Self> {
        let inner = BackendPrivateKey::from_pkcs8_der(alg, der)?;
        tracing::debug!(%alg, "loaded PKCS#8 private key");
        Ok(Self { alg, inner })
    }

    /// Parses a PEM encoded PKCS#8 private key, the format in which Apple
    /// hands out the `.p8` key files.
    ///
    /// # Errors
    ///
    /// Fails if the document is malformed or holds a key for a curve other
    /// than the one of `alg`.
    pub fn from_pkcs8_pem(alg: EcDSA, pem: &str) -> Result<Self> {
        let inner = BackendPrivateKey::from_pkcs8_pem(alg, pem)?;
        tracing::debug!(%alg, "loaded PKCS#8 private key");
        Ok(Self { alg, inner })
    }

    /// The algorithm this key signs with.
    pub const fn algorithm(&self) -> EcDSA {
        self.alg
    }

    /// Returns the affine coordinates `(x, y)` of the public key, each left
    /// padded to the size of the curve.
    pub fn public_point(&self) -> (Vec<u8>, Vec<u8>) {
        self.inner.public_point()
    }

    /// Turns this key into a [`Signer`].
    pub fn into_signer(self) -> Signer {
        Signer::new(self)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.public_point();
        f.debug_struct("PrivateKey")
            .field("alg", &self.alg)
            .field("x", &Base64UrlString::encode(x))
            .field("y", &Base64UrlString::encode(y))
            .finish_non_exhaustive()
    }
}

/// A [`jws::Signer`] that produces DER encoded EcDSA signatures using a
/// [`PrivateKey`].
#[derive(Debug, Clone)]
pub struct Signer {
    key: PrivateKey,
    deterministic: bool,
}

impl Signer {
    /// Creates a new signer.
    ///
    /// Signatures use random nonces unless the `deterministic-ecdsa` feature
    /// is enabled.
    pub fn new(key: PrivateKey) -> Self {
        Self {
            key,
            deterministic: cfg!(feature = "deterministic-ecdsa"),
        }
    }

    /// Selects deterministic nonces according to [RFC 6979].
    ///
    /// The OpenSSL backend only supports this on OpenSSL 3.2 and newer and
    /// fails every signing attempt otherwise.
    ///
    /// [RFC 6979]: <https://www.rfc-editor.org/rfc/rfc6979>
    #[must_use]
    pub fn deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }

    /// The key used by this signer.
    pub const fn key(&self) -> &PrivateKey {
        &self.key
    }
}

impl From<PrivateKey> for Signer {
    fn from(key: PrivateKey) -> Self {
        Self::new(key)
    }
}

impl jws::Signer for Signer {
    fn sign(&mut self, msg: &[u8]) -> core::result::Result<Vec<u8>, signature::Error> {
        self.key
            .inner
            .sign(msg, self.deterministic)
            .map_err(signature_error)
    }

    fn algorithm(&self) -> EcDSA {
        self.key.alg
    }
}

#[cfg(feature = "std")]
fn signature_error(err: super::Error) -> signature::Error {
    signature::Error::from_source(err)
}

#[cfg(not(feature = "std"))]
fn signature_error(err: super::Error) -> signature::Error {
    tracing::debug!(%err, "EcDSA signing failed");
    signature::Error::new()
}
