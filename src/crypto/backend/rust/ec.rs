use alloc::vec::Vec;

use elliptic_curve::{pkcs8::DecodePrivateKey as _, sec1::ToEncodedPoint as _, SecretKey};
use k256::Secp256k1;
use p256::NistP256;
use p384::NistP384;
use rand_core::OsRng;
use secrecy::{ExposeSecret as _, SecretSlice};
use signature::{RandomizedSigner as _, Signer as _};

use super::BackendError;
use crate::{
    crypto::{backend::interface::ec, Result},
    jwa::EcDSA,
};

#[derive(Clone)]
enum ErasedPrivateKey {
    P256(SecretKey<NistP256>),
    P384(SecretKey<NistP384>),
    Secp256k1(SecretKey<Secp256k1>),
}

/// A low level private EC key.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    inner: ErasedPrivateKey,
}

impl From<ErasedPrivateKey> for PrivateKey {
    fn from(inner: ErasedPrivateKey) -> Self {
        Self { inner }
    }
}

impl ec::PrivateKey for PrivateKey {
    fn generate(alg: EcDSA) -> Result<Self> {
        let mut rng = OsRng;

        let key = match alg {
            EcDSA::Es256 => ErasedPrivateKey::P256(SecretKey::random(&mut rng)),
            EcDSA::Es384 => ErasedPrivateKey::P384(SecretKey::random(&mut rng)),
            EcDSA::Es512 => return Err(BackendError::CurveNotSupported("P-521").into()),
            EcDSA::Es256K => ErasedPrivateKey::Secp256k1(SecretKey::random(&mut rng)),
        };

        Ok(key.into())
    }

    fn new(alg: EcDSA, d: SecretSlice<u8>) -> Result<Self> {
        let d = d.expose_secret();

        let key = match alg {
            EcDSA::Es256 => ErasedPrivateKey::P256(SecretKey::from_slice(d)?),
            EcDSA::Es384 => ErasedPrivateKey::P384(SecretKey::from_slice(d)?),
            EcDSA::Es512 => return Err(BackendError::CurveNotSupported("P-521").into()),
            EcDSA::Es256K => ErasedPrivateKey::Secp256k1(SecretKey::from_slice(d)?),
        };

        Ok(key.into())
    }

    fn from_pkcs8_der(alg: EcDSA, der: &[u8]) -> Result<Self> {
        // the curve OID of the document is checked against the requested curve
        let key = match alg {
            EcDSA::Es256 => ErasedPrivateKey::P256(SecretKey::from_pkcs8_der(der)?),
            EcDSA::Es384 => ErasedPrivateKey::P384(SecretKey::from_pkcs8_der(der)?),
            EcDSA::Es512 => return Err(BackendError::CurveNotSupported("P-521").into()),
            EcDSA::Es256K => ErasedPrivateKey::Secp256k1(SecretKey::from_pkcs8_der(der)?),
        };

        Ok(key.into())
    }

    fn from_pkcs8_pem(alg: EcDSA, pem: &str) -> Result<Self> {
        let key = match alg {
            EcDSA::Es256 => ErasedPrivateKey::P256(SecretKey::from_pkcs8_pem(pem)?),
            EcDSA::Es384 => ErasedPrivateKey::P384(SecretKey::from_pkcs8_pem(pem)?),
            EcDSA::Es512 => return Err(BackendError::CurveNotSupported("P-521").into()),
            EcDSA::Es256K => ErasedPrivateKey::Secp256k1(SecretKey::from_pkcs8_pem(pem)?),
        };

        Ok(key.into())
    }

    fn public_point(&self) -> (Vec<u8>, Vec<u8>) {
        match self.inner {
            ErasedPrivateKey::P256(ref key) => {
                let p = key.public_key().to_encoded_point(false);
                (
                    p.x().map(|a| a.to_vec()).unwrap_or_default(),
                    p.y().map(|a| a.to_vec()).unwrap_or_default(),
                )
            }
            ErasedPrivateKey::P384(ref key) => {
                let p = key.public_key().to_encoded_point(false);
                (
                    p.x().map(|a| a.to_vec()).unwrap_or_default(),
                    p.y().map(|a| a.to_vec()).unwrap_or_default(),
                )
            }
            ErasedPrivateKey::Secp256k1(ref key) => {
                let p = key.public_key().to_encoded_point(false);
                (
                    p.x().map(|a| a.to_vec()).unwrap_or_default(),
                    p.y().map(|a| a.to_vec()).unwrap_or_default(),
                )
            }
        }
    }

    fn sign(&mut self, data: &[u8], deterministic: bool) -> Result<Vec<u8>> {
        let der = match self.inner {
            ErasedPrivateKey::P256(ref key) => {
                let key = ecdsa::SigningKey::<NistP256>::from(key);

                let sig: ecdsa::Signature<NistP256> = if deterministic {
                    key.try_sign(data).map_err(BackendError::Ecdsa)?
                } else {
                    key.try_sign_with_rng(&mut OsRng, data)
                        .map_err(BackendError::Ecdsa)?
                };

                sig.to_der().as_bytes().to_vec()
            }
            ErasedPrivateKey::P384(ref key) => {
                let key = ecdsa::SigningKey::<NistP384>::from(key);

                let sig: ecdsa::Signature<NistP384> = if deterministic {
                    key.try_sign(data).map_err(BackendError::Ecdsa)?
                } else {
                    key.try_sign_with_rng(&mut OsRng, data)
                        .map_err(BackendError::Ecdsa)?
                };

                sig.to_der().as_bytes().to_vec()
            }
            ErasedPrivateKey::Secp256k1(ref key) => {
                let key = ecdsa::SigningKey::<Secp256k1>::from(key);

                let sig: ecdsa::Signature<Secp256k1> = if deterministic {
                    key.try_sign(data).map_err(BackendError::Ecdsa)?
                } else {
                    key.try_sign_with_rng(&mut OsRng, data)
                        .map_err(BackendError::Ecdsa)?
                };

                sig.to_der().as_bytes().to_vec()
            }
        };

        Ok(der)
    }
}
