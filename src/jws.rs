//! Creation of JSON Web Signatures (JWS) in compact serialization as defined
//! in [RFC 7515].
//!
//! A [`JsonWebSignature`] pairs a [`JwsHeader`] with the [`Claims`] and is
//! turned into a [`Compact`] token by signing it with a [`Signer`]:
//!
//! ```text
//! base64url(header) "." base64url(claims) "." base64url(R || S)
//! ```
//!
//! [RFC 7515]: <https://datatracker.ietf.org/doc/html/rfc7515>

use alloc::{string::String, vec::Vec};

use thiserror::Error;

use crate::{
    claims::Claims,
    der::{self, MalformedSignature},
    format::Compact,
    header::JwsHeader,
    jwa::EcDSA,
    Base64UrlString,
};

/// This trait represents anything that can create the signature of a JWS.
///
/// Implementations return the signature over the whole message as ASN.1 DER
/// `Ecdsa-Sig-Value` (`SEQUENCE { r INTEGER, s INTEGER }`), which is what
/// most EcDSA libraries, HSMs and key management services hand out. The
/// conversion into the fixed width JWS format happens in
/// [`JsonWebSignature::sign`].
///
/// [`crypto::ec::Signer`](crate::crypto::ec::Signer) is the implementation
/// backed by a local private key.
pub trait Signer {
    /// Signs `msg` and returns the DER encoded signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing operation fails.
    /// An error usually only appears when communicating with external signers.
    fn sign(&mut self, msg: &[u8]) -> Result<Vec<u8>, signature::Error>;

    /// Return the type of signing algorithm used by this signer.
    fn algorithm(&self) -> EcDSA;
}

impl<S: Signer + ?Sized> Signer for &mut S {
    fn sign(&mut self, msg: &[u8]) -> Result<Vec<u8>, signature::Error> {
        (**self).sign(msg)
    }

    fn algorithm(&self) -> EcDSA {
        (**self).algorithm()
    }
}

/// The errors that can occur while signing a [`JsonWebSignature`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignError {
    /// The signer uses a different algorithm than the one declared in the
    /// `alg` header parameter.
    #[error("the header declares {header} but the signer uses {signer}")]
    InvalidAlgorithm {
        /// The algorithm of the header.
        header: EcDSA,
        /// The algorithm of the signer.
        signer: EcDSA,
    },

    /// The header or the claims could not be serialized to JSON.
    #[cfg_attr(feature = "std", error("failed to serialize the JWS to JSON"))]
    #[cfg_attr(
        not(feature = "std"),
        error("failed to serialize the JWS to JSON: {0}")
    )]
    Serialize(#[cfg_attr(feature = "std", source)] serde_json::Error),

    /// The [`Signer`] failed.
    #[cfg_attr(feature = "std", error("the signer failed to create a signature"))]
    #[cfg_attr(
        not(feature = "std"),
        error("the signer failed to create a signature: {0}")
    )]
    Sign(#[cfg_attr(feature = "std", source)] signature::Error),

    /// The [`Signer`] returned something that is not a DER encoded EcDSA
    /// signature of the expected size.
    #[error("the signer returned a malformed signature")]
    Signature(#[from] MalformedSignature),
}

/// An unsigned JWS made of a protected header and the claims as payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonWebSignature {
    header: JwsHeader,
    claims: Claims,
}

impl JsonWebSignature {
    /// Creates a new JWS out of the header and the claims.
    pub const fn new(header: JwsHeader, claims: Claims) -> Self {
        Self { header, claims }
    }

    /// The header of this JWS.
    pub const fn header(&self) -> &JwsHeader {
        &self.header
    }

    /// The claims (payload) of this JWS.
    pub const fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Serializes the header and the claims to compact JSON and joins their
    /// Base64Url encodings with a `.`.
    ///
    /// This is the exact input of the signature.
    ///
    /// # Errors
    ///
    /// Fails if one of the values could not be serialized.
    pub fn signing_input(&self) -> Result<String, SignError> {
        let (header, claims) = self.encode_parts()?;
        Ok(join(&header, &claims))
    }

    /// Signs this JWS using the given signer and returns the compact token.
    ///
    /// The DER signature of the signer is converted into `R || S`, each
    /// integer left padded to the width of the algorithm in the header.
    ///
    /// # Errors
    ///
    /// - [`SignError::InvalidAlgorithm`] if the signer uses another algorithm
    ///   than the header declares
    /// - [`SignError::Serialize`] if the header or claims are not serializable
    /// - [`SignError::Sign`] if the signer fails
    /// - [`SignError::Signature`] if the signer returned a malformed signature
    pub fn sign<S: Signer + ?Sized>(&self, signer: &mut S) -> Result<Compact, SignError> {
        let algorithm = self.header.algorithm();
        if signer.algorithm() != algorithm {
            return Err(SignError::InvalidAlgorithm {
                header: algorithm,
                signer: signer.algorithm(),
            });
        }

        let (header, claims) = self.encode_parts()?;
        let signing_input = join(&header, &claims);

        tracing::debug!(
            alg = %algorithm,
            kid = self.header.key_id(),
            signing_input_len = signing_input.len(),
            "signing JWS"
        );

        let der = signer.sign(signing_input.as_bytes()).map_err(SignError::Sign)?;
        let raw = der::to_raw_signature(&der, algorithm.part_len())?;

        let mut compact = Compact::with_capacity(3);
        compact.push_base64url(header);
        compact.push_base64url(claims);
        compact.push(raw);
        Ok(compact)
    }

    fn encode_parts(&self) -> Result<(Base64UrlString, Base64UrlString), SignError> {
        let header = serde_json::to_vec(&self.header).map_err(SignError::Serialize)?;
        let claims = serde_json::to_vec(&self.claims).map_err(SignError::Serialize)?;
        Ok((
            Base64UrlString::encode(header),
            Base64UrlString::encode(claims),
        ))
    }
}

fn join(header: &str, claims: &str) -> String {
    let mut input = String::with_capacity(header.len() + claims.len() + 1);
    input.push_str(header);
    input.push('.');
    input.push_str(claims);
    input
}
