//! The protected [`JwsHeader`] of a client secret as defined in [section 4
//! of RFC 7515].
//!
//! [section 4 of RFC 7515]: <https://datatracker.ietf.org/doc/html/rfc7515#section-4>

use alloc::string::String;

use serde::Serialize;

use crate::jwa::EcDSA;

/// The JOSE header of a signed client secret.
///
/// Only the parameters an identity service expects from a client are
/// supported. They are serialized in a fixed order: `alg`, `kid` and, if
/// configured, `typ`.
///
/// # Example
///
/// ```
/// # use client_secret::{header::JwsHeader, jwa::EcDSA};
/// let header = JwsHeader::new(EcDSA::Es256, "K1");
///
/// assert_eq!(
///     serde_json::to_string(&header).unwrap(),
///     r#"{"alg":"ES256","kid":"K1"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct JwsHeader {
    /// Identifies the cryptographic algorithm used to secure the JWS.
    ///
    /// This is serialized as `alg`.
    #[serde(rename = "alg")]
    algorithm: EcDSA,
    /// Hint indicating which key was used to secure the JWS.
    ///
    /// This is serialized as `kid`.
    #[serde(rename = "kid")]
    key_id: String,
    /// This is used by the application to determine the type
    /// of the JWS.
    ///
    /// This is serialized as `typ`.
    #[serde(rename = "typ", skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
}

impl JwsHeader {
    /// Creates a new header for the given algorithm and key id.
    pub fn new(algorithm: EcDSA, key_id: impl Into<String>) -> Self {
        Self {
            algorithm,
            key_id: key_id.into(),
            media_type: None,
        }
    }

    /// Adds the `typ` parameter, e.g. `JWT`.
    ///
    /// Most identity services don't require it, so it is omitted by default.
    pub fn with_media_type(self, media_type: impl Into<String>) -> Self {
        Self {
            media_type: Some(media_type.into()),
            ..self
        }
    }

    /// The signing algorithm (`alg`).
    pub const fn algorithm(&self) -> EcDSA {
        self.algorithm
    }

    /// The key identifier (`kid`).
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// The type of the token (`typ`), if set.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typ_is_appended_last() {
        let header = JwsHeader::new(EcDSA::Es384, "ABC123DEFG").with_media_type("JWT");

        assert_eq!(header.media_type(), Some("JWT"));
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"alg":"ES384","kid":"ABC123DEFG","typ":"JWT"}"#
        );
    }
}
