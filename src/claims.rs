//! The registered claims carried by a client secret, see [section 4.1 of
//! RFC 7519].
//!
//! [section 4.1 of RFC 7519]: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1>

use alloc::string::String;

use serde::Serialize;
use thiserror::Error;

/// Errors returned by [`ClaimsBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ClaimsError {
    /// A required claim was never set on the builder.
    #[error("the `{0}` claim is missing")]
    MissingClaim(&'static str),
    /// The expiration time is not after the issuance time.
    #[error("claims expire at {expires_at} which is not after their issuance at {issued_at}")]
    InvalidLifetime {
        /// The `iat` claim.
        issued_at: u64,
        /// The `exp` claim.
        expires_at: u64,
    },
}

/// The payload of a client secret.
///
/// All times are seconds since the Unix epoch. The claims are serialized in
/// the order `iss`, `iat`, `exp`, `aud`, `sub`.
///
/// A [`Claims`] value can only be created through its [builder](Claims::builder)
/// which guarantees that `exp` lies after `iat`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Claims {
    /// The principal that issued the token, usually the team id.
    ///
    /// This is serialized as `iss`.
    #[serde(rename = "iss")]
    issuer: String,
    /// The time at which the token was issued.
    ///
    /// This is serialized as `iat`.
    #[serde(rename = "iat")]
    issued_at: u64,
    /// The time after which the token must not be accepted.
    ///
    /// This is serialized as `exp`.
    #[serde(rename = "exp")]
    expires_at: u64,
    /// The recipient the token is intended for.
    ///
    /// This is serialized as `aud`.
    #[serde(rename = "aud")]
    audience: String,
    /// The principal the token is about, usually the client id.
    ///
    /// This is serialized as `sub`.
    #[serde(rename = "sub")]
    subject: String,
}

impl Claims {
    /// Returns a new builder to construct [`Claims`].
    pub const fn builder() -> ClaimsBuilder {
        ClaimsBuilder {
            issuer: None,
            subject: None,
            audience: None,
            issued_at: None,
            expires_at: None,
        }
    }

    /// The `iss` claim.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// The `sub` claim.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The `aud` claim.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// The `iat` claim.
    pub const fn issued_at(&self) -> u64 {
        self.issued_at
    }

    /// The `exp` claim.
    pub const fn expires_at(&self) -> u64 {
        self.expires_at
    }
}

/// Builds [`Claims`].
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<String>,
    issued_at: Option<u64>,
    expires_at: Option<u64>,
}

impl ClaimsBuilder {
    /// Sets the `iss` claim.
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the `sub` claim.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the `aud` claim.
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Sets the `iat` claim.
    pub fn issued_at(mut self, issued_at: u64) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    /// Sets the `exp` claim.
    pub fn expires_at(mut self, expires_at: u64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Sets `iat` to `issued_at` and `exp` to `validity_secs` seconds later.
    pub fn lifetime(self, issued_at: u64, validity_secs: u64) -> Self {
        self.issued_at(issued_at)
            .expires_at(issued_at.saturating_add(validity_secs))
    }

    /// Finalizes this builder.
    ///
    /// # Errors
    ///
    /// Fails if a claim is missing or `exp` is not after `iat`.
    pub fn build(self) -> Result<Claims, ClaimsError> {
        let issuer = self.issuer.ok_or(ClaimsError::MissingClaim("iss"))?;
        let subject = self.subject.ok_or(ClaimsError::MissingClaim("sub"))?;
        let audience = self.audience.ok_or(ClaimsError::MissingClaim("aud"))?;
        let issued_at = self.issued_at.ok_or(ClaimsError::MissingClaim("iat"))?;
        let expires_at = self.expires_at.ok_or(ClaimsError::MissingClaim("exp"))?;

        if expires_at <= issued_at {
            return Err(ClaimsError::InvalidLifetime {
                issued_at,
                expires_at,
            });
        }

        Ok(Claims {
            issuer,
            issued_at,
            expires_at,
            audience,
            subject,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ClaimsBuilder {
        Claims::builder()
            .issuer("TEAM1")
            .subject("com.example.app")
            .audience("https://appleid.apple.com")
    }

    #[test]
    fn serializes_in_order() {
        let claims = builder().lifetime(1000, 86400).build().unwrap();

        assert_eq!(claims.expires_at(), 87400);
        assert_eq!(
            serde_json::to_string(&claims).unwrap(),
            r#"{"iss":"TEAM1","iat":1000,"exp":87400,"aud":"https://appleid.apple.com","sub":"com.example.app"}"#
        );
    }

    #[test]
    fn expiry_must_follow_issuance() {
        assert_eq!(
            builder().lifetime(1000, 0).build(),
            Err(ClaimsError::InvalidLifetime {
                issued_at: 1000,
                expires_at: 1000
            })
        );
        assert_eq!(
            builder().issued_at(1000).expires_at(999).build(),
            Err(ClaimsError::InvalidLifetime {
                issued_at: 1000,
                expires_at: 999
            })
        );
    }

    #[test]
    fn missing_claims_are_reported() {
        assert_eq!(
            Claims::builder().issuer("TEAM1").build(),
            Err(ClaimsError::MissingClaim("sub"))
        );
        assert_eq!(
            builder().expires_at(10).build(),
            Err(ClaimsError::MissingClaim("iat"))
        );
    }
}
