//! The inputs of a client secret and their defaults.
//!
//! [`ClientSecretConfig`] bundles everything that ends up inside the token
//! except for the private key:
//!
//! | setting     | used as | default                     |
//! |-------------|---------|-----------------------------|
//! | `algorithm` | `alg`   | `ES256`                     |
//! | `key_id`    | `kid`   | required                    |
//! | `team_id`   | `iss`   | required                    |
//! | `client_id` | `sub`   | required                    |
//! | `audience`  | `aud`   | `https://appleid.apple.com` |
//! | `validity`  | `exp`   | one day                     |

use alloc::string::String;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    claims::{Claims, ClaimsError},
    format::Compact,
    header::JwsHeader,
    jwa::EcDSA,
    jws::{JsonWebSignature, SignError, Signer},
};

/// The audience of Sign in with Apple.
pub const APPLE_AUDIENCE: &str = "https://appleid.apple.com";

/// One day, in seconds.
pub const DEFAULT_VALIDITY_SECS: u64 = 86_400;

/// Apple refuses client secrets that are valid for more than six months.
pub const MAX_VALIDITY_SECS: u64 = 15_777_000;

/// The errors returned while validating a [`ClientSecretConfig`] or
/// creating a client secret from it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required identifier is empty.
    #[error("the `{0}` setting must not be empty")]
    Empty(&'static str),

    /// The validity is zero or longer than [`MAX_VALIDITY_SECS`].
    #[error("a validity of {0} seconds is outside of 1..={max}", max = MAX_VALIDITY_SECS)]
    Validity(u64),

    /// The claims could not be built.
    #[error(transparent)]
    Claims(#[from] ClaimsError),

    /// The token could not be signed.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// The system clock reports a time before the Unix epoch.
    #[cfg(feature = "std")]
    #[error("the system clock is set before the Unix epoch")]
    Clock,
}

fn default_algorithm() -> EcDSA {
    EcDSA::Es256
}

fn default_audience() -> String {
    APPLE_AUDIENCE.into()
}

fn default_validity() -> u64 {
    DEFAULT_VALIDITY_SECS
}

/// The settings for a client secret.
///
/// Can be deserialized from any serde format, missing optional settings
/// take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSecretConfig {
    /// The signing algorithm, must match the private key.
    #[serde(default = "default_algorithm")]
    pub algorithm: EcDSA,
    /// The identifier of the private key.
    pub key_id: String,
    /// The team (developer account) identifier, the issuer of the token.
    pub team_id: String,
    /// The client (services) identifier, the subject of the token.
    pub client_id: String,
    /// The audience of the token.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// How long the token is valid, in seconds.
    #[serde(default = "default_validity")]
    pub validity: u64,
}

impl ClientSecretConfig {
    /// Creates a config with the default algorithm, audience and validity.
    pub fn new(
        team_id: impl Into<String>,
        key_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: default_algorithm(),
            key_id: key_id.into(),
            team_id: team_id.into(),
            client_id: client_id.into(),
            audience: default_audience(),
            validity: DEFAULT_VALIDITY_SECS,
        }
    }

    /// Replaces the signing algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: EcDSA) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Replaces the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Replaces the validity, in seconds.
    #[must_use]
    pub fn with_validity(mut self, validity: u64) -> Self {
        self.validity = validity;
        self
    }

    /// Checks the identifiers and the validity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] for an empty identifier and
    /// [`ConfigError::Validity`] for a validity outside of
    /// `1..=MAX_VALIDITY_SECS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("key_id", &self.key_id),
            ("team_id", &self.team_id),
            ("client_id", &self.client_id),
            ("audience", &self.audience),
        ];
        if let Some(&(name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::Empty(name));
        }

        if !(1..=MAX_VALIDITY_SECS).contains(&self.validity) {
            return Err(ConfigError::Validity(self.validity));
        }

        Ok(())
    }

    /// The protected header, `alg` and `kid`.
    pub fn header(&self) -> JwsHeader {
        JwsHeader::new(self.algorithm, self.key_id.as_str())
    }

    /// The claims of a token issued at `now` (seconds since the Unix epoch).
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or the expiry overflows.
    pub fn claims_at(&self, now: u64) -> Result<Claims, ConfigError> {
        self.validate()?;

        let claims = Claims::builder()
            .issuer(self.team_id.as_str())
            .subject(self.client_id.as_str())
            .audience(self.audience.as_str())
            .lifetime(now, self.validity)
            .build()?;

        Ok(claims)
    }

    /// Creates the client secret issued at `now` (seconds since the Unix
    /// epoch).
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or signing fails.
    pub fn sign_at<S: Signer + ?Sized>(
        &self,
        signer: &mut S,
        now: u64,
    ) -> Result<Compact, ConfigError> {
        let jws = JsonWebSignature::new(self.header(), self.claims_at(now)?);
        let token = jws.sign(signer)?;

        tracing::debug!(
            team_id = %self.team_id,
            client_id = %self.client_id,
            issued_at = now,
            validity = self.validity,
            "created client secret"
        );

        Ok(token)
    }

    /// Creates the client secret issued now, according to the system clock.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid, the clock is before the Unix epoch or
    /// signing fails.
    #[cfg(feature = "std")]
    pub fn sign<S: Signer + ?Sized>(&self, signer: &mut S) -> Result<Compact, ConfigError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| ConfigError::Clock)?
            .as_secs();

        self.sign_at(signer, now)
    }
}
