use alloc::borrow::ToOwned;
use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::UnsupportedAlgorithm;

/// Digital Signature with ECDSA as defined in [section 3.4 of RFC 7518]
///
/// The value is serialized as the `alg` header parameter, e.g. `ES256`.
///
/// [section 3.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.4>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcDSA {
    /// ECDSA using P-256 and SHA-256
    #[serde(rename = "ES256")]
    Es256,
    /// ECDSA using P-384 and SHA-384
    #[serde(rename = "ES384")]
    Es384,
    /// ECDSA using P-521 and SHA-512
    #[serde(rename = "ES512")]
    Es512,
    /// ECDSA using secp256k1 curve and SHA-256
    ///
    /// ECDSA with secp256k1 is defined in [RFC 8812 section 3]
    ///
    /// [RFC 8812 section 3]: <https://datatracker.ietf.org/doc/html/rfc8812#section-3>
    #[serde(rename = "ES256K")]
    Es256K,
}

impl EcDSA {
    /// The registered `alg` name of this algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Es256 => "ES256",
            Self::Es384 => "ES384",
            Self::Es512 => "ES512",
            Self::Es256K => "ES256K",
        }
    }

    /// The name of the curve, as used in the `crv` parameter of a JWK.
    pub const fn curve_name(self) -> &'static str {
        match self {
            Self::Es256 => "P-256",
            Self::Es384 => "P-384",
            Self::Es512 => "P-521",
            Self::Es256K => "secp256k1",
        }
    }

    /// The width in bytes of each of the two integers `R` and `S` inside a
    /// JWS signature, which is the size of the curve order.
    ///
    /// A raw signature is always twice as long.
    pub const fn part_len(self) -> usize {
        match self {
            Self::Es256 | Self::Es256K => 32,
            Self::Es384 => 48,
            Self::Es512 => 66,
        }
    }
}

impl fmt::Display for EcDSA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EcDSA {
    type Err = UnsupportedAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ES256" => Ok(Self::Es256),
            "ES384" => Ok(Self::Es384),
            "ES512" => Ok(Self::Es512),
            "ES256K" => Ok(Self::Es256K),
            other => Err(UnsupportedAlgorithm(other.to_owned())),
        }
    }
}
