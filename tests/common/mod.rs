//! Common test helpers.

#![allow(dead_code)]

use client_secret::{crypto::ec::PrivateKey, jwa::EcDSA};
use hex_literal::hex;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// The P-256 private key of RFC 6979 appendix A.2.5.
pub const RFC6979_P256_D: [u8; 32] =
    hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");

/// Reads a PKCS#8 file from the `tests/vectors` directory.
pub fn read_vector(name: &str) -> TestResult<Vec<u8>> {
    let bytes = std::fs::read(format!(
        "{}/tests/vectors/{name}",
        env!("CARGO_MANIFEST_DIR"),
    ))?;

    Ok(bytes)
}

/// Loads the PEM encoded PKCS#8 key `tests/vectors/{name}.p8`.
pub fn read_pem_key(alg: EcDSA, name: &str) -> TestResult<PrivateKey> {
    let pem = String::from_utf8(read_vector(&format!("{name}.p8"))?)?;
    let key = PrivateKey::from_pkcs8_pem(alg, &pem)?;

    Ok(key)
}
