mod common;

use client_secret::{
    base64_url,
    crypto::ec::PrivateKey,
    jwa::EcDSA,
    ClientSecretConfig, Compact, JsonWebSignature, JwsHeader, SignError, Signer,
};
use common::{read_pem_key, read_vector, TestResult, RFC6979_P256_D};
use hex_literal::hex;

const HEADER: &str = r#"{"alg":"ES256","kid":"K1"}"#;
const CLAIMS: &str = r#"{"iss":"TEAM1","iat":1000,"exp":87400,"aud":"https://appleid.apple.com","sub":"com.example.app"}"#;

fn config() -> ClientSecretConfig {
    ClientSecretConfig::new("TEAM1", "K1", "com.example.app")
}

fn assert_well_formed(token: &Compact, part_len: usize) -> TestResult {
    let token = token.to_string();
    assert_eq!(token.matches('.').count(), 2);

    let parts = token.split('.').collect::<Vec<_>>();
    for part in &parts {
        assert!(!part.contains(['+', '/', '=']));
        base64_url::decode(part)?;
    }

    assert_eq!(base64_url::decode(parts[2])?.len(), 2 * part_len);
    Ok(())
}

#[test]
fn token_contains_header_and_claims() -> TestResult {
    let mut signer = PrivateKey::from_bytes(EcDSA::Es256, &RFC6979_P256_D)?.into_signer();
    let token = config().sign_at(&mut signer, 1000)?;

    assert_well_formed(&token, 32)?;

    let header = token.part(0).ok_or("missing header")?.decode();
    let claims = token.part(1).ok_or("missing claims")?.decode();
    assert_eq!(String::from_utf8(header)?, HEADER);
    assert_eq!(String::from_utf8(claims)?, CLAIMS);

    Ok(())
}

#[test]
fn token_parses_back() -> TestResult {
    let mut signer = PrivateKey::generate(EcDSA::Es256)?.into_signer();
    let token = config().sign_at(&mut signer, 1000)?;

    let parsed: Compact = token.to_string().parse()?;
    assert_eq!(parsed, token);
    Ok(())
}

#[test]
fn public_point_of_fixed_key() -> TestResult {
    let key = PrivateKey::from_bytes(EcDSA::Es256, &RFC6979_P256_D)?;
    let (x, y) = key.public_point();

    assert_eq!(
        x,
        hex!("60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6")
    );
    assert_eq!(
        y,
        hex!("7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299")
    );
    Ok(())
}

#[test]
fn pkcs8_pem_and_der_load_the_same_key() -> TestResult {
    let pem = read_pem_key(EcDSA::Es256, "es256")?;
    let der = PrivateKey::from_pkcs8_der(EcDSA::Es256, &read_vector("es256.der")?)?;

    let expected = (
        hex!("c5e6e4ce5e7fb1309b19e9f369830c2f3a4184e078040db49f3f4799998d6df1").to_vec(),
        hex!("f6c34cbb2896ee4ca8aee62597617d23810f2962dfab3c24af224c7e6b41cb4c").to_vec(),
    );
    assert_eq!(pem.public_point(), expected);
    assert_eq!(der.public_point(), expected);
    Ok(())
}

#[test]
fn pkcs8_key_of_other_curve_is_rejected() {
    assert!(read_pem_key(EcDSA::Es384, "es256").is_err());
    assert!(read_pem_key(EcDSA::Es256, "es384").is_err());
}

#[test]
fn debug_does_not_leak_the_private_scalar() -> TestResult {
    let key = PrivateKey::from_bytes(EcDSA::Es256, &RFC6979_P256_D)?;
    let debug = format!("{key:?}");

    assert!(debug.contains("Es256"));
    assert!(!debug.contains(&base64_url::encode(RFC6979_P256_D)));
    assert!(!debug.to_lowercase().contains("c9afa9d8"));
    Ok(())
}

#[test]
fn signer_must_match_header_algorithm() -> TestResult {
    let mut signer = read_pem_key(EcDSA::Es384, "es384")?.into_signer();

    let config = config();
    let jws = JsonWebSignature::new(
        JwsHeader::new(EcDSA::Es256, "K1"),
        config.claims_at(1000)?,
    );

    assert!(matches!(
        jws.sign(&mut signer),
        Err(SignError::InvalidAlgorithm {
            header: EcDSA::Es256,
            signer: EcDSA::Es384,
        })
    ));
    Ok(())
}

#[test]
fn es384_and_es256k_tokens() -> TestResult {
    for (alg, name) in [(EcDSA::Es384, "es384"), (EcDSA::Es256K, "es256k")] {
        let mut signer = read_pem_key(alg, name)?.into_signer();
        assert_eq!(signer.algorithm(), alg);

        let token = config().with_algorithm(alg).sign_at(&mut signer, 1000)?;
        assert_well_formed(&token, alg.part_len())?;
    }
    Ok(())
}

#[test]
fn signs_with_system_clock() -> TestResult {
    let mut signer = PrivateKey::generate(EcDSA::Es256)?.into_signer();
    let config = config().with_validity(3600);

    let before = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let token = config.sign(&mut signer)?;

    let claims: serde_json::Value =
        serde_json::from_slice(&token.part(1).ok_or("missing claims")?.decode())?;
    let iat = claims["iat"].as_u64().ok_or("iat is not a number")?;
    let exp = claims["exp"].as_u64().ok_or("exp is not a number")?;

    assert!(iat >= before);
    assert_eq!(exp - iat, 3600);
    Ok(())
}

#[cfg(feature = "crypto-rustcrypto")]
mod rustcrypto {
    use p256::ecdsa::{signature::Verifier as _, Signature, VerifyingKey};

    use super::*;

    const TOKEN: &str = "eyJhbGciOiJFUzI1NiIsImtpZCI6IksxIn0.\
        eyJpc3MiOiJURUFNMSIsImlhdCI6MTAwMCwiZXhwIjo4NzQwMCwiYXVkIjoiaHR0cHM6Ly9hcHBsZWlkLmFwcGxlLmNvbSIsInN1YiI6ImNvbS5leGFtcGxlLmFwcCJ9.\
        k4bQeiAkIlQ8XB42Cq2a9_uGVa76VIZk7BeyNv-YtCNVD0iDDn4bOguUl9sT7hFfkwvEOZs1ubpdz3v_7EHg2Q";

    fn verify_es256(token: &Compact, key: &PrivateKey) -> TestResult {
        let (x, y) = key.public_point();
        let point = p256::EncodedPoint::from_affine_coordinates(
            p256::FieldBytes::from_slice(&x),
            p256::FieldBytes::from_slice(&y),
            false,
        );
        let verifying_key = VerifyingKey::from_encoded_point(&point)?;

        let signature = Signature::from_slice(&token.part(2).ok_or("missing signature")?.decode())?;
        verifying_key.verify(token.signing_input().as_bytes(), &signature)?;
        Ok(())
    }

    #[test]
    fn deterministic_token() -> TestResult {
        let mut signer = PrivateKey::from_bytes(EcDSA::Es256, &RFC6979_P256_D)?
            .into_signer()
            .deterministic(true);

        let token = config().sign_at(&mut signer, 1000)?;
        assert_eq!(token.to_string(), TOKEN);
        Ok(())
    }

    #[test]
    fn randomized_token_verifies() -> TestResult {
        let key = read_pem_key(EcDSA::Es256, "es256")?;
        let mut signer = key.clone().into_signer().deterministic(false);

        let first = config().sign_at(&mut signer, 1000)?;
        let second = config().sign_at(&mut signer, 1000)?;
        assert_ne!(first.part(2), second.part(2));

        verify_es256(&first, &key)?;
        verify_es256(&second, &key)?;
        Ok(())
    }

    #[test]
    fn p521_is_not_supported() {
        assert!(PrivateKey::generate(EcDSA::Es512).is_err());
    }
}

#[cfg(feature = "crypto-openssl")]
mod openssl_backend {
    use super::*;

    #[test]
    fn es512_token() -> TestResult {
        let mut signer = PrivateKey::generate(EcDSA::Es512)?.into_signer();
        let token = config().with_algorithm(EcDSA::Es512).sign_at(&mut signer, 1000)?;

        assert_well_formed(&token, 66)?;
        Ok(())
    }
}
