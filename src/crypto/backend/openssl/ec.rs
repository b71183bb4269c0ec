use alloc::vec::Vec;

use openssl::{
    bn::{BigNum, BigNumContext},
    ec::{EcGroup, EcKey, EcPoint},
    md::Md,
    md_ctx::MdCtx,
    nid::Nid,
    pkey::{PKey, Private},
};
use secrecy::{ExposeSecret, SecretSlice};

use super::{BackendError, ZeroizingBigNum};
use crate::{
    crypto::{backend::interface::ec, Result},
    jwa::EcDSA,
};

fn curve_nid(alg: EcDSA) -> Nid {
    match alg {
        EcDSA::Es256 => Nid::X9_62_PRIME256V1,
        EcDSA::Es384 => Nid::SECP384R1,
        EcDSA::Es512 => Nid::SECP521R1,
        EcDSA::Es256K => Nid::SECP256K1,
    }
}

fn digest(alg: EcDSA) -> &'static openssl::md::MdRef {
    match alg {
        EcDSA::Es256 => Md::sha256(),
        EcDSA::Es384 => Md::sha384(),
        EcDSA::Es512 => Md::sha512(),
        EcDSA::Es256K => Md::sha256(),
    }
}

/// A low level private EC key.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    alg: EcDSA,

    key: PKey<Private>,

    x: Vec<u8>,
    y: Vec<u8>,
}

impl PrivateKey {
    fn from_ec_key(alg: EcDSA, ec_key: EcKey<Private>) -> Result<Self> {
        if ec_key.group().curve_name() != Some(curve_nid(alg)) {
            return Err(BackendError::CurveMismatch {
                expected: alg.curve_name(),
            }
            .into());
        }
        ec_key.check_key()?;

        let mut x = BigNum::new()?;
        let mut y = BigNum::new()?;
        let mut ctx = BigNumContext::new()?;
        ec_key
            .public_key()
            .affine_coordinates(ec_key.group(), &mut x, &mut y, &mut ctx)?;

        let coordinate_size = alg.part_len() as i32;
        Ok(Self {
            alg,
            x: x.to_vec_padded(coordinate_size)?,
            y: y.to_vec_padded(coordinate_size)?,
            key: PKey::from_ec_key(ec_key)?,
        })
    }
}

impl ec::PrivateKey for PrivateKey {
    fn generate(alg: EcDSA) -> Result<Self> {
        let group = EcGroup::from_curve_name(curve_nid(alg))?;
        let ec_key = EcKey::generate(&group)?;

        Self::from_ec_key(alg, ec_key)
    }

    fn new(alg: EcDSA, d: SecretSlice<u8>) -> Result<Self> {
        let group = EcGroup::from_curve_name(curve_nid(alg))?;
        let d = ZeroizingBigNum::from_slice(d.expose_secret())?;

        let ctx = BigNumContext::new()?;
        let mut public_point = EcPoint::new(&group)?;
        public_point.mul_generator(&group, &d.0, &ctx)?;

        let ec_key = EcKey::from_private_components(&group, &d.0, &public_point)?;

        Self::from_ec_key(alg, ec_key)
    }

    fn from_pkcs8_der(alg: EcDSA, der: &[u8]) -> Result<Self> {
        let key = PKey::private_key_from_pkcs8(der)?;
        let ec_key = key.ec_key()?;

        Self::from_ec_key(alg, ec_key)
    }

    fn from_pkcs8_pem(alg: EcDSA, pem: &str) -> Result<Self> {
        let key = PKey::private_key_from_pem(pem.as_bytes())?;
        let ec_key = key.ec_key()?;

        Self::from_ec_key(alg, ec_key)
    }

    #[inline]
    fn public_point(&self) -> (Vec<u8>, Vec<u8>) {
        (self.x.clone(), self.y.clone())
    }

    fn sign(&mut self, data: &[u8], deterministic: bool) -> Result<Vec<u8>> {
        let mut md_ctx = MdCtx::new()?;

        #[allow(unused_variables)]
        let pkey_ctx = md_ctx.digest_sign_init(Some(digest(self.alg)), &self.key)?;

        if deterministic {
            #[cfg(all(not(feature = "crypto-aws-lc"), openssl320))]
            pkey_ctx
                .set_nonce_type(openssl::pkey_ctx::NonceType::DETERMINISTIC_K)?;

            #[cfg(any(feature = "crypto-aws-lc", not(openssl320)))]
            return Err(
                BackendError::Unsupported("deterministic signing for EcDSA".into()).into(),
            );
        }

        md_ctx.digest_update(data)?;

        // OpenSSL already produces the ASN.1 DER `Ecdsa-Sig-Value`
        let mut der_sig = Vec::new();
        md_ctx.digest_sign_final_to_vec(&mut der_sig)?;

        Ok(der_sig)
    }
}
