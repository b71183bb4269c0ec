//! Conversion of DER encoded EcDSA signatures into the fixed width `R || S`
//! form that is required by [section 3.4 of RFC 7518].
//!
//! Most signing primitives (OpenSSL, PKCS#11 tokens, cloud KMS services, ...)
//! return an EcDSA signature as the ASN.1 structure
//!
//! ```text
//! Ecdsa-Sig-Value ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER
//! }
//! ```
//!
//! A JWS however carries both integers as unsigned big-endian octet strings,
//! each left padded to the size of the curve order, concatenated together.
//!
//! Only the short length form and the long form with exactly one length
//! octet (`0x81`) are understood for the outer sequence, which covers every
//! curve up to P-521. Any other length form is rejected.
//!
//! [section 3.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.4>

use alloc::vec::Vec;

use thiserror::Error;

const SEQUENCE: u8 = 0x30;
const INTEGER: u8 = 0x02;

/// Marks a long form length with exactly one subsequent length octet.
const LONG_FORM_ONE_OCTET: u8 = 0x81;

/// The errors that can occur while converting a DER encoded signature.
///
/// Every variant means the signature can not be used. There is no way to
/// recover a valid signature from a malformed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MalformedSignature {
    /// Found a different tag than the expected `SEQUENCE` or `INTEGER`.
    #[error("expected DER tag {expected:#04x} but found {found:#04x}")]
    UnexpectedTag {
        /// The tag that was required at this position.
        expected: u8,
        /// The tag that was actually found.
        found: u8,
    },
    /// The signature ended before all declared bytes could be read.
    #[error("the DER signature is truncated")]
    UnexpectedEnd,
    /// A length octet used a form other than short form or `0x81`.
    #[error("unsupported DER length form {0:#04x}")]
    UnsupportedLength(u8),
    /// The length of the outer `SEQUENCE` does not match the number of
    /// bytes following it.
    #[error("the DER sequence declares {declared} bytes but {actual} bytes follow")]
    LengthMismatch {
        /// The declared sequence length.
        declared: usize,
        /// The number of bytes that actually followed.
        actual: usize,
    },
    /// An `INTEGER` with zero content octets.
    #[error("the DER signature contains an empty integer")]
    EmptyInteger,
    /// After removing the sign padding, an integer is still wider than the
    /// algorithm allows.
    #[error("integer of {len} bytes does not fit into {max} bytes")]
    IntegerTooLong {
        /// The length of the integer without sign padding.
        len: usize,
        /// The maximum length allowed by the algorithm.
        max: usize,
    },
    /// Additional bytes follow the `S` integer inside the sequence.
    #[error("unexpected data after the second integer")]
    TrailingData,
}

/// A bounds checked cursor over the encoded signature.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn read_byte(&mut self) -> Result<u8, MalformedSignature> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(MalformedSignature::UnexpectedEnd)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], MalformedSignature> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or(MalformedSignature::UnexpectedEnd)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(MalformedSignature::UnexpectedEnd)?;
        self.pos = end;
        Ok(slice)
    }

    fn expect_tag(&mut self, expected: u8) -> Result<(), MalformedSignature> {
        match self.read_byte()? {
            found if found == expected => Ok(()),
            found => Err(MalformedSignature::UnexpectedTag { expected, found }),
        }
    }

    fn read_sequence_length(&mut self) -> Result<usize, MalformedSignature> {
        match self.read_byte()? {
            len @ 0..=0x7f => Ok(usize::from(len)),
            LONG_FORM_ONE_OCTET => self.read_byte().map(usize::from),
            form => Err(MalformedSignature::UnsupportedLength(form)),
        }
    }

    /// Reads a complete `INTEGER` and returns its content octets.
    fn read_integer(&mut self) -> Result<&'a [u8], MalformedSignature> {
        self.expect_tag(INTEGER)?;

        // no curve order comes close to 127 bytes
        let len = match self.read_byte()? {
            len @ 0..=0x7f => usize::from(len),
            form => return Err(MalformedSignature::UnsupportedLength(form)),
        };

        if len == 0 {
            return Err(MalformedSignature::EmptyInteger);
        }

        self.read_slice(len)
    }
}

/// Removes the `0x00` octets that DER prepends to keep an integer whose
/// most significant bit is set positive.
fn strip_sign_padding(mut int: &[u8]) -> &[u8] {
    while let [0x00, next, ..] = int {
        if next & 0x80 == 0 {
            break;
        }
        int = &int[1..];
    }
    int
}

fn push_padded(out: &mut Vec<u8>, int: &[u8], part_len: usize) -> Result<(), MalformedSignature> {
    let int = strip_sign_padding(int);

    if int.len() > part_len {
        return Err(MalformedSignature::IntegerTooLong {
            len: int.len(),
            max: part_len,
        });
    }

    out.resize(out.len() + (part_len - int.len()), 0);
    out.extend_from_slice(int);
    Ok(())
}

/// Converts the DER encoded EcDSA signature `der` into the raw `R || S`
/// concatenation used by JWS.
///
/// `part_len` is the width of a single integer in bytes, usually obtained
/// from [`EcDSA::part_len`](crate::jwa::EcDSA::part_len). The returned
/// signature is always exactly `2 * part_len` bytes long.
///
/// # Errors
///
/// Returns a [`MalformedSignature`] if `der` is not a `SEQUENCE` of two
/// `INTEGER`s, is truncated, uses an unsupported length form or one of the
/// integers is wider than `part_len` after the sign padding was removed.
///
/// # Example
///
/// ```
/// # use client_secret::der::to_raw_signature;
/// let der = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
/// let raw = to_raw_signature(&der, 4).unwrap();
///
/// assert_eq!(raw, [0, 0, 0, 1, 0, 0, 0, 2]);
/// ```
pub fn to_raw_signature(der: &[u8], part_len: usize) -> Result<Vec<u8>, MalformedSignature> {
    let mut reader = Reader::new(der);

    reader.expect_tag(SEQUENCE)?;
    let declared = reader.read_sequence_length()?;
    if declared != reader.remaining() {
        return Err(MalformedSignature::LengthMismatch {
            declared,
            actual: reader.remaining(),
        });
    }

    let r = reader.read_integer()?;
    let s = reader.read_integer()?;

    if reader.remaining() != 0 {
        return Err(MalformedSignature::TrailingData);
    }

    let mut raw = Vec::with_capacity(2 * part_len);
    push_padded(&mut raw, r, part_len)?;
    push_padded(&mut raw, s, part_len)?;

    tracing::trace!(
        der_len = der.len(),
        r_len = r.len(),
        s_len = s.len(),
        part_len,
        "converted DER signature into raw form"
    );

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn encode(r: &[u8], s: &[u8]) -> Vec<u8> {
        let mut body = vec![];
        for int in [r, s] {
            body.push(INTEGER);
            body.push(int.len() as u8);
            body.extend_from_slice(int);
        }

        let mut der = vec![SEQUENCE];
        if body.len() >= 0x80 {
            der.push(LONG_FORM_ONE_OCTET);
        }
        der.push(body.len() as u8);
        der.extend(body);
        der
    }

    #[test]
    fn short_integers_are_left_padded() {
        let der = encode(&[0x01, 0x02], &[0x03]);
        let raw = to_raw_signature(&der, 32).unwrap();

        assert_eq!(raw.len(), 64);
        assert!(raw[..30].iter().all(|b| *b == 0));
        assert_eq!(&raw[30..32], &[0x01, 0x02]);
        assert!(raw[32..63].iter().all(|b| *b == 0));
        assert_eq!(raw[63], 0x03);
    }

    #[test]
    fn canonical_width_is_unchanged() {
        let r = [0x11; 32];
        let s = [0x7f; 32];
        let raw = to_raw_signature(&encode(&r, &s), 32).unwrap();

        assert_eq!(&raw[..32], &r);
        assert_eq!(&raw[32..], &s);
    }

    #[test]
    fn sign_padding_is_removed() {
        let mut r = vec![0x00];
        r.extend_from_slice(&[0x80; 32]);
        let mut s = vec![0x00];
        s.extend_from_slice(&[0xff; 32]);

        let raw = to_raw_signature(&encode(&r, &s), 32).unwrap();

        assert_eq!(raw.len(), 64);
        assert_eq!(&raw[..32], &[0x80; 32]);
        assert_eq!(&raw[32..], &[0xff; 32]);
    }

    #[test]
    fn zero_before_low_byte_is_kept() {
        // `00 7f` is not sign padding, so it stays and overflows a 1 byte part
        let der = encode(&[0x00, 0x7f], &[0x01]);

        assert_eq!(
            to_raw_signature(&der, 1),
            Err(MalformedSignature::IntegerTooLong { len: 2, max: 1 })
        );
        assert_eq!(to_raw_signature(&der, 2).unwrap(), [0x00, 0x7f, 0x00, 0x01]);
    }

    #[test]
    fn long_form_sequence_length() {
        // P-521 sized integers need the `0x81` length form
        let mut r = vec![0x01];
        r.extend_from_slice(&[0xaa; 65]);
        let s = [0xbb; 65];

        let der = encode(&r, &s);
        assert_eq!(der[1], LONG_FORM_ONE_OCTET);

        let raw = to_raw_signature(&der, 66).unwrap();
        assert_eq!(raw.len(), 132);
        assert_eq!(&raw[..66], r.as_slice());
        assert_eq!(raw[66], 0x00);
        assert_eq!(&raw[67..], &s);
    }

    #[test]
    fn rejects_wrong_outer_tag() {
        let mut der = encode(&[0x01], &[0x02]);
        der[0] = 0x31;

        assert_eq!(
            to_raw_signature(&der, 32),
            Err(MalformedSignature::UnexpectedTag {
                expected: SEQUENCE,
                found: 0x31
            })
        );
    }

    #[test]
    fn rejects_wrong_integer_tag() {
        let mut der = encode(&[0x01], &[0x02]);
        der[5] = 0x04;

        assert_eq!(
            to_raw_signature(&der, 32),
            Err(MalformedSignature::UnexpectedTag {
                expected: INTEGER,
                found: 0x04
            })
        );
    }

    #[test]
    fn rejects_unsupported_length_forms() {
        let der = [0x30, 0x82, 0x00, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
        assert_eq!(
            to_raw_signature(&der, 32),
            Err(MalformedSignature::UnsupportedLength(0x82))
        );

        let der = [0x30, 0x07, 0x02, 0x81, 0x01, 0x01, 0x02, 0x01, 0x02];
        assert_eq!(
            to_raw_signature(&der, 32),
            Err(MalformedSignature::UnsupportedLength(0x81))
        );
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(to_raw_signature(&[], 32), Err(MalformedSignature::UnexpectedEnd));
        assert_eq!(
            to_raw_signature(&[SEQUENCE], 32),
            Err(MalformedSignature::UnexpectedEnd)
        );
        assert_eq!(
            to_raw_signature(&[SEQUENCE, LONG_FORM_ONE_OCTET], 32),
            Err(MalformedSignature::UnexpectedEnd)
        );

        // the sequence length is consistent, but `S` claims 5 bytes
        let der = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x05, 0x02];
        assert_eq!(to_raw_signature(&der, 32), Err(MalformedSignature::UnexpectedEnd));
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut der = encode(&[0x01], &[0x02]);
        der.pop();

        assert_eq!(
            to_raw_signature(&der, 32),
            Err(MalformedSignature::LengthMismatch {
                declared: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn rejects_trailing_data() {
        let der = [0x30, 0x07, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02, 0x00];
        assert_eq!(to_raw_signature(&der, 32), Err(MalformedSignature::TrailingData));
    }

    #[test]
    fn rejects_empty_integer() {
        let der = [0x30, 0x05, 0x02, 0x00, 0x02, 0x01, 0x02];
        assert_eq!(to_raw_signature(&der, 32), Err(MalformedSignature::EmptyInteger));
    }

    #[test]
    fn rejects_oversized_integer() {
        let der = encode(&[0x7f; 33], &[0x01]);
        assert_eq!(
            to_raw_signature(&der, 32),
            Err(MalformedSignature::IntegerTooLong { len: 33, max: 32 })
        );
    }
}
