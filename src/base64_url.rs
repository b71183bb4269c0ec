//! Helpers for base64 urlsafe encoded stuff

use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::{fmt, ops::Deref, str::FromStr};

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Serialize;
use thiserror::Error;

/// Error type indicating that a string was not a valid unpadded
/// Base64Url string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the string is not a valid Base64Url representation")]
pub struct NoBase64UrlString;

/// A wrapper around a [`String`] that guarantees that the inner string is a
/// valid Base64Url string.
///
/// The alphabet is the URL and filename safe one of [RFC 4648 section 5]
/// (`-` and `_` instead of `+` and `/`) and the string never carries `=`
/// padding.
///
/// [RFC 4648 section 5]: <https://datatracker.ietf.org/doc/html/rfc4648#section-5>
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Default)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Base64UrlString(String);

impl fmt::Display for Base64UrlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Base64UrlString {
    type Err = NoBase64UrlString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // it is an expensive check.. yes
        decode(s).map(|_| Self(s.to_owned()))
    }
}

impl Base64UrlString {
    /// Creates a new, empty Base64Url string.
    #[inline]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Encode the given bytes using Base64Url format.
    #[inline]
    pub fn encode(x: impl AsRef<[u8]>) -> Self {
        Base64UrlString(Base64UrlUnpadded::encode_string(x.as_ref()))
    }

    /// Decodes this Base64Url string into it's raw byte representation.
    #[inline]
    pub fn decode(&self) -> Vec<u8> {
        // the constructors only ever hold valid Base64Url
        decode(&self.0).unwrap_or_default()
    }

    /// Return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Base64UrlString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Base64UrlString> for String {
    fn from(x: Base64UrlString) -> Self {
        x.0
    }
}

/// Encodes the given bytes into an unpadded Base64Url string.
#[inline]
pub fn encode(x: impl AsRef<[u8]>) -> String {
    Base64UrlUnpadded::encode_string(x.as_ref())
}

/// Decodes an unpadded Base64Url string.
///
/// # Errors
///
/// Returns [`NoBase64UrlString`] if the input contains characters outside of
/// the Base64Url alphabet (including `+`, `/` and `=`), has an impossible
/// length or is not canonical. An encoding is canonical if the unused low
/// bits of its last character are zero, so `"def"` is rejected while
/// `"deY"` is accepted.
pub fn decode(s: &str) -> Result<Vec<u8>, NoBase64UrlString> {
    Base64UrlUnpadded::decode_vec(s).map_err(|_| NoBase64UrlString)
}
