use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::base64_url::{Base64UrlString, NoBase64UrlString};

/// The compact representation is essentially a list of Base64Url
/// strings that are separated by `.`.
///
/// A signed client secret consists of exactly three parts: the header, the
/// claims and the signature.
///
/// # Examples
///
/// ```
/// # use client_secret::format::Compact;
/// # use std::str::FromStr;
/// let c = Compact::from_str("e30.YWI.-_8").unwrap();
///
/// assert_eq!(c.len(), 3);
/// assert_eq!(c.part(0).unwrap().decode(), b"{}");
/// assert_eq!(c.to_string(), "e30.YWI.-_8");
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Compact {
    parts: Vec<Base64UrlString>,
}

impl Compact {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Compact {
            parts: Vec::with_capacity(cap),
        }
    }

    pub(crate) fn push_base64url(&mut self, part: Base64UrlString) {
        self.parts.push(part);
    }

    pub(crate) fn push(&mut self, part: impl AsRef<[u8]>) {
        self.parts.push(Base64UrlString::encode(part));
    }

    /// Returns the part at `idx`, if there is one.
    pub fn part(&self, idx: usize) -> Option<&Base64UrlString> {
        self.parts.get(idx)
    }

    /// The number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if there are no parts at all.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns every part but the last one joined by `.`.
    ///
    /// For a signed token this is the input the signature was computed over.
    pub fn signing_input(&self) -> String {
        let mut input = String::new();
        let len = self.parts.len().saturating_sub(1);

        for (idx, part) in self.parts[..len].iter().enumerate() {
            if idx != 0 {
                input.push('.');
            }
            input.push_str(part);
        }

        input
    }
}

impl FromStr for Compact {
    type Err = NoBase64UrlString;

    /// Verifies if every part of the string is valid base64url format
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(Base64UrlString::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.parts.len();

        for (idx, part) in self.parts.iter().enumerate() {
            fmt::Display::fmt(&part, f)?;

            if idx != len - 1 {
                f.write_str(".")?;
            }
        }

        Ok(())
    }
}

impl From<Compact> for String {
    fn from(value: Compact) -> Self {
        alloc::string::ToString::to_string(&value)
    }
}
