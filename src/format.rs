//! Serialization formats for a signed client secret.
//!
//! Identity services only accept the [compact serialization], so that is the
//! only format available.
//!
//! [compact serialization]: <https://datatracker.ietf.org/doc/html/rfc7515#section-7.1>

mod compact;

#[doc(inline)]
pub use self::compact::Compact;
