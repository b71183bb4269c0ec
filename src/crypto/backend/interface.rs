//! Common traits that define the API each backend must implement.

use core::{error, fmt};

pub(crate) mod ec;

/// The backend trait that all backends must implement.
///
/// It only names the concrete types of a backend, the operations live on the
/// key traits.
pub(crate) trait Backend {
    /// The error type that is used by this backend.
    type Error: fmt::Debug + fmt::Display + error::Error + Send + Sync + 'static;

    /// The EC private key type.
    type EcPrivateKey: ec::PrivateKey;
}
