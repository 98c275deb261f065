//! Error types for the ECIES engine.

use cachet_core::CoreError;
use thiserror::Error;

/// Errors from ECIES encryption and decryption.
#[derive(Debug, Error)]
pub enum EciesError {
    /// The wire form is shorter than the 89-byte fixed prefix plus at
    /// least one ciphertext byte.
    #[error("ecies message too short: {got} bytes, need at least {min}")]
    InvalidInput { got: usize, min: usize },

    /// MAC mismatch; the message was tampered with or the key is wrong.
    #[error("bad mac")]
    BadMac,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, EciesError>;
