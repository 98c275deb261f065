//! Error types for the Cachet core primitives.

use thiserror::Error;

/// Errors from the primitive layer: codecs, key handling, AES.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("decryption failed: {0}")]
    Decrypt(String),

    #[error("payload is not valid utf-8")]
    InvalidUtf8,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
