//! Error types for the document model.

use cachet_core::CoreError;
use cachet_ecies::EciesError;
use thiserror::Error;

/// Errors from document construction and mutation.
#[derive(Debug, Error)]
pub enum DocError {
    /// A subtype constructor was handed an object of the wrong category.
    #[error("only {expected} objects are allowed, got {got}")]
    InvalidCategory {
        expected: &'static str,
        got: String,
    },

    /// `is_encrypted` is set but `data` is not the expected string blob.
    #[error("encrypted data is not a string blob")]
    MalformedEncryptedData,

    #[error("invalid base64 transport form: {0}")]
    InvalidBase64(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Ecies(#[from] EciesError),
}

/// Why a validity check failed.
///
/// Check results are reported as `(bool, Option<CheckFailure>)` pairs so
/// a single invalid certificate cannot abort a larger audit; an unsigned
/// certificate reports `(false, None)`, distinct from an invalid one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    /// Required certifier public keys with no matching certificate.
    #[error("missing required certificates: {missing:?}")]
    MissingRequiredCertificates { missing: Vec<String> },

    /// Signature verification malfunctioned (malformed signature or key).
    #[error("invalid signature for certificate {pubkey}: {detail}")]
    InvalidSignature { pubkey: String, detail: String },
}
