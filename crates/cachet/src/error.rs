//! Unified error type over the component crates.

use thiserror::Error;

/// Any error a Cachet operation can produce.
#[derive(Debug, Error)]
pub enum CachetError {
    #[error(transparent)]
    Core(#[from] cachet_core::CoreError),

    #[error(transparent)]
    Ecies(#[from] cachet_ecies::EciesError),

    #[error(transparent)]
    Doc(#[from] cachet_doc::DocError),
}

/// Result alias for the unified error.
pub type Result<T> = std::result::Result<T, CachetError>;
