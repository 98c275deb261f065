//! Document and statement models for certificate chains.
//!
//! A [`Document`] is the base unit: an identified, typed, hashable JSON
//! payload whose owner is a secp256k1 pubkey. A [`Statement`] is a
//! document that accumulates [`Certificate`]s from multiple parties in
//! its header; each certificate signs the statement's hash, and the
//! whole chain can be checked offline.
//!
//! Crypto operations route through the [`CryptoProvider`] seam so
//! hashing, signing, and ECIES can be swapped out (hardware keys,
//! alternative curves) without touching the document model.

pub mod document;
pub mod error;
pub mod provider;
pub mod statement;

pub use document::{Category, Document, DocumentInit, DocumentObj, Header};
pub use error::{CheckFailure, DocError};
pub use provider::{default_provider, CryptoProvider, StdCrypto};
pub use statement::{Certificate, CertifyArgs, CheckArgs, Statement};
