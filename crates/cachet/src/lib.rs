//! # Cachet
//!
//! The unified API for Cachet - certifiable documents designed to be
//! issued, co-signed, and verified offline.
//!
//! ## Overview
//!
//! Cachet provides a portable library for:
//!
//! - **Documents**: identified, typed JSON payloads hashed canonically,
//!   with optional ECIES payload encryption
//! - **Statements**: documents that accumulate certificates from multiple
//!   parties
//! - **Certificates**: ECDSA signatures over a statement's hash chain,
//!   checkable without any network access
//!
//! ## Key Concepts
//!
//! - **Hash**: covers every document field except `header`, so the hash
//!   certificates sign stays stable while the chain grows.
//! - **Variant**: free-form role tag on a certificate. The `"verifier"`
//!   variant additionally co-signs the existing non-verifier certificates.
//! - **Check**: never throws; reports `(bool, Option<CheckFailure>)`.
//!
//! ## Usage
//!
//! ```rust
//! use cachet::{CertifyArgs, CheckArgs, DocumentInit, Keypair, Statement};
//! use serde_json::json;
//!
//! let issuer = Keypair::generate();
//! let holder = Keypair::generate();
//!
//! let mut stmt = Statement::new(
//!     DocumentInit::new(holder.pubkey().to_hex())
//!         .variant("diploma")
//!         .data(json!({"degree": "MSc", "year": 2026})),
//! )
//! .unwrap();
//!
//! stmt.certify(CertifyArgs::new(issuer.pvtkey()).variant("creator"))
//!     .unwrap();
//! stmt.certify(CertifyArgs::new(holder.pvtkey()).variant("signer"))
//!     .unwrap();
//!
//! let args = CheckArgs {
//!     required_certifier_pubkeys: vec![issuer.pubkey().to_hex()],
//! };
//! assert_eq!(stmt.check(&args), (true, None));
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `cachet::core` - Primitives (hashing, secp256k1, canonical JSON)
//! - `cachet::ecies` - The hybrid encryption scheme and wire format
//! - `cachet::doc` - Documents, statements, certificates

pub mod error;

// Re-export component crates
pub use cachet_core as core;
pub use cachet_doc as doc;
pub use cachet_ecies as ecies;

pub use error::{CachetError, Result};

// Re-export commonly used types
pub use cachet_core::{ByteBuf, Keypair};
pub use cachet_doc::{
    Category, CertifyArgs, CheckArgs, CheckFailure, CryptoProvider, Document, DocumentInit,
    DocumentObj, Header, Statement,
};
pub use cachet_ecies::EciesEnvelope;
