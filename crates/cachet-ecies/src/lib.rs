//! # Cachet ECIES
//!
//! Hybrid encryption for document payloads: ephemeral secp256k1 ECDH,
//! AES-256-CBC, and an HMAC-SHA-256 tag in one fixed-layout envelope.
//!
//! ## Wire format
//!
//! ```text
//! iv(16) || eph_pubkey(33) || mac(32) || salt(8) || ciphertext(var)
//! ```
//!
//! Inputs shorter than 90 bytes fail with [`EciesError::InvalidInput`];
//! a MAC mismatch fails with [`EciesError::BadMac`] before any
//! decryption is attempted.

pub mod engine;
pub mod envelope;
pub mod error;

pub use engine::{decrypt, decrypt_hex, encrypt};
pub use envelope::{EciesEnvelope, MAC_SIZE, MIN_WIRE_SIZE, PREFIX_SIZE};
pub use error::{EciesError, Result};
