//! # Cachet Core
//!
//! Pure primitives for Cachet: the canonical byte codec, deterministic
//! JSON serialization, and the hash / secp256k1 / AES adapters everything
//! else is built on.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over byte sequences.
//!
//! ## Key Types
//!
//! - [`ByteBuf`] - Immutable byte buffer, equal iff byte-for-byte equal
//! - [`Keypair`] - secp256k1 keypair (compressed SEC1 public keys)
//! - [`CipherParams`] - AES-256-CBC output (iv, salt, ciphertext)
//!
//! ## Canonicalization
//!
//! Structured values are serialized with lexicographically sorted keys.
//! See [`canonical`].

pub mod aes;
pub mod bytebuf;
pub mod canonical;
pub mod error;
pub mod hash;
pub mod id;
pub mod secp;

pub use aes::CipherParams;
pub use bytebuf::ByteBuf;
pub use error::CoreError;
pub use id::IdGenerator;
pub use secp::Keypair;
