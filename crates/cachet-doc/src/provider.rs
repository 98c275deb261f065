//! The crypto seam the document model is built against.
//!
//! Documents receive their crypto capabilities as an explicit parameter at
//! construction instead of a per-platform subclass, so alternative
//! backends (hardware keys, test doubles) plug in without touching the
//! model itself.

use std::sync::Arc;

use cachet_core::{hash, secp, ByteBuf};
use cachet_ecies as ecies;

use crate::error::DocError;

/// Capabilities the document model consumes.
pub trait CryptoProvider: Send + Sync {
    /// Keccak-256 digest.
    fn keccak256(&self, msg: &[u8]) -> ByteBuf;

    /// ECIES-encrypt for a recipient public key; returns the hex wire
    /// form.
    fn ecies_encrypt(&self, msg: &[u8], recipient_pubkey: &[u8]) -> Result<String, DocError>;

    /// ECIES-decrypt a hex wire form.
    fn ecies_decrypt(&self, wire: &str, recipient_pvtkey: &[u8]) -> Result<Vec<u8>, DocError>;

    /// Derive the compressed public key belonging to a private key.
    fn derive_pubkey(&self, pvtkey: &[u8]) -> Result<ByteBuf, DocError>;

    /// ECDSA-sign a payload; DER signature bytes.
    fn sign(&self, payload: &[u8], pvtkey: &[u8]) -> Result<ByteBuf, DocError>;

    /// Verify a DER signature. Malformed inputs report `false`, never an
    /// error.
    fn verify(&self, signature: &[u8], payload: &[u8], pubkey: &[u8]) -> bool;
}

/// Default provider wired to `cachet-core` and `cachet-ecies`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdCrypto;

impl CryptoProvider for StdCrypto {
    fn keccak256(&self, msg: &[u8]) -> ByteBuf {
        hash::keccak256(msg)
    }

    fn ecies_encrypt(&self, msg: &[u8], recipient_pubkey: &[u8]) -> Result<String, DocError> {
        Ok(ecies::encrypt(msg, recipient_pubkey)?.to_hex())
    }

    fn ecies_decrypt(&self, wire: &str, recipient_pvtkey: &[u8]) -> Result<Vec<u8>, DocError> {
        Ok(ecies::decrypt_hex(wire, recipient_pvtkey)?)
    }

    fn derive_pubkey(&self, pvtkey: &[u8]) -> Result<ByteBuf, DocError> {
        let keys = secp::Keypair::from_pvtkey(pvtkey)?;
        Ok(keys.pubkey())
    }

    fn sign(&self, payload: &[u8], pvtkey: &[u8]) -> Result<ByteBuf, DocError> {
        Ok(secp::sign(payload, pvtkey)?)
    }

    fn verify(&self, signature: &[u8], payload: &[u8], pubkey: &[u8]) -> bool {
        secp::verify(signature, payload, pubkey)
    }
}

/// Shared handle to the default provider.
pub fn default_provider() -> Arc<dyn CryptoProvider> {
    Arc::new(StdCrypto)
}
