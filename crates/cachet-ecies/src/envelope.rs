//! The ECIES wire envelope.
//!
//! Wire layout is a fixed-width concatenation:
//!
//! ```text
//! iv(16) || eph_pubkey(33) || mac(32) || salt(8) || ciphertext(var)
//! ```
//!
//! The fixed prefix is 89 bytes; a valid message carries at least one
//! ciphertext byte, so anything shorter than 90 bytes is rejected.

use cachet_core::aes::{IV_SIZE, SALT_SIZE};
use cachet_core::secp::PUBKEY_SIZE;

use crate::error::{EciesError, Result};

/// MAC length (HMAC-SHA-256).
pub const MAC_SIZE: usize = 32;

/// Length of the fixed wire prefix.
pub const PREFIX_SIZE: usize = IV_SIZE + PUBKEY_SIZE + MAC_SIZE + SALT_SIZE;

/// Minimum total wire length (prefix plus one ciphertext byte).
pub const MIN_WIRE_SIZE: usize = PREFIX_SIZE + 1;

const EPH_OFFSET: usize = IV_SIZE;
const MAC_OFFSET: usize = EPH_OFFSET + PUBKEY_SIZE;
const SALT_OFFSET: usize = MAC_OFFSET + MAC_SIZE;
const CIPHERTEXT_OFFSET: usize = SALT_OFFSET + SALT_SIZE;

/// A complete ECIES message: AES parameters, the ephemeral public key
/// needed to re-derive the shared secret, and the MAC over all of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EciesEnvelope {
    /// AES-CBC initialization vector.
    pub iv: [u8; IV_SIZE],

    /// Ephemeral public key (compressed SEC1).
    pub eph_pubkey: [u8; PUBKEY_SIZE],

    /// HMAC-SHA-256 over `iv || eph_pubkey || salt || ciphertext`.
    pub mac: [u8; MAC_SIZE],

    /// Key-derivation salt.
    pub salt: [u8; SALT_SIZE],

    /// AES ciphertext.
    pub ciphertext: Vec<u8>,
}

impl EciesEnvelope {
    /// Serialize to the fixed-width wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PREFIX_SIZE + self.ciphertext.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.eph_pubkey);
        out.extend_from_slice(&self.mac);
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Hex rendering of the wire form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse the wire form.
    pub fn from_bytes(wire: &[u8]) -> Result<Self> {
        if wire.len() < MIN_WIRE_SIZE {
            return Err(EciesError::InvalidInput {
                got: wire.len(),
                min: MIN_WIRE_SIZE,
            });
        }

        let mut iv = [0u8; IV_SIZE];
        let mut eph_pubkey = [0u8; PUBKEY_SIZE];
        let mut mac = [0u8; MAC_SIZE];
        let mut salt = [0u8; SALT_SIZE];
        iv.copy_from_slice(&wire[..EPH_OFFSET]);
        eph_pubkey.copy_from_slice(&wire[EPH_OFFSET..MAC_OFFSET]);
        mac.copy_from_slice(&wire[MAC_OFFSET..SALT_OFFSET]);
        salt.copy_from_slice(&wire[SALT_OFFSET..CIPHERTEXT_OFFSET]);

        Ok(Self {
            iv,
            eph_pubkey,
            mac,
            salt,
            ciphertext: wire[CIPHERTEXT_OFFSET..].to_vec(),
        })
    }

    /// Parse a hex wire form.
    pub fn from_hex(wire: &str) -> Result<Self> {
        let bytes = cachet_core::ByteBuf::from_hex(wire).map_err(EciesError::Core)?;
        Self::from_bytes(bytes.as_slice())
    }
}
