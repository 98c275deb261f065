//! secp256k1 key handling: ECDSA signatures and ECDH key agreement.
//!
//! Public keys use the 33-byte compressed SEC1 encoding throughout.
//! [`shared_secret`] returns the full compressed shared point rather than
//! only its x coordinate, and signatures are DER-encoded in canonical
//! low-S form.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, PublicKey, SecretKey};
use rand::rngs::OsRng;
use std::fmt;

use crate::bytebuf::ByteBuf;
use crate::error::CoreError;

/// Compressed SEC1 public key length.
pub const PUBKEY_SIZE: usize = 33;

/// Private scalar length.
pub const PVTKEY_SIZE: usize = 32;

/// A secp256k1 keypair.
#[derive(Clone)]
pub struct Keypair {
    secret: SecretKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::random(&mut OsRng),
        }
    }

    /// Rebuild a keypair from an existing 32-byte private key.
    pub fn from_pvtkey(pvtkey: impl AsRef<[u8]>) -> Result<Self, CoreError> {
        let secret =
            SecretKey::from_slice(pvtkey.as_ref()).map_err(|_| CoreError::InvalidPrivateKey)?;
        Ok(Self { secret })
    }

    /// The 33-byte compressed public key.
    pub fn pubkey(&self) -> ByteBuf {
        ByteBuf::from_slice(self.secret.public_key().to_encoded_point(true).as_bytes())
    }

    /// The 32-byte private key.
    pub fn pvtkey(&self) -> ByteBuf {
        ByteBuf::from_slice(&self.secret.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({}..)", &self.pubkey().to_hex()[..16])
    }
}

/// Compute an ECDH shared secret between a private key and a peer's
/// public key, as a compressed point.
pub fn shared_secret(
    pvtkey: impl AsRef<[u8]>,
    pubkey: impl AsRef<[u8]>,
) -> Result<ByteBuf, CoreError> {
    let secret =
        SecretKey::from_slice(pvtkey.as_ref()).map_err(|_| CoreError::InvalidPrivateKey)?;
    let public =
        PublicKey::from_sec1_bytes(pubkey.as_ref()).map_err(|_| CoreError::InvalidPublicKey)?;

    let shared = (ProjectivePoint::from(*public.as_affine()) * *secret.to_nonzero_scalar())
        .to_affine()
        .to_encoded_point(true);

    Ok(ByteBuf::from_slice(shared.as_bytes()))
}

/// ECDSA-sign a payload (SHA-256 message digest, RFC 6979 nonces).
///
/// Returns the DER-encoded signature.
pub fn sign(payload: impl AsRef<[u8]>, pvtkey: impl AsRef<[u8]>) -> Result<ByteBuf, CoreError> {
    let secret =
        SecretKey::from_slice(pvtkey.as_ref()).map_err(|_| CoreError::InvalidPrivateKey)?;
    let signing_key = SigningKey::from(&secret);
    let signature: Signature = signing_key.sign(payload.as_ref());
    Ok(ByteBuf::from_slice(signature.to_der().as_bytes()))
}

/// Verify a DER-encoded ECDSA signature.
///
/// Malformed signatures or keys report `false`; verification never errors.
pub fn verify(
    signature: impl AsRef<[u8]>,
    payload: impl AsRef<[u8]>,
    pubkey: impl AsRef<[u8]>,
) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(pubkey.as_ref()) else {
        return false;
    };
    let Ok(signature) = Signature::from_der(signature.as_ref()) else {
        return false;
    };
    verifying_key.verify(payload.as_ref(), &signature).is_ok()
}
