//! AES-256-CBC symmetric encryption with per-call IV and salt.
//!
//! The symmetric key is derived from the caller's secret and a random
//! 8-byte salt with HKDF-SHA256, so the same secret never reuses a key.
//! CBC carries no authentication; callers that need tamper detection wrap
//! this in the ECIES envelope, which MACs the whole message.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;

use crate::error::CoreError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Domain separation for the HKDF key derivation.
const KDF_INFO: &[u8] = b"cachet-aes256cbc-v0";

/// CBC initialization vector length.
pub const IV_SIZE: usize = 16;

/// Key-derivation salt length.
pub const SALT_SIZE: usize = 8;

/// Output of one encryption call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherParams {
    /// Random IV, fresh per call.
    pub iv: [u8; IV_SIZE],

    /// Random key-derivation salt, fresh per call.
    pub salt: [u8; SALT_SIZE],

    /// PKCS7-padded ciphertext.
    pub ciphertext: Vec<u8>,
}

/// Encrypt a message under a shared secret.
pub fn encrypt(msg: impl AsRef<[u8]>, secret: impl AsRef<[u8]>) -> CipherParams {
    let mut iv = [0u8; IV_SIZE];
    let mut salt = [0u8; SALT_SIZE];
    let mut rng = rand::rngs::OsRng;
    rng.fill_bytes(&mut iv);
    rng.fill_bytes(&mut salt);

    let key = derive_key(secret.as_ref(), &salt);
    let ciphertext =
        Aes256CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(msg.as_ref());

    CipherParams {
        iv,
        salt,
        ciphertext,
    }
}

/// Decrypt ciphertext under a shared secret.
pub fn decrypt(params: &CipherParams, secret: impl AsRef<[u8]>) -> Result<Vec<u8>, CoreError> {
    let key = derive_key(secret.as_ref(), &params.salt);
    Aes256CbcDec::new(&key.into(), &params.iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&params.ciphertext)
        .map_err(|_| CoreError::Decrypt("invalid padding".into()))
}

fn derive_key(secret: &[u8], salt: &[u8; SALT_SIZE]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(Some(salt), secret);
    let mut key = [0u8; 32];
    hk.expand(KDF_INFO, &mut key)
        .expect("HKDF expand with 32-byte output never fails");
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"shhh..";

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let msg = b"This is a test message";
        let params = encrypt(msg, SECRET);
        let decrypted = decrypt(&params, SECRET).unwrap();
        assert_eq!(decrypted, msg);
    }

    #[test]
    fn test_ciphertext_is_block_padded() {
        // 22-byte message pads up to two AES blocks.
        let params = encrypt(b"This is a test message", SECRET);
        assert_eq!(params.ciphertext.len(), 32);
    }

    #[test]
    fn test_fresh_iv_and_salt_per_call() {
        let a = encrypt(b"msg", SECRET);
        let b = encrypt(b"msg", SECRET);
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_wrong_secret_never_recovers_plaintext() {
        let params = encrypt(b"secret data", SECRET);
        // A wrong key usually fails padding; when padding happens to be
        // valid, the plaintext is still garbage.
        match decrypt(&params, b"wrong") {
            Ok(plaintext) => assert_ne!(plaintext, b"secret data"),
            Err(_) => {}
        }
    }

    #[test]
    fn test_key_derivation_uses_salt() {
        let key_a = derive_key(SECRET, &[0u8; SALT_SIZE]);
        let key_b = derive_key(SECRET, &[1u8; SALT_SIZE]);
        assert_ne!(key_a, key_b);
    }
}
