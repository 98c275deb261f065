//! Hashing primitives: SHA-2, SHA-3/Keccak, and HMAC-SHA-256.
//!
//! All functions return fixed-size [`ByteBuf`]s (32 bytes except SHA-512's
//! 64). Document hashes use Keccak-256; ECIES MAC keys use SHA-256.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use sha3::{Keccak256, Sha3_256};

use crate::bytebuf::ByteBuf;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256, 32 bytes.
pub fn sha256(msg: impl AsRef<[u8]>) -> ByteBuf {
    ByteBuf::from_slice(&Sha256::digest(msg.as_ref()))
}

/// SHA-512, 64 bytes.
pub fn sha512(msg: impl AsRef<[u8]>) -> ByteBuf {
    ByteBuf::from_slice(&Sha512::digest(msg.as_ref()))
}

/// SHA3-256, 32 bytes.
pub fn sha3_256(msg: impl AsRef<[u8]>) -> ByteBuf {
    ByteBuf::from_slice(&Sha3_256::digest(msg.as_ref()))
}

/// Keccak-256 (pre-standard SHA-3 padding), 32 bytes.
pub fn keccak256(msg: impl AsRef<[u8]>) -> ByteBuf {
    ByteBuf::from_slice(&Keccak256::digest(msg.as_ref()))
}

/// HMAC-SHA-256 of `msg` under `key`, 32 bytes.
pub fn hmac256(msg: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> ByteBuf {
    let mut mac =
        HmacSha256::new_from_slice(key.as_ref()).expect("HMAC-SHA-256 accepts any key length");
    mac.update(msg.as_ref());
    ByteBuf::from_slice(&mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_sizes() {
        assert_eq!(sha256(b"msg").len(), 32);
        assert_eq!(sha512(b"msg").len(), 64);
        assert_eq!(sha3_256(b"msg").len(), 32);
        assert_eq!(keccak256(b"msg").len(), 32);
        assert_eq!(hmac256(b"msg", b"key").len(), 32);
    }

    #[test]
    fn test_sha256_vector() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_keccak_differs_from_sha3() {
        // Keccak-256 and SHA3-256 pad differently and must not collide.
        assert_ne!(keccak256(b"msg"), sha3_256(b"msg"));
    }

    #[test]
    fn test_keccak256_vector() {
        // Keccak-256 of the empty string.
        assert_eq!(
            keccak256(b"").to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hmac_keyed() {
        let a = hmac256(b"msg", b"key-a");
        let b = hmac256(b"msg", b"key-b");
        assert_ne!(a, b);
        assert_eq!(a, hmac256(b"msg", b"key-a"));
    }
}
