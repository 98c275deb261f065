//! ECIES encryption and decryption.
//!
//! Hybrid scheme over the core primitives: ECDH key agreement with an
//! ephemeral secp256k1 keypair, AES-256-CBC for the payload, and an
//! HMAC-SHA-256 tag binding the whole envelope. The MAC key is
//! `sha256(shared_secret)` and the tag covers
//! `iv || eph_pubkey || salt || ciphertext`, so the ephemeral key cannot
//! be swapped without detection.

use subtle::ConstantTimeEq;

use cachet_core::{aes, hash, secp, Keypair};

use crate::envelope::{EciesEnvelope, MAC_SIZE};
use crate::error::{EciesError, Result};

/// Encrypt a message for the holder of `recipient_pubkey`.
pub fn encrypt(msg: impl AsRef<[u8]>, recipient_pubkey: impl AsRef<[u8]>) -> Result<EciesEnvelope> {
    let eph = Keypair::generate();
    let secret = secp::shared_secret(eph.pvtkey(), recipient_pubkey)?;

    let params = aes::encrypt(msg, &secret);

    let eph_pubkey: [u8; secp::PUBKEY_SIZE] = eph
        .pubkey()
        .as_slice()
        .try_into()
        .expect("compressed pubkey is 33 bytes");

    let mac = compute_mac(&params.iv, &eph_pubkey, &params.salt, &params.ciphertext, &secret);

    Ok(EciesEnvelope {
        iv: params.iv,
        eph_pubkey,
        mac,
        salt: params.salt,
        ciphertext: params.ciphertext,
    })
}

/// Decrypt an envelope with the recipient's private key.
///
/// The MAC is checked in constant time before any decryption is
/// attempted; a mismatch fails with [`EciesError::BadMac`] and yields no
/// partial result.
pub fn decrypt(envelope: &EciesEnvelope, recipient_pvtkey: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    let secret = secp::shared_secret(recipient_pvtkey, envelope.eph_pubkey)?;

    let expected = compute_mac(
        &envelope.iv,
        &envelope.eph_pubkey,
        &envelope.salt,
        &envelope.ciphertext,
        &secret,
    );

    if !bool::from(expected.ct_eq(&envelope.mac)) {
        tracing::warn!("ecies mac mismatch, refusing to decrypt");
        return Err(EciesError::BadMac);
    }

    let params = aes::CipherParams {
        iv: envelope.iv,
        salt: envelope.salt,
        ciphertext: envelope.ciphertext.clone(),
    };

    Ok(aes::decrypt(&params, &secret)?)
}

/// Decrypt straight from the hex wire form.
pub fn decrypt_hex(wire: &str, recipient_pvtkey: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    let envelope = EciesEnvelope::from_hex(wire)?;
    decrypt(&envelope, recipient_pvtkey)
}

fn compute_mac(
    iv: &[u8],
    eph_pubkey: &[u8],
    salt: &[u8],
    ciphertext: &[u8],
    secret: &cachet_core::ByteBuf,
) -> [u8; MAC_SIZE] {
    let mac_key = hash::sha256(secret);

    let mut data = Vec::with_capacity(iv.len() + eph_pubkey.len() + salt.len() + ciphertext.len());
    data.extend_from_slice(iv);
    data.extend_from_slice(eph_pubkey);
    data.extend_from_slice(salt);
    data.extend_from_slice(ciphertext);

    hash::hmac256(&data, &mac_key)
        .as_slice()
        .try_into()
        .expect("hmac256 output is 32 bytes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::MIN_WIRE_SIZE;
    use proptest::prelude::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let keys = Keypair::generate();
        let msg = b"This is a test message";

        let envelope = encrypt(msg, keys.pubkey()).unwrap();
        let decrypted = decrypt(&envelope, keys.pvtkey()).unwrap();

        assert_eq!(decrypted, msg);
    }

    #[test]
    fn test_hex_wire_roundtrip() {
        let keys = Keypair::generate();
        let msg = b"This is a test message";

        let wire = encrypt(msg, keys.pubkey()).unwrap().to_hex();
        // 89-byte prefix plus two AES blocks for a 22-byte message.
        assert_eq!(wire.len(), (89 + 32) * 2);

        let decrypted = decrypt_hex(&wire, keys.pvtkey()).unwrap();
        assert_eq!(decrypted, msg);
    }

    #[test]
    fn test_wrong_recipient_fails_mac() {
        let keys = Keypair::generate();
        let other = Keypair::generate();

        let envelope = encrypt(b"for your eyes only", keys.pubkey()).unwrap();
        let result = decrypt(&envelope, other.pvtkey());

        assert!(matches!(result, Err(EciesError::BadMac)));
    }

    #[test]
    fn test_any_single_bit_flip_fails_mac() {
        let keys = Keypair::generate();
        let envelope = encrypt(b"tamper target", keys.pubkey()).unwrap();
        let wire = envelope.to_bytes();

        // Flip one bit in every byte position in turn; every mutation
        // must be rejected, and none with a partial plaintext.
        for position in 0..wire.len() {
            let mut tampered = wire.clone();
            tampered[position] ^= 0x01;

            let result = EciesEnvelope::from_bytes(&tampered)
                .and_then(|env| decrypt(&env, keys.pvtkey()));
            assert!(
                result.is_err(),
                "bit flip at byte {position} was not detected"
            );
        }
    }

    #[test]
    fn test_short_input_is_invalid_input() {
        let keys = Keypair::generate();
        let short = hex::encode(vec![0u8; MIN_WIRE_SIZE - 1]);

        let result = decrypt_hex(&short, keys.pvtkey());
        assert!(matches!(result, Err(EciesError::InvalidInput { .. })));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_arbitrary_messages(msg in proptest::collection::vec(any::<u8>(), 1..512)) {
            let keys = Keypair::generate();
            let envelope = encrypt(&msg, keys.pubkey()).unwrap();
            let decrypted = decrypt(&envelope, keys.pvtkey()).unwrap();
            prop_assert_eq!(decrypted, msg);
        }
    }
}
