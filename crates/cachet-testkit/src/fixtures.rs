//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use cachet_core::{ByteBuf, Keypair};
use cachet_doc::{CertifyArgs, Document, DocumentInit, Statement};
use serde_json::Value;

/// A test fixture holding one party's keypair.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic keypair from a private-key seed.
    ///
    /// The seed must be a valid nonzero secp256k1 scalar; the seeds used
    /// by [`multi_party_fixtures`] always are.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_pvtkey(seed).expect("seed is a valid scalar"),
        }
    }

    /// The party's compressed public key, hex-encoded.
    pub fn pubkey_hex(&self) -> String {
        self.keypair.pubkey().to_hex()
    }

    /// The party's private key.
    pub fn pvtkey(&self) -> ByteBuf {
        self.keypair.pvtkey()
    }

    /// Create a document owned by this party.
    pub fn make_document(&self, data: Value) -> Document {
        Document::new(DocumentInit::new(self.pubkey_hex()).data(data))
    }

    /// Create a statement owned by this party.
    pub fn make_statement(&self, data: Value) -> Statement {
        Statement::new(DocumentInit::new(self.pubkey_hex()).data(data))
            .expect("statement init has no category conflict")
    }

    /// Certify a statement as this party, with the given variant.
    pub fn certify(&self, stmt: &mut Statement, variant: &str) {
        stmt.certify(CertifyArgs::new(self.pvtkey()).variant(variant))
            .expect("certify succeeds with a valid key");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            // Zero is not a valid scalar.
            seed[31] = i as u8 + 1;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// Build a statement and run it through the usual three-party flow:
/// creator, signer, verifier, in that order.
pub fn certified_statement(data: Value) -> (Vec<TestFixture>, Statement) {
    let parties = multi_party_fixtures(3);
    let mut stmt = parties[0].make_statement(data);

    parties[0].certify(&mut stmt, "creator");
    parties[1].certify(&mut stmt, "signer");
    parties[2].certify(&mut stmt, "verifier");

    (parties, stmt)
}
