//! Golden test vectors for deterministic verification.
//!
//! These vectors pin down canonical serialization and document hashing so
//! independent implementations can be checked against each other.

use cachet_core::{canonical, Keypair};
use cachet_doc::{Category, Document, DocumentInit};
use serde_json::Value;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Private-key seed for deterministic key generation.
    pub seed: [u8; 32],
    /// Fixed document id.
    pub id: &'static str,
    /// Document category.
    pub category: Category,
    /// Variant tag, if any.
    pub variant: Option<&'static str>,
    /// Creation timestamp, unix milliseconds.
    pub created_at: i64,
    /// JSON payload, if any.
    pub data: Option<&'static str>,
    /// Expected document hash (hex keccak-256). Empty means report-only.
    pub expected_hash: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "plain document with object payload",
            seed: [0x42; 32],
            id: "doc_USgcHJ6KBB5PYDJXPSXS4",
            category: Category::Document,
            variant: None,
            created_at: 1_736_870_400_000, // 2025-01-14T16:00:00Z
            data: Some(r#"{"full_name":"Bruno Fonseca","id":123}"#),
            // Filled in once pinned against a second implementation.
            expected_hash: "",
        },
        GoldenVector {
            name: "statement without payload",
            seed: [0x42; 32],
            id: "doc_aaaaaaaaaaaaaaaaaaaaa",
            category: Category::Statement,
            variant: Some("diploma"),
            created_at: 1_736_870_401_000,
            data: None,
            expected_hash: "",
        },
        GoldenVector {
            name: "certificate with nested payload",
            seed: [0x01; 32],
            id: "doc_bbbbbbbbbbbbbbbbbbbbb",
            category: Category::Certificate,
            variant: Some("creator"),
            created_at: 0,
            data: Some(r#"{"notes":{"z":1,"a":[true,null]}}"#),
            expected_hash: "",
        },
    ]
}

/// Build the document a golden vector describes.
pub fn document_from_vector(vector: &GoldenVector) -> Document {
    let keypair = Keypair::from_pvtkey(vector.seed).expect("vector seed is a valid scalar");

    let mut init = DocumentInit::new(keypair.pubkey().to_hex())
        .id(vector.id)
        .category(vector.category)
        .created_at(vector.created_at);

    if let Some(variant) = vector.variant {
        init = init.variant(variant);
    }
    if let Some(data) = vector.data {
        let data: Value = serde_json::from_str(data).expect("vector payload is valid JSON");
        init = init.data(data);
    }

    Document::new(init)
}

/// Verify all golden vectors produce consistent hashes.
///
/// Returns `(name, matches, hash)` per vector; vectors with no expected
/// hash always match and just report what they produced.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hash = document_from_vector(v).hash();
            let matches = v.expected_hash.is_empty() || hash == v.expected_hash;
            (v.name.to_string(), matches, hash)
        })
        .collect()
}
