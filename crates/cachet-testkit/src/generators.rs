//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use cachet_core::Keypair;
use cachet_doc::{Category, Document, DocumentInit};

/// Generate a random keypair.
///
/// Random 32-byte strings are rejected when they fall outside the
/// secp256k1 scalar range; in practice almost none do.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_filter_map("valid secp256k1 scalar", |seed| {
        Keypair::from_pvtkey(seed).ok()
    })
}

/// Generate a hex-encoded compressed public key.
pub fn pubkey_hex() -> impl Strategy<Value = String> {
    keypair().prop_map(|kp| kp.pubkey().to_hex())
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a JSON scalar value.
pub fn json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 _.-]{0,32}".prop_map(Value::String),
    ]
}

/// Generate a flat JSON object payload.
pub fn json_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z_]{1,12}", json_scalar(), 0..6)
        .prop_map(|entries| Value::Object(Map::from_iter(entries)))
}

/// Generate a document category.
pub fn category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Document),
        Just(Category::Statement),
        Just(Category::Certificate),
    ]
}

/// Generate a variant tag.
pub fn variant() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[a-z]{1,16}".prop_map(Some),
        Just(Some("creator".to_string())),
        Just(Some("signer".to_string())),
        Just(Some("verifier".to_string())),
    ]
}

/// Generate a reasonable creation timestamp, unix milliseconds.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=1_800_000_000_000i64
}

/// Parameters for generating a document.
#[derive(Debug, Clone)]
pub struct DocumentParams {
    pub keypair: Keypair,
    pub id: String,
    pub category: Category,
    pub variant: Option<String>,
    pub created_at: i64,
    pub data: Option<Value>,
}

impl Arbitrary for DocumentParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            keypair(),
            "doc_[a-zA-Z0-9]{21}",
            category(),
            variant(),
            timestamp(),
            prop::option::of(json_object()),
        )
            .prop_map(|(keypair, id, category, variant, created_at, data)| DocumentParams {
                keypair,
                id,
                category,
                variant,
                created_at,
                data,
            })
            .boxed()
    }
}

/// Generate a document from parameters.
pub fn document_from_params(params: &DocumentParams) -> Document {
    let mut init = DocumentInit::new(params.keypair.pubkey().to_hex())
        .id(params.id.clone())
        .category(params.category)
        .created_at(params.created_at);

    if let Some(variant) = &params.variant {
        init = init.variant(variant.clone());
    }
    if let Some(data) = &params.data {
        init = init.data(data.clone());
    }

    Document::new(init)
}
