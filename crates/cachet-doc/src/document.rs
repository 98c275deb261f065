//! The base document: identity, typing, payload, and encryption state.
//!
//! A document's hash covers every field except `header`, so signatures
//! over that hash stay valid while header metadata (certificates,
//! signatures) accumulates.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, OnceLock};

use cachet_core::{canonical, ByteBuf, CoreError, IdGenerator};

use crate::error::DocError;
use crate::provider::{default_provider, CryptoProvider};

/// Document categories; fixed per concrete subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Document,
    Statement,
    Certificate,
}

impl Category {
    /// The serialized category tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Statement => "statement",
            Self::Certificate => "certificate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subtype-defined metadata. One shape serves every category; empty
/// parts are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Hex-encoded DER signature, present once a certificate is signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Serialized certificates, in certification order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<DocumentObj>,

    /// Free-form metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The serialized form of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentObj {
    pub id: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Creation time, unix milliseconds. Immutable.
    pub created_at: i64,
    #[serde(default)]
    pub header: Header,
    /// Plaintext structured payload, or the hex ECIES wire form when
    /// `is_encrypted` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub is_encrypted: bool,
    /// Hex compressed public key of the document owner.
    pub pubkey: String,
}

impl DocumentObj {
    /// The hash input: every field except `header`.
    fn signable_value(&self) -> Value {
        let mut value =
            serde_json::to_value(self).expect("document serialization is infallible");
        if let Some(map) = value.as_object_mut() {
            map.remove("header");
        }
        value
    }

    /// Keccak-256 of the canonical signable bytes, as hex.
    pub fn hash_with(&self, provider: &dyn CryptoProvider) -> String {
        let buf = ByteBuf::from_value(&self.signable_value());
        provider.keccak256(buf.as_slice()).to_hex()
    }
}

/// Construction-time fields; only `pubkey` is mandatory, everything else
/// is defaulted.
#[derive(Debug, Clone)]
pub struct DocumentInit {
    pub pubkey: String,
    pub id: Option<String>,
    pub category: Option<Category>,
    pub variant: Option<String>,
    pub created_at: Option<i64>,
    pub header: Option<Header>,
    pub data: Option<Value>,
}

impl DocumentInit {
    /// Start an init with the mandatory owner pubkey.
    pub fn new(pubkey: impl Into<String>) -> Self {
        Self {
            pubkey: pubkey.into(),
            id: None,
            category: None,
            variant: None,
            created_at: None,
            header: None,
            data: None,
        }
    }

    /// Set the category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the variant tag.
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Set the payload.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the header.
    pub fn header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    /// Set an explicit id (defaults to a generated one).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an explicit creation time (defaults to now).
    pub fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

fn id_gen() -> &'static IdGenerator {
    static IDS: OnceLock<IdGenerator> = OnceLock::new();
    IDS.get_or_init(|| IdGenerator::new("doc"))
}

fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

/// A document plus the crypto capabilities it operates with.
#[derive(Clone)]
pub struct Document {
    pub(crate) obj: DocumentObj,
    pub(crate) provider: Arc<dyn CryptoProvider>,
}

impl Document {
    /// Create a document with the default crypto provider.
    pub fn new(init: DocumentInit) -> Self {
        Self::with_provider(init, default_provider())
    }

    /// Create a document with an explicit crypto provider.
    pub fn with_provider(init: DocumentInit, provider: Arc<dyn CryptoProvider>) -> Self {
        let obj = DocumentObj {
            id: init.id.unwrap_or_else(|| id_gen().generate()),
            category: init.category.unwrap_or(Category::Document),
            variant: init.variant,
            created_at: init.created_at.unwrap_or_else(now_millis),
            header: init.header.unwrap_or_default(),
            data: init.data,
            is_encrypted: false,
            pubkey: init.pubkey,
        };
        Self { obj, provider }
    }

    /// Rebuild a document from its serialized form.
    pub fn from_obj(obj: DocumentObj, provider: Arc<dyn CryptoProvider>) -> Self {
        Self { obj, provider }
    }

    pub fn id(&self) -> &str {
        &self.obj.id
    }

    pub fn category(&self) -> Category {
        self.obj.category
    }

    pub fn variant(&self) -> Option<&str> {
        self.obj.variant.as_deref()
    }

    /// The category joined with the variant, when one is set:
    /// `"statement.invoice"`.
    pub fn doc_type(&self) -> String {
        match &self.obj.variant {
            Some(variant) => format!("{}.{}", self.obj.category.as_str(), variant),
            None => self.obj.category.as_str().to_string(),
        }
    }

    pub fn created_at(&self) -> i64 {
        self.obj.created_at
    }

    pub fn header(&self) -> &Header {
        &self.obj.header
    }

    pub fn pubkey(&self) -> &str {
        &self.obj.pubkey
    }

    pub fn data(&self) -> Option<&Value> {
        self.obj.data.as_ref()
    }

    pub fn is_encrypted(&self) -> bool {
        self.obj.is_encrypted
    }

    /// Hash of the document's signable contents (everything but the
    /// header), as hex. Pure and deterministic: certificates sign this.
    pub fn hash(&self) -> String {
        self.obj.hash_with(self.provider.as_ref())
    }

    /// ECIES-encrypt the payload for a recipient (default: the document
    /// owner's own pubkey). No-op when there is no payload (absent or
    /// null) or it is already encrypted.
    pub fn encrypt(&mut self, recipient_pubkey: Option<&str>) -> Result<(), DocError> {
        let data = match &self.obj.data {
            Some(data) if !data.is_null() => data,
            _ => return Ok(()),
        };
        if self.obj.is_encrypted {
            return Ok(());
        }

        let recipient = recipient_pubkey.unwrap_or(&self.obj.pubkey);
        let pubkey = ByteBuf::from_hex(recipient).map_err(DocError::Core)?;
        let plaintext = ByteBuf::from_value(data);

        let wire = self
            .provider
            .ecies_encrypt(plaintext.as_slice(), pubkey.as_slice())?;

        self.obj.data = Some(Value::String(wire));
        self.obj.is_encrypted = true;
        Ok(())
    }

    /// ECIES-decrypt the payload. No-op when there is no payload (absent
    /// or null) or it is not encrypted.
    ///
    /// The plaintext is parsed as JSON on a best-effort basis; malformed
    /// plaintext silently falls back to the raw string. Kept for
    /// compatibility with documents produced by earlier implementations.
    pub fn decrypt(&mut self, pvtkey: impl AsRef<[u8]>) -> Result<(), DocError> {
        if matches!(&self.obj.data, None | Some(Value::Null)) || !self.obj.is_encrypted {
            return Ok(());
        }

        let wire = match &self.obj.data {
            Some(Value::String(wire)) => wire.clone(),
            _ => return Err(DocError::MalformedEncryptedData),
        };

        let plaintext = self.provider.ecies_decrypt(&wire, pvtkey.as_ref())?;
        let text = String::from_utf8_lossy(&plaintext).into_owned();

        self.obj.data = Some(match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        });
        self.obj.is_encrypted = false;
        Ok(())
    }

    /// Clone of the serialized form.
    pub fn to_object(&self) -> DocumentObj {
        self.obj.clone()
    }

    /// Base64 of the canonical serialization of the full document,
    /// header included. Used for transport and QR payloads.
    pub fn to_base64(&self) -> String {
        let value =
            serde_json::to_value(&self.obj).expect("document serialization is infallible");
        BASE64.encode(canonical::to_bytes(&value))
    }

    /// Rebuild a document from its base64 transport form.
    pub fn from_base64(encoded: &str) -> Result<Self, DocError> {
        Self::from_base64_with_provider(encoded, default_provider())
    }

    /// [`Self::from_base64`] with an explicit provider.
    pub fn from_base64_with_provider(
        encoded: &str,
        provider: Arc<dyn CryptoProvider>,
    ) -> Result<Self, DocError> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| DocError::InvalidBase64(e.to_string()))?;
        let obj: DocumentObj =
            serde_json::from_slice(&bytes).map_err(|e| DocError::Core(CoreError::Json(e)))?;
        Ok(Self::from_obj(obj, provider))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.obj.id)
            .field("type", &self.doc_type())
            .field("is_encrypted", &self.obj.is_encrypted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachet_core::Keypair;
    use serde_json::json;

    fn make_doc(data: Option<Value>) -> (Keypair, Document) {
        let keys = Keypair::generate();
        let mut init = DocumentInit::new(keys.pubkey().to_hex()).variant("test");
        if let Some(data) = data {
            init = init.data(data);
        }
        (keys, Document::new(init))
    }

    #[test]
    fn test_defaulted_fields() {
        let (keys, doc) = make_doc(None);
        assert!(doc.id().starts_with("doc_"));
        assert_eq!(doc.category(), Category::Document);
        assert_eq!(doc.doc_type(), "document.test");
        assert_eq!(doc.pubkey(), keys.pubkey().to_hex());
        assert!(!doc.is_encrypted());
        assert!(doc.data().is_none());
        assert!(doc.created_at() > 0);
    }

    #[test]
    fn test_hash_stable_across_calls() {
        let (_, doc) = make_doc(Some(json!({"full_name": "Bruno Fonseca"})));
        assert!(!doc.hash().is_empty());
        assert_eq!(doc.hash(), doc.hash());
    }

    #[test]
    fn test_hash_ignores_header() {
        let (_, doc) = make_doc(Some(json!({"k": 1})));
        let before = doc.hash();

        let mut changed = doc.clone();
        changed.obj.header.extra.insert("note".into(), json!("x"));
        assert_eq!(changed.hash(), before);
    }

    #[test]
    fn test_hash_tracks_data_and_encryption_state() {
        let (_, doc) = make_doc(Some(json!({"k": 1})));
        let before = doc.hash();

        let mut changed = doc.clone();
        changed.obj.data = Some(json!({"k": 2}));
        assert_ne!(changed.hash(), before);

        let mut flagged = doc.clone();
        flagged.obj.is_encrypted = true;
        assert_ne!(flagged.hash(), before);
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let data = json!({"name": "Alice"});
        let (keys, mut doc) = make_doc(Some(data.clone()));

        doc.encrypt(None).unwrap();
        assert!(doc.is_encrypted());
        let blob = match doc.data() {
            Some(Value::String(s)) => s.clone(),
            other => panic!("expected string blob, got {other:?}"),
        };
        // 89-byte wire prefix means at least 178 hex chars.
        assert!(blob.len() >= 178);

        doc.decrypt(keys.pvtkey()).unwrap();
        assert!(!doc.is_encrypted());
        assert_eq!(doc.data(), Some(&data));
    }

    #[test]
    fn test_encrypt_is_noop_without_data_or_when_encrypted() {
        let (_, mut doc) = make_doc(None);
        doc.encrypt(None).unwrap();
        assert!(!doc.is_encrypted());
        assert!(doc.data().is_none());

        let (_, mut doc) = make_doc(Some(json!({"k": 1})));
        doc.encrypt(None).unwrap();
        let blob = doc.data().cloned();
        doc.encrypt(None).unwrap();
        assert_eq!(doc.data().cloned(), blob);
    }

    #[test]
    fn test_encrypt_treats_null_data_as_absent() {
        let (_, mut doc) = make_doc(Some(Value::Null));
        doc.encrypt(None).unwrap();
        assert!(!doc.is_encrypted());
        assert_eq!(doc.data(), Some(&Value::Null));
    }

    #[test]
    fn test_decrypt_is_noop_when_not_encrypted() {
        let data = json!({"k": 1});
        let (keys, mut doc) = make_doc(Some(data.clone()));
        doc.decrypt(keys.pvtkey()).unwrap();
        assert_eq!(doc.data(), Some(&data));
    }

    #[test]
    fn test_decrypt_falls_back_to_raw_string() {
        // Encrypt a bare (non-JSON) string payload through the raw path.
        let keys = Keypair::generate();
        let wire = crate::provider::StdCrypto
            .ecies_encrypt(b"not json at all", keys.pubkey().as_slice())
            .unwrap();

        let mut doc = Document::new(DocumentInit::new(keys.pubkey().to_hex()));
        doc.obj.data = Some(Value::String(wire));
        doc.obj.is_encrypted = true;

        doc.decrypt(keys.pvtkey()).unwrap();
        assert_eq!(doc.data(), Some(&json!("not json at all")));
    }

    #[test]
    fn test_base64_roundtrip() {
        let (_, doc) = make_doc(Some(json!({"name": "Alice"})));
        let encoded = doc.to_base64();
        let revived = Document::from_base64(&encoded).unwrap();

        assert_eq!(revived.to_object(), doc.to_object());
        assert_eq!(revived.hash(), doc.hash());
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(matches!(
            Document::from_base64("%%%not-base64%%%"),
            Err(DocError::InvalidBase64(_))
        ));
    }
}
