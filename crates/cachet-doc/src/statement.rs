//! Statements and their multi-party certificate chain.
//!
//! A statement is a document whose header carries an append-only list of
//! certificates. Each certificate signs the statement's hash; a
//! `"verifier"` certificate additionally signs the hashes of every
//! non-verifier certificate present at signing time. The collected hashes
//! are sorted before signing, so the signed value does not depend on the
//! order certificates were appended in.

use serde_json::Value;
use std::sync::Arc;

use cachet_core::ByteBuf;

use crate::document::{Category, Document, DocumentInit, DocumentObj};
use crate::error::{CheckFailure, DocError};
use crate::provider::{default_provider, CryptoProvider};

/// The variant whose certificates co-sign other certificates.
const VERIFIER_VARIANT: &str = "verifier";

/// Arguments for [`Statement::certify`].
#[derive(Debug, Clone)]
pub struct CertifyArgs {
    /// The signer's private key. The certificate's pubkey is derived
    /// from it, identifying the real signer.
    pub pvtkey: ByteBuf,

    /// Signer-supplied payload for the certificate.
    pub data: Option<Value>,

    /// Certificate variant (`"creator"`, `"signer"`, `"verifier"`, ...).
    pub variant: Option<String>,
}

impl CertifyArgs {
    /// Certify with just a private key.
    pub fn new(pvtkey: impl Into<ByteBuf>) -> Self {
        Self {
            pvtkey: pvtkey.into(),
            data: None,
            variant: None,
        }
    }

    /// Set the certificate variant.
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Set the certificate payload.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Arguments for [`Statement::check`].
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Pubkeys that must each appear among the statement's certificates.
    pub required_certifier_pubkeys: Vec<String>,
}

/// A document of category `statement`, owning its certificate list.
#[derive(Debug, Clone)]
pub struct Statement {
    doc: Document,
}

impl Statement {
    /// Create a statement with the default crypto provider.
    ///
    /// Supplying a conflicting category in the init fails with
    /// [`DocError::InvalidCategory`].
    pub fn new(init: DocumentInit) -> Result<Self, DocError> {
        Self::with_provider(init, default_provider())
    }

    /// Create a statement with an explicit crypto provider.
    pub fn with_provider(
        init: DocumentInit,
        provider: Arc<dyn CryptoProvider>,
    ) -> Result<Self, DocError> {
        if let Some(category) = init.category {
            if category != Category::Statement {
                return Err(DocError::InvalidCategory {
                    expected: Category::Statement.as_str(),
                    got: category.as_str().to_string(),
                });
            }
        }

        let init = init.category(Category::Statement);
        Ok(Self {
            doc: Document::with_provider(init, provider),
        })
    }

    /// Adopt an existing document as a statement.
    pub fn from_document(doc: Document) -> Result<Self, DocError> {
        if doc.category() != Category::Statement {
            return Err(DocError::InvalidCategory {
                expected: Category::Statement.as_str(),
                got: doc.category().as_str().to_string(),
            });
        }
        Ok(Self { doc })
    }

    /// Rebuild a statement from its base64 transport form.
    pub fn from_base64(encoded: &str) -> Result<Self, DocError> {
        Self::from_document(Document::from_base64(encoded)?)
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the underlying document (payload
    /// encryption/decryption).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Hash of the statement's signable contents.
    pub fn hash(&self) -> String {
        self.doc.hash()
    }

    /// The live certificates, reconstructed from their serialized forms
    /// in certification order.
    pub fn certificates(&self) -> Vec<Certificate<'_>> {
        self.doc
            .obj
            .header
            .certificates
            .iter()
            .map(|obj| Certificate {
                stmt: self,
                obj: obj.clone(),
            })
            .collect()
    }

    /// Issue a new certificate for this statement and append it.
    ///
    /// The signer's pubkey is derived from the private key; the signed
    /// value is the sorted hash chain described in [`hash_to_sign`].
    ///
    /// [`hash_to_sign`]: Self::hash_to_sign
    pub fn certify(&mut self, args: CertifyArgs) -> Result<(), DocError> {
        let provider = self.doc.provider.clone();
        let pubkey = provider.derive_pubkey(args.pvtkey.as_slice())?;

        let mut init = DocumentInit::new(pubkey.to_hex()).category(Category::Certificate);
        if let Some(variant) = &args.variant {
            init = init.variant(variant.clone());
        }
        if let Some(data) = args.data {
            init = init.data(data);
        }
        let certificate = Document::with_provider(init, provider.clone());

        let payload = self.hash_to_sign(args.variant.as_deref());
        let signature = provider.sign(payload.as_bytes(), args.pvtkey.as_slice())?;

        let mut obj = certificate.to_object();
        obj.header.signature = Some(signature.to_hex());

        tracing::debug!(
            statement = %self.doc.id(),
            certificate = %obj.id,
            variant = obj.variant.as_deref().unwrap_or(""),
            "appending certificate"
        );

        self.doc.obj.header.certificates.push(obj);
        Ok(())
    }

    /// Check every certificate, and optionally that a set of required
    /// certifiers have signed.
    ///
    /// All certificate checks are evaluated even when required signers
    /// are already known to be missing; the missing-signer failure takes
    /// precedence in the reported result. Per-certificate failures are
    /// reported in certification order, first failure wins.
    pub fn check(&self, args: &CheckArgs) -> (bool, Option<CheckFailure>) {
        let certificates = self.certificates();

        let mut missing = args.required_certifier_pubkeys.clone();
        missing.retain(|required| !certificates.iter().any(|crt| crt.pubkey() == required.as_str()));

        // Certificate checks are independent of one another; evaluation
        // order is immaterial, reporting order is certification order.
        let results: Vec<_> = certificates.iter().map(|crt| crt.check()).collect();

        if !missing.is_empty() {
            tracing::debug!(statement = %self.doc.id(), ?missing, "check failed");
            return (
                false,
                Some(CheckFailure::MissingRequiredCertificates { missing }),
            );
        }

        for (is_valid, failure) in results {
            if !is_valid {
                return (false, failure);
            }
        }
        (true, None)
    }

    /// The value a certificate of the given variant signs.
    ///
    /// Starts with the statement's own hash; a verifier certificate also
    /// covers the hash of every non-verifier certificate currently
    /// present. Hashes are sorted lexicographically and concatenated, so
    /// the result is independent of certificate insertion order.
    pub(crate) fn hash_to_sign(&self, variant: Option<&str>) -> String {
        let mut hashes = vec![self.hash()];

        if variant == Some(VERIFIER_VARIANT) {
            let provider = self.doc.provider.as_ref();
            hashes.extend(
                self.doc
                    .obj
                    .header
                    .certificates
                    .iter()
                    .filter(|crt| crt.variant.as_deref() != Some(VERIFIER_VARIANT))
                    .map(|crt| crt.hash_with(provider)),
            );
        }

        hashes.sort_unstable();
        hashes.concat()
    }
}

/// A live certificate view: its serialized form plus a back-reference to
/// the owning statement. Reconstructed on demand; the statement owns the
/// serialized form.
#[derive(Debug, Clone)]
pub struct Certificate<'a> {
    stmt: &'a Statement,
    obj: DocumentObj,
}

impl<'a> Certificate<'a> {
    /// Adopt a serialized certificate for a statement.
    pub fn from_obj(stmt: &'a Statement, obj: DocumentObj) -> Result<Self, DocError> {
        if obj.category != Category::Certificate {
            return Err(DocError::InvalidCategory {
                expected: Category::Certificate.as_str(),
                got: obj.category.as_str().to_string(),
            });
        }
        Ok(Self { stmt, obj })
    }

    pub fn pubkey(&self) -> &str {
        &self.obj.pubkey
    }

    pub fn variant(&self) -> Option<&str> {
        self.obj.variant.as_deref()
    }

    /// The stored signature, once signed.
    pub fn signature(&self) -> Option<&str> {
        self.obj.header.signature.as_deref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.obj.data.as_ref()
    }

    /// This certificate's own document hash.
    pub fn hash(&self) -> String {
        self.obj.hash_with(self.stmt.doc.provider.as_ref())
    }

    /// Clone of the serialized form.
    pub fn to_object(&self) -> DocumentObj {
        self.obj.clone()
    }

    /// Verify this certificate against the statement's current state.
    ///
    /// Fails closed: `(false, None)` when unsigned, `(false, Some(..))`
    /// when verification malfunctions (malformed signature or key), and
    /// plain `(false, None)` when the signature simply does not match.
    /// Never panics or propagates an error.
    pub fn check(&self) -> (bool, Option<CheckFailure>) {
        let Some(signature_hex) = self.obj.header.signature.as_deref() else {
            return (false, None);
        };

        let payload = self.stmt.hash_to_sign(self.variant());

        let signature = match ByteBuf::from_hex(signature_hex) {
            Ok(signature) => signature,
            Err(e) => {
                return (
                    false,
                    Some(CheckFailure::InvalidSignature {
                        pubkey: self.obj.pubkey.clone(),
                        detail: e.to_string(),
                    }),
                )
            }
        };
        let pubkey = match ByteBuf::from_hex(&self.obj.pubkey) {
            Ok(pubkey) => pubkey,
            Err(e) => {
                return (
                    false,
                    Some(CheckFailure::InvalidSignature {
                        pubkey: self.obj.pubkey.clone(),
                        detail: e.to_string(),
                    }),
                )
            }
        };

        let is_valid = self.stmt.doc.provider.verify(
            signature.as_slice(),
            payload.as_bytes(),
            pubkey.as_slice(),
        );
        (is_valid, None)
    }
}
