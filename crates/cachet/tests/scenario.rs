//! End-to-end scenarios across the component crates.
//!
//! These follow a certificate's real life: a statement is drafted and
//! encrypted by its owner, shipped as base64 (QR payload), revived,
//! decrypted, certified by several parties, and checked offline.

use cachet::{
    Category, CertifyArgs, CheckArgs, CheckFailure, Document, DocumentInit, Keypair, Statement,
};
use cachet_testkit::fixtures::{certified_statement, multi_party_fixtures, TestFixture};
use serde_json::json;

#[test]
fn test_full_document_lifecycle() {
    let owner = TestFixture::new();
    let payload = json!({"full_name": "Bruno Fonseca", "birth": "1990-02-19"});

    let mut doc = owner.make_document(payload.clone());
    let hash_before = doc.hash();

    doc.encrypt(None).unwrap();
    assert!(doc.is_encrypted());
    assert_ne!(doc.hash(), hash_before);

    // Ship and revive.
    let encoded = doc.to_base64();
    let mut revived = Document::from_base64(&encoded).unwrap();
    assert!(revived.is_encrypted());

    revived.decrypt(owner.pvtkey()).unwrap();
    assert_eq!(revived.data(), Some(&payload));
    assert_eq!(revived.hash(), hash_before);
}

#[test]
fn test_encrypt_for_third_party() {
    let owner = TestFixture::new();
    let recipient = TestFixture::new();
    let payload = json!({"ssn": "000-00-0000"});

    let mut doc = owner.make_document(payload.clone());
    doc.encrypt(Some(&recipient.pubkey_hex())).unwrap();

    // The owner's own key no longer opens it.
    let mut for_owner = doc.clone();
    assert!(for_owner.decrypt(owner.pvtkey()).is_err());

    doc.decrypt(recipient.pvtkey()).unwrap();
    assert_eq!(doc.data(), Some(&payload));
}

#[test]
fn test_three_party_certification() {
    let (parties, stmt) = certified_statement(json!({"subject": "MSc diploma"}));

    assert_eq!(stmt.certificates().len(), 3);
    for crt in stmt.certificates() {
        let (is_valid, failure) = crt.check();
        assert!(is_valid);
        assert!(failure.is_none());
    }

    let args = CheckArgs {
        required_certifier_pubkeys: parties.iter().map(|p| p.pubkey_hex()).collect(),
    };
    assert_eq!(stmt.check(&args), (true, None));
}

#[test]
fn test_statement_survives_transport_with_encrypted_payload() {
    let parties = multi_party_fixtures(2);
    let payload = json!({"grade": "A"});

    // Encrypting after certification would change the statement hash, so
    // encrypt first, then certify.
    let mut stmt = parties[0].make_statement(payload.clone());
    stmt.document_mut()
        .encrypt(Some(&parties[1].pubkey_hex()))
        .unwrap();
    parties[0].certify(&mut stmt, "creator");
    parties[1].certify(&mut stmt, "signer");

    let encoded = stmt.document().to_base64();
    let mut revived = Statement::from_base64(&encoded).unwrap();

    // The chain verifies against the encrypted payload...
    assert_eq!(revived.check(&CheckArgs::default()), (true, None));

    // ...and decrypting afterwards recovers the data but breaks the
    // certified hash, as it must.
    revived.document_mut().decrypt(parties[1].pvtkey()).unwrap();
    assert_eq!(revived.document().data(), Some(&payload));
    let (is_valid, _) = revived.check(&CheckArgs::default());
    assert!(!is_valid);
}

#[test]
fn test_missing_required_certifier_reported() {
    let parties = multi_party_fixtures(3);
    let mut stmt = parties[0].make_statement(json!({"k": 1}));
    parties[0].certify(&mut stmt, "creator");

    let args = CheckArgs {
        required_certifier_pubkeys: vec![parties[1].pubkey_hex(), parties[2].pubkey_hex()],
    };
    let (is_valid, failure) = stmt.check(&args);
    assert!(!is_valid);
    match failure {
        Some(CheckFailure::MissingRequiredCertificates { missing }) => {
            assert_eq!(missing.len(), 2);
            assert!(missing.contains(&parties[1].pubkey_hex()));
            assert!(missing.contains(&parties[2].pubkey_hex()));
        }
        other => panic!("expected missing-certificates failure, got {other:?}"),
    }
}

#[test]
fn test_tampering_detected_after_transport() {
    let (_, stmt) = certified_statement(json!({"amount": 100}));
    let mut obj = stmt.document().to_object();
    obj.data = Some(json!({"amount": 100_000}));

    let forged = Statement::from_document(Document::from_obj(
        obj,
        cachet::doc::default_provider(),
    ))
    .unwrap();

    let (is_valid, _) = forged.check(&CheckArgs::default());
    assert!(!is_valid);
}

#[test]
fn test_certificate_metadata_travels() {
    let issuer = Keypair::generate();
    let holder = Keypair::generate();

    let mut stmt = Statement::new(
        DocumentInit::new(holder.pubkey().to_hex()).data(json!({"subject": "permit"})),
    )
    .unwrap();

    stmt.certify(
        CertifyArgs::new(issuer.pvtkey())
            .variant("creator")
            .data(json!({"office": "Lisbon"})),
    )
    .unwrap();

    let revived = Statement::from_base64(&stmt.document().to_base64()).unwrap();
    let certificates = revived.certificates();
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0].variant(), Some("creator"));
    assert_eq!(certificates[0].data(), Some(&json!({"office": "Lisbon"})));
    assert_eq!(certificates[0].pubkey(), issuer.pubkey().to_hex());
    assert_eq!(certificates[0].to_object().category, Category::Certificate);
}

#[test]
fn test_raw_ecies_interoperates_with_documents() {
    // A blob encrypted at the ECIES layer decrypts through the document
    // layer and vice versa.
    let keys = Keypair::generate();
    let payload = json!({"k": "v"});

    let plaintext = cachet::core::canonical::to_bytes(&payload);
    let envelope = cachet::ecies::encrypt(&plaintext, keys.pubkey()).unwrap();

    let mut doc = Document::new(DocumentInit::new(keys.pubkey().to_hex()));
    let mut obj = doc.to_object();
    obj.data = Some(serde_json::Value::String(envelope.to_hex()));
    obj.is_encrypted = true;
    doc = Document::from_obj(obj, cachet::doc::default_provider());

    doc.decrypt(keys.pvtkey()).unwrap();
    assert_eq!(doc.data(), Some(&payload));
}
