//! # Cachet Testkit
//!
//! Testing utilities for Cachet.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known test cases with expected outputs for cross-platform verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin down canonical hashing across implementations:
//!
//! ```rust
//! use cachet_testkit::vectors::{all_vectors, document_from_vector};
//!
//! for vector in all_vectors() {
//!     let doc = document_from_vector(&vector);
//!     println!("{}: {}", vector.name, doc.hash());
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cachet_testkit::generators::{document_from_params, DocumentParams};
//!
//! proptest! {
//!     #[test]
//!     fn document_hash_is_deterministic(params: DocumentParams) {
//!         let d1 = document_from_params(&params);
//!         let d2 = document_from_params(&params);
//!         prop_assert_eq!(d1.hash(), d2.hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up multi-party scenarios:
//!
//! ```rust
//! use cachet_testkit::fixtures::multi_party_fixtures;
//! use serde_json::json;
//!
//! let parties = multi_party_fixtures(3);
//! let mut stmt = parties[0].make_statement(json!({"subject": "diploma"}));
//! parties[1].certify(&mut stmt, "signer");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{certified_statement, multi_party_fixtures, TestFixture};
pub use generators::{document_from_params, DocumentParams};
pub use vectors::{all_vectors, document_from_vector, verify_all_vectors, GoldenVector};
