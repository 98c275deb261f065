//! Process-unique string identifiers.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random suffix; 21 alphanumeric characters keep the
/// collision probability negligible.
const SUFFIX_LEN: usize = 21;

/// Generates ids of the form `{prefix}_{random-suffix}`.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
}

impl IdGenerator {
    /// Create a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Produce a fresh id.
    pub fn generate(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("{}_{}", self.prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let gen = IdGenerator::new("doc");
        let id = gen.generate();
        assert!(id.starts_with("doc_"));
        assert_eq!(id.len(), "doc_".len() + SUFFIX_LEN);
    }

    #[test]
    fn test_ids_unique() {
        let gen = IdGenerator::new("doc");
        assert_ne!(gen.generate(), gen.generate());
    }
}
