//! Vector sources: token → vector lookup.
//!
//! The engine only needs [`VectorSource::lookup`]. Where vectors come
//! from (GloVe files, hyponymy matrices, a trained model) is the
//! implementor's business.

use compositional_core::Vector;
use std::collections::HashMap;

use crate::NlpError;

/// Resolves tokens to vectors of one fixed dimension.
///
/// `lookup` must be total and deterministic: a token with no
/// representation yields `None`, never an error.
pub trait VectorSource: Send + Sync {
    /// Dimension of every vector this source returns.
    fn dimension(&self) -> usize;

    /// The vector for `token`, or `None` when it has no representation.
    fn lookup(&self, token: &str) -> Option<Vector>;
}

/// An in-memory word → vector table.
///
/// All-zero vectors count as "no representation" and are looked up as
/// `None`, matching sources that fill unknown words with zeros.
///
/// # Example
/// ```
/// use compositional_nlp::source::{Lexicon, VectorSource};
///
/// let mut lexicon = Lexicon::new(2);
/// lexicon.insert("cat", vec![0.3, 0.5]).unwrap();
/// lexicon.insert("the", vec![0.0, 0.0]).unwrap();
///
/// assert_eq!(lexicon.lookup("cat"), Some(vec![0.3, 0.5]));
/// assert_eq!(lexicon.lookup("the"), None);
/// assert_eq!(lexicon.lookup("dog"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Lexicon {
    dimension: usize,
    vectors: HashMap<String, Vector>,
    lowercase_fallback: bool,
}

impl Lexicon {
    /// Create an empty lexicon for vectors of `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
            lowercase_fallback: false,
        }
    }

    /// Retry a missed lookup with the lowercased token.
    pub fn with_lowercase_fallback(mut self) -> Self {
        self.lowercase_fallback = true;
        self
    }

    /// Add or replace the vector for `word`.
    ///
    /// # Errors
    /// [`NlpError::DimensionMismatch`] if the vector has the wrong length.
    pub fn insert(&mut self, word: &str, vector: Vector) -> Result<(), NlpError> {
        if vector.len() != self.dimension {
            return Err(NlpError::DimensionMismatch {
                word: word.to_string(),
                expected: self.dimension,
                got: vector.len(),
            });
        }
        self.vectors.insert(word.to_string(), vector);
        Ok(())
    }

    /// Build a lexicon from `(word, vector)` pairs.
    pub fn from_pairs<I, S>(dimension: usize, pairs: I) -> Result<Self, NlpError>
    where
        I: IntoIterator<Item = (S, Vector)>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::new(dimension);
        for (word, vector) in pairs {
            lexicon.insert(word.as_ref(), vector)?;
        }
        Ok(lexicon)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn get(&self, token: &str) -> Option<&Vector> {
        match self.vectors.get(token) {
            Some(v) => Some(v),
            None if self.lowercase_fallback => self.vectors.get(&token.to_lowercase()),
            None => None,
        }
    }
}

impl VectorSource for Lexicon {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn lookup(&self, token: &str) -> Option<Vector> {
        self.get(token)
            .filter(|v| v.iter().any(|&x| x != 0.0))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_checks_dimension() {
        let mut lexicon = Lexicon::new(3);
        let err = lexicon.insert("cat", vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            NlpError::DimensionMismatch {
                word: "cat".to_string(),
                expected: 3,
                got: 2
            }
        );
        assert!(lexicon.is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive_by_default() {
        let lexicon = Lexicon::from_pairs(1, [("cat", vec![1.0])]).unwrap();
        assert_eq!(lexicon.lookup("Cat"), None);

        let lexicon = lexicon.with_lowercase_fallback();
        assert_eq!(lexicon.lookup("Cat"), Some(vec![1.0]));
        assert_eq!(lexicon.lookup("cat"), Some(vec![1.0]));
    }

    #[test]
    fn test_zero_vector_is_absent() {
        let lexicon = Lexicon::from_pairs(2, [("a", vec![0.0, 0.0]), ("b", vec![0.0, 1.0])]).unwrap();
        assert!(lexicon.contains("a"));
        assert_eq!(lexicon.lookup("a"), None);
        assert_eq!(lexicon.lookup("b"), Some(vec![0.0, 1.0]));
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let lexicon = Lexicon::from_pairs(2, [("x", vec![1.0, 1.0])]).unwrap();
        let source: &dyn VectorSource = &lexicon;
        assert_eq!(source.dimension(), 2);
        assert!(source.lookup("x").is_some());
    }
}
