//! # Composition Operators
//!
//! A `Composition` combines two vectors of the same dimension into one.
//! Every operator checks operand dimensions before touching the data.
//!
//! | Op | Result | Commutative |
//! |----|--------|-------------|
//! | Hadamard | `a ⊙ b` | yes |
//! | Sum | `a + b` | yes |
//! | Projection | `(a·b / a·a) a` | no |
//! | Sandwich | `A B A` (n×n matrices, flattened) | no |
//! | Custom | any closure | depends |

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A dense word, phrase, or sentence vector.
pub type Vector = Vec<f64>;

/// Signature of a user-supplied binary operator.
pub type BinaryFn = dyn Fn(&[f64], &[f64]) -> Vector + Send + Sync;

/// A binary vector composition operator.
///
/// The named variants (de)serialize by name, so an operator can be picked
/// from configuration. `Custom` operators only exist at runtime.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    /// Elementwise product.
    #[default]
    Hadamard,
    /// Elementwise sum.
    Sum,
    /// Projection of the right operand onto the direction of the left one.
    Projection,
    /// Both operands read as flattened n×n matrices; returns `A·B·A`.
    Sandwich,
    /// Any other operator, identified by name for logging.
    #[serde(skip)]
    Custom(String, Arc<BinaryFn>),
}

impl Composition {
    /// Wrap a closure as a named operator.
    pub fn custom<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[f64], &[f64]) -> Vector + Send + Sync + 'static,
    {
        Composition::Custom(name.into(), Arc::new(f))
    }

    /// Short name of the operator.
    pub fn name(&self) -> &str {
        match self {
            Composition::Hadamard => "hadamard",
            Composition::Sum => "sum",
            Composition::Projection => "projection",
            Composition::Sandwich => "sandwich",
            Composition::Custom(name, _) => name,
        }
    }

    /// Whether `op(a, b) == op(b, a)` holds for every pair of operands.
    ///
    /// Custom operators are assumed order-sensitive.
    pub fn is_commutative(&self) -> bool {
        matches!(self, Composition::Hadamard | Composition::Sum)
    }

    /// Apply the operator to `left` and `right`.
    pub fn apply(&self, left: &[f64], right: &[f64]) -> Result<Vector, CoreError> {
        if left.len() != right.len() {
            return Err(CoreError::DimensionMismatch {
                op: self.name().to_string(),
                left: left.len(),
                right: right.len(),
            });
        }

        match self {
            Composition::Hadamard => Ok(left.iter().zip(right).map(|(a, b)| a * b).collect()),
            Composition::Sum => Ok(left.iter().zip(right).map(|(a, b)| a + b).collect()),
            Composition::Projection => Ok(project(left, right)),
            Composition::Sandwich => sandwich(left, right),
            Composition::Custom(name, f) => {
                let out = f(left, right);
                if out.len() != left.len() {
                    return Err(CoreError::DimensionMismatch {
                        op: name.clone(),
                        left: left.len(),
                        right: out.len(),
                    });
                }
                Ok(out)
            }
        }
    }
}

impl fmt::Debug for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composition::Custom(name, _) => write!(f, "Custom({:?})", name),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inner product of two vectors.
pub fn inner_product(v1: &[f64], v2: &[f64]) -> f64 {
    v1.iter().zip(v2.iter()).map(|(a, b)| a * b).sum()
}

/// Euclidean norm.
pub fn norm(v: &[f64]) -> f64 {
    inner_product(v, v).sqrt()
}

/// Cosine similarity; 0.0 if either vector is (numerically) zero.
pub fn cosine_similarity(v1: &[f64], v2: &[f64]) -> f64 {
    let n1 = norm(v1);
    let n2 = norm(v2);
    if n1 < 1e-10 || n2 < 1e-10 {
        0.0
    } else {
        inner_product(v1, v2) / (n1 * n2)
    }
}

fn project(onto: &[f64], v: &[f64]) -> Vector {
    let denom = inner_product(onto, onto);
    if denom < 1e-12 {
        return vec![0.0; onto.len()];
    }
    let scale = inner_product(onto, v) / denom;
    onto.iter().map(|x| x * scale).collect()
}

fn square_side(dim: usize) -> Option<usize> {
    let n = (dim as f64).sqrt().round() as usize;
    (n * n == dim).then_some(n)
}

fn matmul(a: &[f64], b: &[f64], n: usize) -> Vector {
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for k in 0..n {
            let aik = a[i * n + k];
            for j in 0..n {
                out[i * n + j] += aik * b[k * n + j];
            }
        }
    }
    out
}

fn sandwich(a: &[f64], b: &[f64]) -> Result<Vector, CoreError> {
    let n = square_side(a.len()).ok_or_else(|| CoreError::NotSquare {
        op: "sandwich".to_string(),
        dim: a.len(),
    })?;
    let ab = matmul(a, b, n);
    Ok(matmul(&ab, a, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-10)
    }

    #[test]
    fn test_hadamard_and_sum() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!(close(
            &Composition::Hadamard.apply(&a, &b).unwrap(),
            &[4.0, 10.0, 18.0]
        ));
        assert!(close(
            &Composition::Sum.apply(&a, &b).unwrap(),
            &[5.0, 7.0, 9.0]
        ));
    }

    #[test]
    fn test_projection_is_directional() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 1.0];

        // b onto a keeps only the first axis; a onto b spreads over both
        let ab = Composition::Projection.apply(&a, &b).unwrap();
        let ba = Composition::Projection.apply(&b, &a).unwrap();
        assert!(close(&ab, &[1.0, 0.0]));
        assert!(close(&ba, &[0.5, 0.5]));
        assert!(!Composition::Projection.is_commutative());
    }

    #[test]
    fn test_projection_onto_zero() {
        let zero = vec![0.0, 0.0];
        let v = vec![3.0, 4.0];
        assert_eq!(
            Composition::Projection.apply(&zero, &v).unwrap(),
            vec![0.0, 0.0]
        );
    }

    #[test]
    fn test_sandwich_identity() {
        let identity = vec![1.0, 0.0, 0.0, 1.0];
        let m = vec![1.0, 2.0, 3.0, 4.0];
        assert!(close(
            &Composition::Sandwich.apply(&identity, &m).unwrap(),
            &m
        ));

        // [[2,0],[0,1]] · M · [[2,0],[0,1]] scales the first row and column
        let d = vec![2.0, 0.0, 0.0, 1.0];
        assert!(close(
            &Composition::Sandwich.apply(&d, &m).unwrap(),
            &[4.0, 4.0, 6.0, 4.0]
        ));
    }

    #[test]
    fn test_sandwich_rejects_non_square() {
        let err = Composition::Sandwich
            .apply(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::NotSquare {
                op: "sandwich".to_string(),
                dim: 3
            }
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Composition::Hadamard
            .apply(&[1.0, 2.0], &[1.0])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::DimensionMismatch {
                left: 2,
                right: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_custom_operator() {
        let left_minus_right = Composition::custom("diff", |a, b| {
            a.iter().zip(b).map(|(x, y)| x - y).collect()
        });
        assert_eq!(left_minus_right.name(), "diff");
        assert_eq!(
            left_minus_right.apply(&[3.0, 1.0], &[1.0, 1.0]).unwrap(),
            vec![2.0, 0.0]
        );
        assert!(!left_minus_right.is_commutative());
    }

    #[test]
    fn test_custom_operator_must_keep_dimension() {
        let truncate = Composition::custom("first", |a, _| vec![a[0]]);
        assert!(truncate.apply(&[1.0, 2.0], &[3.0, 4.0]).is_err());
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-10);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-10);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_operator_names_from_config() {
        let op: Composition = serde_json::from_str("\"projection\"").unwrap();
        assert_eq!(op.name(), "projection");
    }
}
