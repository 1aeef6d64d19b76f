//! # Core - Vector Composition
//!
//! This crate provides the operators used to combine word vectors into
//! phrase and sentence vectors:
//!
//! - **Operators**: elementwise product, sum, directional projection,
//!   matrix sandwich, or any user-supplied closure
//! - **Errors**: dimension mismatches as first-class composition failures
//! - **Helpers**: inner product, norm and cosine similarity over `f64` slices
//!
//! ## Example
//!
//! ```rust
//! use compositional_core::Composition;
//!
//! let red = vec![1.0, 0.5];
//! let ball = vec![0.2, 0.4];
//!
//! let product = Composition::Hadamard.apply(&red, &ball).unwrap();
//! assert_eq!(product, vec![0.2, 0.2]);
//! ```

pub mod error;
pub mod ops;

pub use error::CoreError;
pub use ops::{cosine_similarity, inner_product, norm, BinaryFn, Composition, Vector};
