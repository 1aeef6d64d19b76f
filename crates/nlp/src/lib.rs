//! # NLP - Label-Driven Composition over Constituency Trees
//!
//! This crate turns a parsed sentence into one vector by folding word
//! vectors up its constituency tree. The rule at each node depends on the
//! part-of-speech labels of the two things being combined.
//!
//! ## Pipeline
//!
//! - **Parsing**: bracketed strings or flat tagged token lists become trees
//! - **Binarization**: every node is normalized to at most two children
//! - **Selection**: ignorable labels drop out or pass their sibling through
//! - **Composition**: a post-order fold; three or more siblings fold
//!   right-to-left with a projection operator when an adjective is present,
//!   left-to-right with the default operator otherwise
//!
//! Missing vectors are not errors. An absent operand simply yields to the
//! other side, and a sentence whose every word is absent composes to `None`.
//!
//! ## Example: "the cat sits"
//!
//! ```rust
//! use compositional_nlp::{Lexicon, ParseTree};
//!
//! let lexicon = Lexicon::from_pairs(3, [
//!     ("cat", vec![1.0, 0.5, 0.0]),
//!     ("sits", vec![0.5, 2.0, 1.0]),
//! ]).unwrap();
//!
//! let mut tree = ParseTree::new("(S (NP (DT the) (NN cat)) (VP (VBZ sits)))", &lexicon).unwrap();
//! tree.evaluate().unwrap();
//!
//! // "the" has no vector, so NP is just "cat"; S = cat ⊙ sits
//! assert_eq!(tree.root_vector(), Some(&vec![0.5, 1.0, 0.0]));
//! ```

pub mod binarize;
pub mod engine;
mod error;
pub mod labels;
pub mod parse_tree;
pub mod parser;
pub mod selector;
pub mod source;
pub mod tree;

pub use binarize::{binarize, is_binary};
pub use engine::{Composer, EngineConfig, FoldDirection};
pub use error::NlpError;
pub use labels::{LabelClass, LabelTable};
pub use parse_tree::ParseTree;
pub use parser::{from_tokens, parse, FLAT_ROOT_LABEL};
pub use selector::{select, Rule};
pub use source::{Lexicon, VectorSource};
pub use tree::{Node, Payload};

pub use compositional_core::{Composition, CoreError, Vector};
