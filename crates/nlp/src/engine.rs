//! The composition engine: a post-order fold over a constituency tree.
//!
//! Every leaf token is resolved through a [`VectorSource`]. Every internal
//! node then composes the values of its (already evaluated) children:
//!
//! - one child: the child's value
//! - two children: [`select`] on the two child labels, unless one side is
//!   absent, in which case the other side wins unconditionally
//! - three or more children: a pairwise fold. If any child carries an
//!   adjective label the fold runs right-to-left with the projection
//!   operator, otherwise left-to-right with the default operator. Each
//!   intermediate composite carries the parent's label.
//!
//! The operator in force is an argument of the fold, so a projection fold
//! never leaks into sibling or ancestor nodes.
//!
//! # Example
//!
//! ```rust
//! use compositional_nlp::engine::{Composer, EngineConfig};
//! use compositional_nlp::parser::parse;
//! use compositional_nlp::source::Lexicon;
//!
//! let lexicon = Lexicon::from_pairs(2, [
//!     ("cat", vec![0.3, 0.5]),
//!     ("sits", vec![2.0, 4.0]),
//! ]).unwrap();
//! let config = EngineConfig::default();
//! let composer = Composer::new(&config, &lexicon);
//!
//! let tree = parse("(S (NP (DT the) (NN cat)) (VP (VBZ sits)))").unwrap();
//! let evaluated = composer.evaluate(tree).unwrap();
//! assert_eq!(evaluated.value(), Some(&vec![0.6, 2.0]));
//! ```

use compositional_core::{Composition, Vector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::labels::LabelTable;
use crate::selector::select;
use crate::source::VectorSource;
use crate::tree::{Node, Payload};
use crate::NlpError;

/// Operators and label classification used during evaluation.
///
/// Deserializable, e.g. `{"default_op": "sum", "labels": {"adjective": ["jj"]}}`;
/// omitted fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operator for ordinary sibling pairs.
    pub default_op: Composition,
    /// Operator in force during adjective-triggered right-to-left folds.
    pub projection_op: Composition,
    /// Label classification table.
    pub labels: LabelTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_op: Composition::Hadamard,
            projection_op: Composition::Projection,
            labels: LabelTable::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_default_op(mut self, op: Composition) -> Self {
        self.default_op = op;
        self
    }

    pub fn with_projection_op(mut self, op: Composition) -> Self {
        self.projection_op = op;
        self
    }

    pub fn with_labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }
}

/// Order in which three or more siblings are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDirection {
    LeftToRight,
    RightToLeft,
}

/// A labeled value taking part in one composition step.
struct Operand<'a> {
    label: &'a str,
    value: Option<Vector>,
}

impl<'a> Operand<'a> {
    fn of(node: &'a Node) -> Self {
        Self {
            label: node.label(),
            value: node.value().cloned(),
        }
    }
}

/// Evaluates trees against a vector source.
pub struct Composer<'a> {
    config: &'a EngineConfig,
    source: &'a dyn VectorSource,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a EngineConfig, source: &'a dyn VectorSource) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Evaluate `node` bottom-up.
    ///
    /// The result has the same shape and labels as the input. Leaves hold
    /// vectors or [`Payload::Absent`] instead of tokens, and every internal
    /// node holds its composed value. Already-resolved payloads pass through,
    /// so evaluating twice is harmless.
    ///
    /// # Errors
    /// - [`NlpError::DimensionMismatch`] if the source returns a vector of
    ///   the wrong dimension
    /// - [`NlpError::Composition`] if an operator rejects its operands
    pub fn evaluate(&self, node: Node) -> Result<Node, NlpError> {
        match node {
            Node::Leaf { label, payload } => Ok(Node::Leaf {
                payload: self.resolve(payload)?,
                label,
            }),
            Node::Internal {
                label, children, ..
            } => {
                let children = children
                    .into_iter()
                    .map(|child| self.evaluate(child))
                    .collect::<Result<Vec<_>, _>>()?;

                let value = match children.as_slice() {
                    [] => None,
                    [only] => only.value().cloned(),
                    [left, right] => {
                        self.combine(
                            Operand::of(left),
                            Operand::of(right),
                            &label,
                            &self.config.default_op,
                        )?
                        .value
                    }
                    many => self.fold(many, &label)?,
                };

                Ok(Node::Internal {
                    label,
                    children,
                    value: Some(Payload::from_value(value)),
                })
            }
        }
    }

    /// Evaluate `left` and `right` as the two children of a node labeled
    /// `parent_label`.
    pub fn evaluate_2(&self, left: Node, right: Node, parent_label: &str) -> Result<Node, NlpError> {
        self.evaluate(Node::internal(parent_label, vec![left, right]))
    }

    /// Direction a fold over these sibling labels would take.
    pub fn fold_direction<'l>(&self, labels: impl IntoIterator<Item = &'l str>) -> FoldDirection {
        if labels
            .into_iter()
            .any(|label| self.config.labels.is_adjective(label))
        {
            FoldDirection::RightToLeft
        } else {
            FoldDirection::LeftToRight
        }
    }

    fn resolve(&self, payload: Payload) -> Result<Payload, NlpError> {
        let token = match payload {
            Payload::Token(token) => token,
            resolved => return Ok(resolved),
        };
        match self.source.lookup(&token) {
            Some(v) if v.len() != self.source.dimension() => Err(NlpError::DimensionMismatch {
                word: token,
                expected: self.source.dimension(),
                got: v.len(),
            }),
            value => {
                if value.is_none() {
                    trace!(token = %token, "no vector for token");
                }
                Ok(Payload::from_value(value))
            }
        }
    }

    /// One composition step; the composite carries `parent_label`.
    fn combine<'l>(
        &self,
        left: Operand<'_>,
        right: Operand<'_>,
        parent_label: &'l str,
        active: &Composition,
    ) -> Result<Operand<'l>, NlpError> {
        let value = match (left.value, right.value) {
            (None, None) => None,
            (Some(v), None) | (None, Some(v)) => Some(v),
            (Some(l), Some(r)) => {
                let rule = select(&self.config.labels, left.label, right.label, active);
                trace!(
                    left = left.label,
                    right = right.label,
                    parent = parent_label,
                    rule = rule.name(),
                    "compose"
                );
                rule.apply(l, r)?
            }
        };
        Ok(Operand {
            label: parent_label,
            value,
        })
    }

    fn fold(&self, children: &[Node], parent_label: &str) -> Result<Option<Vector>, NlpError> {
        let direction = self.fold_direction(children.iter().map(Node::label));
        debug!(
            parent = parent_label,
            children = children.len(),
            ?direction,
            "folding siblings"
        );

        let operands = children.iter().map(Operand::of);
        let folded = match direction {
            FoldDirection::LeftToRight => {
                let op = &self.config.default_op;
                let mut operands = operands;
                let Some(mut acc) = operands.next() else {
                    return Ok(None);
                };
                for next in operands {
                    acc = self.combine(acc, next, parent_label, op)?;
                }
                acc
            }
            FoldDirection::RightToLeft => {
                let op = &self.config.projection_op;
                let mut operands = operands.rev();
                let Some(mut acc) = operands.next() else {
                    return Ok(None);
                };
                for next in operands {
                    acc = self.combine(next, acc, parent_label, op)?;
                }
                acc
            }
        };
        Ok(folded.value)
    }
}
