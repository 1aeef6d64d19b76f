//! Operator selection from a pair of sibling labels.
//!
//! Rules, first match wins:
//!
//! | left label | right label | rule |
//! |------------|-------------|------|
//! | ignore | ignore | [`Rule::Drop`] |
//! | ignore | other | [`Rule::PassRight`] |
//! | other | ignore | [`Rule::PassLeft`] |
//! | other | other | [`Rule::Apply`] with the active operator |
//!
//! The active operator is passed in by the caller. It is the configured
//! default, or the projection operator while an adjective fold runs.

use compositional_core::{Composition, CoreError, Vector};

use crate::labels::LabelTable;

/// How two sibling values combine.
#[derive(Debug, Clone)]
pub enum Rule<'op> {
    /// Both sides are discarded.
    Drop,
    /// Left operand passes through unchanged.
    PassLeft,
    /// Right operand passes through unchanged.
    PassRight,
    /// Combine both operands with an operator.
    Apply(&'op Composition),
}

impl Rule<'_> {
    /// Combine two present operands.
    pub fn apply(&self, left: Vector, right: Vector) -> Result<Option<Vector>, CoreError> {
        match self {
            Rule::Drop => Ok(None),
            Rule::PassLeft => Ok(Some(left)),
            Rule::PassRight => Ok(Some(right)),
            Rule::Apply(op) => op.apply(&left, &right).map(Some),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Rule::Drop => "drop",
            Rule::PassLeft => "pass-left",
            Rule::PassRight => "pass-right",
            Rule::Apply(op) => op.name(),
        }
    }
}

/// Pick the rule for a `(left, right)` label pair.
///
/// # Example
/// ```
/// use compositional_core::Composition;
/// use compositional_nlp::labels::LabelTable;
/// use compositional_nlp::selector::{select, Rule};
///
/// let labels = LabelTable::default();
/// let op = Composition::Hadamard;
/// assert!(matches!(select(&labels, "DT", "NN", &op), Rule::PassRight));
/// assert!(matches!(select(&labels, "NP", "VP", &op), Rule::Apply(_)));
/// ```
pub fn select<'op>(
    labels: &LabelTable,
    left: &str,
    right: &str,
    active: &'op Composition,
) -> Rule<'op> {
    match (labels.is_ignored(left), labels.is_ignored(right)) {
        (true, true) => Rule::Drop,
        (true, false) => Rule::PassRight,
        (false, true) => Rule::PassLeft,
        (false, false) => Rule::Apply(active),
    }
}
