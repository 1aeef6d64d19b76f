//! Constituency trees.
//!
//! A [`Node`] is an owned tree: every internal node exclusively owns its
//! children, so trees are acyclic by construction. Leaves carry a single
//! [`Payload`] slot that starts as a token and is replaced by a vector (or
//! an absence marker) when the tree is evaluated. Internal nodes receive
//! their composed value in the same way.

use compositional_core::Vector;
use std::fmt;

/// What a leaf holds, or what an evaluated internal node composed to.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An unresolved word.
    Token(String),
    /// A resolved vector.
    Vector(Vector),
    /// Resolved, but this subtree contributes no representation.
    Absent,
}

impl Payload {
    /// Build a resolved payload from an optional vector.
    pub fn from_value(value: Option<Vector>) -> Self {
        match value {
            Some(v) => Payload::Vector(v),
            None => Payload::Absent,
        }
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Payload::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Payload::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Payload::Absent)
    }

    /// True once the payload is no longer a token.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Payload::Token(_))
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Token(t) => write!(f, "{}", t),
            Payload::Vector(v) => {
                write!(f, "[")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", x)?;
                }
                write!(f, "]")
            }
            Payload::Absent => write!(f, "<absent>"),
        }
    }
}

/// A node of a constituency tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A labeled word (a preterminal in bracket notation).
    Leaf { label: String, payload: Payload },
    /// A labeled constituent with one or more children.
    ///
    /// `value` stays `None` until the node is evaluated.
    Internal {
        label: String,
        children: Vec<Node>,
        value: Option<Payload>,
    },
}

impl Node {
    /// A leaf holding an unresolved token.
    pub fn leaf(label: impl Into<String>, token: impl Into<String>) -> Self {
        Node::Leaf {
            label: label.into(),
            payload: Payload::Token(token.into()),
        }
    }

    /// A leaf holding an already-resolved value.
    pub fn resolved(label: impl Into<String>, value: Option<Vector>) -> Self {
        Node::Leaf {
            label: label.into(),
            payload: Payload::from_value(value),
        }
    }

    /// An unevaluated internal node.
    pub fn internal(label: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Internal {
            label: label.into(),
            children,
            value: None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Leaf { label, .. } | Node::Internal { label, .. } => label,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Children of an internal node; empty for a leaf.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }

    /// The leaf payload, or the composed value of an evaluated internal node.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Node::Leaf { payload, .. } => Some(payload),
            Node::Internal { value, .. } => value.as_ref(),
        }
    }

    /// The resolved vector at this node, if any.
    pub fn value(&self) -> Option<&Vector> {
        self.payload().and_then(Payload::as_vector)
    }

    /// True when this node's payload has been resolved.
    pub fn is_evaluated(&self) -> bool {
        self.payload().is_some_and(Payload::is_resolved)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => children.iter().map(Node::leaf_count).sum(),
        }
    }

    /// Leaf payloads in left-to-right order.
    pub fn leaves(&self) -> Vec<&Payload> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Payload>) {
        match self {
            Node::Leaf { payload, .. } => out.push(payload),
            Node::Internal { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Same branching structure and labels, ignoring payloads.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf { label: a, .. }, Node::Leaf { label: b, .. }) => a == b,
            (
                Node::Internal {
                    label: a,
                    children: ca,
                    ..
                },
                Node::Internal {
                    label: b,
                    children: cb,
                    ..
                },
            ) => a == b && ca.len() == cb.len() && ca.iter().zip(cb).all(|(x, y)| x.same_shape(y)),
            _ => false,
        }
    }
}

impl fmt::Display for Node {
    /// Bracket notation, e.g. `(S (NP (DT the) (NN cat)) (VP (VBZ sits)))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf { label, payload } => write!(f, "({} {})", label, payload),
            Node::Internal {
                label, children, ..
            } => {
                write!(f, "({}", label)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
