//! Binarization: at most two children per node.
//!
//! - one child: kept as a unary node under its own label
//! - two children: unchanged
//! - k > 2 children: left-folded into nested binary nodes that all carry the
//!   original parent's label, `(P (P (P c1 c2) c3) c4)`
//!
//! The resulting spine leans left. Evaluation order over siblings is chosen
//! by the engine, not by the shape produced here.

use crate::tree::Node;

/// Normalize `node` so that every internal node has one or two children.
///
/// Idempotent: binarizing an already-binary tree returns it unchanged.
///
/// # Example
/// ```
/// use compositional_nlp::binarize::binarize;
/// use compositional_nlp::parser::parse;
///
/// let tree = parse("(NP (DT a) (JJ big) (JJ red) (NN ball))").unwrap();
/// let binary = binarize(tree);
/// assert_eq!(
///     binary.to_string(),
///     "(NP (NP (NP (DT a) (JJ big)) (JJ red)) (NN ball))"
/// );
/// ```
pub fn binarize(node: Node) -> Node {
    match node {
        leaf @ Node::Leaf { .. } => leaf,
        Node::Internal {
            label,
            children,
            value,
        } => {
            let children: Vec<Node> = children.into_iter().map(binarize).collect();
            if children.len() <= 2 {
                return Node::Internal {
                    label,
                    children,
                    value,
                };
            }

            let mut rest = children.into_iter();
            let first_pair: Vec<Node> = rest.by_ref().take(2).collect();
            rest.fold(Node::internal(label.clone(), first_pair), |acc, next| {
                Node::internal(label.clone(), vec![acc, next])
            })
        }
    }
}

/// True when no internal node has more than two children.
pub fn is_binary(node: &Node) -> bool {
    node.children().len() <= 2 && node.children().iter().all(is_binary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{from_tokens, parse};

    #[test]
    fn test_binary_tree_unchanged() {
        let tree = parse("(S (NP (DT the) (NN cat)) (VP (VBZ sits)))").unwrap();
        assert!(is_binary(&tree));
        assert_eq!(binarize(tree.clone()), tree);
    }

    #[test]
    fn test_unary_node_keeps_its_label() {
        let tree = parse("(VP (VBZ sits))").unwrap();
        let binary = binarize(tree);
        assert_eq!(binary.label(), "VP");
        assert_eq!(binary.children().len(), 1);
        assert_eq!(binary.children()[0], Node::leaf("VBZ", "sits"));
    }

    #[test]
    fn test_wide_node_left_folds() {
        let tree = parse("(S (A a) (B b) (C c) (D d))").unwrap();
        let binary = binarize(tree);
        assert_eq!(
            binary.to_string(),
            "(S (S (S (A a) (B b)) (C c)) (D d))"
        );
        assert!(is_binary(&binary));
        assert_eq!(binary.leaf_count(), 4);
    }

    #[test]
    fn test_children_binarized_before_fold() {
        let tree = parse("(S (NP (A a) (B b) (C c)) (X x) (Y y))").unwrap();
        let binary = binarize(tree);
        assert_eq!(
            binary.to_string(),
            "(S (S (NP (NP (A a) (B b)) (C c)) (X x)) (Y y))"
        );
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "(S (NP (DT the) (JJ big) (NN cat)) (VP (VBZ sits) (PP (IN on) (NP (DT the) (NN mat)))))",
            "((S (A a) (B b) (C c) (D d) (E e)))",
            "(X (Y (Z z)))",
        ] {
            let once = binarize(parse(input).unwrap());
            let twice = binarize(once.clone());
            assert_eq!(once, twice, "binarize not idempotent for {input}");
        }
    }

    #[test]
    fn test_flat_tree() {
        let flat = from_tokens("red ball flies", " ", Some(&["jj", "nn", "vbz"][..])).unwrap();
        assert!(!is_binary(&flat));
        let binary = binarize(flat);
        assert_eq!(
            binary.to_string(),
            "(Root (Root (jj red) (nn ball)) (vbz flies))"
        );
    }
}
