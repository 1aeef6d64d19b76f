//! `ParseTree`: one sentence, from input string to sentence vector.

use compositional_core::Vector;
use std::fmt;
use tracing::{debug, warn};

use crate::binarize::binarize;
use crate::engine::{Composer, EngineConfig};
use crate::parser::{from_tokens, parse};
use crate::source::VectorSource;
use crate::tree::Node;
use crate::NlpError;

/// A sentence tree bound to a vector source.
///
/// Bracketed input is binarized on construction. Flat input keeps all
/// tokens as direct children of the synthetic root, so the engine's
/// directional sibling fold decides the evaluation order there.
///
/// # Example
/// ```
/// use compositional_nlp::{Lexicon, ParseTree};
///
/// let lexicon = Lexicon::from_pairs(2, [
///     ("cat", vec![0.5, 1.0]),
///     ("sits", vec![2.0, 3.0]),
/// ]).unwrap();
///
/// let mut tree = ParseTree::new("(S (NP (DT the) (NN cat)) (VP (VBZ sits)))", &lexicon).unwrap();
/// tree.evaluate().unwrap();
/// assert_eq!(tree.root_vector(), Some(&vec![1.0, 3.0]));
/// ```
pub struct ParseTree<'s> {
    data: Node,
    config: EngineConfig,
    source: &'s dyn VectorSource,
}

impl<'s> ParseTree<'s> {
    /// Parse and binarize a bracketed constituency string.
    pub fn new(bracketed: &str, source: &'s dyn VectorSource) -> Result<Self, NlpError> {
        let data = binarize(parse(bracketed)?);
        Ok(Self::from_node(data, source))
    }

    /// Build a flat tree from a delimiter-separated sentence and optional tags.
    pub fn from_tokens<S: AsRef<str>>(
        sentence: &str,
        source: &'s dyn VectorSource,
        delimiter: &str,
        tags: Option<&[S]>,
    ) -> Result<Self, NlpError> {
        let data = from_tokens(sentence, delimiter, tags)?;
        Ok(Self::from_node(data, source))
    }

    /// Bracketed if `sentence` contains `(`, flat otherwise.
    ///
    /// Tags only apply to flat sentences; bracketed input carries its own labels.
    pub fn from_sentence<S: AsRef<str>>(
        sentence: &str,
        source: &'s dyn VectorSource,
        delimiter: &str,
        tags: Option<&[S]>,
    ) -> Result<Self, NlpError> {
        if sentence.contains('(') {
            if let Some(tags) = tags {
                warn!(tags = tags.len(), "ignoring tags for bracketed sentence");
            }
            Self::new(sentence, source)
        } else {
            Self::from_tokens(sentence, source, delimiter, tags)
        }
    }

    /// Wrap an existing tree as is.
    pub fn from_node(data: Node, source: &'s dyn VectorSource) -> Self {
        Self {
            data,
            config: EngineConfig::default(),
            source,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current tree: tokens before [`evaluate`](Self::evaluate), values after.
    pub fn data(&self) -> &Node {
        &self.data
    }

    pub fn into_node(self) -> Node {
        self.data
    }

    pub fn is_evaluated(&self) -> bool {
        self.data.is_evaluated()
    }

    /// Replace the tree with its evaluated form.
    ///
    /// On error the tree is left untouched.
    pub fn evaluate(&mut self) -> Result<(), NlpError> {
        debug!(
            root = self.data.label(),
            leaves = self.data.leaf_count(),
            depth = self.data.depth(),
            default_op = %self.config.default_op,
            "evaluating parse tree"
        );
        let composer = Composer::new(&self.config, self.source);
        self.data = composer.evaluate(self.data.clone())?;
        Ok(())
    }

    /// The sentence vector. `None` before evaluation or when every leaf
    /// was absent or ignored.
    pub fn root_vector(&self) -> Option<&Vector> {
        self.data.value()
    }
}

impl fmt::Display for ParseTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl fmt::Debug for ParseTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseTree")
            .field("data", &self.data)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Lexicon;
    use crate::tree::Payload;

    fn lexicon() -> Lexicon {
        Lexicon::from_pairs(2, [("cat", vec![0.5, 1.0]), ("sits", vec![2.0, 3.0])]).unwrap()
    }

    #[test]
    fn test_bracketed_is_binarized() {
        let source = lexicon();
        let tree = ParseTree::new("(NP (DT a) (JJ big) (NN cat))", &source).unwrap();
        assert_eq!(tree.to_string(), "(NP (NP (DT a) (JJ big)) (NN cat))");
    }

    #[test]
    fn test_flat_is_not_binarized() {
        let source = lexicon();
        let tree =
            ParseTree::from_tokens("a big cat", &source, " ", Some(&["dt", "jj", "nn"][..]))
                .unwrap();
        assert_eq!(tree.data().children().len(), 3);
    }

    #[test]
    fn test_from_sentence_dispatch() {
        let source = lexicon();
        let bracketed =
            ParseTree::from_sentence::<&str>("(S (NN cat) (VB sits))", &source, " ", None).unwrap();
        assert_eq!(bracketed.data().label(), "S");

        let flat = ParseTree::from_sentence::<&str>("cat sits", &source, " ", None).unwrap();
        assert_eq!(flat.data().label(), "Root");

        // tags are ignored for bracketed input
        let tagged =
            ParseTree::from_sentence("(S (NN cat) (VB sits))", &source, " ", Some(&["x"][..]))
                .unwrap();
        assert_eq!(tagged.data().children()[0].label(), "NN");
    }

    #[test]
    fn test_evaluate_replaces_data() {
        let source = lexicon();
        let mut tree = ParseTree::new("(S (NN cat) (VB sits))", &source).unwrap();
        assert!(!tree.is_evaluated());
        assert_eq!(tree.root_vector(), None);

        tree.evaluate().unwrap();
        assert!(tree.is_evaluated());
        assert_eq!(tree.root_vector(), Some(&vec![1.0, 3.0]));
        assert_eq!(tree.to_string(), "(S (NN [0.5, 1]) (VB [2, 3]))");
    }

    #[test]
    fn test_all_absent_sentence() {
        let source = lexicon();
        let mut tree = ParseTree::new("(NP (DT the) (NN dog))", &source).unwrap();
        tree.evaluate().unwrap();
        assert_eq!(tree.root_vector(), None);
        assert_eq!(tree.data().payload(), Some(&Payload::Absent));
    }

    #[test]
    fn test_failed_evaluation_keeps_tree() {
        let source = Lexicon::from_pairs(2, [("a", vec![1.0, 2.0])]).unwrap();
        let node = Node::internal(
            "S",
            vec![Node::leaf("NN", "a"), Node::resolved("NN", Some(vec![1.0]))],
        );
        let mut tree = ParseTree::from_node(node.clone(), &source);
        assert!(matches!(tree.evaluate(), Err(NlpError::Composition(_))));
        assert_eq!(tree.data(), &node);
    }
}
