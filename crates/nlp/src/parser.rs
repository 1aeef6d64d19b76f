//! Readers for the two input formats.
//!
//! - Bracketed constituency notation: `(S (NP (DT the) (NN cat)) (VP (VBZ sits)))`
//! - Flat sentences: `"red ball flies"` plus optional tags `["jj", "nn", "vbz"]`
//!
//! Both produce an n-ary [`Node`]; see [`crate::binarize`] for the
//! normalization to at most two children.
//!
//! # Grammar
//!
//! ```text
//! node  := '(' label? ( token | node+ ) ')'
//! label := run of characters other than whitespace and parentheses
//! token := run of characters other than whitespace and parentheses
//! ```
//!
//! The label must directly follow the opening parenthesis; `((S ...))` has
//! an empty outer label.

use crate::tree::Node;
use crate::NlpError;
use tracing::debug;

/// Label of the synthetic root built over a flat sentence.
pub const FLAT_ROOT_LABEL: &str = "Root";

/// Byte cursor over the input. Only ASCII bytes are ever split on,
/// so every slice it hands out lies on a char boundary.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_if(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Read a label or token: everything up to whitespace or a parenthesis.
    fn read_atom(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && b != b'(' && b != b')')
        {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }
}

/// The single payload slot of a bracket that may turn out to be a leaf.
#[derive(Default)]
struct LeafSlot {
    token: Option<String>,
}

impl LeafSlot {
    fn fill(&mut self, token: &str) -> Result<(), NlpError> {
        match &self.token {
            Some(existing) => Err(NlpError::ChildAlreadyExists {
                existing: existing.clone(),
                new: token.to_string(),
            }),
            None => {
                self.token = Some(token.to_string());
                Ok(())
            }
        }
    }
}

/// Parse a bracketed constituency string into an n-ary tree.
///
/// # Errors
/// - [`NlpError::Parse`] on unbalanced or empty brackets, tokens mixed with
///   bracketed children, or trailing input after the root
/// - [`NlpError::ChildAlreadyExists`] when a leaf bracket holds two tokens
///
/// # Example
/// ```
/// use compositional_nlp::parser::parse;
///
/// let tree = parse("(S (NP (DT the) (NN cat)) (VP (VBZ sits)))").unwrap();
/// assert_eq!(tree.label(), "S");
/// assert_eq!(tree.leaf_count(), 3);
/// ```
pub fn parse(input: &str) -> Result<Node, NlpError> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    if cursor.at_end() {
        return Err(NlpError::parse(cursor.pos, "empty input"));
    }

    let root = parse_node(&mut cursor)?;

    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(NlpError::parse(
            cursor.pos,
            format!(
                "unexpected {:?} after the root node",
                cursor.peek_char().unwrap_or_default()
            ),
        ));
    }

    debug!(
        label = root.label(),
        leaves = root.leaf_count(),
        depth = root.depth(),
        "parsed bracketed tree"
    );
    Ok(root)
}

fn parse_node(cursor: &mut Cursor<'_>) -> Result<Node, NlpError> {
    let open = cursor.pos;
    if !cursor.consume_if(b'(') {
        return Err(NlpError::parse(
            cursor.pos,
            format!("expected '(' but found {:?}", cursor.peek_char()),
        ));
    }
    let label = cursor.read_atom();

    let mut slot = LeafSlot::default();
    let mut children = Vec::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => {
                return Err(NlpError::parse(
                    open,
                    format!("unclosed '(' of node '{}'", label),
                ))
            }
            Some(b')') => {
                cursor.pos += 1;
                break;
            }
            Some(b'(') => {
                if let Some(token) = &slot.token {
                    return Err(NlpError::parse(
                        cursor.pos,
                        format!("node '{}' mixes token '{}' with subtrees", label, token),
                    ));
                }
                children.push(parse_node(cursor)?);
            }
            Some(_) => {
                let at = cursor.pos;
                let token = cursor.read_atom();
                if !children.is_empty() {
                    return Err(NlpError::parse(
                        at,
                        format!("node '{}' mixes token '{}' with subtrees", label, token),
                    ));
                }
                slot.fill(token)?;
            }
        }
    }

    match slot.token {
        Some(token) => Ok(Node::leaf(label, token)),
        None if children.is_empty() => Err(NlpError::parse(
            open,
            format!("node '{}' has no children", label),
        )),
        None => Ok(Node::internal(label, children)),
    }
}

/// Build a flat tree from a delimiter-separated sentence.
///
/// Every token becomes a leaf labeled with its tag (or the empty label when
/// no tags are given) and all leaves hang under one root labeled
/// [`FLAT_ROOT_LABEL`]. Splitting keeps empty tokens between repeated
/// delimiters; an empty delimiter splits on whitespace runs. A blank
/// sentence yields a single empty token.
///
/// # Errors
/// [`NlpError::ShapeMismatch`] when `tags` is given and its length differs
/// from the token count.
///
/// # Example
/// ```
/// use compositional_nlp::parser::from_tokens;
///
/// let tree = from_tokens("red ball flies", " ", Some(&["jj", "nn", "vbz"][..])).unwrap();
/// assert_eq!(tree.label(), "Root");
/// assert_eq!(tree.children().len(), 3);
/// assert_eq!(tree.children()[0].label(), "jj");
/// ```
pub fn from_tokens<S: AsRef<str>>(
    sentence: &str,
    delimiter: &str,
    tags: Option<&[S]>,
) -> Result<Node, NlpError> {
    let mut tokens: Vec<&str> = if delimiter.is_empty() {
        sentence.split_whitespace().collect()
    } else {
        sentence.split(delimiter).collect()
    };
    // A blank sentence is one empty token, as with an explicit delimiter.
    if tokens.is_empty() {
        tokens.push("");
    }

    let leaves: Vec<Node> = match tags {
        Some(tags) => {
            if tags.len() != tokens.len() {
                return Err(NlpError::ShapeMismatch {
                    tags: tags.len(),
                    tokens: tokens.len(),
                });
            }
            tokens
                .iter()
                .zip(tags)
                .map(|(token, tag)| Node::leaf(tag.as_ref(), *token))
                .collect()
        }
        None => tokens.iter().map(|token| Node::leaf("", *token)).collect(),
    };

    debug!(tokens = leaves.len(), tagged = tags.is_some(), "built flat tree");
    Ok(Node::internal(FLAT_ROOT_LABEL, leaves))
}
