//! Part-of-speech label classification.
//!
//! Labels are plain strings. Whether a label drops out of composition,
//! multiplies elementwise, or triggers an adjective fold is decided by
//! looking it up in a [`LabelTable`], never by the label's type.
//!
//! ```rust
//! use compositional_nlp::labels::{LabelClass, LabelTable};
//!
//! let table = LabelTable::default();
//! assert!(table.is_ignored("DT"));
//! assert!(table.is_adjective("jj"));
//! assert!(table.classify("NN").is_empty());
//!
//! let table = table.with(LabelClass::Ignore, "UH");
//! assert!(table.is_ignored("uh"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The classification sets a label can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelClass {
    /// Contributes no representation; dropped or passed through.
    Ignore,
    /// Closed-class function words. Carried as data for callers; the
    /// selector rules do not consult it.
    Hadamard,
    /// Triggers right-to-left projection folds among three or more siblings.
    Adjective,
}

impl fmt::Display for LabelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelClass::Ignore => write!(f, "ignore"),
            LabelClass::Hadamard => write!(f, "hadamard"),
            LabelClass::Adjective => write!(f, "adjective"),
        }
    }
}

/// Label classification table. Membership is ASCII case-insensitive.
///
/// Deserializes from e.g. `{"ignore": ["dt", "."], "adjective": ["jj"]}`;
/// omitted sets take their default contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelTable {
    #[serde(deserialize_with = "lowercased")]
    ignore: BTreeSet<String>,
    #[serde(deserialize_with = "lowercased")]
    hadamard: BTreeSet<String>,
    #[serde(deserialize_with = "lowercased")]
    adjective: BTreeSet<String>,
}

// Every stored label is ASCII-lowercased.
fn normalize(label: &str) -> String {
    label.to_ascii_lowercase()
}

fn lowercased<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = Vec::<String>::deserialize(deserializer)?;
    Ok(labels.iter().map(|l| normalize(l)).collect())
}

const IGNORE_LABELS: &[&str] = &["ls", "pos", ".", "dt", ","];
const HADAMARD_LABELS: &[&str] = &["ex", "cd", "md", "pdt", "prp", "prp$", "rp", "uh", "to"];
const ADJECTIVE_LABELS: &[&str] = &["in", "jj"];

fn set_of(labels: &[&str]) -> BTreeSet<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

impl Default for LabelTable {
    fn default() -> Self {
        Self {
            ignore: set_of(IGNORE_LABELS),
            hadamard: set_of(HADAMARD_LABELS),
            adjective: set_of(ADJECTIVE_LABELS),
        }
    }
}

impl LabelTable {
    /// A table with every set empty.
    pub fn empty() -> Self {
        Self {
            ignore: BTreeSet::new(),
            hadamard: BTreeSet::new(),
            adjective: BTreeSet::new(),
        }
    }

    fn set(&self, class: LabelClass) -> &BTreeSet<String> {
        match class {
            LabelClass::Ignore => &self.ignore,
            LabelClass::Hadamard => &self.hadamard,
            LabelClass::Adjective => &self.adjective,
        }
    }

    fn set_mut(&mut self, class: LabelClass) -> &mut BTreeSet<String> {
        match class {
            LabelClass::Ignore => &mut self.ignore,
            LabelClass::Hadamard => &mut self.hadamard,
            LabelClass::Adjective => &mut self.adjective,
        }
    }

    /// Add a label to a class.
    pub fn insert(&mut self, class: LabelClass, label: &str) {
        self.set_mut(class).insert(normalize(label));
    }

    /// Remove a label from a class. Returns whether it was present.
    pub fn remove(&mut self, class: LabelClass, label: &str) -> bool {
        self.set_mut(class).remove(&normalize(label))
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, class: LabelClass, label: &str) -> Self {
        self.insert(class, label);
        self
    }

    /// Check membership of `label` in `class`. The empty label is in no class.
    pub fn contains(&self, class: LabelClass, label: &str) -> bool {
        if label.is_empty() {
            return false;
        }
        self.set(class).contains(&normalize(label))
    }

    pub fn is_ignored(&self, label: &str) -> bool {
        self.contains(LabelClass::Ignore, label)
    }

    pub fn is_hadamard(&self, label: &str) -> bool {
        self.contains(LabelClass::Hadamard, label)
    }

    pub fn is_adjective(&self, label: &str) -> bool {
        self.contains(LabelClass::Adjective, label)
    }

    /// All classes `label` belongs to, in declaration order.
    pub fn classify(&self, label: &str) -> Vec<LabelClass> {
        [
            LabelClass::Ignore,
            LabelClass::Hadamard,
            LabelClass::Adjective,
        ]
        .into_iter()
        .filter(|&class| self.contains(class, label))
        .collect()
    }

    /// Labels in `class`, ASCII-lowercased and sorted.
    pub fn labels(&self, class: LabelClass) -> impl Iterator<Item = &str> {
        self.set(class).iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sets() {
        let table = LabelTable::default();
        for label in ["ls", "POS", ".", "DT", ","] {
            assert!(table.is_ignored(label), "{label} should be ignored");
        }
        assert!(table.is_hadamard("PRP$"));
        assert!(table.is_hadamard("to"));
        assert!(table.is_adjective("IN"));
        assert!(table.is_adjective("Jj"));
        assert!(!table.is_adjective("NN"));
    }

    #[test]
    fn test_empty_label_is_unclassified() {
        let table = LabelTable::default().with(LabelClass::Ignore, "");
        assert!(!table.is_ignored(""));
        assert!(table.classify("").is_empty());
    }

    #[test]
    fn test_insert_and_remove() {
        let mut table = LabelTable::empty();
        assert!(!table.is_ignored("DT"));

        table.insert(LabelClass::Ignore, "DT");
        assert!(table.is_ignored("dt"));
        assert_eq!(table.labels(LabelClass::Ignore).collect::<Vec<_>>(), ["dt"]);

        assert!(table.remove(LabelClass::Ignore, "Dt"));
        assert!(!table.is_ignored("DT"));
        assert!(!table.remove(LabelClass::Ignore, "DT"));
    }

    #[test]
    fn test_classify_multiple() {
        let table = LabelTable::default().with(LabelClass::Adjective, "cd");
        assert_eq!(
            table.classify("CD"),
            vec![LabelClass::Hadamard, LabelClass::Adjective]
        );
    }

    #[test]
    fn test_deserialize_partial_table() {
        let table: LabelTable = serde_json::from_str(r#"{"adjective": ["JJ", "RB"]}"#).unwrap();
        assert!(table.is_adjective("rb"));
        assert!(!table.is_adjective("in"));
        // omitted sets keep their defaults
        assert!(table.is_ignored("dt"));
        assert!(table.is_hadamard("md"));
    }

    #[test]
    fn test_deserialized_labels_are_lowercased() {
        let table: LabelTable = serde_json::from_str(r#"{"adjective": ["JJ", "Rb"]}"#).unwrap();
        assert_eq!(
            table.labels(LabelClass::Adjective).collect::<Vec<_>>(),
            ["jj", "rb"]
        );
        assert!(table.is_adjective("RB"));
    }

    #[test]
    fn test_non_ascii_label_matches_itself() {
        let table = LabelTable::empty().with(LabelClass::Ignore, "É");
        assert!(table.is_ignored("É"));
        assert_eq!(table.labels(LabelClass::Ignore).collect::<Vec<_>>(), ["É"]);

        let mut table = table.with(LabelClass::Ignore, "XÉ");
        assert!(table.is_ignored("xÉ"));
        assert!(table.remove(LabelClass::Ignore, "xÉ"));
        assert!(!table.is_ignored("XÉ"));
    }
}
