//! Labels and label sets.
//!
//! A label is a cheap-to-clone string tag. Label sets are unordered and
//! duplicate-free; iteration is in lexical order so that re-serialization
//! is stable.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A string tag attached to nodes, edges and higher-order elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(Arc<str>);

impl Label {
    /// Create a new label.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Get the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label(Arc::from(name))
    }
}

impl From<&Label> for Label {
    fn from(label: &Label) -> Self {
        label.clone()
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Label::from)
    }
}

/// An unordered, duplicate-free set of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: BTreeSet<Label>,
}

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label. Returns false if it was already present.
    pub fn insert(&mut self, label: impl Into<Label>) -> bool {
        self.labels.insert(label.into())
    }

    /// Remove a label. Returns true if it was present.
    pub fn remove(&mut self, label: &Label) -> bool {
        self.labels.remove(label)
    }

    /// Check membership by name.
    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains(name)
    }

    /// True if every label of `self` is also in `other`.
    pub fn is_subset(&self, other: &LabelSet) -> bool {
        self.labels.is_subset(&other.labels)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the set has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

impl<L: Into<Label>> FromIterator<L> for LabelSet {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<L: Into<Label>> Extend<L> for LabelSet {
    fn extend<I: IntoIterator<Item = L>>(&mut self, iter: I) {
        self.labels.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for LabelSet {
    type Item = Label;
    type IntoIter = std::collections::btree_set::IntoIter<Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::collections::btree_set::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.labels {
            write!(f, ":{}", label)?;
        }
        Ok(())
    }
}
