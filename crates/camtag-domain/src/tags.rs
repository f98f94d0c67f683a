use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DomainError, Mode};

/// Attribute carrying a permanode's tags.
pub const TAG_ATTRIBUTE: &str = "tag";

/// Case-sensitive, deduplicated set of tags.
///
/// Backed by a `BTreeSet` so mutations and reports come out in a stable
/// order from run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list such as `vacation,2023`.
    ///
    /// Empty segments are dropped; a list with nothing left is rejected.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyTagList`] when no tag remains.
    pub fn parse_list(raw: &str) -> Result<Self, DomainError> {
        let tags: Self = raw.split(',').filter(|tag| !tag.is_empty()).collect();
        if tags.is_empty() {
            return Err(DomainError::EmptyTagList);
        }
        Ok(tags)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn difference(&self, other: &TagSet) -> TagSet {
        self.0.difference(&other.0).cloned().collect()
    }

    #[must_use]
    pub fn intersection(&self, other: &TagSet) -> TagSet {
        self.0.intersection(&other.0).cloned().collect()
    }

    #[must_use]
    pub fn is_disjoint(&self, other: &TagSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    #[must_use]
    pub fn is_subset(&self, other: &TagSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl FromStr for TagSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_list(s)
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Tags that actually need a mutation for `mode`.
///
/// Adding only touches tags not yet present; deleting only touches tags
/// that are present.
#[must_use]
pub fn reconcile(mode: Mode, requested: &TagSet, current: &TagSet) -> TagSet {
    match mode {
        Mode::Add => requested.difference(current),
        Mode::Del => requested.intersection(current),
    }
}
