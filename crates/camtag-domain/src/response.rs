//! Typed views of the storage server's search and describe responses.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::{BlobRef, TagSet, TAG_ATTRIBUTE};

/// Result of a search query. A missing or null `blobs` field means no match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub blobs: Option<Vec<SearchResultBlob>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultBlob {
    pub blob: BlobRef,
}

impl SearchResult {
    /// Matched identifiers in server order, with blank entries dropped.
    #[must_use]
    pub fn blob_refs(self) -> Vec<BlobRef> {
        self.blobs
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.blob)
            .filter(|blob| !blob.is_empty())
            .collect()
    }
}

/// Result of a describe call, keyed by blob ref.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescribeResponse {
    #[serde(default)]
    pub meta: HashMap<String, DescribedBlob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescribedBlob {
    #[serde(default)]
    pub permanode: Option<DescribedPermanode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescribedPermanode {
    #[serde(default)]
    pub attr: AttributeMap,
}

impl DescribeResponse {
    /// Attributes of `node`, or `None` when the response does not describe
    /// it as a permanode.
    #[must_use]
    pub fn into_attributes(mut self, node: &BlobRef) -> Option<AttributeMap> {
        self.meta
            .remove(node.as_str())
            .and_then(|described| described.permanode)
            .map(|permanode| permanode.attr)
    }
}

/// One or many values of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttrValues {
    One(String),
    Many(Vec<String>),
}

impl AttrValues {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            AttrValues::One(value) => std::slice::from_ref(value),
            AttrValues::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

/// Attribute name to values for one permanode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, AttrValues>);

impl AttributeMap {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValues> {
        self.0.get(name)
    }

    /// Current tags; empty when the node has no `tag` attribute.
    #[must_use]
    pub fn tags(&self) -> TagSet {
        self.get(TAG_ATTRIBUTE)
            .map(|values| values.iter().collect())
            .unwrap_or_default()
    }
}

impl<K: Into<String>> FromIterator<(K, AttrValues)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, AttrValues)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
