//! Search constraints understood by the storage server's query handler.

use serde::Serialize;

use crate::{BlobRef, CAMLI_CONTENT};

/// Body of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub constraint: Constraint,
}

impl SearchQuery {
    #[must_use]
    pub fn new(constraint: Constraint) -> Self {
        Self { constraint }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Constraint {
    File(FileConstraint),
    Permanode(PermanodeConstraint),
}

impl Constraint {
    /// Content blobs whose file name and size match exactly.
    #[must_use]
    pub fn file_named(name: impl Into<String>, size: u64) -> Self {
        Constraint::File(FileConstraint {
            filename: StringConstraint {
                equals: name.into(),
            },
            filesize: IntConstraint {
                min: size,
                max: size,
            },
        })
    }

    /// Permanodes whose `camliContent` points at `blob`.
    #[must_use]
    pub fn permanode_content(blob: &BlobRef) -> Self {
        Constraint::Permanode(PermanodeConstraint {
            attr: CAMLI_CONTENT.to_string(),
            value: blob.as_str().to_string(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::File(_) => "file",
            Constraint::Permanode(_) => "permanode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileConstraint {
    pub filename: StringConstraint,
    pub filesize: IntConstraint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringConstraint {
    pub equals: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntConstraint {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermanodeConstraint {
    pub attr: String,
    pub value: String,
}
