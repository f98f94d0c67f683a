use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224};

/// Opaque identifier of a blob or permanode, e.g. `sha224-0c3f...`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(String);

impl BlobRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Content address of `data` in the `sha224-<hex>` form the server expects.
    #[must_use]
    pub fn sha224(data: &[u8]) -> Self {
        let digest = Sha224::digest(data);
        Self(format!("sha224-{}", hex::encode(digest)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlobRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
