use camtag_domain::{BlobRef, DescribeResponse, Mode, SearchQuery};

use crate::error::ServiceError;

/// One attribute change against one permanode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrMutation<'a> {
    pub mode: Mode,
    pub permanode: &'a BlobRef,
    pub attribute: &'a str,
    pub value: &'a str,
}

/// Storage server operations the tagging pipeline depends on.
pub trait StorageClient: Send + Sync {
    /// Blob refs matching `query`, in server order. No match is an empty list.
    fn search(&self, query: &SearchQuery) -> Result<Vec<BlobRef>, ServiceError>;
    fn describe(&self, node: &BlobRef) -> Result<DescribeResponse, ServiceError>;
    /// Applies `mutation` and returns the ref of the claim that recorded it.
    fn set_attribute(&self, mutation: &AttrMutation<'_>) -> Result<BlobRef, ServiceError>;
}
