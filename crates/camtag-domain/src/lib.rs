mod blobref;
mod error;
mod mode;
pub mod query;
pub mod response;
mod tags;

pub use blobref::BlobRef;
pub use error::DomainError;
pub use mode::Mode;
pub use query::{Constraint, SearchQuery};
pub use response::{AttrValues, AttributeMap, DescribeResponse, SearchResult};
pub use tags::{reconcile, TagSet, TAG_ATTRIBUTE};

/// Attribute linking a permanode to the blob it currently represents.
pub const CAMLI_CONTENT: &str = "camliContent";
