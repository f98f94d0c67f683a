use camtag_domain::{BlobRef, Constraint, SearchQuery};
use indexmap::IndexSet;
use tracing::debug;

use crate::client::StorageClient;
use crate::error::ServiceError;

/// Content blobs whose file name and size match exactly.
///
/// # Errors
/// Propagates search failures.
pub fn find_content_blobs(
    client: &dyn StorageClient,
    name: &str,
    size: u64,
) -> Result<Vec<BlobRef>, ServiceError> {
    client.search(&SearchQuery::new(Constraint::file_named(name, size)))
}

/// Permanodes whose `camliContent` points at `blob`.
///
/// # Errors
/// Propagates search failures.
pub fn find_permanodes(
    client: &dyn StorageClient,
    blob: &BlobRef,
) -> Result<Vec<BlobRef>, ServiceError> {
    client.search(&SearchQuery::new(Constraint::permanode_content(blob)))
}

/// Every permanode that currently represents a file called `name` of
/// `size` bytes, deduplicated in first-seen order.
///
/// # Errors
/// Fails on the first search that fails; no partial result is returned.
pub fn resolve_permanodes(
    client: &dyn StorageClient,
    name: &str,
    size: u64,
) -> Result<Vec<BlobRef>, ServiceError> {
    let blobs = find_content_blobs(client, name, size)?;
    if blobs.is_empty() {
        debug!(name, size, "no content blob matches");
        return Ok(Vec::new());
    }

    let mut nodes = IndexSet::new();
    for blob in &blobs {
        let found = find_permanodes(client, blob)?;
        debug!(%blob, count = found.len(), "permanodes for content");
        nodes.extend(found.into_iter().filter(|node| !node.is_empty()));
    }
    Ok(nodes.into_iter().collect())
}
