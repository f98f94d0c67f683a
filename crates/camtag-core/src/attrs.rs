use camtag_domain::{AttributeMap, BlobRef};
use tracing::{debug, warn};

use crate::client::StorageClient;
use crate::error::ServiceError;

/// Current attributes of `node`.
///
/// `Ok(None)` means the server had nothing usable to say about the node:
/// empty metadata, no permanode record for it, or a body that did not
/// decode. Only transport and HTTP failures are errors.
///
/// # Errors
/// Propagates describe failures other than malformed responses.
pub fn fetch_attributes(
    client: &dyn StorageClient,
    node: &BlobRef,
) -> Result<Option<AttributeMap>, ServiceError> {
    let response = match client.describe(node) {
        Ok(response) => response,
        Err(err) if err.is_malformed_response() => {
            warn!(%node, %err, "unreadable describe response");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    if response.meta.is_empty() {
        debug!(%node, "describe returned no metadata");
        return Ok(None);
    }

    let attrs = response.into_attributes(node);
    if attrs.is_none() {
        warn!(%node, "describe response has no permanode record for node");
    }
    Ok(attrs)
}
