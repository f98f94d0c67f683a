use camtag_domain::{BlobRef, Mode, TagSet, TAG_ATTRIBUTE};
use tracing::{debug, warn};

use crate::client::{AttrMutation, StorageClient};
use crate::report::{TagChange, TagOp};

/// Issues one mutation per tag, in set order.
///
/// A failed mutation is logged and reported as [`TagOp::Failed`]; the
/// remaining tags are still attempted. With `dry_run` nothing is sent.
pub fn apply_tags(
    client: &dyn StorageClient,
    mode: Mode,
    permanode: &BlobRef,
    tags: &TagSet,
    dry_run: bool,
) -> Vec<TagChange> {
    tags.iter()
        .map(|tag| {
            let op = if dry_run {
                debug!(%permanode, tag, flag = mode.flag(), "dry run, skipping mutation");
                TagOp::applied(mode)
            } else {
                apply_one(client, mode, permanode, tag)
            };
            TagChange {
                tag: tag.to_string(),
                op,
            }
        })
        .collect()
}

fn apply_one(client: &dyn StorageClient, mode: Mode, permanode: &BlobRef, tag: &str) -> TagOp {
    let mutation = AttrMutation {
        mode,
        permanode,
        attribute: TAG_ATTRIBUTE,
        value: tag,
    };
    match client.set_attribute(&mutation) {
        Ok(claim) => {
            debug!(%permanode, tag, %claim, "tag mutation recorded");
            TagOp::applied(mode)
        }
        Err(err) => {
            warn!(%permanode, tag, flag = mode.flag(), %err, "tag mutation failed");
            TagOp::Failed
        }
    }
}
