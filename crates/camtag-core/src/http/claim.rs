use camtag_domain::BlobRef;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::client::AttrMutation;
use crate::error::ServiceError;

/// Attribute claim as handed to the signing handler.
///
/// Field order matters: schema blobs must open with `{"camliVersion"`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnsignedClaim<'a> {
    camli_version: u8,
    camli_signer: &'a BlobRef,
    camli_type: &'static str,
    claim_date: String,
    claim_type: &'static str,
    perma_node: &'a BlobRef,
    attribute: &'a str,
    value: &'a str,
}

impl<'a> UnsignedClaim<'a> {
    pub(crate) fn new(
        mutation: &AttrMutation<'a>,
        signer: &'a BlobRef,
        date: OffsetDateTime,
    ) -> Result<Self, ServiceError> {
        let claim_date = date
            .format(&Rfc3339)
            .map_err(|err| ServiceError::Claim(err.to_string()))?;
        Ok(Self {
            camli_version: 1,
            camli_signer: signer,
            camli_type: "claim",
            claim_date,
            claim_type: mutation.mode.claim_type(),
            perma_node: mutation.permanode,
            attribute: mutation.attribute,
            value: mutation.value,
        })
    }

    pub(crate) fn to_json(&self) -> Result<String, ServiceError> {
        serde_json::to_string(self).map_err(|err| ServiceError::Claim(err.to_string()))
    }
}

/// Upload handler acknowledgement.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    received: Vec<ReceivedBlob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceivedBlob {
    blob_ref: BlobRef,
}

impl UploadResponse {
    pub(crate) fn acknowledges(&self, blob: &BlobRef) -> bool {
        self.received.iter().any(|entry| &entry.blob_ref == blob)
    }
}
