use camtag_domain::BlobRef;
use serde::Deserialize;
use url::Url;

use crate::error::{Operation, ServiceError};

/// Media type that makes the server answer its root with a discovery document.
pub(crate) const DISCOVERY_ACCEPT: &str = "text/x-camli-configuration";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiscoveryDocument {
    #[serde(default)]
    search_root: Option<String>,
    #[serde(default)]
    blob_root: Option<String>,
    #[serde(default)]
    signing: Option<SigningDiscovery>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SigningDiscovery {
    #[serde(default)]
    sign_handler: Option<String>,
    #[serde(default)]
    public_key_blob_ref: Option<BlobRef>,
}

/// Absolute endpoint URLs resolved from a discovery document.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    pub(crate) search_query: Url,
    pub(crate) search_describe: Url,
    pub(crate) upload: Url,
    pub(crate) signing: Option<Signing>,
}

#[derive(Debug, Clone)]
pub(crate) struct Signing {
    pub(crate) handler: Url,
    pub(crate) signer: BlobRef,
}

impl Endpoints {
    pub(crate) fn from_document(
        server: &Url,
        doc: DiscoveryDocument,
    ) -> Result<Self, ServiceError> {
        let search_root = doc.search_root.ok_or_else(|| ServiceError::Discovery {
            url: server.to_string(),
            missing: "searchRoot",
        })?;
        let blob_root = doc.blob_root.ok_or_else(|| ServiceError::Discovery {
            url: server.to_string(),
            missing: "blobRoot",
        })?;
        let search_root = join(server, Operation::Search, &as_dir(&search_root))?;
        let blob_root = join(server, Operation::Upload, &as_dir(&blob_root))?;

        let signing = match doc.signing {
            Some(SigningDiscovery {
                sign_handler: Some(handler),
                public_key_blob_ref: Some(signer),
            }) => Some(Signing {
                handler: join(server, Operation::Sign, &handler)?,
                signer,
            }),
            _ => None,
        };

        Ok(Self {
            search_query: join(&search_root, Operation::Search, "camli/search/query")?,
            search_describe: join(&search_root, Operation::Describe, "camli/search/describe")?,
            upload: join(&blob_root, Operation::Upload, "camli/upload")?,
            signing,
        })
    }

    pub(crate) fn signing(&self, server: &Url) -> Result<&Signing, ServiceError> {
        self.signing.as_ref().ok_or_else(|| ServiceError::Discovery {
            url: server.to_string(),
            missing: "a signing handler",
        })
    }
}

fn as_dir(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

fn join(base: &Url, op: Operation, path: &str) -> Result<Url, ServiceError> {
    base.join(path).map_err(|source| ServiceError::Endpoint {
        op,
        path: path.to_string(),
        source,
    })
}
