//! Storage client speaking the Perkeep HTTP API.

use anyhow::{Context, Result};
use camtag_domain::{BlobRef, DescribeResponse, SearchQuery, SearchResult};
use once_cell::sync::OnceCell;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::debug;
use url::Url;

use crate::client::{AttrMutation, StorageClient};
use crate::config::ServerConfig;
use crate::error::{Operation, ServiceError};

mod claim;
mod discovery;

use claim::{UnsignedClaim, UploadResponse};
use discovery::{DiscoveryDocument, Endpoints, DISCOVERY_ACCEPT};

const MAX_ERROR_BODY: usize = 512;

pub struct HttpStorageClient {
    http: Client,
    server: Url,
    endpoints: OnceCell<Endpoints>,
}

impl HttpStorageClient {
    /// Creates a client for the configured server. Discovery runs lazily on
    /// the first call that needs it.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("camtag/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .no_proxy()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            server: config.url().clone(),
            endpoints: OnceCell::new(),
        })
    }

    fn endpoints(&self) -> Result<&Endpoints, ServiceError> {
        self.endpoints.get_or_try_init(|| -> Result<Endpoints, ServiceError> {
            let request = self
                .http
                .get(self.server.clone())
                .header(ACCEPT, DISCOVERY_ACCEPT);
            let body = self.send(Operation::Discover, &self.server, request)?;
            let doc: DiscoveryDocument = decode(Operation::Discover, &self.server, &body)?;
            let endpoints = Endpoints::from_document(&self.server, doc)?;
            debug!(server = %self.server, search = %endpoints.search_query, "discovered endpoints");
            Ok(endpoints)
        })
    }

    fn send(
        &self,
        op: Operation,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<String, ServiceError> {
        let transport = |source: reqwest::Error| ServiceError::Transport {
            op,
            url: url.to_string(),
            source,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                op,
                url: url.to_string(),
                status: status.as_u16(),
                body: truncate(&body),
            });
        }
        Ok(body)
    }

    fn sign(&self, claim: &UnsignedClaim<'_>, handler: &Url) -> Result<String, ServiceError> {
        let unsigned = claim.to_json()?;
        let request = self.http.post(handler.clone()).form(&[("json", unsigned)]);
        self.send(Operation::Sign, handler, request)
    }

    fn upload(&self, blob: &BlobRef, contents: String) -> Result<(), ServiceError> {
        let url = &self.endpoints()?.upload;
        let part = Part::bytes(contents.into_bytes()).file_name(blob.to_string());
        let form = Form::new().part(blob.to_string(), part);
        let request = self.http.post(url.clone()).multipart(form);
        let body = self.send(Operation::Upload, url, request)?;
        let ack: UploadResponse = decode(Operation::Upload, url, &body)?;
        if ack.acknowledges(blob) {
            Ok(())
        } else {
            Err(ServiceError::NotReceived {
                blob: blob.to_string(),
            })
        }
    }
}

impl StorageClient for HttpStorageClient {
    fn search(&self, query: &SearchQuery) -> Result<Vec<BlobRef>, ServiceError> {
        let url = &self.endpoints()?.search_query;
        debug!(kind = query.constraint.kind(), "search");
        let request = self.http.post(url.clone()).json(query);
        let body = self.send(Operation::Search, url, request)?;
        let result: SearchResult = decode(Operation::Search, url, &body)?;
        Ok(result.blob_refs())
    }

    fn describe(&self, node: &BlobRef) -> Result<DescribeResponse, ServiceError> {
        let url = &self.endpoints()?.search_describe;
        debug!(%node, "describe");
        let request = self
            .http
            .get(url.clone())
            .query(&[("blobref", node.as_str())]);
        let body = self.send(Operation::Describe, url, request)?;
        decode(Operation::Describe, url, &body)
    }

    fn set_attribute(&self, mutation: &AttrMutation<'_>) -> Result<BlobRef, ServiceError> {
        let signing = self.endpoints()?.signing(&self.server)?;
        let claim = UnsignedClaim::new(mutation, &signing.signer, OffsetDateTime::now_utc())?;
        let signed = self.sign(&claim, &signing.handler)?;
        let blob = BlobRef::sha224(signed.as_bytes());
        debug!(
            permanode = %mutation.permanode,
            flag = mutation.mode.flag(),
            attribute = mutation.attribute,
            value = mutation.value,
            claim = %blob,
            "uploading attribute claim"
        );
        self.upload(&blob, signed)?;
        Ok(blob)
    }
}

fn decode<T: DeserializeOwned>(
    op: Operation,
    url: &Url,
    body: &str,
) -> Result<T, ServiceError> {
    serde_json::from_str(body).map_err(|source| ServiceError::Decode {
        op,
        url: url.to_string(),
        source,
    })
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
