#![deny(clippy::all, warnings)]

mod apply;
mod attrs;
mod client;
mod config;
mod driver;
mod error;
mod http;
mod report;
mod resolve;
#[cfg(test)]
mod testing;

pub use crate::apply::apply_tags;
pub use crate::attrs::fetch_attributes;
pub use crate::client::{AttrMutation, StorageClient};
pub use crate::config::{Config, ServerConfig, DEFAULT_SERVER, SERVER_ENV, TIMEOUT_ENV};
pub use crate::driver::{process_path, run, RunRequest, RunSummary};
pub use crate::error::{Operation, ServiceError};
pub use crate::http::HttpStorageClient;
pub use crate::report::{FileOutcome, FileReport, TagChange, TagOp};
pub use crate::resolve::{find_content_blobs, find_permanodes, resolve_permanodes};

pub use camtag_domain::{BlobRef, Mode, TagSet};
