use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use camtag_domain::{reconcile, BlobRef, Mode, TagSet};
use tracing::{debug, warn};

use crate::apply::apply_tags;
use crate::attrs::fetch_attributes;
use crate::client::StorageClient;
use crate::report::{FileOutcome, FileReport, TagOp};
use crate::resolve::resolve_permanodes;

/// Settings fixed for a whole run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mode: Mode,
    pub tags: TagSet,
    pub paths: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Tallies of a finished run, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub errors: usize,
    pub failed_mutations: usize,
}

impl RunSummary {
    fn record(&mut self, report: &FileReport) {
        self.files += 1;
        match &report.outcome {
            FileOutcome::Changed { changes, .. } => {
                self.changed += 1;
                self.failed_mutations += changes
                    .iter()
                    .filter(|change| change.op == TagOp::Failed)
                    .count();
            }
            FileOutcome::NothingToDo { .. } => self.unchanged += 1,
            FileOutcome::Error { .. } => self.errors += 1,
            FileOutcome::NonExistent
            | FileOutcome::Directory
            | FileOutcome::Nodes(_)
            | FileOutcome::NoAttrs(_) => self.skipped += 1,
        }
    }
}

/// Processes every path in order, handing each report to `emit` as soon
/// as it is ready. One file's failure never stops the run.
pub fn run(
    client: &dyn StorageClient,
    request: &RunRequest,
    mut emit: impl FnMut(&FileReport),
) -> RunSummary {
    let mut summary = RunSummary::default();
    for path in &request.paths {
        let report = process_path(client, request, path);
        summary.record(&report);
        emit(&report);
    }
    debug!(?summary, "run finished");
    summary
}

/// Runs the full pipeline for a single path.
pub fn process_path(client: &dyn StorageClient, request: &RunRequest, path: &Path) -> FileReport {
    let display = path.display().to_string();
    let outcome = pipeline(client, request, path);
    FileReport::new(display, outcome)
}

fn pipeline(client: &dyn StorageClient, request: &RunRequest, path: &Path) -> FileOutcome {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            return FileOutcome::NonExistent
        }
        Err(err) => {
            return FileOutcome::Error {
                permanode: None,
                message: err.to_string(),
            }
        }
    };
    if metadata.is_dir() {
        return FileOutcome::Directory;
    }

    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return FileOutcome::Error {
            permanode: None,
            message: "file name is not valid UTF-8".to_string(),
        };
    };
    let size = metadata.len();

    let nodes = match resolve_permanodes(client, name, size) {
        Ok(nodes) => nodes,
        Err(err) => {
            warn!(path = %path.display(), %err, "permanode lookup failed");
            return FileOutcome::Error {
                permanode: None,
                message: err.to_string(),
            };
        }
    };
    let permanode = match <[BlobRef; 1]>::try_from(nodes) {
        Ok([permanode]) => permanode,
        Err(nodes) => return FileOutcome::Nodes(nodes.len()),
    };

    let attrs = match fetch_attributes(client, &permanode) {
        Ok(Some(attrs)) => attrs,
        Ok(None) => return FileOutcome::NoAttrs(permanode),
        Err(err) => {
            warn!(%permanode, %err, "describe failed");
            return FileOutcome::Error {
                permanode: Some(permanode),
                message: err.to_string(),
            };
        }
    };

    let pending = reconcile(request.mode, &request.tags, &attrs.tags());
    if pending.is_empty() {
        return FileOutcome::NothingToDo {
            permanode,
            mode: request.mode,
        };
    }

    let changes = apply_tags(client, request.mode, &permanode, &pending, request.dry_run);
    FileOutcome::Changed { permanode, changes }
}
