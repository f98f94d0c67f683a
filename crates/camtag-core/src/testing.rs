use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;

use camtag_domain::{BlobRef, Constraint, DescribeResponse, Mode, SearchQuery};
use serde_json::json;

use crate::client::{AttrMutation, StorageClient};
use crate::error::{Operation, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Search(Constraint),
    Describe(BlobRef),
    SetAttribute {
        mode: Mode,
        permanode: BlobRef,
        value: String,
    },
}

/// In-memory storage server for pipeline tests.
#[derive(Default)]
pub(crate) struct FakeStorage {
    files: HashMap<(String, u64), Vec<BlobRef>>,
    contents: HashMap<BlobRef, Vec<BlobRef>>,
    tags: Mutex<HashMap<BlobRef, BTreeSet<String>>>,
    malformed_describe: bool,
    fail_search: bool,
    rejected_values: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_file(mut self, name: &str, size: u64, blobs: &[&str]) -> Self {
        self.files.insert(
            (name.to_string(), size),
            blobs.iter().copied().map(BlobRef::from).collect(),
        );
        self
    }

    pub(crate) fn with_content(mut self, blob: &str, nodes: &[&str]) -> Self {
        self.contents.insert(
            BlobRef::from(blob),
            nodes.iter().copied().map(BlobRef::from).collect(),
        );
        self
    }

    /// Registers `node` as a described permanode carrying `tags`.
    pub(crate) fn with_tags(self, node: &str, tags: &[&str]) -> Self {
        if let Ok(mut map) = self.tags.lock() {
            map.insert(
                BlobRef::from(node),
                tags.iter().map(|tag| (*tag).to_string()).collect(),
            );
        }
        self
    }

    pub(crate) fn malformed_describe(mut self) -> Self {
        self.malformed_describe = true;
        self
    }

    pub(crate) fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub(crate) fn rejecting(mut self, value: &str) -> Self {
        self.rejected_values.insert(value.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub(crate) fn search_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Search(_)))
            .count()
    }

    pub(crate) fn mutation_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::SetAttribute { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn server_error(op: Operation) -> ServiceError {
    ServiceError::Status {
        op,
        url: "http://fake.invalid/".into(),
        status: 500,
        body: "fake failure".into(),
    }
}

impl StorageClient for FakeStorage {
    fn search(&self, query: &SearchQuery) -> Result<Vec<BlobRef>, ServiceError> {
        self.record(Call::Search(query.constraint.clone()));
        if self.fail_search {
            return Err(server_error(Operation::Search));
        }
        let found = match &query.constraint {
            Constraint::File(file) => self
                .files
                .get(&(file.filename.equals.clone(), file.filesize.min))
                .filter(|_| file.filesize.min == file.filesize.max),
            Constraint::Permanode(permanode) => {
                self.contents.get(&BlobRef::from(permanode.value.as_str()))
            }
        };
        Ok(found.cloned().unwrap_or_default())
    }

    fn describe(&self, node: &BlobRef) -> Result<DescribeResponse, ServiceError> {
        self.record(Call::Describe(node.clone()));
        if self.malformed_describe {
            let source = serde_json::from_str::<serde_json::Value>("[").expect_err("bad json");
            return Err(ServiceError::Decode {
                op: Operation::Describe,
                url: "http://fake.invalid/".into(),
                source,
            });
        }
        let tags = self.tags.lock().map_err(|_| server_error(Operation::Describe))?;
        let meta = match tags.get(node) {
            Some(tags) if tags.is_empty() => json!({
                node.as_str(): {"permanode": {"attr": {"camliContent": ["b1"]}}}
            }),
            Some(tags) => json!({
                node.as_str(): {"permanode": {"attr": {"tag": tags}}}
            }),
            None => json!({}),
        };
        Ok(serde_json::from_value(json!({ "meta": meta })).expect("describe fixture"))
    }

    fn set_attribute(&self, mutation: &AttrMutation<'_>) -> Result<BlobRef, ServiceError> {
        self.record(Call::SetAttribute {
            mode: mutation.mode,
            permanode: mutation.permanode.clone(),
            value: mutation.value.to_string(),
        });
        if self.rejected_values.contains(mutation.value) {
            return Err(server_error(Operation::Upload));
        }
        let mut tags = self.tags.lock().map_err(|_| server_error(Operation::Upload))?;
        let entry = tags.entry(mutation.permanode.clone()).or_default();
        match mutation.mode {
            Mode::Add => entry.insert(mutation.value.to_string()),
            Mode::Del => entry.remove(mutation.value),
        };
        Ok(BlobRef::sha224(mutation.value.as_bytes()))
    }
}
