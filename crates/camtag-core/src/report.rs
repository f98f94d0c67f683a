use std::fmt;

use camtag_domain::{BlobRef, Mode};
use serde::Serialize;
use serde_json::{json, Value};

/// Result of one tag mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagOp {
    #[serde(rename = "+")]
    Added,
    #[serde(rename = "-")]
    Removed,
    #[serde(rename = "!")]
    Failed,
}

impl TagOp {
    #[must_use]
    pub fn applied(mode: Mode) -> Self {
        match mode {
            Mode::Add => TagOp::Added,
            Mode::Del => TagOp::Removed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChange {
    pub tag: String,
    pub op: TagOp,
}

impl fmt::Display for TagChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            TagOp::Failed => write!(f, "!{}", self.tag),
            TagOp::Added | TagOp::Removed => f.write_str(&self.tag),
        }
    }
}

/// What happened to one input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    NonExistent,
    Directory,
    /// Resolution found zero or several permanodes.
    Nodes(usize),
    NoAttrs(BlobRef),
    NothingToDo { permanode: BlobRef, mode: Mode },
    Changed {
        permanode: BlobRef,
        changes: Vec<TagChange>,
    },
    Error {
        permanode: Option<BlobRef>,
        message: String,
    },
}

impl FileOutcome {
    #[must_use]
    pub fn permanode(&self) -> Option<&BlobRef> {
        match self {
            FileOutcome::NoAttrs(permanode)
            | FileOutcome::NothingToDo { permanode, .. }
            | FileOutcome::Changed { permanode, .. } => Some(permanode),
            FileOutcome::Error { permanode, .. } => permanode.as_ref(),
            FileOutcome::NonExistent | FileOutcome::Directory | FileOutcome::Nodes(_) => None,
        }
    }

    /// Machine-readable status used in JSON reports.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            FileOutcome::NonExistent => "non-existent",
            FileOutcome::Directory => "directory",
            FileOutcome::Nodes(_) => "ambiguous",
            FileOutcome::NoAttrs(_) => "no-attrs",
            FileOutcome::NothingToDo { .. } => "unchanged",
            FileOutcome::Changed { .. } => "changed",
            FileOutcome::Error { .. } => "error",
        }
    }

    /// Text after the path (and permanode, when there is one).
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            FileOutcome::NonExistent => "NON-EXISTENT".to_string(),
            FileOutcome::Directory => "DIRECTORY".to_string(),
            FileOutcome::Nodes(count) => format!("{count} NODES"),
            FileOutcome::NoAttrs(_) => "NO ATTRS".to_string(),
            FileOutcome::NothingToDo { mode, .. } => mode.nothing_to_do().to_string(),
            FileOutcome::Changed { changes, .. } => {
                changes.iter().map(|change| format!("{change} ")).collect()
            }
            FileOutcome::Error { message, .. } => format!("ERROR {message}"),
        }
    }
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn new(path: impl Into<String>, outcome: FileOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }

    /// Path followed by the permanode, if resolution got that far.
    #[must_use]
    pub fn prefix(&self) -> String {
        match self.outcome.permanode() {
            Some(permanode) => format!("{} {permanode}", self.path),
            None => self.path.clone(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut payload = json!({
            "path": self.path,
            "status": self.outcome.status(),
        });
        if let Some(permanode) = self.outcome.permanode() {
            payload["permanode"] = json!(permanode);
        }
        match &self.outcome {
            FileOutcome::Nodes(count) => payload["nodes"] = json!(count),
            FileOutcome::Changed { changes, .. } => payload["tags"] = json!(changes),
            FileOutcome::Error { message, .. } => payload["error"] = json!(message),
            _ => {}
        }
        payload
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prefix(), self.outcome.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(tag: &str, op: TagOp) -> TagChange {
        TagChange {
            tag: tag.to_string(),
            op,
        }
    }

    #[test]
    fn skip_lines_have_no_permanode() {
        assert_eq!(
            FileReport::new("missing.jpg", FileOutcome::NonExistent).to_string(),
            "missing.jpg NON-EXISTENT"
        );
        assert_eq!(
            FileReport::new("album", FileOutcome::Directory).to_string(),
            "album DIRECTORY"
        );
        assert_eq!(
            FileReport::new("dup.jpg", FileOutcome::Nodes(2)).to_string(),
            "dup.jpg 2 NODES"
        );
    }

    #[test]
    fn permanode_lines_include_node() {
        let node = BlobRef::from("p1");
        assert_eq!(
            FileReport::new("file.jpg", FileOutcome::NoAttrs(node.clone())).to_string(),
            "file.jpg p1 NO ATTRS"
        );
        let report = FileReport::new(
            "photo.jpg",
            FileOutcome::NothingToDo {
                permanode: node,
                mode: Mode::Del,
            },
        );
        assert_eq!(report.to_string(), "photo.jpg p1 NO TAGS TO REMOVE");
    }

    #[test]
    fn changed_tags_are_space_terminated() {
        let report = FileReport::new(
            "photo.jpg",
            FileOutcome::Changed {
                permanode: BlobRef::from("p1"),
                changes: vec![change("2023", TagOp::Added), change("vacation", TagOp::Added)],
            },
        );
        assert_eq!(report.to_string(), "photo.jpg p1 2023 vacation ");
    }

    #[test]
    fn failed_tags_are_marked() {
        let report = FileReport::new(
            "photo.jpg",
            FileOutcome::Changed {
                permanode: BlobRef::from("p1"),
                changes: vec![change("a", TagOp::Removed), change("b", TagOp::Failed)],
            },
        );
        assert_eq!(report.to_string(), "photo.jpg p1 a !b ");
    }

    #[test]
    fn errors_before_resolution_omit_permanode() {
        let report = FileReport::new(
            "photo.jpg",
            FileOutcome::Error {
                permanode: None,
                message: "search failed".into(),
            },
        );
        assert_eq!(report.to_string(), "photo.jpg ERROR search failed");
    }

    #[test]
    fn json_report_lists_tag_ops() {
        let report = FileReport::new(
            "photo.jpg",
            FileOutcome::Changed {
                permanode: BlobRef::from("p1"),
                changes: vec![change("a", TagOp::Added), change("b", TagOp::Failed)],
            },
        );
        assert_eq!(
            report.to_json(),
            json!({
                "path": "photo.jpg",
                "status": "changed",
                "permanode": "p1",
                "tags": [{"tag": "a", "op": "+"}, {"tag": "b", "op": "!"}]
            })
        );
    }

    #[test]
    fn json_report_counts_nodes() {
        let report = FileReport::new("dup.jpg", FileOutcome::Nodes(0));
        assert_eq!(
            report.to_json(),
            json!({"path": "dup.jpg", "status": "ambiguous", "nodes": 0})
        );
    }
}
