use std::fmt;

/// Calls the tool makes against the storage server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Discover,
    Search,
    Describe,
    Sign,
    Upload,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Discover => "discovery",
            Operation::Search => "search",
            Operation::Describe => "describe",
            Operation::Sign => "sign",
            Operation::Upload => "upload",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the storage server client.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{op} request to {url} failed: {source}")]
    Transport {
        op: Operation,
        url: String,
        source: reqwest::Error,
    },
    #[error("{op} request to {url} returned {status}: {body}")]
    Status {
        op: Operation,
        url: String,
        status: u16,
        body: String,
    },
    #[error("invalid {op} response from {url}: {source}")]
    Decode {
        op: Operation,
        url: String,
        source: serde_json::Error,
    },
    #[error("server at {url} does not advertise {missing}")]
    Discovery { url: String, missing: &'static str },
    #[error("invalid {op} endpoint '{path}': {source}")]
    Endpoint {
        op: Operation,
        path: String,
        source: url::ParseError,
    },
    #[error("failed to encode claim: {0}")]
    Claim(String),
    #[error("server did not acknowledge blob {blob}")]
    NotReceived { blob: String },
}

impl ServiceError {
    /// True when the server answered but the body had an unexpected shape.
    #[must_use]
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, ServiceError::Decode { .. })
    }
}
