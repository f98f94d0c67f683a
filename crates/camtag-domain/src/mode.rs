use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Direction of a tagging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Add,
    Del,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Del => "del",
        }
    }

    /// Direction flag as understood by the attribute-mutation tooling.
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Mode::Add => "--add",
            Mode::Del => "--del",
        }
    }

    /// Claim type recorded in the signed mutation.
    #[must_use]
    pub fn claim_type(self) -> &'static str {
        match self {
            Mode::Add => "add-attribute",
            Mode::Del => "del-attribute",
        }
    }

    /// Report text when reconciliation leaves nothing to do.
    #[must_use]
    pub fn nothing_to_do(self) -> &'static str {
        match self {
            Mode::Add => "ALL TAGS PRESENT",
            Mode::Del => "NO TAGS TO REMOVE",
        }
    }
}

impl FromStr for Mode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(Mode::Add),
            "del" => Ok(Mode::Del),
            _ => Err(DomainError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
