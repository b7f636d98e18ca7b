//! Branch tag carried by every version

use std::fmt;
use thiserror::Error;

use crate::version_parser::SNAPSHOT;

/// Name of the branch that stands for "no feature branch"
pub const DEVELOP: &str = "develop";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BranchError {
    #[error("Invalid character '{character}' in branch name \"{name}\"")]
    InvalidCharacter { name: String, character: char },
    #[error("\"{0}\" is reserved for snapshot versions")]
    Reserved(String),
}

/// A feature branch, or the distinguished develop value.
///
/// `develop` (in any case) and the empty string both normalize to
/// [`Branch::Develop`]. `SNAPSHOT` is not a branch name. The develop value
/// sorts above every named branch; named branches sort lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Branch {
    Named(String),
    #[default]
    Develop,
}

impl Branch {
    /// Create a branch from its name
    pub fn new(name: &str) -> Result<Self, BranchError> {
        if let Some(character) = name.chars().find(|c| c.is_whitespace() || *c == '-') {
            return Err(BranchError::InvalidCharacter {
                name: name.to_string(),
                character,
            });
        }

        if name == SNAPSHOT {
            return Err(BranchError::Reserved(name.to_string()));
        }
        if name.is_empty() || name.eq_ignore_ascii_case(DEVELOP) {
            return Ok(Branch::Develop);
        }

        Ok(Branch::Named(name.to_string()))
    }

    /// Check if this is the develop (no feature branch) value
    pub fn is_develop(&self) -> bool {
        matches!(self, Branch::Develop)
    }

    /// Get the feature branch name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Branch::Named(name) => Some(name),
            Branch::Develop => None,
        }
    }

    pub fn as_str(&self) -> &str {
        self.name().unwrap_or(DEVELOP)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
