//! Version range specifications
//!
//! A specification is a set of non-overlapping elements, each either an
//! explicit version or a range between two boundaries, bucketed by branch.

mod boundaries;
mod boundary;
mod element;
mod element_set;
mod parser;
mod versions_specification;

use thiserror::Error;

use crate::VersionParseError;

pub use boundaries::Boundaries;
pub use boundary::{Boundary, Limit, Side};
pub use element::{ElementRelation, SpecificationElement};
pub use element_set::{BranchPartitionedSet, SortedElementSet};
pub use parser::SpecificationParser;
pub use versions_specification::{VersionsSpecification, VersionsSpecificationBuilder};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecificationError {
    #[error("{reason} at index {index} in specification \"{input}\"")]
    Parse {
        input: String,
        index: usize,
        reason: &'static str,
    },
    #[error("Invalid version at index {index} in specification: {source}")]
    InvalidVersion {
        index: usize,
        source: VersionParseError,
    },
    #[error("Invalid range {lower} .. {upper}: {reason}")]
    InvalidRange {
        lower: String,
        upper: String,
        reason: &'static str,
    },
    #[error("Elements intersect: {existing} and {added}")]
    Overlap {
        existing: Box<SpecificationElement>,
        added: Box<SpecificationElement>,
    },
    #[error("A versions specification needs at least one element")]
    Empty,
}

impl SpecificationError {
    /// Index into the parsed text, for parse failures
    pub fn index(&self) -> Option<usize> {
        match self {
            SpecificationError::Parse { index, .. }
            | SpecificationError::InvalidVersion { index, .. } => Some(*index),
            _ => None,
        }
    }
}
