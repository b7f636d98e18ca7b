//! Branch-aware version identifiers and version range specifications
//!
//! This crate parses versions of the form
//! `major.minor.incremental[-branch][-qualifier]*[-SNAPSHOT | -timestamp-buildnumber]`,
//! orders them totally, and matches them against Maven-style range
//! specifications such as `[1.0,2.0), (2.5,)` scoped per branch.

mod branch;
mod comparator;
mod filter;
mod format;
pub mod specification;
mod version;
mod version_parser;
mod versioning;

#[cfg(test)]
mod testing;

pub use branch::{Branch, BranchError};
pub use comparator::{OrderingStage, VersionComparator};
pub use filter::VersionFilter;
pub use format::VersionFormatter;
pub use specification::{
    Boundaries, Boundary, ElementRelation, Limit, Side, SpecificationElement, SpecificationError,
    SpecificationParser, VersionsSpecification, VersionsSpecificationBuilder,
};
pub use version::{Version, VersionBuilder, VersionKind};
pub use version_parser::{GrammarPolicy, ParserOptions, VersionParseError, VersionParser};
pub use versioning::Versioning;
