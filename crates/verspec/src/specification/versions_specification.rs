//! Immutable set of specification elements

use std::fmt;
use std::str::FromStr;

use super::{BranchPartitionedSet, SpecificationElement, SpecificationError, SpecificationParser};
use crate::Version;

/// One or more non-overlapping elements defining an acceptable set of
/// versions.
///
/// ```
/// use verspec::{VersionParser, VersionsSpecification};
///
/// let spec: VersionsSpecification = "[1.0, 1.3), (1.3, 1.7)".parse().unwrap();
/// assert!(spec.contains(&VersionParser::parse_base_version("1.2").unwrap()));
/// assert!(!spec.contains(&VersionParser::parse_base_version("1.3").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionsSpecification {
    elements: BranchPartitionedSet,
}

impl VersionsSpecification {
    /// Freeze a set of elements; it must not be empty
    pub fn new(elements: BranchPartitionedSet) -> Result<Self, SpecificationError> {
        if elements.is_empty() {
            return Err(SpecificationError::Empty);
        }
        Ok(VersionsSpecification { elements })
    }

    pub fn builder() -> VersionsSpecificationBuilder {
        VersionsSpecificationBuilder::new()
    }

    /// Parse a specification with the default parser
    pub fn parse(specification: &str) -> Result<Self, SpecificationError> {
        SpecificationParser::new().parse(specification)
    }

    /// Check if the version is accepted by any element of its branch
    pub fn contains(&self, version: &Version) -> bool {
        self.elements.contains(version)
    }

    /// Versions accepted by both specifications; `None` if there are none
    pub fn intersection(&self, other: &VersionsSpecification) -> Option<VersionsSpecification> {
        let shared = self.elements.intersection(&other.elements);
        log::debug!(
            "Intersected {} and {} elements into {}",
            self.elements.len(),
            other.elements.len(),
            shared.len()
        );
        Self::new(shared).ok()
    }

    /// All elements, grouped by branch and ascending within a branch
    pub fn iter(&self) -> impl Iterator<Item = &SpecificationElement> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &BranchPartitionedSet {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for VersionsSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

impl FromStr for VersionsSpecification {
    type Err = SpecificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Accumulates elements, rejecting overlaps as they are added
#[derive(Debug, Clone, Default)]
pub struct VersionsSpecificationBuilder {
    elements: BranchPartitionedSet,
}

impl VersionsSpecificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element
    pub fn add(&mut self, element: SpecificationElement) -> Result<&mut Self, SpecificationError> {
        self.elements.insert(element)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Freeze into an independent specification
    pub fn build(&self) -> Result<VersionsSpecification, SpecificationError> {
        VersionsSpecification::new(self.elements.clone())
    }
}
