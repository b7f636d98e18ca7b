//! Single element of a versions specification

use std::cmp::Ordering;
use std::fmt;

use super::boundary::BoundaryKey;
use super::{Boundaries, Boundary, SpecificationError};
use crate::comparator::compare_canonical;
use crate::{Branch, Version};

/// How one element lies relative to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRelation {
    /// Entirely below the other
    Lower,
    /// Entirely above the other
    Higher,
    /// Same extent
    IntersectsEqually,
    /// Overlaps the lower part of the other
    IntersectsLower,
    /// Overlaps the upper part of the other
    IntersectsHigher,
    /// Contains the other
    IntersectsCompletely,
    /// Is contained by the other
    IntersectsPartially,
}

impl ElementRelation {
    /// Check if the two elements share any version
    pub fn intersects(self) -> bool {
        !matches!(self, ElementRelation::Lower | ElementRelation::Higher)
    }
}

/// An explicit version or a range, scoped to one branch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecificationElement {
    ExplicitVersion(Version),
    VersionRange(Boundaries),
}

impl SpecificationElement {
    /// Create an explicit element; qualifiers of the version are dropped
    pub fn explicit(version: Version) -> Self {
        SpecificationElement::ExplicitVersion(version.without_qualifiers())
    }

    /// Create a range element, validating the boundaries
    pub fn range(lower: Boundary, upper: Boundary) -> Result<Self, SpecificationError> {
        Ok(SpecificationElement::VersionRange(Boundaries::new(lower, upper)?))
    }

    pub fn branch(&self) -> &Branch {
        match self {
            SpecificationElement::ExplicitVersion(version) => version.branch(),
            SpecificationElement::VersionRange(boundaries) => boundaries.branch(),
        }
    }

    /// Check if the version is part of this element
    pub fn contains(&self, version: &Version) -> bool {
        if version.branch() != self.branch() {
            return false;
        }

        match self {
            SpecificationElement::ExplicitVersion(own) => {
                compare_canonical(own, version) == Ordering::Equal
            }
            SpecificationElement::VersionRange(boundaries) => boundaries.contains(version),
        }
    }

    /// Locate this element relative to another.
    ///
    /// Elements of different branches never overlap; they are ordered by
    /// branch.
    pub fn compare_to(&self, other: &SpecificationElement) -> ElementRelation {
        match self.branch().cmp(other.branch()) {
            Ordering::Less => return ElementRelation::Lower,
            Ordering::Greater => return ElementRelation::Higher,
            Ordering::Equal => {}
        }

        let (lower, upper) = (self.lower_key(), self.upper_key());
        let (other_lower, other_upper) = (other.lower_key(), other.upper_key());

        if upper < other_lower {
            return ElementRelation::Lower;
        }
        if lower > other_upper {
            return ElementRelation::Higher;
        }

        match (lower.cmp(&other_lower), upper.cmp(&other_upper)) {
            (Ordering::Equal, Ordering::Equal) => ElementRelation::IntersectsEqually,
            (Ordering::Less | Ordering::Equal, Ordering::Greater | Ordering::Equal) => {
                ElementRelation::IntersectsCompletely
            }
            (Ordering::Greater | Ordering::Equal, Ordering::Less | Ordering::Equal) => {
                ElementRelation::IntersectsPartially
            }
            (Ordering::Less, _) => ElementRelation::IntersectsLower,
            (Ordering::Greater, _) => ElementRelation::IntersectsHigher,
        }
    }

    /// Intersect two elements; `None` when they share no version
    pub fn intersection(&self, other: &SpecificationElement) -> Option<SpecificationElement> {
        match (self, other) {
            (
                SpecificationElement::ExplicitVersion(a),
                SpecificationElement::ExplicitVersion(b),
            ) => (compare_canonical(a, b) == Ordering::Equal)
                .then(|| SpecificationElement::ExplicitVersion(a.min(b).clone())),
            (SpecificationElement::ExplicitVersion(version), element)
            | (element, SpecificationElement::ExplicitVersion(version)) => element
                .contains(version)
                .then(|| SpecificationElement::ExplicitVersion(version.clone())),
            (SpecificationElement::VersionRange(a), SpecificationElement::VersionRange(b)) => {
                a.intersection(b).map(SpecificationElement::VersionRange)
            }
        }
    }

    pub(crate) fn lower_key(&self) -> BoundaryKey<'_> {
        match self {
            SpecificationElement::ExplicitVersion(version) => BoundaryKey::Finite(version, 0),
            SpecificationElement::VersionRange(boundaries) => boundaries.lower_key(),
        }
    }

    pub(crate) fn upper_key(&self) -> BoundaryKey<'_> {
        match self {
            SpecificationElement::ExplicitVersion(version) => BoundaryKey::Finite(version, 0),
            SpecificationElement::VersionRange(boundaries) => boundaries.upper_key(),
        }
    }
}

impl fmt::Display for SpecificationElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificationElement::ExplicitVersion(version) => write!(f, "{}", version),
            SpecificationElement::VersionRange(boundaries) => write!(f, "{}", boundaries),
        }
    }
}
