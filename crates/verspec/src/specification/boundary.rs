//! Boundary type for range endpoints

use std::cmp::Ordering;
use std::fmt;

use crate::comparator::compare_canonical;
use crate::{Branch, Version};

/// Which end of a range a boundary closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Lower,
    Upper,
}

/// How far a boundary reaches
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Limit {
    /// No limit on this side
    Unlimited,
    Inclusive(Version),
    Exclusive(Version),
}

/// Represents a bound (lower or upper) of a version range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary {
    side: Side,
    limit: Limit,
}

/// Position of a boundary on the version line.
///
/// An exclusive lower boundary sits just above its version, an exclusive
/// upper boundary just below it, so every pair of boundaries is ordered
/// the same way from both sides. Versions are placed by the canonical
/// chain, so a snapshot and its builds share a position.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BoundaryKey<'a> {
    NegativeInfinity,
    Finite(&'a Version, i8),
    PositiveInfinity,
}

impl BoundaryKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            BoundaryKey::NegativeInfinity => 0,
            BoundaryKey::Finite(..) => 1,
            BoundaryKey::PositiveInfinity => 2,
        }
    }
}

impl Ord for BoundaryKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (BoundaryKey::Finite(a, x), BoundaryKey::Finite(b, y)) => {
                compare_canonical(a, b).then(x.cmp(y))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for BoundaryKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BoundaryKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BoundaryKey<'_> {}

impl Boundary {
    /// Create a new boundary. Qualifiers of the version are dropped.
    pub fn new(side: Side, limit: Limit) -> Self {
        let limit = match limit {
            Limit::Unlimited => Limit::Unlimited,
            Limit::Inclusive(version) => Limit::Inclusive(version.without_qualifiers()),
            Limit::Exclusive(version) => Limit::Exclusive(version.without_qualifiers()),
        };
        Boundary { side, limit }
    }

    pub fn unlimited(side: Side) -> Self {
        Self::new(side, Limit::Unlimited)
    }

    pub fn inclusive(side: Side, version: Version) -> Self {
        Self::new(side, Limit::Inclusive(version))
    }

    pub fn exclusive(side: Side, version: Version) -> Self {
        Self::new(side, Limit::Exclusive(version))
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn limit(&self) -> &Limit {
        &self.limit
    }

    /// Get the version, unless unlimited
    pub fn version(&self) -> Option<&Version> {
        match &self.limit {
            Limit::Unlimited => None,
            Limit::Inclusive(version) | Limit::Exclusive(version) => Some(version),
        }
    }

    pub fn branch(&self) -> Option<&Branch> {
        self.version().map(Version::branch)
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self.limit, Limit::Unlimited)
    }

    pub fn is_inclusive(&self) -> bool {
        matches!(self.limit, Limit::Inclusive(_))
    }

    /// Compare this boundary to a candidate version.
    ///
    /// An exclusive boundary reports itself past the candidate on equality,
    /// an unlimited one is always further out on its side.
    pub fn compare_to(&self, version: &Version) -> Ordering {
        match (&self.limit, self.side) {
            (Limit::Unlimited, Side::Lower) => Ordering::Less,
            (Limit::Unlimited, Side::Upper) => Ordering::Greater,
            (Limit::Inclusive(own), _) => compare_canonical(own, version),
            (Limit::Exclusive(own), side) => match compare_canonical(own, version) {
                Ordering::Equal if side == Side::Lower => Ordering::Greater,
                Ordering::Equal => Ordering::Less,
                other => other,
            },
        }
    }

    /// Check if the version lies on the inner side of this boundary
    pub fn includes(&self, version: &Version) -> bool {
        match self.side {
            Side::Lower => self.compare_to(version) != Ordering::Greater,
            Side::Upper => self.compare_to(version) != Ordering::Less,
        }
    }

    /// Check if this boundary sits strictly below another
    pub fn is_lower_than(&self, other: &Boundary) -> bool {
        self.key() < other.key()
    }

    /// Check if this boundary sits strictly above another
    pub fn is_higher_than(&self, other: &Boundary) -> bool {
        self.key() > other.key()
    }

    pub(crate) fn key(&self) -> BoundaryKey<'_> {
        match (&self.limit, self.side) {
            (Limit::Unlimited, Side::Lower) => BoundaryKey::NegativeInfinity,
            (Limit::Unlimited, Side::Upper) => BoundaryKey::PositiveInfinity,
            (Limit::Inclusive(version), _) => BoundaryKey::Finite(version, 0),
            (Limit::Exclusive(version), Side::Lower) => BoundaryKey::Finite(version, 1),
            (Limit::Exclusive(version), Side::Upper) => BoundaryKey::Finite(version, -1),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.limit, self.side) {
            (Limit::Unlimited, Side::Lower) => write!(f, "("),
            (Limit::Unlimited, Side::Upper) => write!(f, ")"),
            (Limit::Inclusive(version), Side::Lower) => write!(f, "[{}", version),
            (Limit::Exclusive(version), Side::Lower) => write!(f, "({}", version),
            (Limit::Inclusive(version), Side::Upper) => write!(f, "{}]", version),
            (Limit::Exclusive(version), Side::Upper) => write!(f, "{})", version),
        }
    }
}
