//! Validated pair of lower and upper boundaries

use std::fmt;

use super::boundary::BoundaryKey;
use super::{Boundary, Side, SpecificationError};
use crate::{Branch, Version};

/// A non-empty interval of versions on one branch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundaries {
    lower: Boundary,
    upper: Boundary,
    branch: Branch,
}

impl Boundaries {
    /// Create a validated interval.
    ///
    /// The lower boundary must sit strictly below the upper one, except for
    /// the single-point range `[v,v]`. At least one side must be limited and
    /// both versions must be on the same branch.
    pub fn new(lower: Boundary, upper: Boundary) -> Result<Self, SpecificationError> {
        let invalid = |reason| SpecificationError::InvalidRange {
            lower: lower.to_string(),
            upper: upper.to_string(),
            reason,
        };

        if lower.side() != Side::Lower || upper.side() != Side::Upper {
            return Err(invalid("boundaries are on the wrong sides"));
        }
        if lower.is_unlimited() && upper.is_unlimited() {
            return Err(invalid("both boundaries are unlimited"));
        }

        let branch = match (lower.branch(), upper.branch()) {
            (Some(a), Some(b)) if a != b => {
                return Err(invalid("boundaries are on different branches"));
            }
            (Some(branch), _) | (None, Some(branch)) => branch.clone(),
            (None, None) => Branch::Develop,
        };

        if !is_valid_pair(&lower, &upper) {
            return Err(invalid("lower boundary does not precede upper boundary"));
        }

        Ok(Boundaries {
            lower,
            upper,
            branch,
        })
    }

    pub fn lower(&self) -> &Boundary {
        &self.lower
    }

    pub fn upper(&self) -> &Boundary {
        &self.upper
    }

    /// Branch of the limited side(s)
    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    /// Check if both boundaries include the version
    pub fn contains(&self, version: &Version) -> bool {
        self.lower.includes(version) && self.upper.includes(version)
    }

    /// Intersect two intervals; `None` when they do not overlap
    pub fn intersection(&self, other: &Boundaries) -> Option<Boundaries> {
        if self.branch != other.branch {
            return None;
        }

        // Ties between a snapshot and its build go to the total order
        let lower = if (self.lower.key(), self.lower.version())
            >= (other.lower.key(), other.lower.version())
        {
            &self.lower
        } else {
            &other.lower
        };
        let upper = if (self.upper.key(), self.upper.version())
            <= (other.upper.key(), other.upper.version())
        {
            &self.upper
        } else {
            &other.upper
        };

        if !is_valid_pair(lower, upper) {
            return None;
        }

        Some(Boundaries {
            lower: lower.clone(),
            upper: upper.clone(),
            branch: self.branch.clone(),
        })
    }

    pub(crate) fn lower_key(&self) -> BoundaryKey<'_> {
        self.lower.key()
    }

    pub(crate) fn upper_key(&self) -> BoundaryKey<'_> {
        self.upper.key()
    }
}

fn is_valid_pair(lower: &Boundary, upper: &Boundary) -> bool {
    let (low, high) = (lower.key(), upper.key());
    low < high || (low == high && lower.is_inclusive() && upper.is_inclusive())
}

impl fmt::Display for Boundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lower, self.upper)
    }
}
