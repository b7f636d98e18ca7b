//! Version comparison utilities

use std::cmp::Ordering;

use crate::{Version, VersionKind};

/// One step of the version ordering chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderingStage {
    /// major, minor, incremental, numerically
    Numbers,
    /// releases above snapshots
    SnapshotStatus,
    Branch,
    /// element-wise, a strict prefix sorts above the longer sequence
    Qualifiers,
    /// timestamp then buildnumber, only between two concrete snapshots
    BuildMetadata,
}

impl OrderingStage {
    /// The canonical chain, in precedence order
    pub const ALL: [OrderingStage; 5] = [
        OrderingStage::Numbers,
        OrderingStage::SnapshotStatus,
        OrderingStage::Branch,
        OrderingStage::Qualifiers,
        OrderingStage::BuildMetadata,
    ];

    /// Compare two versions on this stage alone
    pub fn compare(self, a: &Version, b: &Version) -> Ordering {
        match self {
            OrderingStage::Numbers => (a.major(), a.minor(), a.incremental())
                .cmp(&(b.major(), b.minor(), b.incremental())),
            OrderingStage::SnapshotStatus => a.is_release().cmp(&b.is_release()),
            OrderingStage::Branch => a.branch().cmp(b.branch()),
            OrderingStage::Qualifiers => compare_qualifiers(a.qualifiers(), b.qualifiers()),
            OrderingStage::BuildMetadata => compare_build_metadata(a.kind(), b.kind()),
        }
    }
}

fn compare_qualifiers(a: &[String], b: &[String]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    // A strict prefix is the greater one
    b.len().cmp(&a.len())
}

fn compare_build_metadata(a: &VersionKind, b: &VersionKind) -> Ordering {
    match (a, b) {
        (
            VersionKind::ConcreteSnapshot {
                timestamp: ta,
                buildnumber: na,
            },
            VersionKind::ConcreteSnapshot {
                timestamp: tb,
                buildnumber: nb,
            },
        ) => ta.cmp(tb).then(na.cmp(nb)),
        _ => Ordering::Equal,
    }
}

/// Compare two versions over the whole canonical chain.
///
/// A snapshot and any of its builds compare equal here; this is the order
/// used for containment and boundaries.
pub(crate) fn compare_canonical(a: &Version, b: &Version) -> Ordering {
    OrderingStage::ALL
        .iter()
        .fold(Ordering::Equal, |acc, stage| acc.then_with(|| stage.compare(a, b)))
}

/// Configurable comparator built from ordering stages.
///
/// ```
/// use verspec::{VersionComparator, VersionParser};
///
/// let a = VersionParser::parse_release("1.0-feature").unwrap();
/// let b = VersionParser::parse_release("1.0").unwrap();
///
/// assert!(VersionComparator::new().less_than(&a, &b));
/// assert!(VersionComparator::new().without_branch().equal_to(&a, &b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionComparator {
    stages: Vec<OrderingStage>,
    reversed: bool,
}

impl VersionComparator {
    /// Create the canonical comparator
    pub fn new() -> Self {
        VersionComparator {
            stages: OrderingStage::ALL.to_vec(),
            reversed: false,
        }
    }

    /// Ignore branches
    pub fn without_branch(self) -> Self {
        self.without(OrderingStage::Branch)
    }

    /// Ignore qualifiers
    pub fn without_qualifiers(self) -> Self {
        self.without(OrderingStage::Qualifiers)
    }

    /// Ignore timestamps and build numbers
    pub fn without_build_metadata(self) -> Self {
        self.without(OrderingStage::BuildMetadata)
    }

    /// Invert the resulting order
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    fn without(mut self, stage: OrderingStage) -> Self {
        self.stages.retain(|s| *s != stage);
        self
    }

    /// The active stages, in precedence order
    pub fn stages(&self) -> &[OrderingStage] {
        &self.stages
    }

    /// Compare version1 to version2
    pub fn compare(&self, version1: &Version, version2: &Version) -> Ordering {
        let result = self
            .stages
            .iter()
            .fold(Ordering::Equal, |acc, stage| {
                acc.then_with(|| stage.compare(version1, version2))
            });

        if self.reversed {
            result.reverse()
        } else {
            result
        }
    }

    /// Check if version1 > version2
    pub fn greater_than(&self, version1: &Version, version2: &Version) -> bool {
        self.compare(version1, version2) == Ordering::Greater
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(&self, version1: &Version, version2: &Version) -> bool {
        self.compare(version1, version2) != Ordering::Less
    }

    /// Check if version1 < version2
    pub fn less_than(&self, version1: &Version, version2: &Version) -> bool {
        self.compare(version1, version2) == Ordering::Less
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(&self, version1: &Version, version2: &Version) -> bool {
        self.compare(version1, version2) != Ordering::Greater
    }

    /// Check if version1 == version2
    pub fn equal_to(&self, version1: &Version, version2: &Version) -> bool {
        self.compare(version1, version2) == Ordering::Equal
    }

    /// Check if version1 != version2
    pub fn not_equal_to(&self, version1: &Version, version2: &Version) -> bool {
        !self.equal_to(version1, version2)
    }

    /// Sort a slice of versions in place
    pub fn sort(&self, versions: &mut [Version]) {
        versions.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for VersionComparator {
    fn default() -> Self {
        Self::new()
    }
}
