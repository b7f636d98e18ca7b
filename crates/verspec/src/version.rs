//! Immutable version model

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::comparator::compare_canonical;
use crate::{Branch, VersionFormatter, VersionParseError, VersionParser};

/// The variant of a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionKind {
    /// A released version
    Release,
    /// An unreleased version that may have many builds
    Snapshot,
    /// One specific build of a snapshot
    ConcreteSnapshot {
        /// Build timestamp, conventionally `yyyyMMdd.HHmmss`
        timestamp: String,
        buildnumber: u64,
    },
}

/// A version identifier.
///
/// Versions are immutable; use [`VersionBuilder`] or [`VersionParser`] to
/// create them. Equality is positional on qualifiers and agrees with the
/// canonical ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    incremental: u64,
    branch: Branch,
    qualifiers: Vec<String>,
    kind: VersionKind,
}

impl Version {
    /// Create a release on the develop branch without qualifiers
    pub fn release(major: u64, minor: u64, incremental: u64) -> Self {
        Version {
            major,
            minor,
            incremental,
            branch: Branch::Develop,
            qualifiers: Vec::new(),
            kind: VersionKind::Release,
        }
    }

    pub fn builder() -> VersionBuilder {
        VersionBuilder::new()
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn incremental(&self) -> u64 {
        self.incremental
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }

    pub fn kind(&self) -> &VersionKind {
        &self.kind
    }

    /// Check if this is a release
    pub fn is_release(&self) -> bool {
        matches!(self.kind, VersionKind::Release)
    }

    /// Check if this is a snapshot, concrete or not
    pub fn is_snapshot(&self) -> bool {
        !self.is_release()
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self.kind, VersionKind::ConcreteSnapshot { .. })
    }

    /// Get the build timestamp of a concrete snapshot
    pub fn timestamp(&self) -> Option<&str> {
        match &self.kind {
            VersionKind::ConcreteSnapshot { timestamp, .. } => Some(timestamp),
            _ => None,
        }
    }

    /// Get the build number of a concrete snapshot
    pub fn buildnumber(&self) -> Option<u64> {
        match self.kind {
            VersionKind::ConcreteSnapshot { buildnumber, .. } => Some(buildnumber),
            _ => None,
        }
    }

    /// The same version with its qualifiers removed
    pub fn without_qualifiers(mut self) -> Version {
        self.qualifiers.clear();
        self
    }

    /// Strip build metadata, turning a concrete snapshot into its snapshot
    pub fn to_base_version(&self) -> Version {
        match self.kind {
            VersionKind::ConcreteSnapshot { .. } => Version {
                kind: VersionKind::Snapshot,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }
}

/// Total order: the canonical chain, then snapshots below their builds
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_canonical(self, other).then_with(|| self.is_concrete().cmp(&other.is_concrete()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&VersionFormatter::default().format(self))
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionParser::parse_base_version(s)
    }
}

/// Accumulates version fields before freezing them into a [`Version`]
#[derive(Debug, Clone, Default)]
pub struct VersionBuilder {
    major: u64,
    minor: u64,
    incremental: u64,
    branch: Branch,
    qualifiers: Vec<String>,
    kind: Option<VersionKind>,
}

impl VersionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn major(&mut self, major: u64) -> &mut Self {
        self.major = major;
        self
    }

    pub fn minor(&mut self, minor: u64) -> &mut Self {
        self.minor = minor;
        self
    }

    pub fn incremental(&mut self, incremental: u64) -> &mut Self {
        self.incremental = incremental;
        self
    }

    pub fn branch(&mut self, branch: Branch) -> &mut Self {
        self.branch = branch;
        self
    }

    /// Append one qualifier
    pub fn qualifier(&mut self, qualifier: impl Into<String>) -> &mut Self {
        self.qualifiers.push(qualifier.into());
        self
    }

    /// Replace all qualifiers
    pub fn qualifiers<I, S>(&mut self, qualifiers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qualifiers = qualifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn release(&mut self) -> &mut Self {
        self.kind = Some(VersionKind::Release);
        self
    }

    pub fn snapshot(&mut self) -> &mut Self {
        self.kind = Some(VersionKind::Snapshot);
        self
    }

    pub fn concrete(&mut self, timestamp: impl Into<String>, buildnumber: u64) -> &mut Self {
        self.kind = Some(VersionKind::ConcreteSnapshot {
            timestamp: timestamp.into(),
            buildnumber,
        });
        self
    }

    /// Produce an immutable version; the builder stays usable
    pub fn build(&self) -> Version {
        Version {
            major: self.major,
            minor: self.minor,
            incremental: self.incremental,
            branch: self.branch.clone(),
            qualifiers: self.qualifiers.clone(),
            kind: self.kind.clone().unwrap_or(VersionKind::Release),
        }
    }
}
