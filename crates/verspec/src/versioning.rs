//! Versioning facade providing high-level string operations

use crate::version_parser::SNAPSHOT;
use crate::{
    SpecificationError, Version, VersionComparator, VersionParseError, VersionParser,
    VersionsSpecification,
};

/// Main facade for version and specification operations on strings
pub struct Versioning;

impl Versioning {
    /// Parse a candidate version of any kind.
    ///
    /// A trailing `-SNAPSHOT` selects the snapshot grammar, everything else
    /// the concrete snapshot grammar.
    pub fn parse_version(version: &str) -> Result<Version, VersionParseError> {
        if version
            .strip_suffix(SNAPSHOT)
            .is_some_and(|rest| rest.ends_with('-'))
        {
            VersionParser::parse_base_version(version)
        } else {
            VersionParser::parse_concrete_version(version)
        }
    }

    /// Check if a version satisfies a specification
    pub fn satisfies(version: &str, specification: &str) -> bool {
        let version = match Self::parse_version(version) {
            Ok(v) => v,
            Err(_) => return false,
        };

        match VersionsSpecification::parse(specification) {
            Ok(parsed) => parsed.contains(&version),
            Err(_) => false,
        }
    }

    /// Return all versions that satisfy the given specification
    pub fn satisfied_by(versions: &[&str], specification: &str) -> Vec<String> {
        let parsed = match VersionsSpecification::parse(specification) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter(|v| {
                Self::parse_version(v)
                    .map(|version| parsed.contains(&version))
                    .unwrap_or(false)
            })
            .map(|v| v.to_string())
            .collect()
    }

    /// Intersect two specifications and render the result canonically
    pub fn intersect(a: &str, b: &str) -> Result<Option<String>, SpecificationError> {
        let a = VersionsSpecification::parse(a)?;
        let b = VersionsSpecification::parse(b)?;
        Ok(a.intersection(&b).map(|shared| shared.to_string()))
    }

    /// Sort versions in ascending order; unparseable versions are dropped
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, VersionComparator::new())
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, VersionComparator::new().reversed())
    }

    fn usort(versions: &[&str], comparator: VersionComparator) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((Self::parse_version(v).ok()?, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| comparator.compare(a, b));

        // Return original versions in sorted order
        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_picks_grammar() {
        assert!(Versioning::parse_version("1.0-SNAPSHOT").unwrap().is_snapshot());
        assert!(Versioning::parse_version("1.0-20210129.214836-2").unwrap().is_snapshot());
        assert!(Versioning::parse_version("1.0-xSNAPSHOT").unwrap().is_release());
        assert!(Versioning::parse_version("1.0").unwrap().is_release());
    }

    #[test]
    fn test_satisfies_positive() {
        assert!(Versioning::satisfies("1.2.0", "[1.0, 1.3), (1.3, 1.7)"));
        assert!(Versioning::satisfies("1.5.0", "[1.0, 1.3), (1.3, 1.7)"));
        assert!(Versioning::satisfies("1.0", "1.0.0"));
        assert!(Versioning::satisfies("5.0", "[1.0,)"));
        assert!(Versioning::satisfies("0.1", "(,1.0]"));
        assert!(Versioning::satisfies("1.0-SNAPSHOT", "[0.9,1.0)"));
        assert!(Versioning::satisfies("1.0-20210129.214836-2", "[1.0-SNAPSHOT,1.0)"));
        assert!(Versioning::satisfies("1.5-feature", "[1.0-feature,2.0-feature)"));
    }

    #[test]
    fn test_snapshot_matches_its_builds() {
        let build = "1.0-20210129.214836-2";
        assert!(Versioning::satisfies(build, "1.0-SNAPSHOT"));
        assert!(Versioning::satisfies(build, "[0.9,1.0-SNAPSHOT]"));
        assert!(Versioning::satisfies(build, "[1.0-SNAPSHOT]"));
        assert!(!Versioning::satisfies(build, "[0.9,1.0-SNAPSHOT)"));
        assert!(!Versioning::satisfies(build, "1.0"));
    }

    #[test]
    fn test_satisfies_negative() {
        assert!(!Versioning::satisfies("1.3.0", "[1.0, 1.3), (1.3, 1.7)"));
        assert!(!Versioning::satisfies("1.7", "[1.0, 1.3), (1.3, 1.7)"));
        assert!(!Versioning::satisfies("1.5-feature", "[1.0,2.0)"));
        assert!(!Versioning::satisfies("1.0", "[1.0-SNAPSHOT,1.0)"));
        assert!(!Versioning::satisfies("not a version", "[1.0,)"));
        assert!(!Versioning::satisfies("1.0", "[1.0,"));
    }

    #[test]
    fn test_satisfied_by() {
        let versions = ["1.0", "1.2", "1.3", "1.5", "2.0", "garbage here"];
        assert_eq!(
            Versioning::satisfied_by(&versions, "[1.0, 1.3), (1.3, 1.7)"),
            vec!["1.0", "1.2", "1.5"]
        );
        assert!(Versioning::satisfied_by(&versions, "[").is_empty());
    }

    #[test]
    fn test_intersect() {
        assert_eq!(
            Versioning::intersect("[1.0, 1.3), (1.3, 1.7)", "[1.3,)").unwrap(),
            Some("(1.3.0,1.7.0)".to_string())
        );
        assert_eq!(Versioning::intersect("[1.0,2.0)", "[2.0,)").unwrap(), None);
        assert!(Versioning::intersect("[1.0,2.0)", "[,]").is_err());
    }

    #[test]
    fn test_sort() {
        let versions = [
            "1.10",
            "1.2-SNAPSHOT",
            "1.2",
            "1.2-feature",
            "0.9",
            "1.2-20210129.214836-2",
        ];
        assert_eq!(
            Versioning::sort(&versions),
            vec!["0.9", "1.2-SNAPSHOT", "1.2-20210129.214836-2", "1.2-feature", "1.2", "1.10"]
        );
        // A snapshot and its build compare equal and keep their input order
        assert_eq!(
            Versioning::rsort(&versions),
            vec!["1.10", "1.2", "1.2-feature", "1.2-SNAPSHOT", "1.2-20210129.214836-2", "0.9"]
        );
    }
}
