//! Keyword template rendering of versions

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::version_parser::SNAPSHOT;
use crate::{Version, VersionKind};

lazy_static! {
    static ref KEYWORD_RE: Regex = Regex::new(r"\{(-?)([a-z]+)\}").unwrap();
}

/// Template that renders `{major}`, `{minor}`, `{incremental}`, `{branch}`,
/// `{qualifiers}`, `{timestamp}`, `{buildnumber}` and `{snapshot}`.
///
/// A leading `-` inside the braces (`{-qualifiers}`) prefixes every
/// non-empty value with a hyphen. Unknown keywords are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFormatter {
    template: String,
}

impl VersionFormatter {
    /// Template whose output parses back to the same version
    pub const DEFAULT_TEMPLATE: &'static str =
        "{major}.{minor}.{incremental}{-branch}{-qualifiers}{-snapshot}";

    pub fn new(template: impl Into<String>) -> Self {
        VersionFormatter {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a version
    pub fn format(&self, version: &Version) -> String {
        KEYWORD_RE
            .replace_all(&self.template, |caps: &Captures| {
                let hyphenated = !caps[1].is_empty();
                match keyword_values(&caps[2], version) {
                    Some(values) if hyphenated => {
                        values.iter().map(|value| format!("-{}", value)).collect()
                    }
                    Some(values) => values.join("-"),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl Default for VersionFormatter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEMPLATE)
    }
}

fn keyword_values(keyword: &str, version: &Version) -> Option<Vec<String>> {
    let values = match keyword {
        "major" => vec![version.major().to_string()],
        "minor" => vec![version.minor().to_string()],
        "incremental" => vec![version.incremental().to_string()],
        "branch" => match version.branch().name() {
            Some(name) => vec![name.to_string()],
            // The first qualifier would otherwise read back as the branch
            None if !version.qualifiers().is_empty() => vec![version.branch().to_string()],
            None => Vec::new(),
        },
        "qualifiers" => {
            if version.qualifiers().is_empty() {
                Vec::new()
            } else {
                vec![version.qualifiers().join("-")]
            }
        }
        "timestamp" => version.timestamp().map(str::to_string).into_iter().collect(),
        "buildnumber" => version.buildnumber().map(|n| n.to_string()).into_iter().collect(),
        "snapshot" => match version.kind() {
            VersionKind::Release => Vec::new(),
            VersionKind::Snapshot => vec![SNAPSHOT.to_string()],
            VersionKind::ConcreteSnapshot {
                timestamp,
                buildnumber,
            } => vec![format!("{}-{}", timestamp, buildnumber)],
        },
        _ => return None,
    };
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Branch, VersionParser};

    #[test]
    fn test_default_format() {
        let formatter = VersionFormatter::default();

        let version = VersionParser::parse_release("1.2.3-branch-qa-qb").unwrap();
        assert_eq!(formatter.format(&version), "1.2.3-branch-qa-qb");

        let version = VersionParser::parse_base_version("1-SNAPSHOT").unwrap();
        assert_eq!(formatter.format(&version), "1.0.0-SNAPSHOT");

        let version = VersionParser::parse_concrete_version("1.2-20210129.214836-2").unwrap();
        assert_eq!(formatter.format(&version), "1.2.0-20210129.214836-2");
    }

    #[test]
    fn test_develop_kept_before_qualifiers() {
        let version = Version::builder().major(1).qualifier("qa").build();
        assert_eq!(version.to_string(), "1.0.0-develop-qa");

        let version = Version::builder().major(1).build();
        assert_eq!(version.to_string(), "1.0.0");
    }

    #[test]
    fn test_custom_template() {
        let version = Version::builder()
            .major(3)
            .minor(1)
            .branch(Branch::new("feature").unwrap())
            .qualifiers(["a", "b"])
            .concrete("20210129.214836", 7)
            .build();

        let formatter = VersionFormatter::new(
            "v{major}.{minor} on {branch} [{qualifiers}] #{buildnumber} @{timestamp}",
        );
        assert_eq!(
            formatter.format(&version),
            "v3.1 on feature [a-b] #7 @20210129.214836"
        );
    }

    #[test]
    fn test_empty_values() {
        let version = Version::release(1, 0, 0);
        let template = "{major}{-qualifiers}{-snapshot}|{timestamp}|{buildnumber}|{branch}";
        let formatter = VersionFormatter::new(template);
        assert_eq!(formatter.format(&version), "1|||");
    }

    #[test]
    fn test_unknown_keyword_kept() {
        let formatter = VersionFormatter::new("{major}-{unknown}-{-nope}");
        assert_eq!(formatter.format(&Version::release(2, 0, 0)), "2-{unknown}-{-nope}");
        assert_eq!(formatter.template(), "{major}-{unknown}-{-nope}");
    }
}
