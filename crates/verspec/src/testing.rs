//! Generators for property tests

use proptest::prelude::*;

use crate::{GrammarPolicy, Version, VersionParser};

const BRANCHES: [&str; 4] = ["alpha", "feature", "develop", "b.1"];
const QUALIFIERS: [&str; 4] = ["qa", "qb", "3", "x.y"];
const TIMESTAMPS: [&str; 2] = ["20210128.214836", "20210129.000000"];

pub(crate) fn parser() -> VersionParser {
    VersionParser::new(GrammarPolicy::ReleaseOrAnySnapshot)
}

/// Version strings over a small alphabet, so that ties are frequent
pub(crate) fn version_text() -> impl Strategy<Value = String> {
    let suffix = prop_oneof![
        Just(String::new()),
        Just("-SNAPSHOT".to_string()),
        (prop::sample::select(TIMESTAMPS.to_vec()), 1u64..4)
            .prop_map(|(timestamp, buildnumber)| format!("-{}-{}", timestamp, buildnumber)),
    ];

    (
        (0u64..3, 0u64..3, 0u64..3),
        prop::option::of(prop::sample::select(BRANCHES.to_vec())),
        prop::collection::vec(prop::sample::select(QUALIFIERS.to_vec()), 0..3),
        suffix,
    )
        .prop_map(|((major, minor, incremental), branch, qualifiers, suffix)| {
            let mut text = format!("{}.{}.{}", major, minor, incremental);
            for word in branch.into_iter().chain(qualifiers) {
                text.push('-');
                text.push_str(word);
            }
            text.push_str(&suffix);
            text
        })
}

pub(crate) fn version() -> impl Strategy<Value = Version> {
    version_text().prop_map(|text| parser().parse(&text).unwrap())
}

/// One point of a specification: `1.<minor>` as a release, snapshot or build,
/// on develop or on `feature`
fn point(minor: u64, flavor: u8, feature: bool) -> String {
    let mut text = format!("1.{}", minor);
    if feature {
        text.push_str("-feature");
    }
    match flavor {
        1 => text.push_str("-SNAPSHOT"),
        2 => text.push_str("-20210129.214836-1"),
        _ => {}
    }
    text
}

/// Candidate versions near the points used by [`specification_text`]
pub(crate) fn candidate() -> impl Strategy<Value = Version> {
    (0u64..42, 0u8..3, any::<bool>()).prop_map(|(minor, flavor, feature)| {
        parser().parse(&point(minor, flavor, feature)).unwrap()
    })
}

/// Specification strings whose elements are disjoint by construction: every
/// element takes its own strictly increasing minor numbers.
pub(crate) fn specification_text() -> impl Strategy<Value = String> {
    (
        prop::collection::btree_set(0u64..40, 1..10),
        prop::collection::vec((0u8..6, 0u8..3, 0u8..3, any::<bool>()), 10),
    )
        .prop_map(|(minors, shapes)| {
            let minors: Vec<u64> = minors.into_iter().collect();
            let mut shapes = shapes.into_iter();
            let mut elements = Vec::new();
            let mut i = 0;

            while i < minors.len() {
                let (shape, low, high, feature) = shapes.next().unwrap_or((0, 0, 0, false));
                let first = point(minors[i], low, feature);
                let next = minors.get(i + 1).map(|&minor| point(minor, high, feature));

                let element = match (shape, next) {
                    (1, _) if i == 0 => format!("(,{}]", first),
                    (2, None) => format!("({},)", first),
                    (3, Some(next)) => {
                        i += 1;
                        format!("[{},{})", first, next)
                    }
                    (4, Some(next)) => {
                        i += 1;
                        format!("({},{}]", first, next)
                    }
                    (5, Some(next)) => {
                        i += 1;
                        format!("[{},{}]", first, next)
                    }
                    _ => first,
                };
                elements.push(element);
                i += 1;
            }

            elements.join(", ")
        })
}
