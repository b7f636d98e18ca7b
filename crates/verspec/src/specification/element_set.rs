//! Sorted, non-overlapping element collections

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::{ElementRelation, SpecificationElement, SpecificationError};
use crate::{Branch, Version};

/// Elements of one branch in ascending order, pairwise disjoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortedElementSet {
    elements: Vec<SpecificationElement>,
}

impl SortedElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element at its position, rejecting any overlap
    pub fn insert(&mut self, element: SpecificationElement) -> Result<(), SpecificationError> {
        let position = self
            .elements
            .partition_point(|existing| existing.compare_to(&element) == ElementRelation::Lower);

        if let Some(existing) = self.elements.get(position) {
            if existing.compare_to(&element).intersects() {
                return Err(SpecificationError::Overlap {
                    existing: Box::new(existing.clone()),
                    added: Box::new(element),
                });
            }
        }

        self.elements.insert(position, element);
        Ok(())
    }

    /// Check if any element contains the version
    pub fn contains(&self, version: &Version) -> bool {
        self.elements.iter().any(|element| element.contains(version))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpecificationElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Intersect two sets with a merge sweep over both ascending sequences
    pub fn intersection(&self, other: &SortedElementSet) -> SortedElementSet {
        let (mut i, mut j) = (0, 0);
        let mut elements = Vec::new();

        while let (Some(a), Some(b)) = (self.elements.get(i), other.elements.get(j)) {
            match a.compare_to(b) {
                ElementRelation::Lower => i += 1,
                ElementRelation::Higher => j += 1,
                _ => {
                    if let Some(shared) = a.intersection(b) {
                        elements.push(shared);
                    }
                    // Advance whichever side ends first
                    match a.upper_key().cmp(&b.upper_key()) {
                        Ordering::Less => i += 1,
                        Ordering::Greater => j += 1,
                        Ordering::Equal => {
                            i += 1;
                            j += 1;
                        }
                    }
                }
            }
        }

        SortedElementSet { elements }
    }
}

impl<'a> IntoIterator for &'a SortedElementSet {
    type Item = &'a SpecificationElement;
    type IntoIter = std::slice::Iter<'a, SpecificationElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sorted element sets bucketed by branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BranchPartitionedSet {
    buckets: BTreeMap<Branch, SortedElementSet>,
}

impl BranchPartitionedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element into the bucket of its branch
    pub fn insert(&mut self, element: SpecificationElement) -> Result<(), SpecificationError> {
        self.buckets
            .entry(element.branch().clone())
            .or_default()
            .insert(element)
    }

    /// Check the version against the bucket of its own branch
    pub fn contains(&self, version: &Version) -> bool {
        self.buckets
            .get(version.branch())
            .is_some_and(|bucket| bucket.contains(version))
    }

    /// The bucket of one branch
    pub fn bucket(&self, branch: &Branch) -> Option<&SortedElementSet> {
        self.buckets.get(branch)
    }

    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.buckets.keys()
    }

    /// All elements, grouped by branch
    pub fn iter(&self) -> impl Iterator<Item = &SpecificationElement> {
        self.buckets.values().flat_map(SortedElementSet::iter)
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(SortedElementSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Intersect the buckets present on both sides
    pub fn intersection(&self, other: &BranchPartitionedSet) -> BranchPartitionedSet {
        let buckets = self
            .buckets
            .iter()
            .filter_map(|(branch, bucket)| {
                let shared = bucket.intersection(other.buckets.get(branch)?);
                (!shared.is_empty()).then(|| (branch.clone(), shared))
            })
            .collect();

        BranchPartitionedSet { buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{Boundary, Side};
    use crate::VersionParser;

    fn v(s: &str) -> Version {
        VersionParser::parse_base_version(s).unwrap()
    }

    fn explicit(s: &str) -> SpecificationElement {
        SpecificationElement::explicit(v(s))
    }

    fn range(lower: Boundary, upper: Boundary) -> SpecificationElement {
        SpecificationElement::range(lower, upper).unwrap()
    }

    fn closed(lower: &str, upper: &str) -> SpecificationElement {
        range(
            Boundary::inclusive(Side::Lower, v(lower)),
            Boundary::inclusive(Side::Upper, v(upper)),
        )
    }

    fn set(elements: Vec<SpecificationElement>) -> SortedElementSet {
        let mut set = SortedElementSet::new();
        for element in elements {
            set.insert(element).unwrap();
        }
        set
    }

    #[test]
    fn test_insert_keeps_order() {
        let set = set(vec![
            closed("5.0", "6.0"),
            explicit("1.0"),
            closed("2.0", "3.0"),
            explicit("4.0"),
        ]);
        let rendered: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["1.0.0", "[2.0.0,3.0.0]", "4.0.0", "[5.0.0,6.0.0]"]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_insert_rejects_overlap() {
        let mut set = set(vec![closed("1.0", "1.5")]);

        let err = set.insert(closed("1.5", "2.0")).unwrap_err();
        assert_eq!(
            err,
            SpecificationError::Overlap {
                existing: Box::new(closed("1.0", "1.5")),
                added: Box::new(closed("1.5", "2.0")),
            }
        );
        assert_eq!(err.to_string(), "Elements intersect: [1.0.0,1.5.0] and [1.5.0,2.0.0]");

        assert!(set.insert(explicit("1.2")).is_err());
        assert!(set.insert(closed("0.1", "3.0")).is_err());
        let above = range(
            Boundary::exclusive(Side::Lower, v("1.5")),
            Boundary::unlimited(Side::Upper),
        );
        assert!(set.insert(above).is_ok());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_sweep_intersection() {
        let a = set(vec![closed("1.0", "2.0"), closed("3.0", "4.0"), explicit("6.0")]);
        let b = set(vec![
            closed("1.5", "3.5"),
            range(Boundary::inclusive(Side::Lower, v("5.0")), Boundary::unlimited(Side::Upper)),
        ]);

        let expected = set(vec![closed("1.5", "2.0"), closed("3.0", "3.5"), explicit("6.0")]);
        assert_eq!(a.intersection(&b), expected);
        assert_eq!(b.intersection(&a), expected);
    }

    #[test]
    fn test_sweep_intersection_disjoint() {
        let a = set(vec![closed("1.0", "2.0")]);
        let b = set(vec![closed("3.0", "4.0")]);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn test_partitioned_contains() {
        let mut set = BranchPartitionedSet::new();
        set.insert(closed("1.0", "2.0")).unwrap();
        set.insert(closed("1.0-feature", "2.0-feature")).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.branches().count(), 2);
        assert!(set.contains(&v("1.5")));
        assert!(set.contains(&v("1.5-feature")));
        assert!(!set.contains(&v("1.5-other")));
        assert_eq!(set.bucket(&Branch::Develop).map(SortedElementSet::len), Some(1));
    }

    #[test]
    fn test_partitioned_groups_by_branch() {
        let mut set = BranchPartitionedSet::new();
        set.insert(explicit("1.0")).unwrap();
        set.insert(explicit("1.0-b")).unwrap();
        set.insert(explicit("1.0-a")).unwrap();

        let rendered: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["1.0.0-a", "1.0.0-b", "1.0.0"]);
    }

    #[test]
    fn test_partitioned_intersection() {
        let mut a = BranchPartitionedSet::new();
        a.insert(closed("1.0", "2.0")).unwrap();
        a.insert(closed("1.0-a", "2.0-a")).unwrap();

        let mut b = BranchPartitionedSet::new();
        b.insert(closed("1.5", "3.0")).unwrap();
        b.insert(closed("1.0-b", "2.0-b")).unwrap();

        let shared = a.intersection(&b);
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.iter().next(), Some(&closed("1.5", "2.0")));
        assert_eq!(shared, b.intersection(&a));
    }
}
