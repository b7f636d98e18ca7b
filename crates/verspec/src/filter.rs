//! Release/snapshot and develop/feature classification

use bitflags::bitflags;

use crate::Version;

bitflags! {
    /// Set of version categories.
    ///
    /// A version passes when both its status (release or snapshot) and its
    /// branch category (develop or feature) are in the set.
    #[derive(Default)]
    pub struct VersionFilter: u8 {
        const NONE = 0;
        const RELEASE = 0b0001;
        const SNAPSHOT = 0b0010;
        const DEVELOP = 0b0100;
        const FEATURE = 0b1000;
        const ALL = Self::RELEASE.bits
            | Self::SNAPSHOT.bits
            | Self::DEVELOP.bits
            | Self::FEATURE.bits;
    }
}

impl VersionFilter {
    /// Check if a version falls into this set
    pub fn matches(self, version: &Version) -> bool {
        let status = if version.is_release() {
            Self::RELEASE
        } else {
            Self::SNAPSHOT
        };
        let branch = if version.branch().is_develop() {
            Self::DEVELOP
        } else {
            Self::FEATURE
        };
        self.contains(status | branch)
    }

    /// Keep the versions in this set
    pub fn filter<'a, I>(self, versions: I) -> impl Iterator<Item = &'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().filter(move |v| self.matches(v))
    }
}
