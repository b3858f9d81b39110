use crate::error::{GumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version carried by a module tag.
///
/// Wraps [`semver::Version`] so ordering follows semver precedence
/// (major, minor, patch, then pre-release), with build metadata as the
/// final tiebreaker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

impl Version {
    /// Create a release version with no pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    /// The version assumed for a module that has never been tagged.
    pub fn zero() -> Self {
        Version::new(0, 0, 0)
    }

    /// Parse the version part of a tag (e.g. "v1.2.3" or "1.2.3-rc.1").
    ///
    /// An optional leading `v` is accepted; the rest must be a complete
    /// `major.minor.patch` version with optional pre-release and build
    /// metadata.
    pub fn parse_tag(raw: &str) -> Option<Self> {
        let raw = raw.strip_prefix('v').unwrap_or(raw);
        semver::Version::parse(raw).ok().map(Version)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    /// Compute the next release version.
    ///
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1, unless the current version is a pre-release
    ///   of that patch, in which case the pre-release is simply dropped
    ///
    /// Pre-release and build metadata never carry over to the result.
    /// Fails when the incremented component would overflow.
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let v = &self.0;
        let overflow = || {
            GumpError::version(format!(
                "cannot apply a {} bump to {}: {} version is already at its maximum",
                kind, self, kind
            ))
        };
        let next = match kind {
            BumpKind::Major => Version::new(v.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            BumpKind::Minor => {
                Version::new(v.major, v.minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            BumpKind::Patch if self.is_prerelease() => Version::new(v.major, v.minor, v.patch),
            BumpKind::Patch => {
                Version::new(v.major, v.minor, v.patch.checked_add(1).ok_or_else(overflow)?)
            }
        };
        Ok(next)
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::zero()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Which component of the version to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpKind {
    Major,
    Minor,
    #[default]
    Patch,
}

impl BumpKind {
    /// Resolve a set of command-line flags to a single bump kind.
    ///
    /// Major wins over minor, minor wins over patch, and patch is the
    /// fallback when nothing is set.
    pub fn from_flags(major: bool, minor: bool, _patch: bool) -> Self {
        if major {
            BumpKind::Major
        } else if minor {
            BumpKind::Minor
        } else {
            BumpKind::Patch
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = GumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(GumpError::config(format!(
                "unknown bump kind '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse_with_v() {
        let v = Version::parse_tag("v1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_without_v() {
        assert_eq!(Version::parse_tag("1.2.3"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_version_parse_prerelease_and_build() {
        let v = Version::parse_tag("v1.2.3-rc.1+build.5").unwrap();
        assert!(v.is_prerelease());
        assert_eq!((v.major(), v.minor(), v.patch()), (1, 2, 3));
        assert_eq!(v.to_string(), "1.2.3-rc.1+build.5");
    }

    #[test]
    fn test_version_parse_invalid() {
        assert_eq!(Version::parse_tag("1.2"), None);
        assert_eq!(Version::parse_tag("v1.2.3.4"), None);
        assert_eq!(Version::parse_tag("release-1.2.3"), None);
        assert_eq!(Version::parse_tag("bc/v1.0.0"), None);
        assert_eq!(Version::parse_tag(""), None);
    }

    #[test]
    fn test_version_ordering() {
        let mut versions = vec![
            Version::new(0, 1, 0),
            Version::new(0, 0, 2),
            Version::parse_tag("v0.1.0-rc.1").unwrap(),
            Version::new(0, 0, 10),
        ];
        versions.sort();
        assert_eq!(
            versions.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
            vec!["0.0.2", "0.0.10", "0.1.0-rc.1", "0.1.0"]
        );
    }

    #[test]
    fn test_version_bump_major() {
        assert_eq!(Version::new(1, 1, 0).bump(BumpKind::Major).unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        assert_eq!(Version::new(0, 1, 1).bump(BumpKind::Minor).unwrap(), Version::new(0, 2, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        assert_eq!(Version::zero().bump(BumpKind::Patch).unwrap(), Version::new(0, 0, 1));
    }

    #[test]
    fn test_version_bump_patch_releases_prerelease() {
        let v = Version::parse_tag("v1.2.3-rc.1").unwrap();
        assert_eq!(v.bump(BumpKind::Patch).unwrap(), Version::new(1, 2, 3));
        assert_eq!(v.bump(BumpKind::Minor).unwrap(), Version::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_drops_build_metadata() {
        let v = Version::parse_tag("v1.2.3+sha.abc").unwrap();
        assert_eq!(v.bump(BumpKind::Patch).unwrap(), Version::new(1, 2, 4));
    }

    #[test]
    fn test_version_bump_overflow_is_an_error() {
        let v = Version::parse_tag("v18446744073709551615.0.0").unwrap();
        let err = v.bump(BumpKind::Major).unwrap_err();
        assert!(matches!(err, GumpError::Version(_)));
        assert!(err.to_string().contains("18446744073709551615.0.0"));

        // Lower components still have room
        assert_eq!(v.bump(BumpKind::Minor).unwrap(), Version::new(u64::MAX, 1, 0));
    }

    #[test]
    fn test_version_bump_patch_and_minor_overflow() {
        let v = Version::new(1, u64::MAX, u64::MAX);
        assert!(v.bump(BumpKind::Patch).is_err());
        assert!(v.bump(BumpKind::Minor).is_err());
        assert_eq!(v.bump(BumpKind::Major).unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_bump_kind_precedence() {
        assert_eq!(BumpKind::from_flags(true, true, true), BumpKind::Major);
        assert_eq!(BumpKind::from_flags(false, true, true), BumpKind::Minor);
        assert_eq!(BumpKind::from_flags(false, false, true), BumpKind::Patch);
        assert_eq!(BumpKind::from_flags(false, false, false), BumpKind::Patch);
    }

    #[test]
    fn test_bump_kind_from_str() {
        assert_eq!("Major".parse::<BumpKind>().unwrap(), BumpKind::Major);
        assert_eq!(" minor ".parse::<BumpKind>().unwrap(), BumpKind::Minor);
        assert!("huge".parse::<BumpKind>().is_err());
    }
}
