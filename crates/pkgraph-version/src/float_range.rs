use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::{LibraryVersion, VersionParseError};

/// Which part of a version is allowed to float to the latest available value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatBehavior {
    /// No floating, the minimum version is used as is.
    None,
    /// `1.0.0-beta*`: the latest prerelease with the given label prefix, or the stable version.
    Prerelease,
    /// `1.0.0.*`
    Revision,
    /// `1.0.*`
    Patch,
    /// `1.*`
    Minor,
    /// `*`
    Major,
    /// `*-*`: the latest version, prereleases included.
    AbsoluteLatest,
    /// `1.0.0.*-beta*`
    PrereleaseRevision,
    /// `1.0.*-beta*`
    PrereleasePatch,
    /// `1.*-beta*`
    PrereleaseMinor,
    /// `*-beta*`
    PrereleaseMajor,
}

impl FloatBehavior {
    fn with_prerelease(self) -> Self {
        match self {
            Self::Revision => Self::PrereleaseRevision,
            Self::Patch => Self::PrereleasePatch,
            Self::Minor => Self::PrereleaseMinor,
            Self::Major => Self::PrereleaseMajor,
            Self::None => Self::Prerelease,
            other => other,
        }
    }
}

/// A floating version such as `1.0.*` or `2.0.0-preview*`.
///
/// The minimum version is the lowest version the float can resolve to. For prerelease floats the
/// minimum carries the release prefix as its labels; an empty prefix is padded with a single `-`
/// label, which sorts before every alphanumeric label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloatRange {
    behavior: FloatBehavior,
    min_version: LibraryVersion,
    release_prefix: Option<String>,
}

impl FloatRange {
    pub fn new(
        behavior: FloatBehavior,
        min_version: LibraryVersion,
        release_prefix: Option<String>,
    ) -> Self {
        Self {
            behavior,
            min_version,
            release_prefix,
        }
    }

    pub fn behavior(&self) -> FloatBehavior {
        self.behavior
    }

    pub fn min_version(&self) -> &LibraryVersion {
        &self.min_version
    }

    pub fn release_prefix(&self) -> Option<&str> {
        self.release_prefix.as_deref()
    }

    /// Returns `true` if `version` is one the float could resolve to.
    pub fn satisfies(&self, version: &LibraryVersion) -> bool {
        let min = &self.min_version;
        let release_matches = || {
            !version.is_prerelease()
                || starts_with_ignore_ascii_case(
                    &version.release(),
                    self.release_prefix.as_deref().unwrap_or_default(),
                )
        };

        match self.behavior {
            FloatBehavior::AbsoluteLatest => true,
            FloatBehavior::Major => !version.is_prerelease(),
            FloatBehavior::PrereleaseMajor => release_matches(),
            FloatBehavior::PrereleaseMinor => version.major() == min.major() && release_matches(),
            FloatBehavior::PrereleasePatch => {
                version.major() == min.major()
                    && version.minor() == min.minor()
                    && release_matches()
            }
            FloatBehavior::PrereleaseRevision => {
                version.major() == min.major()
                    && version.minor() == min.minor()
                    && version.patch() == min.patch()
                    && release_matches()
            }
            FloatBehavior::Prerelease => {
                version.cmp_version_only(min).is_eq() && release_matches()
            }
            FloatBehavior::Revision => {
                version.major() == min.major()
                    && version.minor() == min.minor()
                    && version.patch() == min.patch()
                    && !version.is_prerelease()
            }
            FloatBehavior::Patch => {
                version.major() == min.major()
                    && version.minor() == min.minor()
                    && !version.is_prerelease()
            }
            FloatBehavior::Minor => version.major() == min.major() && !version.is_prerelease(),
            FloatBehavior::None => version == min,
        }
    }
}

fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len()
        && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Build the labels of a prerelease float's minimum version from its prefix.
fn prefix_labels(prefix: &str) -> Vec<String> {
    if prefix.is_empty() {
        return vec!["-".to_string()];
    }
    let mut labels: Vec<String> = prefix.split('.').map(str::to_string).collect();
    if let Some(last) = labels.last_mut() {
        if last.is_empty() {
            *last = "0".to_string();
        }
    }
    labels
}

impl FromStr for FloatRange {
    type Err = FloatRangeError;

    fn from_str(range: &str) -> Result<Self, Self::Err> {
        let range = range.trim();
        if range.is_empty() {
            return Err(FloatRangeError::Empty);
        }

        let malformed = || FloatRangeError::Malformed(range.to_string());

        // Split off a floating release label, e.g. `-beta*` in `1.0.*-beta*`.
        let (numbers, release_prefix) = match range.split_once('-') {
            Some((numbers, release)) => {
                let Some(prefix) = release.strip_suffix('*') else {
                    // A fixed release label is only allowed on a fixed version.
                    if numbers.contains('*') {
                        return Err(malformed());
                    }
                    let version = LibraryVersion::from_str(range).map_err(|err| {
                        FloatRangeError::InvalidVersion {
                            range: range.to_string(),
                            err,
                        }
                    })?;
                    return Ok(Self::new(FloatBehavior::None, version, None));
                };
                if prefix.contains('*') {
                    return Err(malformed());
                }
                (numbers, Some(prefix))
            }
            None => (range, None),
        };

        let (behavior, parts) = if numbers == "*" {
            (FloatBehavior::Major, [0u32; 4])
        } else if let Some(fixed) = numbers.strip_suffix(".*") {
            let behavior = match fixed.split('.').count() {
                1 => FloatBehavior::Minor,
                2 => FloatBehavior::Patch,
                3 => FloatBehavior::Revision,
                _ => return Err(malformed()),
            };
            (behavior, parse_numeric(range, fixed)?)
        } else if numbers.contains('*') {
            return Err(malformed());
        } else {
            (FloatBehavior::None, parse_numeric(range, numbers)?)
        };

        match release_prefix {
            Some(prefix) => {
                if !prefix
                    .bytes()
                    .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'.')
                {
                    return Err(malformed());
                }
                let behavior = if behavior == FloatBehavior::Major && prefix.is_empty() {
                    FloatBehavior::AbsoluteLatest
                } else {
                    behavior.with_prerelease()
                };
                let min_version = LibraryVersion::from_parts(parts, prefix_labels(prefix), None);
                Ok(Self::new(behavior, min_version, Some(prefix.to_string())))
            }
            None => Ok(Self::new(
                behavior,
                LibraryVersion::from_parts(parts, Vec::new(), None),
                None,
            )),
        }
    }
}

fn parse_numeric(range: &str, numbers: &str) -> Result<[u32; 4], FloatRangeError> {
    let version =
        LibraryVersion::from_str(numbers).map_err(|err| FloatRangeError::InvalidVersion {
            range: range.to_string(),
            err,
        })?;
    Ok(version.numeric_parts())
}

impl Display for FloatRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let min = &self.min_version;
        let prefix = self.release_prefix.as_deref().unwrap_or_default();
        match self.behavior {
            FloatBehavior::None => write!(f, "{min}"),
            FloatBehavior::Prerelease => write!(f, "{}-{prefix}*", min.without_release()),
            FloatBehavior::Revision => {
                write!(f, "{}.{}.{}.*", min.major(), min.minor(), min.patch())
            }
            FloatBehavior::Patch => write!(f, "{}.{}.*", min.major(), min.minor()),
            FloatBehavior::Minor => write!(f, "{}.*", min.major()),
            FloatBehavior::Major => write!(f, "*"),
            FloatBehavior::AbsoluteLatest | FloatBehavior::PrereleaseMajor => {
                write!(f, "*-{prefix}*")
            }
            FloatBehavior::PrereleaseRevision => write!(
                f,
                "{}.{}.{}.*-{prefix}*",
                min.major(),
                min.minor(),
                min.patch()
            ),
            FloatBehavior::PrereleasePatch => {
                write!(f, "{}.{}.*-{prefix}*", min.major(), min.minor())
            }
            FloatBehavior::PrereleaseMinor => write!(f, "{}.*-{prefix}*", min.major()),
        }
    }
}

/// An error that occurs when parsing a [`FloatRange`] string fails.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FloatRangeError {
    #[error("Floating version string is empty")]
    Empty,
    #[error("Invalid floating version `{0}`")]
    Malformed(String),
    #[error("Invalid floating version `{range}`")]
    InvalidVersion {
        range: String,
        #[source]
        err: VersionParseError,
    },
}
