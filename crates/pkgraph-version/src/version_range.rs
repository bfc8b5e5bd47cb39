use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::{FloatRange, FloatRangeError, LibraryVersion, VersionParseError};

/// A range of library versions in interval notation.
///
/// | Notation      | Meaning              |
/// |---------------|----------------------|
/// | `1.0`         | `1.0 <= x`           |
/// | `(1.0,)`      | `1.0 < x`            |
/// | `[1.0]`       | `x == 1.0`           |
/// | `(,1.0]`      | `x <= 1.0`           |
/// | `[1.0,2.0)`   | `1.0 <= x < 2.0`     |
/// | `1.0.*`       | `1.0.0 <= x`, floating to the latest `1.0.x` |
///
/// Only the minimum may float.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    min: Option<LibraryVersion>,
    include_min: bool,
    max: Option<LibraryVersion>,
    include_max: bool,
    float: Option<FloatRange>,
}

impl VersionRange {
    /// Create a range from its bounds. The inclusiveness of a missing bound is ignored.
    pub fn new(
        min: Option<LibraryVersion>,
        include_min: bool,
        max: Option<LibraryVersion>,
        include_max: bool,
    ) -> Self {
        Self {
            include_min: include_min && min.is_some(),
            min,
            include_max: include_max && max.is_some(),
            max,
            float: None,
        }
    }

    /// The range matching every version.
    pub fn all() -> Self {
        Self::new(None, false, None, false)
    }

    /// `x >= version`
    pub fn at_least(version: LibraryVersion) -> Self {
        Self::new(Some(version), true, None, false)
    }

    /// `x == version`
    pub fn exact(version: LibraryVersion) -> Self {
        Self::new(Some(version.clone()), true, Some(version), true)
    }

    /// A floating range, with the float's minimum version as an inclusive lower bound.
    pub fn floating(float: FloatRange) -> Self {
        Self {
            min: Some(float.min_version().clone()),
            include_min: true,
            max: None,
            include_max: false,
            float: Some(float),
        }
    }

    pub fn min(&self) -> Option<&LibraryVersion> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&LibraryVersion> {
        self.max.as_ref()
    }

    pub fn include_min(&self) -> bool {
        self.include_min
    }

    pub fn include_max(&self) -> bool {
        self.include_max
    }

    pub fn float(&self) -> Option<&FloatRange> {
        self.float.as_ref()
    }

    pub fn has_lower_bound(&self) -> bool {
        self.min.is_some()
    }

    pub fn has_upper_bound(&self) -> bool {
        self.max.is_some()
    }

    pub fn is_floating(&self) -> bool {
        self.float
            .as_ref()
            .is_some_and(|float| float.behavior() != crate::FloatBehavior::None)
    }

    fn is_exact(&self) -> bool {
        self.include_min && self.include_max && self.min.is_some() && self.min == self.max
    }

    /// Returns `true` if `version` lies within the bounds of this range.
    ///
    /// Floating behavior is ignored: `1.0.*` is satisfied by `2.0.0`.
    pub fn satisfies(&self, version: &LibraryVersion) -> bool {
        let above_min = match &self.min {
            Some(min) if self.include_min => version >= min,
            Some(min) => version > min,
            None => true,
        };
        let below_max = match &self.max {
            Some(max) if self.include_max => version <= max,
            Some(max) => version < max,
            None => true,
        };
        above_min && below_max
    }

    /// Drop the float, and the `-` padding a prerelease float adds to the minimum's labels.
    ///
    /// `1.0.0-*` becomes `[1.0.0, )`, and `1.0.0-beta*` becomes `[1.0.0-beta, )`.
    #[must_use]
    pub fn to_non_snapshot_range(&self) -> Self {
        if !self.is_floating() {
            return self.clone();
        }

        let min = self.min.as_ref().map(|min| {
            if self.include_min && min.is_prerelease() {
                let labels = min
                    .release_labels()
                    .iter()
                    .map(|label| label.trim_matches('-'))
                    .filter(|label| !label.is_empty())
                    .map(str::to_string)
                    .collect();
                min.with_release_labels(labels)
            } else {
                min.clone()
            }
        });

        Self::new(min, self.include_min, self.max.clone(), self.include_max)
    }

    /// A short, human readable form, e.g. `(>= 1.0.0 && < 2.0.0)`.
    ///
    /// Returns an empty string for a range without bounds.
    pub fn pretty_print(&self) -> String {
        if self.is_exact() {
            if let Some(min) = &self.min {
                return format!("(= {min})");
            }
        }

        let lower = self.min.as_ref().map(|min| {
            let operator = if self.include_min { ">=" } else { ">" };
            match &self.float {
                Some(float) if self.is_floating() => format!("{operator} {float}"),
                _ => format!("{operator} {min}"),
            }
        });
        let upper = self.max.as_ref().map(|max| {
            let operator = if self.include_max { "<=" } else { "<" };
            format!("{operator} {max}")
        });

        match (lower, upper) {
            (Some(lower), Some(upper)) => format!("({lower} && {upper})"),
            (Some(bound), None) | (None, Some(bound)) => format!("({bound})"),
            (None, None) => String::new(),
        }
    }
}

impl Display for VersionRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_exact() {
            if let Some(min) = &self.min {
                return write!(f, "[{min}]");
            }
        }

        f.write_str(if self.include_min { "[" } else { "(" })?;
        match (&self.min, &self.float) {
            (Some(_), Some(float)) if self.is_floating() => write!(f, "{float}")?,
            (Some(min), _) => write!(f, "{min}")?,
            (None, _) => {}
        }
        f.write_str(", ")?;
        if let Some(max) = &self.max {
            write!(f, "{max}")?;
        }
        f.write_str(if self.include_max { "]" } else { ")" })
    }
}

impl FromStr for VersionRange {
    type Err = VersionRangeError;

    fn from_str(range: &str) -> Result<Self, Self::Err> {
        let range = range.trim();
        if range.is_empty() {
            return Err(VersionRangeError::Empty);
        }

        let first = range.as_bytes()[0];
        if first != b'[' && first != b'(' {
            // A bare version is a minimum; a bare float floats from its minimum.
            if range.contains('*') {
                let float = parse_float(range, range)?;
                return Ok(Self::floating(float));
            }
            let version = parse_version(range, range)?;
            return Ok(Self::at_least(version));
        }

        let include_min = first == b'[';
        let include_max = match range.as_bytes()[range.len() - 1] {
            b']' => true,
            b')' => false,
            _ => return Err(VersionRangeError::InvalidBrackets(range.to_string())),
        };
        let inner = &range[1..range.len() - 1];
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

        match parts.as_slice() {
            [single] => {
                if !include_min || !include_max || single.is_empty() {
                    return Err(VersionRangeError::ExactMismatch(range.to_string()));
                }
                if single.contains('*') {
                    return Err(VersionRangeError::FloatingMaximum(range.to_string()));
                }
                let version = parse_version(range, single)?;
                Ok(Self::exact(version))
            }
            [min, max] => {
                if min.is_empty() && max.is_empty() {
                    return Err(VersionRangeError::NoBounds(range.to_string()));
                }
                if max.contains('*') {
                    return Err(VersionRangeError::FloatingMaximum(range.to_string()));
                }

                let max = if max.is_empty() {
                    None
                } else {
                    Some(parse_version(range, max)?)
                };

                let (min, float) = if min.is_empty() {
                    (None, None)
                } else if min.contains('*') {
                    let float = parse_float(range, min)?;
                    (Some(float.min_version().clone()), Some(float))
                } else {
                    (Some(parse_version(range, min)?), None)
                };

                if let (Some(min), Some(max)) = (&min, &max) {
                    if min > max {
                        return Err(VersionRangeError::MinGreaterThanMax(range.to_string()));
                    }
                    if min == max && !(include_min && include_max) {
                        return Err(VersionRangeError::EmptyExclusiveRange(range.to_string()));
                    }
                }

                let mut version_range = Self::new(min, include_min, max, include_max);
                version_range.float = float;
                Ok(version_range)
            }
            _ => Err(VersionRangeError::TooManyParts(range.to_string())),
        }
    }
}

fn parse_version(range: &str, version: &str) -> Result<LibraryVersion, VersionRangeError> {
    LibraryVersion::from_str(version).map_err(|err| VersionRangeError::InvalidVersion {
        range: range.to_string(),
        err,
    })
}

fn parse_float(range: &str, float: &str) -> Result<FloatRange, VersionRangeError> {
    FloatRange::from_str(float).map_err(|err| VersionRangeError::InvalidFloat {
        range: range.to_string(),
        err,
    })
}

/// An error that occurs when parsing a [`VersionRange`] string fails.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum VersionRangeError {
    #[error("Version range is empty")]
    Empty,
    #[error("Invalid version range `{0}`: unbalanced brackets")]
    InvalidBrackets(String),
    #[error("Invalid version range `{0}`: expected at most two comma-separated versions")]
    TooManyParts(String),
    #[error("Invalid version range `{0}`: at least one bound is required")]
    NoBounds(String),
    #[error("Invalid version range `{0}`: a single version must be enclosed in `[` and `]`")]
    ExactMismatch(String),
    #[error("Invalid version range `{0}`: the minimum is greater than the maximum")]
    MinGreaterThanMax(String),
    #[error("Invalid version range `{0}`: equal bounds must both be inclusive")]
    EmptyExclusiveRange(String),
    #[error("Invalid version range `{0}`: only the minimum version may float")]
    FloatingMaximum(String),
    #[error("Invalid version range `{range}`")]
    InvalidVersion {
        range: String,
        #[source]
        err: VersionParseError,
    },
    #[error("Invalid version range `{range}`")]
    InvalidFloat {
        range: String,
        #[source]
        err: FloatRangeError,
    },
}
