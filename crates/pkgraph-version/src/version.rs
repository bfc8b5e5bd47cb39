use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// A library version: up to four numeric parts, optional release labels and optional metadata.
///
/// `1.0.0-beta.2+build.7` has the numeric parts `1.0.0.0`, the release labels `beta` and `2`, and
/// the metadata `build.7`.
///
/// Metadata never participates in equality, ordering or hashing. Release labels are compared
/// without regard to case.
///
/// The parts live behind an [`Arc`], since versions are cloned into every tracked candidate and
/// every rendered path.
#[derive(Clone)]
pub struct LibraryVersion {
    inner: Arc<VersionInner>,
}

#[derive(Debug)]
struct VersionInner {
    major: u32,
    minor: u32,
    patch: u32,
    revision: u32,
    release_labels: Vec<String>,
    metadata: Option<String>,
}

impl LibraryVersion {
    /// Create a stable `major.minor.patch` version.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self::from_parts([major, minor, patch, 0], Vec::new(), None)
    }

    pub(crate) fn from_parts(
        [major, minor, patch, revision]: [u32; 4],
        release_labels: Vec<String>,
        metadata: Option<String>,
    ) -> Self {
        Self {
            inner: Arc::new(VersionInner {
                major,
                minor,
                patch,
                revision,
                release_labels,
                metadata,
            }),
        }
    }

    /// Returns a copy of this version with different release labels.
    #[must_use]
    pub fn with_release_labels(&self, release_labels: Vec<String>) -> Self {
        Self::from_parts(
            self.numeric_parts(),
            release_labels,
            self.inner.metadata.clone(),
        )
    }

    pub fn major(&self) -> u32 {
        self.inner.major
    }

    pub fn minor(&self) -> u32 {
        self.inner.minor
    }

    pub fn patch(&self) -> u32 {
        self.inner.patch
    }

    pub fn revision(&self) -> u32 {
        self.inner.revision
    }

    pub(crate) fn numeric_parts(&self) -> [u32; 4] {
        [
            self.inner.major,
            self.inner.minor,
            self.inner.patch,
            self.inner.revision,
        ]
    }

    /// The release labels, e.g. `["beta", "2"]` for `1.0.0-beta.2`.
    pub fn release_labels(&self) -> &[String] {
        &self.inner.release_labels
    }

    /// The release labels joined with `.`; empty for stable versions.
    pub fn release(&self) -> String {
        self.inner.release_labels.join(".")
    }

    pub fn is_prerelease(&self) -> bool {
        !self.inner.release_labels.is_empty()
    }

    pub fn metadata(&self) -> Option<&str> {
        self.inner.metadata.as_deref()
    }

    /// The normalized string with metadata appended, e.g. `1.0.0-beta+build.7`.
    pub fn to_full_string(&self) -> String {
        match &self.inner.metadata {
            Some(metadata) => format!("{self}+{metadata}"),
            None => self.to_string(),
        }
    }

    /// Compare the numeric parts only, ignoring release labels and metadata.
    pub fn cmp_version_only(&self, other: &Self) -> Ordering {
        self.numeric_parts().cmp(&other.numeric_parts())
    }

    /// Returns the numeric part of this version, without release labels or metadata.
    #[must_use]
    pub fn without_release(&self) -> Self {
        Self::from_parts(self.numeric_parts(), Vec::new(), None)
    }
}

/// Compare two release label lists.
///
/// A stable version (no labels) sorts after every prerelease of the same numeric version.
fn compare_release(left: &[String], right: &[String]) -> Ordering {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    for (left, right) in left.iter().zip(right) {
        let ordering = compare_label(left, right);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}

/// Numeric labels compare numerically and sort before alphanumeric labels, which compare
/// case-insensitively.
fn compare_label(left: &str, right: &str) -> Ordering {
    match (parse_numeric_label(left), parse_numeric_label(right)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_ignore_ascii_case(left, right),
    }
}

fn parse_numeric_label(label: &str) -> Option<u64> {
    if label.bytes().all(|byte| byte.is_ascii_digit()) {
        label.parse().ok()
    } else {
        None
    }
}

pub(crate) fn compare_ignore_ascii_case(left: &str, right: &str) -> Ordering {
    left.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(right.bytes().map(|byte| byte.to_ascii_lowercase()))
}

impl PartialEq for LibraryVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LibraryVersion {}

impl PartialOrd for LibraryVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LibraryVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return Ordering::Equal;
        }
        self.cmp_version_only(other).then_with(|| {
            compare_release(&self.inner.release_labels, &other.inner.release_labels)
        })
    }
}

impl Hash for LibraryVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numeric_parts().hash(state);
        for label in &self.inner.release_labels {
            match parse_numeric_label(label) {
                Some(number) => number.hash(state),
                None => {
                    for byte in label.bytes() {
                        byte.to_ascii_lowercase().hash(state);
                    }
                    0xffu8.hash(state);
                }
            }
        }
    }
}

impl Display for LibraryVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.inner.major, self.inner.minor, self.inner.patch
        )?;
        if self.inner.revision > 0 {
            write!(f, ".{}", self.inner.revision)?;
        }
        if self.is_prerelease() {
            write!(f, "-{}", self.release())?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for LibraryVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.to_full_string())
    }
}

impl FromStr for LibraryVersion {
    type Err = VersionParseError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let version = version.trim();
        if version.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let (rest, metadata) = match version.split_once('+') {
            Some((rest, metadata)) => {
                if metadata.is_empty() || !metadata.split('.').all(is_valid_identifier) {
                    return Err(VersionParseError::InvalidMetadata {
                        version: version.to_string(),
                        metadata: metadata.to_string(),
                    });
                }
                (rest, Some(metadata.to_string()))
            }
            None => (version, None),
        };

        let (numbers, release) = match rest.split_once('-') {
            Some((numbers, release)) => (numbers, Some(release)),
            None => (rest, None),
        };

        let mut parts = [0u32; 4];
        let mut count = 0;
        for part in numbers.split('.') {
            if count == parts.len() {
                return Err(VersionParseError::PartCount(version.to_string()));
            }
            if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(VersionParseError::InvalidPart {
                    version: version.to_string(),
                    part: part.to_string(),
                });
            }
            parts[count] = part
                .parse()
                .map_err(|_| VersionParseError::InvalidPart {
                    version: version.to_string(),
                    part: part.to_string(),
                })?;
            count += 1;
        }

        let release_labels = match release {
            Some(release) => release
                .split('.')
                .map(|label| {
                    if is_valid_identifier(label) {
                        Ok(label.to_string())
                    } else {
                        Err(VersionParseError::InvalidLabel {
                            version: version.to_string(),
                            label: label.to_string(),
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self::from_parts(parts, release_labels, metadata))
    }
}

/// Release labels and metadata segments: non-empty, ASCII alphanumerics and `-`.
fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
}

/// An error that occurs when parsing a [`LibraryVersion`] string fails.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum VersionParseError {
    #[error("Version string is empty")]
    Empty,
    #[error("Invalid version `{0}`: expected between one and four numeric parts")]
    PartCount(String),
    #[error("Invalid version `{version}`: `{part}` is not a valid numeric part")]
    InvalidPart { version: String, part: String },
    #[error("Invalid version `{version}`: `{label}` is not a valid release label")]
    InvalidLabel { version: String, label: String },
    #[error("Invalid version `{version}`: `{metadata}` is not valid metadata")]
    InvalidMetadata { version: String, metadata: String },
}
