use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use arcstr::ArcStr;

/// The name of a library, as requested by a dependency or reported by a source.
///
/// Library names are case-insensitive: `Newtonsoft.Json` and `newtonsoft.json` refer to the same
/// library. The casing the name was created with is preserved for display, while equality,
/// ordering and hashing all operate on a lowercase normalized form.
///
/// Both forms are reference-counted, so cloning a name never copies the underlying string.
#[derive(Debug, Clone)]
pub struct LibraryName {
    given: ArcStr,
    normalized: ArcStr,
}

impl LibraryName {
    /// Create a validated library name from an owned string.
    pub fn from_owned(name: String) -> Result<Self, InvalidNameError> {
        validate(&name)?;
        let given = ArcStr::from(name);
        Ok(Self::with_given(given))
    }

    fn with_given(given: ArcStr) -> Self {
        let normalized = if given.chars().any(char::is_uppercase) {
            ArcStr::from(given.to_lowercase())
        } else {
            given.clone()
        };
        Self { given, normalized }
    }

    /// Returns the name with the casing it was created with.
    pub fn as_str(&self) -> &str {
        &self.given
    }

    /// Returns the lowercase form used for comparisons.
    pub fn as_normalized(&self) -> &str {
        &self.normalized
    }

    /// Returns `true` if `other` names the same library, ignoring case.
    pub fn matches(&self, other: &str) -> bool {
        if other.is_ascii() {
            self.normalized.eq_ignore_ascii_case(other)
        } else {
            *self.normalized == other.to_lowercase()
        }
    }
}

fn validate(name: &str) -> Result<(), InvalidNameError> {
    if name.is_empty() {
        return Err(InvalidNameError(name.to_string()));
    }
    if name
        .chars()
        .any(|char| char.is_whitespace() || char.is_control())
    {
        return Err(InvalidNameError(name.to_string()));
    }
    Ok(())
}

impl FromStr for LibraryName {
    type Err = InvalidNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        validate(name)?;
        Ok(Self::with_given(ArcStr::from(name)))
    }
}

impl PartialEq for LibraryName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for LibraryName {}

impl PartialOrd for LibraryName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LibraryName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl Hash for LibraryName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl Display for LibraryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.given)
    }
}

impl AsRef<str> for LibraryName {
    fn as_ref(&self) -> &str {
        &self.given
    }
}

/// Invalid [`crate::LibraryName`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidNameError(String);

impl InvalidNameError {
    /// Returns the invalid name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for InvalidNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Not a valid library name: \"{}\". Names must be non-empty and may not contain \
            whitespace or control characters.",
            self.0
        )
    }
}

impl Error for InvalidNameError {}
