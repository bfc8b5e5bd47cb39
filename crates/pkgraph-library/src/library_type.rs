use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The kind of library a dependency resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LibraryType {
    Package,
    Project,
    ExternalProject,
    Assembly,
    Reference,
    WinMD,
    /// No source could provide the library.
    Unresolved,
}

impl LibraryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Project => "project",
            Self::ExternalProject => "externalProject",
            Self::Assembly => "assembly",
            Self::Reference => "reference",
            Self::WinMD => "winmd",
            Self::Unresolved => "unresolved",
        }
    }
}

impl Display for LibraryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryType {
    type Err = LibraryTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Package,
            Self::Project,
            Self::ExternalProject,
            Self::Assembly,
            Self::Reference,
            Self::WinMD,
            Self::Unresolved,
        ]
        .into_iter()
        .find(|library_type| library_type.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| LibraryTypeParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown library type: `{0}`")]
pub struct LibraryTypeParseError(String);
