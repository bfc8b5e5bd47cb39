use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::LibraryType;

bitflags::bitflags! {
    /// The kinds of library a dependency is allowed to resolve to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LibraryDependencyTarget: u16 {
        const PACKAGE = 1 << 0;
        const PROJECT = 1 << 1;
        const EXTERNAL_PROJECT = 1 << 2;
        const ASSEMBLY = 1 << 3;
        const REFERENCE = 1 << 4;
        const WIN_MD = 1 << 5;

        const PACKAGE_PROJECT_EXTERNAL =
            Self::PACKAGE.bits() | Self::PROJECT.bits() | Self::EXTERNAL_PROJECT.bits();
        const ALL = Self::PACKAGE.bits()
            | Self::PROJECT.bits()
            | Self::EXTERNAL_PROJECT.bits()
            | Self::ASSEMBLY.bits()
            | Self::REFERENCE.bits()
            | Self::WIN_MD.bits();
    }
}

impl Default for LibraryDependencyTarget {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<LibraryType> for LibraryDependencyTarget {
    fn from(library_type: LibraryType) -> Self {
        match library_type {
            LibraryType::Package => Self::PACKAGE,
            LibraryType::Project => Self::PROJECT,
            LibraryType::ExternalProject => Self::EXTERNAL_PROJECT,
            LibraryType::Assembly => Self::ASSEMBLY,
            LibraryType::Reference => Self::REFERENCE,
            LibraryType::WinMD => Self::WIN_MD,
            LibraryType::Unresolved => Self::empty(),
        }
    }
}

impl LibraryDependencyTarget {
    fn flag_name(self) -> Option<&'static str> {
        match self {
            Self::PACKAGE => Some("package"),
            Self::PROJECT => Some("project"),
            Self::EXTERNAL_PROJECT => Some("externalProject"),
            Self::ASSEMBLY => Some("assembly"),
            Self::REFERENCE => Some("reference"),
            Self::WIN_MD => Some("winmd"),
            _ => None,
        }
    }
}

impl Display for LibraryDependencyTarget {
    /// Comma-separated flag names, `all` for every flag and `none` for the empty set.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == Self::ALL {
            return f.write_str("all");
        }
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for flag in self.iter() {
            if let Some(name) = flag.flag_name() {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for LibraryDependencyTarget {
    type Err = TargetParseError;

    /// Parse a comma-separated list such as `package,project`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::empty();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(TargetParseError::Empty(s.to_string()));
            }
            flags |= if part.eq_ignore_ascii_case("all") {
                Self::ALL
            } else if part.eq_ignore_ascii_case("none") {
                Self::empty()
            } else {
                let library_type = LibraryType::from_str(part)
                    .map_err(|_| TargetParseError::Unknown(part.to_string()))?;
                Self::from(library_type)
            };
        }
        Ok(flags)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetParseError {
    #[error("Empty entry in dependency targets: `{0}`")]
    Empty(String),
    #[error("Unknown dependency target: `{0}`")]
    Unknown(String),
}
