use std::fmt::{Display, Formatter};

use pkgraph_normalize::LibraryName;
use pkgraph_version::LibraryVersion;

use crate::LibraryType;

/// A concrete library: name, resolved version and type.
///
/// The name compares without regard to case. Unresolved libraries may lack a version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibraryIdentity {
    pub name: LibraryName,
    pub version: Option<LibraryVersion>,
    pub library_type: LibraryType,
}

impl LibraryIdentity {
    pub fn new(name: LibraryName, version: LibraryVersion, library_type: LibraryType) -> Self {
        Self {
            name,
            version: Some(version),
            library_type,
        }
    }

    /// A library no source could provide.
    pub fn unresolved(name: LibraryName) -> Self {
        Self {
            name,
            version: None,
            library_type: LibraryType::Unresolved,
        }
    }
}

impl Display for LibraryIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {version}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
