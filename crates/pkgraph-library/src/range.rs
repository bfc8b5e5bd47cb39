use std::fmt::{Display, Formatter};

use pkgraph_normalize::LibraryName;
use pkgraph_version::VersionRange;

use crate::LibraryDependencyTarget;

/// A requested dependency: a library name, an optional version range and the kinds of library it
/// may resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryRange {
    pub name: LibraryName,
    /// `None` for requests without a version constraint, e.g. framework references.
    pub version_range: Option<VersionRange>,
    pub type_constraint: LibraryDependencyTarget,
}

impl LibraryRange {
    pub fn new(name: LibraryName, version_range: Option<VersionRange>) -> Self {
        Self {
            name,
            version_range,
            type_constraint: LibraryDependencyTarget::default(),
        }
    }

    #[must_use]
    pub fn with_type_constraint(mut self, type_constraint: LibraryDependencyTarget) -> Self {
        self.type_constraint = type_constraint;
        self
    }

    pub fn type_constraint_allows_any_of(&self, targets: LibraryDependencyTarget) -> bool {
        self.type_constraint.intersects(targets)
    }
}

impl Display for LibraryRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(version_range) = &self.version_range {
            write!(f, " {version_range}")?;
        }
        if self.type_constraint != LibraryDependencyTarget::ALL {
            write!(f, " ({})", self.type_constraint)?;
        }
        Ok(())
    }
}
