//! The library model shared by the resolver: what was requested ([`LibraryRange`]) and what it
//! resolved to ([`LibraryIdentity`]).

pub use crate::identity::LibraryIdentity;
pub use crate::library_type::{LibraryType, LibraryTypeParseError};
pub use crate::range::LibraryRange;
pub use crate::target::{LibraryDependencyTarget, TargetParseError};

mod identity;
mod library_type;
mod range;
mod target;
