//! Library versions and the ranges dependencies request them with.
//!
//! Versions have up to four numeric parts plus release labels (`1.0.0-beta.2`). Ranges use
//! interval notation (`[1.0, 2.0)`) and may float their minimum (`1.0.*`, `2.0.0-preview*`).

pub use crate::float_range::{FloatBehavior, FloatRange, FloatRangeError};
pub use crate::precedence::is_greater_than_or_equal_to;
pub use crate::version::{LibraryVersion, VersionParseError};
pub use crate::version_range::{VersionRange, VersionRangeError};

mod float_range;
mod precedence;
mod version;
mod version_range;
