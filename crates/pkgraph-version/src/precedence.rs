use std::cmp::Ordering;

use crate::version::compare_ignore_ascii_case;
use crate::{FloatBehavior, LibraryVersion, VersionRange};

/// Returns `true` if the minimum of `near` is greater than or equal to the minimum of `far`.
///
/// This decides whether a request nearer to the root still covers a request further away, i.e.
/// whether choosing the nearer request would not downgrade the farther one. Floating minimums
/// are compared by their release-label-free floor first, then by their release prefix.
pub fn is_greater_than_or_equal_to(near: &VersionRange, far: &VersionRange) -> bool {
    let Some(near_min) = near.min() else {
        return true;
    };
    let Some(far_min) = far.min() else {
        return false;
    };

    if !near.is_floating() && !far.is_floating() {
        return near_min >= far_min;
    }

    let (near_floor, near_release) = match near.float() {
        Some(float) if near.is_floating() => {
            if float.behavior() == FloatBehavior::Major {
                // `*` covers everything.
                return true;
            }
            (release_label_free_floor(near_min, float.behavior()), float.min_version().release())
        }
        _ => (near_min.clone(), near_min.release()),
    };

    let (far_floor, far_release) = match far.float() {
        Some(float) if far.is_floating() => {
            if float.behavior() == FloatBehavior::Major {
                return false;
            }
            (release_label_free_floor(far_min, float.behavior()), float.min_version().release())
        }
        _ => (far_min.clone(), far_min.release()),
    };

    match near_floor.cmp_version_only(&far_floor) {
        Ordering::Equal => {}
        ordering => return ordering.is_gt(),
    }

    let near_release = near_release.trim_matches('-');
    let far_release = far_release.trim_matches('-');
    if near_release.is_empty() {
        // `1.0.0-*` covers any prerelease of `1.0.0`.
        return true;
    }
    if far_release.is_empty() {
        return false;
    }

    let common = near_release.len().min(far_release.len());
    let near_prefix = near_release.get(..common).unwrap_or(near_release);
    let far_prefix = far_release.get(..common).unwrap_or(far_release);
    compare_ignore_ascii_case(near_prefix, far_prefix).is_ge()
}

/// The highest version a float can reach, ignoring release labels.
fn release_label_free_floor(min: &LibraryVersion, behavior: FloatBehavior) -> LibraryVersion {
    let parts = match behavior {
        FloatBehavior::Major => [u32::MAX; 4],
        FloatBehavior::Minor => [min.major(), u32::MAX, u32::MAX, u32::MAX],
        FloatBehavior::Patch => [min.major(), min.minor(), u32::MAX, u32::MAX],
        FloatBehavior::Revision => [min.major(), min.minor(), min.patch(), u32::MAX],
        _ => min.numeric_parts(),
    };
    LibraryVersion::from_parts(parts, Vec::new(), None)
}
