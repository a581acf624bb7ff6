//! Devotion toward the Echo.
//!
//! Negative values mean rebellion. The bounds are declared here and enforced
//! by storage; the update path itself does not clamp or reject values.

/// Lowest storable devotion.
pub const DEVOTION_MIN: i32 = -100;

/// Highest storable devotion.
pub const DEVOTION_MAX: i32 = 100;

/// Initial devotion for new NPCs and settlements.
pub const DEFAULT_DEVOTION: i32 = 50;

/// Initial independent thinking for new NPCs and settlements.
pub const DEFAULT_INDEPENDENT_THINKING: i32 = 30;

pub fn is_within_bounds(devotion: i32) -> bool {
    (DEVOTION_MIN..=DEVOTION_MAX).contains(&devotion)
}
