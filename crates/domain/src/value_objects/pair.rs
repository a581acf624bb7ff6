//! Unordered identifier pairs.

use serde::{Deserialize, Serialize};

/// An unordered pair of identifiers, normalised so that `low <= high`.
///
/// `CanonicalPair::new(a, b)` and `CanonicalPair::new(b, a)` are equal, so the
/// pair can serve as a single equality key for symmetric relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalPair<I> {
    low: I,
    high: I,
}

impl<I: Ord + Copy> CanonicalPair<I> {
    pub fn new(a: I, b: I) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> I {
        self.low
    }

    pub fn high(&self) -> I {
        self.high
    }

    pub fn contains(&self, id: I) -> bool {
        self.low == id || self.high == id
    }

    /// The member that is not `id`, or `None` when `id` is not in the pair.
    ///
    /// For a pair of identical ids the member itself is returned.
    pub fn other(&self, id: I) -> Option<I> {
        if self.low == id {
            Some(self.high)
        } else if self.high == id {
            Some(self.low)
        } else {
            None
        }
    }

    pub fn is_self_pair(&self) -> bool {
        self.low == self.high
    }
}
