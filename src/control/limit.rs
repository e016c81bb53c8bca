//! Limit evaluator.
//!
//! Classifies each engine of a tick as overlimit or compliant.  The result
//! is a bitmask over engine positions, in the same spirit as a fault
//! bitmask: bit `i` set means engine `i` exceeded the limit this tick.

use serde::{Deserialize, Serialize};

use crate::telemetry::{EngineSample, MAX_ENGINES};

/// Set of overlimit engine indices for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlimitSet(u8);

impl OverlimitSet {
    pub const EMPTY: Self = Self(0);

    /// Bitmask for a single engine index.
    const fn mask(index: usize) -> u8 {
        1 << index
    }

    /// Mark engine `index` overlimit.  Indices past [`MAX_ENGINES`] are ignored.
    pub fn insert(&mut self, index: usize) {
        if index < MAX_ENGINES {
            self.0 |= Self::mask(index);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < MAX_ENGINES && self.0 & Self::mask(index) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Overlimit indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_ENGINES).filter(move |&i| self.contains(i))
    }
}

impl FromIterator<usize> for OverlimitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for i in iter {
            set.insert(i);
        }
        set
    }
}

impl core::fmt::Display for OverlimitSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[")?;
        for (n, i) in self.iter().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            write!(f, "{i}")?;
        }
        write!(f, "]")
    }
}

/// Return every engine whose torque strictly exceeds `max_torque_percent`.
///
/// A NaN torque compares false and is never overlimit.
pub fn overlimit_engines(samples: &[EngineSample], max_torque_percent: f64) -> OverlimitSet {
    samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.torque_percent > max_torque_percent)
        .map(|(i, _)| i)
        .collect()
}
