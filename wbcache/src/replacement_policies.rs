use crate::cache::CacheSet;

/// The way chosen to receive a missed block
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Victim {
    pub way: usize,
    /// The way held a valid block, which is evicted
    pub was_occupied: bool,
}

/// A generic trait for implementing replacement policies. Parameterises the simulator.
pub trait ReplacementPolicy {
    /// Updates the policy when a line is hit or filled
    ///
    /// Not applicable for policies which read the line state directly, a default which does
    /// nothing is provided
    ///
    /// # Arguments
    ///
    /// * `set_index`: The set of the line
    /// * `way`: The way of the line within the set
    fn update_on_access(&mut self, _set_index: usize, _way: usize) {}

    /// Used by the simulator on a miss, to get the way the new block is installed into
    ///
    /// Implementations must prefer an invalid way over evicting a valid one
    ///
    /// # Arguments
    ///
    /// * `set`: The set the missed block maps to
    ///
    /// returns: Victim
    fn select_victim(&mut self, set: &CacheSet) -> Victim;
}

/// Least Recently Used replacement policy
///
/// The recency of each line is a stamp from the store's access counter, so there is no state to
/// keep here. The first invalid way is filled before anything is evicted, otherwise the way with
/// the strictly smallest stamp goes, ties going to the lowest way
///
/// The search is a linear scan of the set, as the hardware compares every way in parallel
#[derive(Debug, Default, Copy, Clone)]
pub struct LeastRecentlyUsed;

impl ReplacementPolicy for LeastRecentlyUsed {
    fn select_victim(&mut self, set: &CacheSet) -> Victim {
        let lines = set.lines();
        if let Some(way) = lines.iter().position(|line| !line.is_valid()) {
            return Victim {
                way,
                was_occupied: false,
            };
        }
        let mut min_value = u64::MAX;
        let mut min_index = 0;
        for (way, line) in lines.iter().enumerate() {
            if line.recency() < min_value {
                min_value = line.recency();
                min_index = way;
            }
        }
        Victim {
            way: min_index,
            was_occupied: true,
        }
    }
}
