use serde::{Deserialize, Serialize};

/// Counters collected over a simulation run. Can be serialised to the JSON output format
///
/// Only the simulator mutates them, and only while processing an access. Rates and other derived
/// figures are left to whoever presents the counters
#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Statistics {
    pub(crate) total_reads: u64,
    pub(crate) total_writes: u64,
    pub(crate) write_backs: u64,
    pub(crate) read_hits: u64,
    pub(crate) write_hits: u64,
    pub(crate) read_misses: u64,
    pub(crate) write_misses: u64,
}

impl Statistics {
    pub fn total_reads(&self) -> u64 {
        self.total_reads
    }

    pub fn total_writes(&self) -> u64 {
        self.total_writes
    }

    /// Dirty lines evicted
    pub fn write_backs(&self) -> u64 {
        self.write_backs
    }

    pub fn read_hits(&self) -> u64 {
        self.read_hits
    }

    pub fn write_hits(&self) -> u64 {
        self.write_hits
    }

    pub fn read_misses(&self) -> u64 {
        self.read_misses
    }

    pub fn write_misses(&self) -> u64 {
        self.write_misses
    }
}
