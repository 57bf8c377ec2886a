//! Text reports in the format of the lab reference simulator
//!
//! Each report is a `Display` wrapper around a shared reference, so reporting can never mutate
//! the cache

use std::fmt::{self, Display, Formatter};
use crate::cache::CacheStore;
use crate::config::Geometry;
use crate::decoder::AddressDecoder;
use crate::replacement_policies::ReplacementPolicy;
use crate::simulator::CacheSimulator;
use crate::stats::Statistics;

const RULE: &str = "-------------------------------------";
// Width of one `0x%08x  ` word column
const WORD_COLUMN: usize = 12;

/// The cache configuration
pub struct ConfigurationDump<'a>(pub &'a Geometry);

impl Display for ConfigurationDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let geometry = self.0;
        writeln!(f, "Cache Configuration:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Capacity: {}B", geometry.capacity_bytes())?;
        writeln!(f, "Associativity: {}way", geometry.associativity())?;
        writeln!(f, "Block Size: {}B", geometry.block_size_bytes())?;
        writeln!(f)
    }
}

/// The seven counters
pub struct StatisticsDump<'a>(pub &'a Statistics);

impl Display for StatisticsDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(f, "Cache Stat:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total reads: {}", stats.total_reads())?;
        writeln!(f, "Total writes: {}", stats.total_writes())?;
        writeln!(f, "Write-backs: {}", stats.write_backs())?;
        writeln!(f, "Read hits: {}", stats.read_hits())?;
        writeln!(f, "Write hits: {}", stats.write_hits())?;
        writeln!(f, "Read misses: {}", stats.read_misses())?;
        writeln!(f, "Write misses: {}", stats.write_misses())?;
        writeln!(f)
    }
}

/// The content of every set and way
///
/// Each word of a valid line shows the block aligned address of the block it holds, invalid lines
/// show zero
pub struct ContentDump<'a> {
    geometry: &'a Geometry,
    decoder: &'a AddressDecoder,
    store: &'a CacheStore,
}

impl<'a> ContentDump<'a> {
    pub fn new<R: ReplacementPolicy>(simulator: &'a CacheSimulator<R>) -> Self {
        Self {
            geometry: simulator.geometry(),
            decoder: simulator.decoder(),
            store: simulator.store(),
        }
    }
}

impl Display for ContentDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let words = self.geometry.words_per_block() as usize;
        writeln!(f, "Cache Content:")?;
        writeln!(f, "{RULE}")?;
        for way in 0..self.geometry.associativity() {
            if way == 0 {
                write!(f, "{:10}", "")?;
            }
            write!(f, "WAY[{way}]      ")?;
            write!(f, "{:width$}", "", width = (words - 1) * WORD_COLUMN)?;
        }
        writeln!(f)?;
        for (set_index, set) in self.store.sets().iter().enumerate() {
            write!(f, "SET[{set_index}]:   ")?;
            for line in set.lines() {
                let content = if line.is_valid() {
                    self.decoder.block_address(line.tag(), set_index)
                } else {
                    0
                };
                for _ in 0..words {
                    write!(f, "{content:#010x}  ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
