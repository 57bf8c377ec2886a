use std::io::BufRead;
use std::time::{Duration, Instant};
use log::{debug, info, trace};
use crate::cache::CacheStore;
use crate::config::Geometry;
use crate::decoder::AddressDecoder;
use crate::error::{SimError, TraceError};
use crate::replacement_policies::{LeastRecentlyUsed, ReplacementPolicy};
use crate::stats::Statistics;
use crate::trace::{parse_line, Access};

/// A block pushed out of the cache by a miss
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Eviction {
    pub tag: u32,
    /// The block was modified, so it is written back
    pub dirty: bool,
}

/// What the cache did with a single access
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessOutcome {
    Hit { way: usize },
    Miss { way: usize, eviction: Option<Eviction> },
}

impl AccessOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, AccessOutcome::Hit { .. })
    }

    /// The way which was hit or filled
    pub fn way(&self) -> usize {
        match self {
            AccessOutcome::Hit { way } | AccessOutcome::Miss { way, .. } => *way,
        }
    }

    pub fn eviction(&self) -> Option<Eviction> {
        match self {
            AccessOutcome::Hit { .. } => None,
            AccessOutcome::Miss { eviction, .. } => *eviction,
        }
    }

    pub fn wrote_back(&self) -> bool {
        self.eviction().map_or(false, |eviction| eviction.dirty)
    }
}

/// The simulator owns the cache and its statistics, and processes accesses one at a time.
///
/// Every access is handled to completion before the next one: the address is decoded, the total
/// for its kind is counted, then the set is searched. A hit refreshes the line's recency and marks
/// it dirty on a write. A miss asks the replacement policy for a way, counts a write-back if a
/// dirty block is evicted, and installs the block, dirty straight away for a write
/// (write-allocate)
///
/// It supports calling simulate multiple times, and will update the time taken to simulate and the
/// statistics accordingly
pub struct CacheSimulator<R: ReplacementPolicy = LeastRecentlyUsed> {
    geometry: Geometry,
    decoder: AddressDecoder,
    store: CacheStore,
    policy: R,
    statistics: Statistics,
    simulation_time: Duration,
}

impl CacheSimulator<LeastRecentlyUsed> {
    /// Creates a new LRU simulator for a validated geometry
    ///
    /// # Examples
    ///
    /// ```
    /// use wbcache::config::Geometry;
    /// use wbcache::simulator::CacheSimulator;
    /// use wbcache::trace::Access;
    /// let mut simulator = CacheSimulator::new(Geometry::new(128, 2, 16).unwrap());
    /// assert!(!simulator.access(Access::write(0x1000_1000)).is_hit());
    /// assert!(simulator.access(Access::read(0x1000_1004)).is_hit());
    /// assert_eq!(simulator.statistics().write_misses(), 1);
    /// ```
    pub fn new(geometry: Geometry) -> Self {
        Self::with_policy(geometry, LeastRecentlyUsed)
    }
}

impl<R: ReplacementPolicy> CacheSimulator<R> {
    pub fn with_policy(geometry: Geometry, policy: R) -> Self {
        Self {
            decoder: AddressDecoder::new(&geometry),
            store: CacheStore::new(&geometry),
            geometry,
            policy,
            statistics: Statistics::default(),
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Processes a single access, updating the cache and the statistics
    pub fn access(&mut self, access: Access) -> AccessOutcome {
        let decoded = self.decoder.decode(access.address);
        let is_write = access.kind.is_write();
        trace!(
            "{:?} {:#010x}: tag {:#x}, set {}, word {}",
            access.kind,
            access.address,
            decoded.tag,
            decoded.set_index,
            decoded.word_offset
        );
        if is_write {
            self.statistics.total_writes += 1;
        } else {
            self.statistics.total_reads += 1;
        }

        if let Some(way) = self.store.lookup(decoded.set_index, decoded.tag) {
            if is_write {
                self.statistics.write_hits += 1;
            } else {
                self.statistics.read_hits += 1;
            }
            self.store.touch(decoded.set_index, way, is_write);
            self.policy.update_on_access(decoded.set_index, way);
            return AccessOutcome::Hit { way };
        }

        if is_write {
            self.statistics.write_misses += 1;
        } else {
            self.statistics.read_misses += 1;
        }
        let victim = self.policy.select_victim(self.store.set(decoded.set_index));
        let previous = self
            .store
            .install(decoded.set_index, victim.way, decoded.tag, is_write);
        self.policy.update_on_access(decoded.set_index, victim.way);
        let eviction = victim.was_occupied.then(|| Eviction {
            tag: previous.tag(),
            dirty: previous.is_dirty(),
        });
        if let Some(evicted) = eviction {
            debug!(
                "set {} way {}: evicted tag {:#x}{}",
                decoded.set_index,
                victim.way,
                evicted.tag,
                if evicted.dirty { " with write-back" } else { "" }
            );
            if evicted.dirty {
                self.statistics.write_backs += 1;
            }
        }
        AccessOutcome::Miss {
            way: victim.way,
            eviction,
        }
    }

    pub fn read(&mut self, address: u32) -> AccessOutcome {
        self.access(Access::read(address))
    }

    pub fn write(&mut self, address: u32) -> AccessOutcome {
        self.access(Access::write(address))
    }

    /// Simulates the cache over a whole trace, one `R <address>` or `W <address>` per line.
    ///
    /// Lines are processed strictly in order. The first malformed line aborts the run, accesses
    /// before it have already been counted
    ///
    /// # Arguments
    ///
    /// * `source`: The trace, usually from [crate::io::open_trace]
    ///
    /// returns: Result<&Statistics, SimError>
    pub fn simulate<S: BufRead>(&mut self, source: S) -> Result<&Statistics, SimError> {
        let start = Instant::now();
        let replayed = self.replay(source);
        let end = Instant::now();
        // Accesses before an aborting line were simulated, so their time counts too
        self.simulation_time += end - start;
        let processed = replayed?;
        info!("simulated {processed} accesses in {:?}", end - start);
        Ok(&self.statistics)
    }

    /// Feeds every line of the trace to the cache, returning the number of accesses
    fn replay<S: BufRead>(&mut self, mut source: S) -> Result<usize, SimError> {
        let mut processed = 0usize;
        let mut buffer = Vec::new();
        let mut line_number = 0usize;
        loop {
            buffer.clear();
            if source.read_until(b'\n', &mut buffer)? == 0 {
                return Ok(processed);
            }
            line_number += 1;
            if buffer.ends_with(b"\n") {
                buffer.pop();
                if buffer.ends_with(b"\r") {
                    buffer.pop();
                }
            }
            let malformed = |source: TraceError| SimError::MalformedTraceLine {
                line_number,
                line: String::from_utf8_lossy(&buffer).into_owned(),
                source,
            };
            let line = std::str::from_utf8(&buffer).map_err(|_| malformed(TraceError::InvalidUtf8))?;
            if let Some(access) = parse_line(line).map_err(malformed)? {
                self.access(access);
                processed += 1;
            }
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Read only view of the cache contents
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Gets the wall-clock time spent in simulate
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }
}
