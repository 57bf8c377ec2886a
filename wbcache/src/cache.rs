use crate::config::Geometry;

/// A single slot of the cache
///
/// Only the tag is stored, data values aren't modelled. A line starts invalid with the largest
/// possible recency and becomes valid on its first install, after which it is only ever
/// overwritten
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CacheLine {
    valid: bool,
    dirty: bool,
    tag: u32,
    recency: u64,
}

impl CacheLine {
    pub const EMPTY: CacheLine = CacheLine {
        valid: false,
        dirty: false,
        tag: 0,
        recency: u64::MAX,
    };

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Written since it was installed, so it has to be written back when evicted
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Value of the access counter when the line was last touched, smaller is less recent
    pub fn recency(&self) -> u64 {
        self.recency
    }

    #[cfg(test)]
    pub(crate) fn filled(tag: u32, dirty: bool, recency: u64) -> Self {
        Self {
            valid: true,
            dirty,
            tag,
            recency,
        }
    }

    fn holds(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }
}

impl Default for CacheLine {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The lines of one set, indexed by way
///
/// Way order is storage order only, recency decides which line is least recently used
#[derive(Debug, Clone)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::EMPTY; ways],
        }
    }

    #[cfg(test)]
    pub(crate) fn with_lines(lines: Vec<CacheLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// Finds the way holding a valid copy of the block with this tag
    pub fn find(&self, tag: u32) -> Option<usize> {
        let way = self.lines.iter().position(|line| line.holds(tag));
        // A second match means an install duplicated a block
        debug_assert!(
            way.map_or(true, |way| !self.lines[way + 1..].iter().any(|line| line.holds(tag))),
            "tag {tag:#x} is held by more than one way"
        );
        way
    }
}

/// Logical clock stamping each hit and fill, a `u64` won't wrap on any realistic trace
#[derive(Debug, Default, Copy, Clone)]
pub struct AccessCounter {
    time: u64,
}

impl AccessCounter {
    /// Advances the clock, returning the new time
    pub fn tick(&mut self) -> u64 {
        self.time += 1;
        self.time
    }

    pub fn current(&self) -> u64 {
        self.time
    }
}

/// The full set-associative array, `set_count` sets of `associativity` lines
///
/// Allocated once from the geometry and never resized. Only the simulator mutates it, anything
/// else only gets a shared reference for reporting
#[derive(Debug, Clone)]
pub struct CacheStore {
    sets: Vec<CacheSet>,
    clock: AccessCounter,
}

impl CacheStore {
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            sets: vec![CacheSet::new(geometry.associativity() as usize); geometry.set_count() as usize],
            clock: AccessCounter::default(),
        }
    }

    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    pub fn set(&self, set_index: usize) -> &CacheSet {
        &self.sets[set_index]
    }

    /// Returns the way of the given set holding the block, if it is cached
    pub fn lookup(&self, set_index: usize, tag: u32) -> Option<usize> {
        self.sets[set_index].find(tag)
    }

    /// Fills a way with a block, returning the line it replaced
    ///
    /// The line becomes valid with the given dirtiness and is stamped with the next access time
    pub(crate) fn install(&mut self, set_index: usize, way: usize, tag: u32, dirty: bool) -> CacheLine {
        let recency = self.clock.tick();
        let line = &mut self.sets[set_index].lines[way];
        let previous = *line;
        *line = CacheLine {
            valid: true,
            dirty,
            tag,
            recency,
        };
        previous
    }

    /// Refreshes the recency of a line on a hit, and marks it dirty if it was written
    pub(crate) fn touch(&mut self, set_index: usize, way: usize, write: bool) {
        let recency = self.clock.tick();
        let line = &mut self.sets[set_index].lines[way];
        debug_assert!(line.valid, "touched an invalid line");
        line.recency = recency;
        line.dirty |= write;
    }

    /// Current value of the access counter
    pub fn clock(&self) -> u64 {
        self.clock.current()
    }

    /// Gets the number of lines which have never been filled. Useful for analysing cache
    /// performance or debugging
    pub fn invalid_line_count(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|set| set.lines.iter())
            .filter(|line| !line.valid)
            .count()
    }
}
