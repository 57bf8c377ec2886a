//! # WbCache
//!
//! WbCache is a library for simulating a single set-associative cache with a write-back,
//! write-allocate policy and least recently used replacement
//!
//! It decodes each address of a read/write trace into a tag, a set index and a block offset,
//! reproduces the hit, miss and eviction decisions a physical cache would make, and keeps the
//! statistics a lab reference implementation reports
//!
//! The cache only models presence and dirtiness of blocks, no data is stored

/// Contains the validated cache geometry and the configuration formats it can be read from
pub mod config;

/// Contains the address decoder, splitting an address into tag, set index and offsets
pub mod decoder;

/// Contains the storage of the cache: lines, sets and the store owning them
pub mod cache;

/// Contains the replacement policy trait and the least recently used policy
pub mod replacement_policies;

/// Contains the simulator driving the cache one access at a time
pub mod simulator;

/// Contains the statistics collected by the simulator
pub mod stats;

/// Contains the trace line format and its parser
pub mod trace;

/// Contains the reports printed at the end of a run
pub mod report;

/// Contains helpers for opening trace files
pub mod io;

/// Contains the error types of the library
pub mod error;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;
