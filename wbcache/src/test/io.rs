use std::error::Error;
use std::io::Write;
use tempfile::NamedTempFile;
use crate::config::Geometry;
use crate::io::open_trace;
use crate::simulator::CacheSimulator;
use crate::stats::Statistics;

#[test]
fn missing_trace_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.trace");
    let error = open_trace(&missing).err().expect("opening a missing file should fail");
    assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn empty_trace_file_gives_zero_statistics() -> Result<(), Box<dyn Error>> {
    let file = NamedTempFile::new()?;
    let mut simulator = CacheSimulator::new(Geometry::new(128, 2, 16)?);
    let stats = simulator.simulate(open_trace(file.path())?)?;
    assert_eq!(*stats, Statistics::default());
    Ok(())
}

#[test]
fn written_trace_file_is_replayed() -> Result<(), Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "W 0x10001000\nR 0x10001000")?;
    file.flush()?;
    let mut simulator = CacheSimulator::new(Geometry::new(128, 2, 16)?);
    let stats = simulator.simulate(open_trace(file.path())?)?;
    assert_eq!(stats.write_misses(), 1);
    assert_eq!(stats.read_hits(), 1);
    Ok(())
}
