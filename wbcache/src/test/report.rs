use crate::config::Geometry;
use crate::report::{ConfigurationDump, ContentDump, StatisticsDump};
use crate::simulator::CacheSimulator;

#[test]
fn configuration_dump() {
    let geometry = Geometry::new(256, 4, 8).unwrap();
    assert_eq!(
        ConfigurationDump(&geometry).to_string(),
        "Cache Configuration:\n\
         -------------------------------------\n\
         Capacity: 256B\n\
         Associativity: 4way\n\
         Block Size: 8B\n\
         \n"
    );
}

#[test]
fn statistics_dump() {
    let mut simulator = CacheSimulator::new(Geometry::new(128, 2, 16).unwrap());
    simulator.write(0x1000_1000);
    simulator.read(0x1000_1000);
    simulator.read(0x1000_1010);
    assert_eq!(
        StatisticsDump(simulator.statistics()).to_string(),
        "Cache Stat:\n\
         -------------------------------------\n\
         Total reads: 2\n\
         Total writes: 1\n\
         Write-backs: 0\n\
         Read hits: 1\n\
         Write hits: 0\n\
         Read misses: 1\n\
         Write misses: 1\n\
         \n"
    );
}

#[test]
fn content_dump_of_empty_cache() {
    let simulator = CacheSimulator::new(Geometry::new(32, 2, 8).unwrap());
    // Each way spans two word columns of 12
    let header = format!("{:10}WAY[0]{:18}WAY[1]{:18}", "", "", "");
    let expected = [
        "Cache Content:",
        "-------------------------------------",
        header.as_str(),
        "SET[0]:   0x00000000  0x00000000  0x00000000  0x00000000  ",
        "SET[1]:   0x00000000  0x00000000  0x00000000  0x00000000  ",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(ContentDump::new(&simulator).to_string(), expected);
}

#[test]
fn content_dump_shows_block_addresses() {
    // 2 sets of 2 ways, one word per block
    let mut simulator = CacheSimulator::new(Geometry::new(16, 2, 4).unwrap());
    simulator.read(0x1000_0006);
    simulator.write(0xFFFF_FFF1);
    simulator.read(0x0000_000c);
    let expected = [
        "Cache Content:",
        "-------------------------------------",
        "          WAY[0]      WAY[1]      ",
        "SET[0]:   0xfffffff0  0x00000000  ",
        "SET[1]:   0x10000004  0x0000000c  ",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(ContentDump::new(&simulator).to_string(), expected);
}
