use crate::config::{Geometry, GeometryConfig};
use crate::error::ConfigError;

#[test]
fn derives_sets_and_field_widths() {
    let geometry = Geometry::new(256, 4, 8).unwrap();
    assert_eq!(geometry.set_count(), 8);
    assert_eq!(geometry.index_bits(), 3);
    assert_eq!(geometry.offset_bits(), 3);
    assert_eq!(geometry.words_per_block(), 2);
    assert_eq!(geometry.line_count(), 32);
}

#[test]
fn fully_associative_has_one_set() {
    let geometry = Geometry::new(64, 4, 16).unwrap();
    assert_eq!(geometry.set_count(), 1);
    assert_eq!(geometry.index_bits(), 0);
}

#[test]
fn rejects_zero_fields() {
    assert!(matches!(Geometry::new(0, 2, 16), Err(ConfigError::ZeroCapacity)));
    assert!(matches!(Geometry::new(128, 0, 16), Err(ConfigError::ZeroAssociativity)));
    assert!(matches!(Geometry::new(128, 2, 0), Err(ConfigError::UnsupportedBlockSize(0))));
}

#[test]
fn rejects_unsupported_block_sizes() {
    assert!(matches!(Geometry::new(128, 2, 2), Err(ConfigError::UnsupportedBlockSize(2))));
    assert!(matches!(Geometry::new(144, 2, 12), Err(ConfigError::UnsupportedBlockSize(12))));
}

#[test]
fn rejects_indivisible_capacity() {
    assert!(matches!(
        Geometry::new(100, 2, 16),
        Err(ConfigError::IndivisibleCapacity { capacity: 100, associativity: 2, block_size: 16 })
    ));
    // Stride overflows u32 but not the widened check
    assert!(matches!(
        Geometry::new(64, u32::MAX, 16),
        Err(ConfigError::IndivisibleCapacity { .. })
    ));
}

#[test]
fn rejects_set_count_not_power_of_two() {
    // 96 / 2 / 16 = 3 sets
    assert!(matches!(Geometry::new(96, 2, 16), Err(ConfigError::SetCountNotPowerOfTwo(3))));
}

#[test]
fn parses_compact_form() {
    let config: GeometryConfig = "256:4:8".parse().unwrap();
    assert_eq!(config, GeometryConfig { capacity: 256, associativity: 4, block_size: 8 });
    let geometry: Geometry = " 128 : 2 : 16 ".parse().unwrap();
    assert_eq!(geometry, Geometry::new(128, 2, 16).unwrap());
}

#[test]
fn rejects_bad_compact_form() {
    assert!(matches!("256:4".parse::<GeometryConfig>(), Err(ConfigError::BadFormat(_))));
    assert!(matches!("256:4:8:1".parse::<GeometryConfig>(), Err(ConfigError::BadFormat(_))));
    assert!(matches!(
        "256:four:8".parse::<GeometryConfig>(),
        Err(ConfigError::BadNumber { value, .. }) if value == "four"
    ));
    assert!(matches!("96:2:16".parse::<Geometry>(), Err(ConfigError::SetCountNotPowerOfTwo(3))));
}

#[test]
fn reads_json_with_aliases() {
    let config = GeometryConfig::from_json_reader(r#"{"capacity": 256, "assoc": 4, "blocksize": 8}"#.as_bytes()).unwrap();
    assert_eq!(config, GeometryConfig { capacity: 256, associativity: 4, block_size: 8 });
    assert!(matches!(
        GeometryConfig::from_json_reader(r#"{"capacity": 256}"#.as_bytes()),
        Err(ConfigError::Json(_))
    ));
}
