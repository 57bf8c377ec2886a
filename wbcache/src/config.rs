use std::io::Read;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// The size of a word in bytes, the smallest supported block
pub const WORD_SIZE: u32 = 4;

/// An unvalidated cache configuration, as written in a JSON geometry file or on the command line
///
/// The JSON form is `{"capacity": 256, "associativity": 4, "block_size": 8}`, the command line form
/// is `256:4:8`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryConfig {
    #[serde(alias = "capacity_bytes")]
    pub capacity: u32,
    #[serde(alias = "assoc", alias = "ways")]
    pub associativity: u32,
    #[serde(alias = "blocksize", alias = "block_size_bytes")]
    pub block_size: u32,
}

impl GeometryConfig {
    /// Reads a JSON geometry file
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl FromStr for GeometryConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.trim().split(':').collect::<Vec<&str>>();
        let (capacity, associativity, block_size) = match fields.as_slice() {
            [capacity, associativity, block_size] => (*capacity, *associativity, *block_size),
            _ => return Err(ConfigError::BadFormat(s.to_string())),
        };
        let parse = |value: &str| {
            value.trim().parse::<u32>().map_err(|source| ConfigError::BadNumber {
                value: value.to_string(),
                source,
            })
        };
        Ok(Self {
            capacity: parse(capacity)?,
            associativity: parse(associativity)?,
            block_size: parse(block_size)?,
        })
    }
}

/// A validated cache geometry
///
/// Construction checks every constraint the address decoder and the store rely on, so a
/// `Geometry` always describes a cache which can be built:
///
/// * the block size is a power of two holding at least one word
/// * the capacity divides evenly into `associativity` ways of `block_size` blocks
/// * the resulting number of sets is a power of two
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Geometry {
    capacity_bytes: u32,
    associativity: u32,
    block_size_bytes: u32,
    set_count: u32,
}

impl Geometry {
    /// Validates a geometry
    ///
    /// # Examples
    ///
    /// ```
    /// use wbcache::config::Geometry;
    /// let geometry = Geometry::new(128, 2, 16).unwrap();
    /// assert_eq!(geometry.set_count(), 4);
    /// assert!(Geometry::new(96, 2, 16).is_err());
    /// ```
    pub fn new(capacity_bytes: u32, associativity: u32, block_size_bytes: u32) -> Result<Self, ConfigError> {
        if capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if block_size_bytes < WORD_SIZE || !block_size_bytes.is_power_of_two() {
            return Err(ConfigError::UnsupportedBlockSize(block_size_bytes));
        }
        // Widened so a huge associativity can't overflow the set stride
        let set_stride = associativity as u64 * block_size_bytes as u64;
        if capacity_bytes as u64 % set_stride != 0 {
            return Err(ConfigError::IndivisibleCapacity {
                capacity: capacity_bytes,
                associativity,
                block_size: block_size_bytes,
            });
        }
        let set_count = (capacity_bytes as u64 / set_stride) as u32;
        if !set_count.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(set_count));
        }
        Ok(Self {
            capacity_bytes,
            associativity,
            block_size_bytes,
            set_count,
        })
    }

    pub fn capacity_bytes(&self) -> u32 {
        self.capacity_bytes
    }

    pub fn associativity(&self) -> u32 {
        self.associativity
    }

    pub fn block_size_bytes(&self) -> u32 {
        self.block_size_bytes
    }

    pub fn set_count(&self) -> u32 {
        self.set_count
    }

    /// Number of address bits selecting the set
    pub fn index_bits(&self) -> u32 {
        self.set_count.trailing_zeros()
    }

    /// Number of address bits selecting the byte within a block
    pub fn offset_bits(&self) -> u32 {
        self.block_size_bytes.trailing_zeros()
    }

    pub fn words_per_block(&self) -> u32 {
        self.block_size_bytes / WORD_SIZE
    }

    /// Total number of lines in the cache
    pub fn line_count(&self) -> usize {
        self.set_count as usize * self.associativity as usize
    }
}

impl TryFrom<GeometryConfig> for Geometry {
    type Error = ConfigError;

    fn try_from(value: GeometryConfig) -> Result<Self, Self::Error> {
        Self::new(value.capacity, value.associativity, value.block_size)
    }
}

impl FromStr for Geometry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<GeometryConfig>()?.try_into()
    }
}
