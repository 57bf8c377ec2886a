use crate::config::{Geometry, WORD_SIZE};

/// An address split into the fields the cache uses
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Every bit above the index and offset fields, stored in the line to detect hits
    pub tag: u32,
    pub set_index: usize,
    /// Byte within the block
    pub block_offset: u32,
    /// Word within the block
    pub word_offset: u32,
}

/// Splits addresses into tag, set index and offsets for one geometry
///
/// The masks are derived once from a validated geometry, so decoding is a handful of unsigned
/// shifts and ands. Everything is `u32`, an address with the top bit set is never sign extended
#[derive(Debug, Copy, Clone)]
pub struct AddressDecoder {
    offset_bit_mask: u32,
    set_selection_bit_mask: u32,
    offset_bits: u32,
    tag_shift: u32,
}

impl AddressDecoder {
    pub fn new(geometry: &Geometry) -> Self {
        let offset_bits = geometry.offset_bits();
        let index_bits = geometry.index_bits();
        Self {
            offset_bit_mask: geometry.block_size_bytes() - 1,
            set_selection_bit_mask: (geometry.set_count() - 1) << offset_bits,
            offset_bits,
            tag_shift: offset_bits + index_bits,
        }
    }

    /// Decodes a byte address
    ///
    /// # Examples
    ///
    /// ```
    /// use wbcache::config::Geometry;
    /// use wbcache::decoder::AddressDecoder;
    /// // 4 sets of 16 byte blocks: 4 offset bits, 2 index bits
    /// let decoder = AddressDecoder::new(&Geometry::new(128, 2, 16).unwrap());
    /// let decoded = decoder.decode(0x1000_1024);
    /// assert_eq!(decoded.tag, 0x1000_1024 >> 6);
    /// assert_eq!(decoded.set_index, 2);
    /// assert_eq!(decoded.block_offset, 4);
    /// assert_eq!(decoded.word_offset, 1);
    /// ```
    pub fn decode(&self, address: u32) -> DecodedAddress {
        let block_offset = address & self.offset_bit_mask;
        DecodedAddress {
            // A tag shift of 32 would leave no tag bits at all
            tag: address.checked_shr(self.tag_shift).unwrap_or(0),
            set_index: ((address & self.set_selection_bit_mask) >> self.offset_bits) as usize,
            block_offset,
            word_offset: block_offset / WORD_SIZE,
        }
    }

    /// Rebuilds the block aligned address of a line from its tag and set, with the offset zeroed
    pub fn block_address(&self, tag: u32, set_index: usize) -> u32 {
        tag.checked_shl(self.tag_shift).unwrap_or(0) | ((set_index as u32) << self.offset_bits)
    }
}
