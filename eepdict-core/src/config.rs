//! Layout constants and runtime configuration

/// Sentinel written at offset 0 of a valid layout
pub const DEFAULT_MAGIC: u8 = 0xAC;

/// Maximum number of bindings (the count must fit in one byte)
pub const MAX_BINDINGS: usize = 16;

/// Largest value a single binding may hold, in bytes
pub const MAX_VALUE_SIZE: usize = u8::MAX as usize;

/// Offset of the magic sentinel byte
pub const MAGIC_OFFSET: usize = 0;

/// Offset of the binding count byte
pub const COUNT_OFFSET: usize = 1;

/// Offset of the first serialized index entry
pub const INDEX_OFFSET: usize = 2;

/// Serialized index entry size (fingerprint u16 + size u8)
pub const INDEX_ENTRY_SIZE: usize = 3;

/// Largest memory region addressable with 16-bit addresses
pub const MAX_REGION_CAPACITY: usize = u16::MAX as usize + 1;

/// Dictionary configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DictConfig {
    /// Sentinel identifying a layout written by this firmware
    ///
    /// Changing it invalidates every layout written under another value.
    pub magic: u8,
}

impl DictConfig {
    /// Create a configuration with a custom magic sentinel
    pub const fn with_magic(magic: u8) -> Self {
        Self { magic }
    }
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            magic: DEFAULT_MAGIC,
        }
    }
}

/// Bytes occupied by the header and an index of `count` entries
pub const fn index_footprint(count: usize) -> usize {
    INDEX_OFFSET + count * INDEX_ENTRY_SIZE
}

/// Offset of the serialized index entry for binding `position`
pub const fn index_entry_offset(position: usize) -> usize {
    INDEX_OFFSET + position * INDEX_ENTRY_SIZE
}
