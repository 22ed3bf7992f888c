//! Dictionary error taxonomy

use eepdict_hal::MemoryError;

/// Errors returned by dictionary operations
///
/// A layout mismatch at boot is not an error; see
/// [`InitOutcome::Rewritten`](crate::InitOutcome::Rewritten).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// Registration attempted after initialization, or initialize called twice
    AlreadyInitialized,
    /// The index already holds the maximum number of bindings
    CapacityExceeded,
    /// The key's fingerprint matches an existing binding
    DuplicateKey,
    /// No binding exists for the key
    NotFound,
    /// Read or write attempted before initialization
    NotInitialized,
    /// Byte range extends past the end of the memory region
    OutOfRange,
    /// Bound value is empty or wider than a binding can describe
    InvalidSize,
    /// Header, index and values would not fit in the memory region
    RegionFull,
    /// The memory device failed
    Memory(MemoryError),
}

impl From<MemoryError> for DictError {
    fn from(e: MemoryError) -> Self {
        match e {
            MemoryError::OutOfRange => DictError::OutOfRange,
            other => DictError::Memory(other),
        }
    }
}
