//! Bounds-checked byte store
//!
//! Range reads and writes over an [`NvMemory`] primitive. A range that
//! would cross the end of the region is rejected as a whole: writes leave
//! memory untouched, reads zero-fill the destination. Either way the
//! failure is logged and reported as [`DictError::OutOfRange`].

use eepdict_hal::NvMemory;

use crate::error::DictError;

/// Bounds-checked range access to non-volatile memory
#[derive(Debug)]
pub struct ByteStore<M> {
    memory: M,
}

impl<M: NvMemory> ByteStore<M> {
    /// Wrap a memory device
    pub fn new(memory: M) -> Self {
        Self { memory }
    }

    /// Number of addressable bytes
    pub fn capacity(&self) -> usize {
        self.memory.capacity()
    }

    /// Check whether `[address, address + len)` lies inside the region
    pub fn in_bounds(&self, address: usize, len: usize) -> bool {
        address
            .checked_add(len)
            .is_some_and(|end| end <= self.capacity())
    }

    /// Write `data` starting at `address`
    ///
    /// Performs no mutation at all if the range is out of bounds.
    pub fn write(&mut self, address: usize, data: &[u8]) -> Result<(), DictError> {
        if !self.in_bounds(address, data.len()) {
            warn!(
                "Cannot write {} bytes at {}: region outside memory",
                data.len(),
                address
            );
            return Err(DictError::OutOfRange);
        }

        for (offset, &byte) in data.iter().enumerate() {
            self.memory.write_byte(address + offset, byte)?;
        }
        Ok(())
    }

    /// Read `buffer.len()` bytes starting at `address`
    ///
    /// On any failure the whole buffer is zero-filled.
    pub fn read(&mut self, address: usize, buffer: &mut [u8]) -> Result<(), DictError> {
        if !self.in_bounds(address, buffer.len()) {
            warn!(
                "Cannot read {} bytes at {}: region outside memory",
                buffer.len(),
                address
            );
            buffer.fill(0);
            return Err(DictError::OutOfRange);
        }

        for (offset, slot) in buffer.iter_mut().enumerate() {
            match self.memory.read_byte(address + offset) {
                Ok(byte) => *slot = byte,
                Err(e) => {
                    error!("Memory read failed at {}: {}", address + offset, e);
                    buffer.fill(0);
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self, address: usize) -> Result<u8, DictError> {
        let mut byte = [0u8; 1];
        self.read(address, &mut byte)?;
        Ok(byte[0])
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self, address: usize) -> Result<u16, DictError> {
        let mut bytes = [0u8; 2];
        self.read(address, &mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Get the memory device
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Get the memory device for low-level access
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consume the store and return the memory device
    pub fn into_inner(self) -> M {
        self.memory
    }
}
