//! Layout validation
//!
//! Decides at boot whether the values in memory belong to the current set
//! of bindings. The stored layout is trusted only if the magic sentinel,
//! the binding count and every serialized (fingerprint, size) entry match.
//! Anything else is rewritten from the bindings' current values.

use eepdict_hal::NvMemory;

use crate::config::{index_entry_offset, COUNT_OFFSET, INDEX_ENTRY_SIZE, MAGIC_OFFSET};
use crate::error::DictError;
use crate::index::BindingIndex;
use crate::store::ByteStore;

use super::{load_value, store_value};

/// Header and index checker/writer for one magic sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutValidator {
    magic: u8,
}

impl LayoutValidator {
    /// Create a validator expecting `magic` at offset 0
    pub const fn new(magic: u8) -> Self {
        Self { magic }
    }

    /// Expected magic sentinel
    pub fn magic(&self) -> u8 {
        self.magic
    }

    /// Check whether the stored header and index match `index`
    pub fn is_trusted<M: NvMemory>(
        &self,
        store: &mut ByteStore<M>,
        index: &BindingIndex<'_>,
    ) -> Result<bool, DictError> {
        let stored_magic = store.read_u8(MAGIC_OFFSET)?;
        if stored_magic != self.magic {
            debug!("Magic mismatch: stored {:#x}, expected {:#x}", stored_magic, self.magic);
            return Ok(false);
        }

        let stored_count = store.read_u8(COUNT_OFFSET)? as usize;
        if stored_count != index.len() {
            debug!("Count mismatch: stored {}, current {}", stored_count, index.len());
            return Ok(false);
        }

        for (position, binding) in index.iter().enumerate() {
            let mut entry = [0u8; INDEX_ENTRY_SIZE];
            store.read(index_entry_offset(position), &mut entry)?;
            if entry != binding.index_entry() {
                debug!("Index entry {} differs", position);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Trusted path: load every stored value into its binding
    pub fn restore<M: NvMemory>(
        &self,
        store: &mut ByteStore<M>,
        index: &BindingIndex<'_>,
    ) -> Result<(), DictError> {
        for binding in index.iter() {
            load_value(store, binding)?;
        }
        Ok(())
    }

    /// Untrusted path: write header, index, and every current value
    pub fn rewrite<M: NvMemory>(
        &self,
        store: &mut ByteStore<M>,
        index: &BindingIndex<'_>,
    ) -> Result<(), DictError> {
        store.write(MAGIC_OFFSET, &[self.magic])?;
        store.write(COUNT_OFFSET, &[index.len() as u8])?;

        for (position, binding) in index.iter().enumerate() {
            store.write(index_entry_offset(position), &binding.index_entry())?;
        }

        for binding in index.iter() {
            store_value(store, binding)?;
        }
        Ok(())
    }
}
