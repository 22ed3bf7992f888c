//! Binding index
//!
//! Ordered collection of registered bindings. Registration order is
//! significant: it determines both the address each value is given and the
//! order of the serialized index in memory.

pub mod binding;
pub mod hash;
pub mod value;

pub use binding::Binding;
pub use hash::fingerprint;
pub use value::Persistent;

use heapless::Vec;

use crate::config::{MAX_BINDINGS, MAX_VALUE_SIZE};
use crate::error::DictError;

/// Registered bindings in registration order
///
/// Mutable only until frozen by a successful initialization.
#[derive(Debug, Default)]
pub struct BindingIndex<'a> {
    bindings: Vec<Binding<'a>, MAX_BINDINGS>,
    frozen: bool,
}

impl<'a> BindingIndex<'a> {
    /// Create an empty, unfrozen index
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            frozen: false,
        }
    }

    /// Validate a registration without modifying the index
    ///
    /// Checks, in order: frozen, full, duplicate fingerprint, value size.
    /// Values must be between 1 and 255 bytes wide.
    pub(crate) fn prepare(
        &self,
        key: &str,
        location: &'a dyn Persistent,
    ) -> Result<Binding<'a>, DictError> {
        if self.frozen {
            return Err(DictError::AlreadyInitialized);
        }
        if self.bindings.is_full() {
            return Err(DictError::CapacityExceeded);
        }

        let fingerprint = fingerprint(key);
        if self.position_of(fingerprint).is_some() {
            return Err(DictError::DuplicateKey);
        }

        let size = location.size();
        if size == 0 || size > MAX_VALUE_SIZE {
            return Err(DictError::InvalidSize);
        }

        Ok(Binding::new(fingerprint, size as u8, location))
    }

    /// Append a prepared binding, returning its position
    pub(crate) fn push(&mut self, binding: Binding<'a>) -> Result<usize, DictError> {
        if self.frozen {
            return Err(DictError::AlreadyInitialized);
        }
        if self.position_of(binding.fingerprint()).is_some() {
            return Err(DictError::DuplicateKey);
        }
        self.bindings
            .push(binding)
            .map_err(|_| DictError::CapacityExceeded)?;
        Ok(self.bindings.len() - 1)
    }

    /// Validate and append a binding in one step
    pub fn register(
        &mut self,
        key: &str,
        location: &'a dyn Persistent,
    ) -> Result<usize, DictError> {
        let binding = self.prepare(key, location)?;
        self.push(binding)
    }

    /// Position of the binding registered under `key`
    pub fn lookup(&self, key: &str) -> Option<usize> {
        self.position_of(fingerprint(key))
    }

    /// Position of the binding with the given fingerprint
    pub fn position_of(&self, fingerprint: u16) -> Option<usize> {
        self.bindings
            .iter()
            .position(|b| b.fingerprint() == fingerprint)
    }

    /// Binding at `position`
    pub fn get(&self, position: usize) -> Option<&Binding<'a>> {
        self.bindings.get(position)
    }

    /// Iterate bindings in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Binding<'a>> {
        self.bindings.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Binding<'a>> {
        self.bindings.iter_mut()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no bindings are registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Sum of all value sizes in bytes
    pub fn total_size(&self) -> usize {
        self.bindings.iter().map(|b| b.size() as usize).sum()
    }

    /// Check if registration is closed
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }
}
