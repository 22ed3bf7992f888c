//! Dictionary facade
//!
//! Composes the byte store, binding index, allocator and validator into the
//! public API. Usage has two phases:
//!
//! 1. Registration: [`Dictionary::map`] each variable under a key
//! 2. After a single [`Dictionary::initialize`]: [`Dictionary::read`] and
//!    [`Dictionary::write`] values by key
//!
//! The dictionary is not safe for concurrent use; callers sharing it
//! between tasks must serialize access themselves.

use eepdict_hal::NvMemory;

use crate::config::DictConfig;
use crate::error::DictError;
use crate::index::{Binding, BindingIndex, Persistent};
use crate::layout::{self, allocator, LayoutValidator};
use crate::store::ByteStore;

/// Result of a successful initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitOutcome {
    /// Stored layout matched; values were loaded into the bindings
    Restored,
    /// Stored layout was missing or stale; header, index and current
    /// values were written out
    Rewritten,
}

/// Persistent key-value dictionary over a non-volatile memory
///
/// Bound variables are borrowed for `'a` and must outlive the dictionary.
pub struct Dictionary<'a, M> {
    store: ByteStore<M>,
    index: BindingIndex<'a>,
    config: DictConfig,
}

impl<'a, M: NvMemory> Dictionary<'a, M> {
    /// Create a dictionary with the default configuration
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, DictConfig::default())
    }

    /// Create a dictionary with a custom configuration
    pub fn with_config(memory: M, config: DictConfig) -> Self {
        Self {
            store: ByteStore::new(memory),
            index: BindingIndex::new(),
            config,
        }
    }

    /// Register a variable under `key`
    ///
    /// Only valid before [`initialize`](Self::initialize). Returns the
    /// binding's position. On error the index is left unchanged.
    pub fn map(&mut self, key: &str, location: &'a dyn Persistent) -> Result<usize, DictError> {
        let binding = match self.index.prepare(key, location) {
            Ok(binding) => binding,
            Err(e) => {
                warn!("Cannot map {}: {}", key, e);
                return Err(e);
            }
        };

        let count = self.index.len() + 1;
        let total = self.index.total_size() + binding.size() as usize;
        if let Err(e) = allocator::values_base(self.store.capacity(), count, total) {
            warn!("Cannot map {}: {} bytes do not fit", key, total);
            return Err(e);
        }

        debug!(
            "{} -- fingerprint: {:#x}, size: {}",
            key,
            binding.fingerprint(),
            binding.size()
        );
        self.index.push(binding)
    }

    /// Allocate addresses and validate the stored layout
    ///
    /// Restores stored values if the layout matches, otherwise rewrites the
    /// header, index and every current value. Closes registration.
    ///
    /// Calling this a second time does nothing and returns
    /// [`DictError::AlreadyInitialized`]. If a memory write fails the error
    /// is returned and registration stays open.
    pub fn initialize(&mut self) -> Result<InitOutcome, DictError> {
        if self.index.is_frozen() {
            warn!("Dictionary already initialized");
            return Err(DictError::AlreadyInitialized);
        }

        allocator::assign_addresses(&mut self.index, self.store.capacity())?;

        let validator = LayoutValidator::new(self.config.magic);
        let outcome = if validator.is_trusted(&mut self.store, &self.index)? {
            info!("Layout matches, restoring {} values", self.index.len());
            validator.restore(&mut self.store, &self.index)?;
            InitOutcome::Restored
        } else {
            info!("Layout changed, initializing {} values", self.index.len());
            validator.rewrite(&mut self.store, &self.index)?;
            InitOutcome::Rewritten
        };

        self.index.freeze();
        Ok(outcome)
    }

    /// Persist the current value of `key`'s variable
    pub fn write(&mut self, key: &str) -> Result<(), DictError> {
        let binding = self.bound(key)?;
        layout::store_value(&mut self.store, &binding)
    }

    /// Reload `key`'s variable from memory
    ///
    /// If the stored range cannot be read the variable is set to zeroes.
    pub fn read(&mut self, key: &str) -> Result<(), DictError> {
        let binding = self.bound(key)?;
        layout::load_value(&mut self.store, &binding)
    }

    /// Persist every bound variable
    pub fn write_all(&mut self) -> Result<(), DictError> {
        self.ensure_initialized()?;
        for binding in self.index.iter() {
            layout::store_value(&mut self.store, binding)?;
        }
        Ok(())
    }

    /// Reload every bound variable
    pub fn read_all(&mut self) -> Result<(), DictError> {
        self.ensure_initialized()?;
        for binding in self.index.iter() {
            layout::load_value(&mut self.store, binding)?;
        }
        Ok(())
    }

    /// Position of `key`'s binding
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.lookup(key)
    }

    /// Address assigned to `key`'s value, once initialized
    pub fn address_of(&self, key: &str) -> Option<u16> {
        self.index_of(key)
            .and_then(|position| self.index.get(position))
            .and_then(|binding| binding.address())
    }

    /// Binding at `position`
    pub fn binding(&self, position: usize) -> Option<&Binding<'a>> {
        self.index.get(position)
    }

    /// Number of registered bindings
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if no bindings are registered
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Check if [`initialize`](Self::initialize) has completed
    pub fn is_initialized(&self) -> bool {
        self.index.is_frozen()
    }

    /// Active configuration
    pub fn config(&self) -> &DictConfig {
        &self.config
    }

    /// Get the memory device
    pub fn memory(&self) -> &M {
        self.store.memory()
    }

    /// Get the memory device for low-level access
    ///
    /// Writing through this bypasses layout bookkeeping.
    pub fn memory_mut(&mut self) -> &mut M {
        self.store.memory_mut()
    }

    /// Consume the dictionary and return the memory device
    pub fn into_memory(self) -> M {
        self.store.into_inner()
    }

    fn ensure_initialized(&self) -> Result<(), DictError> {
        if self.index.is_frozen() {
            Ok(())
        } else {
            Err(DictError::NotInitialized)
        }
    }

    /// Binding for `key`, checking the dictionary is initialized
    fn bound(&self, key: &str) -> Result<Binding<'a>, DictError> {
        self.ensure_initialized()?;
        self.index
            .lookup(key)
            .and_then(|position| self.index.get(position))
            .copied()
            .ok_or(DictError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAGIC, MAX_BINDINGS};
    use crate::index::fingerprint;
    use core::cell::Cell;
    use eepdict_hal::{MemoryError, RamEeprom};

    type Eeprom = RamEeprom<1024>;

    /// EEPROM whose writes can be made to fail
    struct FlakyEeprom {
        inner: RamEeprom<64>,
        fail_writes: bool,
    }

    impl NvMemory for FlakyEeprom {
        fn capacity(&self) -> usize {
            self.inner.capacity()
        }

        fn read_byte(&mut self, address: usize) -> Result<u8, MemoryError> {
            self.inner.read_byte(address)
        }

        fn write_byte(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
            if self.fail_writes {
                return Err(MemoryError::Device);
            }
            self.inner.write_byte(address, value)
        }
    }

    #[test]
    fn test_first_boot_layout() {
        let hi = Cell::new(7i32);
        let hey = Cell::new(9i32);

        let mut dict = Dictionary::new(Eeprom::zeroed());
        dict.map("hi", &hi).unwrap();
        dict.map("hey", &hey).unwrap();
        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));

        let bytes = dict.memory().as_bytes();
        let [hi_lo, hi_hi] = fingerprint("hi").to_le_bytes();
        let [hey_lo, hey_hi] = fingerprint("hey").to_le_bytes();
        assert_eq!(
            &bytes[..8],
            &[DEFAULT_MAGIC, 2, hi_lo, hi_hi, 4, hey_lo, hey_hi, 4]
        );

        let hi_addr = dict.address_of("hi").unwrap();
        let hey_addr = dict.address_of("hey").unwrap();
        assert!(hey_addr > hi_addr);
        assert_eq!(hey_addr, 1020);
        assert_eq!(hi_addr, 1016);
        assert_eq!(&bytes[1016..1020], &7i32.to_le_bytes());
        assert_eq!(&bytes[1020..1024], &9i32.to_le_bytes());
    }

    #[test]
    fn test_write_then_read() {
        let speed = Cell::new(100u32);

        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("speed", &speed).unwrap();
        dict.initialize().unwrap();

        speed.set(250);
        dict.write("speed").unwrap();
        speed.set(0);
        dict.read("speed").unwrap();

        assert_eq!(speed.get(), 250);
    }

    #[test]
    fn test_read_without_write_returns_initial_value() {
        let portion = Cell::new(12u8);

        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("portion", &portion).unwrap();
        dict.initialize().unwrap();

        portion.set(99);
        dict.read("portion").unwrap();
        assert_eq!(portion.get(), 12);
    }

    #[test]
    fn test_restore_on_matching_layout() {
        let hour = Cell::new(6u8);
        let minute = Cell::new(30u8);

        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("hour", &hour).unwrap();
        dict.map("minute", &minute).unwrap();
        dict.initialize().unwrap();
        hour.set(18);
        dict.write("hour").unwrap();
        let mut eeprom = dict.into_memory();
        eeprom.clear_write_count();

        let hour = Cell::new(0u8);
        let minute = Cell::new(0u8);
        let mut dict = Dictionary::new(eeprom);
        dict.map("hour", &hour).unwrap();
        dict.map("minute", &minute).unwrap();

        assert_eq!(dict.initialize(), Ok(InitOutcome::Restored));
        assert_eq!(hour.get(), 18);
        assert_eq!(minute.get(), 30);
        assert_eq!(dict.memory().write_count(), 0);
    }

    #[test]
    fn test_changed_size_rewrites() {
        let value = Cell::new(0x1111u16);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("value", &value).unwrap();
        dict.initialize().unwrap();
        let eeprom = dict.into_memory();

        let value = Cell::new(5u32);
        let mut dict = Dictionary::new(eeprom);
        dict.map("value", &value).unwrap();

        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
        assert_eq!(value.get(), 5);
        assert_eq!(dict.memory().as_bytes()[4], 4);
    }

    #[test]
    fn test_reordered_registration_rewrites() {
        let a = Cell::new(1u8);
        let b = Cell::new(2u8);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();
        dict.map("b", &b).unwrap();
        dict.initialize().unwrap();
        let eeprom = dict.into_memory();

        let a = Cell::new(10u8);
        let b = Cell::new(20u8);
        let mut dict = Dictionary::new(eeprom);
        dict.map("b", &b).unwrap();
        dict.map("a", &a).unwrap();

        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
        assert_eq!(a.get(), 10);
        assert_eq!(b.get(), 20);
    }

    #[test]
    fn test_custom_magic() {
        let a = Cell::new(1u8);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();
        dict.initialize().unwrap();
        let eeprom = dict.into_memory();

        let mut dict = Dictionary::with_config(eeprom, DictConfig::with_magic(0x42));
        dict.map("a", &a).unwrap();

        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
        assert_eq!(dict.memory().as_bytes()[0], 0x42);
        assert_eq!(dict.config().magic, 0x42);
    }

    #[test]
    fn test_operations_before_initialize() {
        let a = Cell::new(1u8);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();

        assert_eq!(dict.write("a"), Err(DictError::NotInitialized));
        assert_eq!(dict.read("a"), Err(DictError::NotInitialized));
        assert_eq!(dict.write_all(), Err(DictError::NotInitialized));
        assert_eq!(dict.read_all(), Err(DictError::NotInitialized));
        assert_eq!(dict.index_of("a"), Some(0));
        assert_eq!(dict.address_of("a"), None);
        assert_eq!(dict.memory().write_count(), 0);
    }

    #[test]
    fn test_unknown_key() {
        let a = Cell::new(1u8);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();
        dict.initialize().unwrap();

        assert_eq!(dict.write("b"), Err(DictError::NotFound));
        assert_eq!(dict.read("b"), Err(DictError::NotFound));
        assert_eq!(dict.index_of("b"), None);
    }

    #[test]
    fn test_map_after_initialize() {
        let a = Cell::new(1u8);
        let b = Cell::new(2u8);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();
        dict.initialize().unwrap();

        assert_eq!(dict.map("b", &b), Err(DictError::AlreadyInitialized));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_second_initialize_is_noop() {
        let a = Cell::new(1u8);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();
        dict.initialize().unwrap();
        dict.memory_mut().clear_write_count();

        a.set(77);
        assert_eq!(dict.initialize(), Err(DictError::AlreadyInitialized));
        assert_eq!(dict.memory().write_count(), 0);
        assert_eq!(a.get(), 77);
        assert!(dict.is_initialized());
    }

    #[test]
    fn test_seventeenth_map_rejected() {
        let cells: [Cell<u8>; MAX_BINDINGS + 1] = core::array::from_fn(|_| Cell::new(0));
        let keys = [
            "k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8", "k9", "k10", "k11", "k12",
            "k13", "k14", "k15", "k16",
        ];
        let mut dict = Dictionary::new(Eeprom::new());

        for (key, cell) in keys.iter().zip(cells.iter()).take(MAX_BINDINGS) {
            dict.map(key, cell).unwrap();
        }

        assert_eq!(
            dict.map(keys[MAX_BINDINGS], &cells[MAX_BINDINGS]),
            Err(DictError::CapacityExceeded)
        );
        assert_eq!(dict.len(), MAX_BINDINGS);
    }

    #[test]
    fn test_region_full() {
        let big = Cell::new([0u8; 200]);
        let more = Cell::new([0u8; 60]);
        let mut dict = Dictionary::new(RamEeprom::<256>::new());

        dict.map("big", &big).unwrap();
        assert_eq!(dict.map("more", &more), Err(DictError::RegionFull));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
    }

    #[test]
    fn test_write_all_and_read_all() {
        let a = Cell::new(1u16);
        let b = Cell::new(true);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();
        dict.map("b", &b).unwrap();
        dict.initialize().unwrap();

        a.set(500);
        b.set(false);
        dict.write_all().unwrap();
        a.set(0);
        b.set(true);
        dict.read_all().unwrap();

        assert_eq!(a.get(), 500);
        assert!(!b.get());
    }

    #[test]
    fn test_empty_dictionary() {
        let mut dict: Dictionary<'_, Eeprom> = Dictionary::new(Eeprom::new());
        assert!(dict.is_empty());
        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
        assert_eq!(&dict.memory().as_bytes()[..2], &[DEFAULT_MAGIC, 0]);

        let eeprom = dict.into_memory();
        let mut dict: Dictionary<'_, Eeprom> = Dictionary::new(eeprom);
        assert_eq!(dict.initialize(), Ok(InitOutcome::Restored));
    }

    #[test]
    fn test_erased_layout_forces_rewrite() {
        let a = Cell::new(3u8);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();
        dict.initialize().unwrap();
        let mut eeprom = dict.into_memory();

        layout::erase_layout(&mut eeprom).unwrap();

        let a = Cell::new(4u8);
        let mut dict = Dictionary::new(eeprom);
        dict.map("a", &a).unwrap();
        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
        assert_eq!(dict.memory().as_bytes()[1023], 4);
    }

    #[test]
    fn test_failed_rewrite_keeps_registration_open() {
        let a = Cell::new(1u8);
        let b = Cell::new(2u16);
        let mut dict = Dictionary::new(FlakyEeprom {
            inner: RamEeprom::new(),
            fail_writes: true,
        });
        dict.map("a", &a).unwrap();

        assert_eq!(
            dict.initialize(),
            Err(DictError::Memory(MemoryError::Device))
        );
        assert!(!dict.is_initialized());
        assert_eq!(dict.map("b", &b), Ok(1));

        dict.memory_mut().fail_writes = false;
        assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
        assert!(dict.is_initialized());
        assert_eq!(&dict.memory().inner.as_bytes()[..2], &[DEFAULT_MAGIC, 2]);
        assert_eq!(dict.memory().inner.as_bytes()[61], 1);
    }

    #[test]
    fn test_zero_size_binding_rejected() {
        let empty = Cell::new([0u8; 0]);
        let mut dict = Dictionary::new(Eeprom::new());

        assert_eq!(dict.map("empty", &empty), Err(DictError::InvalidSize));
        assert!(dict.is_empty());
    }

    #[test]
    fn test_binding_accessor() {
        let a = Cell::new(0u32);
        let mut dict = Dictionary::new(Eeprom::new());
        dict.map("a", &a).unwrap();

        let binding = dict.binding(0).unwrap();
        assert_eq!(binding.fingerprint(), fingerprint("a"));
        assert_eq!(binding.size(), 4);
        assert!(dict.binding(1).is_none());
    }
}
