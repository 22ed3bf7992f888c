//! eepdict Hardware Abstraction Layer
//!
//! This crate defines the non-volatile memory primitive consumed by
//! `eepdict-core`. Platforms implement [`NvMemory`] for their EEPROM (or
//! emulated EEPROM) so the same dictionary logic runs on every target.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application firmware                   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  eepdict-core (dictionary, layout)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  eepdict-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────────┐
//! │  RamEeprom    │       │  StorageMemory    │
//! │  (host/tests) │       │ (embedded-storage)│
//! └───────────────┘       └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`memory::NvMemory`] - Byte-addressable non-volatile memory

#![no_std]
#![deny(unsafe_code)]

pub mod memory;
pub mod ram;
#[cfg(feature = "embedded-storage")]
pub mod storage;

// Re-export key types at crate root for convenience
pub use memory::{MemoryError, NvMemory, ERASED_BYTE};
pub use ram::RamEeprom;
#[cfg(feature = "embedded-storage")]
pub use storage::StorageMemory;
