//! Board-agnostic persistent key-value bindings
//!
//! Firmware registers named variables against fixed-size storage, then
//! calls [`Dictionary::initialize`] once at boot. The dictionary assigns
//! every binding a stable address in non-volatile memory and checks the
//! stored header and index against the current registrations:
//!
//! - Layout matches: stored values are restored into the bound variables
//! - Layout differs (or first boot): header, index and current values are
//!   rewritten, discarding the stale data
//!
//! After initialization, values are persisted and reloaded per key with
//! [`Dictionary::write`] and [`Dictionary::read`].
//!
//! # Memory layout
//!
//! ```text
//! ┌───────┬───────┬──────────────────────┬─────────┬──────────────────┐
//! │ MAGIC │ COUNT │ INDEX (3B × COUNT)   │  free   │ VALUES           │
//! │ 1B    │ 1B    │ fingerprint LE, size │         │ packed to the top│
//! └───────┴───────┴──────────────────────┴─────────┴──────────────────┘
//! 0       1       2                                          capacity
//! ```
//!
//! # Example
//!
//! ```
//! use core::cell::Cell;
//! use eepdict_core::{Dictionary, InitOutcome};
//! use eepdict_hal::RamEeprom;
//!
//! let feed_count = Cell::new(0u16);
//! let portion = Cell::new(12u8);
//!
//! let mut dict = Dictionary::new(RamEeprom::<1024>::new());
//! dict.map("feed_count", &feed_count).unwrap();
//! dict.map("portion", &portion).unwrap();
//! assert_eq!(dict.initialize(), Ok(InitOutcome::Rewritten));
//!
//! feed_count.set(3);
//! dict.write("feed_count").unwrap();
//! ```

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dict;
pub mod error;
pub mod index;
pub mod layout;
pub mod store;

pub use config::DictConfig;
pub use dict::{Dictionary, InitOutcome};
pub use error::DictError;
pub use index::{fingerprint, Binding, BindingIndex, Persistent};
pub use layout::erase_layout;
pub use store::ByteStore;
