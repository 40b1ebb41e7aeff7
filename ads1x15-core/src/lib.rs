//! Board-agnostic core logic for the ADS1015/ADS1115 converters
//!
//! This crate contains everything about the chips that does not touch a
//! bus:
//!
//! - Register map, config word encoding and wire framing
//! - Conversion decoding and volt scaling
//! - Chip variant constants
//! - Conversion request state machine
//! - Analog input trait and error type
//! - Configuration types and their TOML loader
//! - Multi-channel sampling cycles

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod conversion;
pub mod registers;
pub mod sampler;
pub mod state;
pub mod traits;
pub mod variant;

pub use variant::Variant;
