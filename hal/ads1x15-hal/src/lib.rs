//! ADS1x15 Hardware Abstraction Layer
//!
//! This crate defines the transport traits the ADS1x15 driver talks
//! through. Chip-specific HALs (RP2040, ...) implement them so the same
//! driver code runs on any board, and host tests can substitute a
//! scripted bus.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ads1x15-drivers / ads1x15-firmware     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ads1x15-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ ads1x15-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C master transfers
//! - [`i2c::BusClock`] - SCL clock query and retuning

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{BusClock, I2cBus, I2cConfig};
