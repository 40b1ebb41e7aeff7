//! RP2040-specific HAL for the ADS1x15 sampler firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `ads1x15-hal` traits:
//!
//! - Blocking I2C master over `embassy-rp` (implements `I2cBus` and `BusClock`)
//! - GPIO to I2C controller mapping for config-driven pin setup

#![no_std]

pub mod i2c;

pub use i2c::{controller_config, gpio_to_i2c, validate_pins, I2cId, I2cLine, Rp2040I2c};

// Re-export shared traits from ads1x15-hal for convenience
pub use ads1x15_hal::{BusClock, I2cBus, I2cConfig};
