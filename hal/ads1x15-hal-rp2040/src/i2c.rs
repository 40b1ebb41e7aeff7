//! I2C transport for the RP2040
//!
//! RP2040 has two I2C controllers (I2C0 and I2C1). Every GPIO can carry
//! one of them; which controller and role is fixed by the pin number.

use ads1x15_hal::{BusClock, I2cBus, I2cConfig};
use embassy_embedded_hal::SetConfig;
use embassy_rp::i2c::{self, Blocking, Instance};
use embedded_hal::i2c::I2c as _;

/// I2C controller identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cId {
    I2c0,
    I2c1,
}

/// Line a GPIO carries when muxed to I2C
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cLine {
    Sda,
    Scl,
}

/// Determine which controller and line a GPIO maps to
///
/// The pattern repeats every four pins: I2C0 SDA, I2C0 SCL, I2C1 SDA,
/// I2C1 SCL.
pub fn gpio_to_i2c(gpio: u8) -> Option<(I2cId, I2cLine)> {
    if gpio > 29 {
        return None;
    }
    Some(match gpio % 4 {
        0 => (I2cId::I2c0, I2cLine::Sda),
        1 => (I2cId::I2c0, I2cLine::Scl),
        2 => (I2cId::I2c1, I2cLine::Sda),
        _ => (I2cId::I2c1, I2cLine::Scl),
    })
}

/// Check that an SDA/SCL pair lands on the same controller
pub fn validate_pins(sda: u8, scl: u8) -> Option<I2cId> {
    match (gpio_to_i2c(sda)?, gpio_to_i2c(scl)?) {
        ((sda_id, I2cLine::Sda), (scl_id, I2cLine::Scl)) if sda_id == scl_id => Some(sda_id),
        _ => None,
    }
}

/// embassy-rp controller configuration for `config`
pub fn controller_config(config: I2cConfig) -> i2c::Config {
    let mut controller = i2c::Config::default();
    controller.frequency = config.frequency;
    controller
}

/// Blocking I2C master
///
/// Wraps an `embassy_rp` controller and remembers the clock it was last
/// configured with, since the peripheral cannot report it.
pub struct Rp2040I2c<'d, T: Instance> {
    bus: i2c::I2c<'d, T, Blocking>,
    frequency: u32,
}

impl<'d, T: Instance> Rp2040I2c<'d, T> {
    /// Wrap a controller created with `config`
    pub fn new(bus: i2c::I2c<'d, T, Blocking>, config: I2cConfig) -> Self {
        Self {
            bus,
            frequency: config.frequency,
        }
    }

    pub fn into_inner(self) -> i2c::I2c<'d, T, Blocking> {
        self.bus
    }
}

impl<T: Instance> I2cBus for Rp2040I2c<'_, T> {
    type Error = i2c::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(address, buf)
    }

    /// The controller rejects zero-length writes, so probe with a
    /// one-byte read instead.
    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        let mut buf = [0u8; 1];
        self.bus.read(address, &mut buf)
    }
}

impl<'d, T: Instance> BusClock for Rp2040I2c<'d, T> {
    type Error = <i2c::I2c<'d, T, Blocking> as SetConfig>::ConfigError;

    fn clock_frequency(&self) -> u32 {
        self.frequency
    }

    fn set_clock_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        let config = controller_config(I2cConfig { frequency: hz });
        self.bus.set_config(&config)?;
        self.frequency = hz;

        #[cfg(feature = "defmt")]
        defmt::debug!("I2C clock set to {} Hz", hz);

        Ok(())
    }
}
