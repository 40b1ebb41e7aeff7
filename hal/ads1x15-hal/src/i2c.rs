//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by chip-specific HALs.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges its address
    ///
    /// The default issues an empty write. Buses that cannot emit a
    /// zero-length transfer should override this.
    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        self.write(address, &[])
    }
}

/// Access to the bus clock of an I2C master
///
/// Kept apart from [`I2cBus`] since not every transport can retune its
/// clock after construction.
pub trait BusClock {
    /// Error type for clock changes
    type Error;

    /// Current SCL frequency in Hz
    fn clock_frequency(&self) -> u32;

    /// Change the SCL frequency
    fn set_clock_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };

    /// Highest frequency the ADS1x15 family accepts (high-speed mode)
    pub const MAX_ADS1X15: u32 = 3_400_000;

    /// Check that the frequency is one an ADS1x15 can follow
    pub fn is_supported(&self) -> bool {
        self.frequency >= 10_000 && self.frequency <= Self::MAX_ADS1X15
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingBus {
        writes: usize,
        last_len: Option<usize>,
    }

    impl I2cBus for RecordingBus {
        type Error = ();

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), ()> {
            self.writes += 1;
            self.last_len = Some(data.len());
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_probe_is_empty_write() {
        let mut bus = RecordingBus {
            writes: 0,
            last_len: None,
        };
        bus.probe(0x48).unwrap();
        assert_eq!(bus.writes, 1);
        assert_eq!(bus.last_len, Some(0));
    }

    #[test]
    fn test_presets() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert!(I2cConfig::FAST.is_supported());
        assert!(I2cConfig::FAST_PLUS.is_supported());
        assert!(!I2cConfig { frequency: 5_000_000 }.is_supported());
    }
}
