//! Configuration type definitions
//!
//! These types describe one converter on one bus and how it is sampled.

use heapless::{String, Vec};

use crate::registers::{DataRate, Gain, DEFAULT_ADDRESS};
use crate::variant::Variant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum channels sampled per cycle
pub const MAX_CHANNELS: usize = 4;

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Bounds for the conversion-ready poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PollConfig {
    /// Config register reads before giving up
    pub max_polls: u16,
    /// Delay between reads in microseconds
    pub interval_us: u32,
}

impl Default for PollConfig {
    /// 200ms budget, enough for the slowest ADS1115 rate (8 SPS)
    fn default() -> Self {
        Self {
            max_polls: 400,
            interval_us: 500,
        }
    }
}

impl PollConfig {
    /// Shortest delay between polls
    pub const MIN_INTERVAL_US: u32 = 50;

    /// Poll budget sized for one conversion at `rate`
    ///
    /// Polls roughly eight times per nominal conversion and allows four
    /// conversion times before timing out.
    pub fn for_rate(variant: Variant, rate: DataRate) -> Self {
        let conversion_us = variant.conversion_time_us(rate);
        let interval_us = (conversion_us / 8).max(Self::MIN_INTERVAL_US);
        let polls = (conversion_us * 4) / interval_us + 1;
        Self {
            max_polls: polls.clamp(4, u16::MAX as u32) as u16,
            interval_us,
        }
    }

    /// Total time the poll loop may wait, in microseconds
    pub fn budget_us(&self) -> u32 {
        self.max_polls as u32 * self.interval_us
    }
}

/// Converter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdcConfig {
    /// Chip on the bus
    pub variant: Variant,
    /// 7-bit I2C address
    pub address: u8,
    /// PGA setting
    pub gain: Gain,
    /// Data rate code
    pub data_rate: DataRate,
    /// I2C SCL frequency in Hz
    pub i2c_frequency: u32,
}

impl Default for AdcConfig {
    fn default() -> Self {
        let variant = Variant::default();
        Self {
            variant,
            address: DEFAULT_ADDRESS,
            gain: variant.default_gain(),
            data_rate: variant.default_data_rate(),
            i2c_frequency: 100_000,
        }
    }
}

/// Periodic sampling configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Name used in log output
    pub label: String<MAX_LABEL_LEN>,
    /// Time between sampling cycles
    pub interval_ms: u32,
    /// Single-ended channels read each cycle
    pub channels: Vec<u8, MAX_CHANNELS>,
    /// Readings averaged per channel per cycle
    pub samples_per_reading: u8,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        let mut label = String::new();
        let _ = label.push_str("ads1x15");
        let mut channels = Vec::new();
        for channel in 0..MAX_CHANNELS as u8 {
            let _ = channels.push(channel);
        }
        Self {
            label,
            interval_ms: 1000,
            channels,
            samples_per_reading: 1,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Format version
    pub version: u8,
    pub adc: AdcConfig,
    pub poll: PollConfig,
    pub sampler: SamplerConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceConfig {
    /// Default configuration: ADS1115 at 0x48, all four channels once a second
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            adc: AdcConfig::default(),
            poll: PollConfig::default(),
            sampler: SamplerConfig::default(),
        }
    }
}
