//! Chip variants
//!
//! The ADS1015 and ADS1115 share a register map. They differ in
//! resolution (the ADS1015 left-justifies a 12-bit result) and in what
//! each data rate code means.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::registers::{Ads1015Rate, Ads1115Rate, DataRate, Gain};

/// Supported chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    /// 12-bit, up to 3300 SPS
    Ads1015,
    /// 16-bit, up to 860 SPS
    #[default]
    Ads1115,
}

impl Variant {
    /// Right shift applied to the conversion register
    pub const fn bit_shift(self) -> u8 {
        match self {
            Variant::Ads1015 => 4,
            Variant::Ads1115 => 0,
        }
    }

    /// Gain a freshly constructed driver starts with
    pub const fn default_gain(self) -> Gain {
        Gain::TwoThirds
    }

    /// Data rate a freshly constructed driver starts with
    pub const fn default_data_rate(self) -> DataRate {
        match self {
            Variant::Ads1015 => DataRate::from_code(Ads1015Rate::Sps1600 as u8),
            Variant::Ads1115 => DataRate::from_code(Ads1115Rate::Sps128 as u8),
        }
    }

    /// Nominal time for one conversion at `rate`, in microseconds
    pub const fn conversion_time_us(self, rate: DataRate) -> u32 {
        let sps = rate.samples_per_second(self) as u32;
        1_000_000_u32.div_ceil(sps)
    }

    /// Parse a lowercase chip name ("ads1015" / "ads1115")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ads1015" => Some(Variant::Ads1015),
            "ads1115" => Some(Variant::Ads1115),
            _ => None,
        }
    }
}
