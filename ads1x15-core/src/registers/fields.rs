//! Config register fields
//!
//! Every multi-valued field of the config register is an enum backed by
//! a single frozen table mapping each variant to its bit pattern. The
//! tables are indexed by the enum discriminant, so adding a variant
//! without a table entry fails to compile.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// Input multiplexer selection (bits 14-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Mux {
    /// Differential P = AIN0, N = AIN1 (power-on default)
    DiffP0N1 = 0,
    /// Differential P = AIN0, N = AIN3
    DiffP0N3 = 1,
    /// Differential P = AIN1, N = AIN3
    DiffP1N3 = 2,
    /// Differential P = AIN2, N = AIN3
    DiffP2N3 = 3,
    /// Single-ended AIN0
    Single0 = 4,
    /// Single-ended AIN1
    Single1 = 5,
    /// Single-ended AIN2
    Single2 = 6,
    /// Single-ended AIN3
    Single3 = 7,
}

const MUX_TABLE: [(Mux, u16); 8] = [
    (Mux::DiffP0N1, 0x0000),
    (Mux::DiffP0N3, 0x1000),
    (Mux::DiffP1N3, 0x2000),
    (Mux::DiffP2N3, 0x3000),
    (Mux::Single0, 0x4000),
    (Mux::Single1, 0x5000),
    (Mux::Single2, 0x6000),
    (Mux::Single3, 0x7000),
];

impl Mux {
    /// Field mask within the config word
    pub const MASK: u16 = 0x7000;

    /// Bit pattern to OR into the config word
    pub const fn bits(self) -> u16 {
        MUX_TABLE[self as usize].1
    }

    /// Decode the mux field of a config word
    pub const fn from_bits(bits: u16) -> Self {
        MUX_TABLE[((bits & Self::MASK) >> 12) as usize].0
    }

    /// Single-ended selector for input `channel` (0-3)
    pub const fn single_ended(channel: u8) -> Option<Self> {
        match channel {
            0 => Some(Mux::Single0),
            1 => Some(Mux::Single1),
            2 => Some(Mux::Single2),
            3 => Some(Mux::Single3),
            _ => None,
        }
    }
}

/// Differential input pairing supported by the multiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DifferentialPair {
    /// AIN0 - AIN1
    A0A1,
    /// AIN0 - AIN3
    A0A3,
    /// AIN1 - AIN3
    A1A3,
    /// AIN2 - AIN3
    A2A3,
}

impl From<DifferentialPair> for Mux {
    fn from(pair: DifferentialPair) -> Self {
        match pair {
            DifferentialPair::A0A1 => Mux::DiffP0N1,
            DifferentialPair::A0A3 => Mux::DiffP0N3,
            DifferentialPair::A1A3 => Mux::DiffP1N3,
            DifferentialPair::A2A3 => Mux::DiffP2N3,
        }
    }
}

/// Programmable gain amplifier setting (bits 11-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Gain {
    /// +/-6.144V range
    TwoThirds = 0,
    /// +/-4.096V range
    One = 1,
    /// +/-2.048V range (power-on default)
    Two = 2,
    /// +/-1.024V range
    Four = 3,
    /// +/-0.512V range
    Eight = 4,
    /// +/-0.256V range
    Sixteen = 5,
}

/// PGA bit pattern and full-scale range for one gain setting
#[derive(Debug, Clone, Copy)]
struct GainEntry {
    gain: Gain,
    bits: u16,
    full_scale_volts: f32,
}

/// Datasheet table 3
const GAIN_TABLE: [GainEntry; 6] = [
    GainEntry {
        gain: Gain::TwoThirds,
        bits: 0x0000,
        full_scale_volts: 6.144,
    },
    GainEntry {
        gain: Gain::One,
        bits: 0x0200,
        full_scale_volts: 4.096,
    },
    GainEntry {
        gain: Gain::Two,
        bits: 0x0400,
        full_scale_volts: 2.048,
    },
    GainEntry {
        gain: Gain::Four,
        bits: 0x0600,
        full_scale_volts: 1.024,
    },
    GainEntry {
        gain: Gain::Eight,
        bits: 0x0800,
        full_scale_volts: 0.512,
    },
    GainEntry {
        gain: Gain::Sixteen,
        bits: 0x0A00,
        full_scale_volts: 0.256,
    },
];

impl Gain {
    /// Field mask within the config word
    pub const MASK: u16 = 0x0E00;

    /// All gain settings, widest range first
    pub const ALL: [Gain; 6] = [
        Gain::TwoThirds,
        Gain::One,
        Gain::Two,
        Gain::Four,
        Gain::Eight,
        Gain::Sixteen,
    ];

    /// Bit pattern to OR into the config word
    pub const fn bits(self) -> u16 {
        GAIN_TABLE[self as usize].bits
    }

    /// Full-scale input range in volts
    pub const fn full_scale_volts(self) -> f32 {
        GAIN_TABLE[self as usize].full_scale_volts
    }

    /// Look up the gain whose PGA pattern is exactly `bits & MASK`
    ///
    /// Codes 0b110 and 0b111 are not in the table and yield `None`.
    pub fn from_bits(bits: u16) -> Option<Self> {
        let field = bits & Self::MASK;
        GAIN_TABLE
            .iter()
            .find(|entry| entry.bits == field)
            .map(|entry| entry.gain)
    }
}

/// Full-scale range for a raw PGA field, 0.0 when the code is not in the table
pub fn full_scale_for_pga_bits(bits: u16) -> f32 {
    Gain::from_bits(bits).map_or(0.0, Gain::full_scale_volts)
}

/// Data rate code (bits 7-5)
///
/// The same code means a different sample rate on each chip; use
/// [`Ads1015Rate`] or [`Ads1115Rate`] to build one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataRate(u8);

const ADS1015_SPS: [u16; 8] = [128, 250, 490, 920, 1600, 2400, 3300, 3300];
const ADS1115_SPS: [u16; 8] = [8, 16, 32, 64, 128, 250, 475, 860];

impl DataRate {
    /// Field mask within the config word
    pub const MASK: u16 = 0x00E0;

    /// Build from a 3-bit code, extra bits are dropped
    pub const fn from_code(code: u8) -> Self {
        Self(code & 0x07)
    }

    /// The 3-bit code
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Bit pattern to OR into the config word
    pub const fn bits(self) -> u16 {
        (self.0 as u16) << 5
    }

    /// Decode the data rate field of a config word
    pub const fn from_bits(bits: u16) -> Self {
        Self(((bits & Self::MASK) >> 5) as u8)
    }

    /// Samples per second this code selects on `variant`
    pub const fn samples_per_second(self, variant: Variant) -> u16 {
        match variant {
            Variant::Ads1015 => ADS1015_SPS[self.0 as usize],
            Variant::Ads1115 => ADS1115_SPS[self.0 as usize],
        }
    }

    /// Find the code that selects exactly `sps` on `variant`
    pub fn from_samples_per_second(variant: Variant, sps: u16) -> Option<Self> {
        let table = match variant {
            Variant::Ads1015 => &ADS1015_SPS,
            Variant::Ads1115 => &ADS1115_SPS,
        };
        table
            .iter()
            .position(|&entry| entry == sps)
            .map(|code| Self(code as u8))
    }
}

/// ADS1015 sample rates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Ads1015Rate {
    Sps128 = 0,
    Sps250 = 1,
    Sps490 = 2,
    Sps920 = 3,
    /// Power-on default
    Sps1600 = 4,
    Sps2400 = 5,
    Sps3300 = 6,
}

/// ADS1115 sample rates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Ads1115Rate {
    Sps8 = 0,
    Sps16 = 1,
    Sps32 = 2,
    Sps64 = 3,
    /// Power-on default
    Sps128 = 4,
    Sps250 = 5,
    Sps475 = 6,
    Sps860 = 7,
}

impl From<Ads1015Rate> for DataRate {
    fn from(rate: Ads1015Rate) -> Self {
        DataRate::from_code(rate as u8)
    }
}

impl From<Ads1115Rate> for DataRate {
    fn from(rate: Ads1115Rate) -> Self {
        DataRate::from_code(rate as u8)
    }
}

/// Conversion mode (bit 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Convert continuously
    Continuous,
    /// One conversion per start bit, then power down
    #[default]
    SingleShot,
}

impl Mode {
    pub const MASK: u16 = 0x0100;

    pub const fn bits(self) -> u16 {
        match self {
            Mode::Continuous => 0x0000,
            Mode::SingleShot => 0x0100,
        }
    }

    pub const fn from_bits(bits: u16) -> Self {
        if bits & Self::MASK != 0 {
            Mode::SingleShot
        } else {
            Mode::Continuous
        }
    }
}

/// Comparator mode (bit 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparatorMode {
    /// Traditional comparator with hysteresis
    #[default]
    Traditional,
    /// Window comparator
    Window,
}

impl ComparatorMode {
    pub const MASK: u16 = 0x0010;

    pub const fn bits(self) -> u16 {
        match self {
            ComparatorMode::Traditional => 0x0000,
            ComparatorMode::Window => 0x0010,
        }
    }

    pub const fn from_bits(bits: u16) -> Self {
        if bits & Self::MASK != 0 {
            ComparatorMode::Window
        } else {
            ComparatorMode::Traditional
        }
    }
}

/// ALERT/RDY pin polarity (bit 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparatorPolarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl ComparatorPolarity {
    pub const MASK: u16 = 0x0008;

    pub const fn bits(self) -> u16 {
        match self {
            ComparatorPolarity::ActiveLow => 0x0000,
            ComparatorPolarity::ActiveHigh => 0x0008,
        }
    }

    pub const fn from_bits(bits: u16) -> Self {
        if bits & Self::MASK != 0 {
            ComparatorPolarity::ActiveHigh
        } else {
            ComparatorPolarity::ActiveLow
        }
    }
}

/// Whether ALERT/RDY latches once asserted (bit 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparatorLatch {
    #[default]
    NonLatching,
    Latching,
}

impl ComparatorLatch {
    pub const MASK: u16 = 0x0004;

    pub const fn bits(self) -> u16 {
        match self {
            ComparatorLatch::NonLatching => 0x0000,
            ComparatorLatch::Latching => 0x0004,
        }
    }

    pub const fn from_bits(bits: u16) -> Self {
        if bits & Self::MASK != 0 {
            ComparatorLatch::Latching
        } else {
            ComparatorLatch::NonLatching
        }
    }
}

/// Comparator queue (bits 1-0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ComparatorQueue {
    /// Assert after one conversion
    One = 0,
    /// Assert after two conversions
    Two = 1,
    /// Assert after four conversions
    Four = 2,
    /// Comparator disabled, ALERT/RDY high
    #[default]
    Disabled = 3,
}

const QUEUE_TABLE: [ComparatorQueue; 4] = [
    ComparatorQueue::One,
    ComparatorQueue::Two,
    ComparatorQueue::Four,
    ComparatorQueue::Disabled,
];

impl ComparatorQueue {
    pub const MASK: u16 = 0x0003;

    pub const fn bits(self) -> u16 {
        self as u16
    }

    pub const fn from_bits(bits: u16) -> Self {
        QUEUE_TABLE[(bits & Self::MASK) as usize]
    }
}
