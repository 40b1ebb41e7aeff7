//! Config register word
//!
//! ```text
//!  15 │ 14 13 12 │ 11 10 9 │  8   │ 7 6 5 │    4     │    3     │    2    │ 1 0
//!  OS │   MUX    │   PGA   │ MODE │  DR   │ COMP_MODE│ COMP_POL │ COMP_LAT│ QUE
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fields::{
    ComparatorLatch, ComparatorMode, ComparatorPolarity, ComparatorQueue, DataRate, Gain, Mode,
    Mux,
};

/// Decoded config register
///
/// Assembled per request and never stored by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigWord {
    /// Write: start a single conversion. Read: device idle.
    pub start: bool,
    pub mux: Mux,
    pub gain: Gain,
    pub mode: Mode,
    pub data_rate: DataRate,
    pub comparator_mode: ComparatorMode,
    pub polarity: ComparatorPolarity,
    pub latch: ComparatorLatch,
    pub queue: ComparatorQueue,
}

impl Default for ConfigWord {
    /// Power-on reset value (0x8583)
    fn default() -> Self {
        Self {
            start: true,
            mux: Mux::DiffP0N1,
            gain: Gain::Two,
            mode: Mode::SingleShot,
            data_rate: DataRate::from_code(4),
            comparator_mode: ComparatorMode::Traditional,
            polarity: ComparatorPolarity::ActiveLow,
            latch: ComparatorLatch::NonLatching,
            queue: ComparatorQueue::Disabled,
        }
    }
}

impl ConfigWord {
    /// Operational status / single-shot start bit
    pub const OS_MASK: u16 = 0x8000;

    /// Single-shot request with the comparator disabled
    ///
    /// Non-latching, active-low, traditional comparator and queue
    /// disabled, which are also the chip defaults.
    pub const fn single_shot(mux: Mux, gain: Gain, data_rate: DataRate) -> Self {
        Self {
            start: true,
            mux,
            gain,
            mode: Mode::SingleShot,
            data_rate,
            comparator_mode: ComparatorMode::Traditional,
            polarity: ComparatorPolarity::ActiveLow,
            latch: ComparatorLatch::NonLatching,
            queue: ComparatorQueue::Disabled,
        }
    }

    /// Continuous conversion with the comparator disabled
    pub const fn continuous(mux: Mux, gain: Gain, data_rate: DataRate) -> Self {
        let mut word = Self::single_shot(mux, gain, data_rate);
        word.mode = Mode::Continuous;
        word
    }

    /// Same word with the start bit set or cleared
    pub const fn with_start(mut self, start: bool) -> Self {
        self.start = start;
        self
    }

    /// Encode to the 16-bit register value
    pub const fn to_bits(&self) -> u16 {
        let os = if self.start { Self::OS_MASK } else { 0 };
        os | self.mux.bits()
            | self.gain.bits()
            | self.mode.bits()
            | self.data_rate.bits()
            | self.comparator_mode.bits()
            | self.polarity.bits()
            | self.latch.bits()
            | self.queue.bits()
    }

    /// Decode a 16-bit register value
    ///
    /// PGA codes 0b110 and 0b111 alias the 0.256V range and decode as
    /// [`Gain::Sixteen`].
    pub fn from_bits(bits: u16) -> Self {
        Self {
            start: bits & Self::OS_MASK != 0,
            mux: Mux::from_bits(bits),
            gain: Gain::from_bits(bits).unwrap_or(Gain::Sixteen),
            mode: Mode::from_bits(bits),
            data_rate: DataRate::from_bits(bits),
            comparator_mode: ComparatorMode::from_bits(bits),
            polarity: ComparatorPolarity::from_bits(bits),
            latch: ComparatorLatch::from_bits(bits),
            queue: ComparatorQueue::from_bits(bits),
        }
    }

    /// Whether a config register read reports the conversion as done
    pub const fn conversion_ready(bits: u16) -> bool {
        bits & Self::OS_MASK != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::fields::{Ads1015Rate, Ads1115Rate};
    use proptest::prelude::*;

    #[test]
    fn test_power_on_default() {
        assert_eq!(ConfigWord::default().to_bits(), 0x8583);
        assert_eq!(ConfigWord::from_bits(0x8583), ConfigWord::default());
    }

    #[test]
    fn test_single_shot_word() {
        let word = ConfigWord::single_shot(Mux::Single0, Gain::TwoThirds, Ads1115Rate::Sps128.into());
        // OS | MUX_SINGLE_0 | PGA_6_144V | MODE_SINGLE | DR 128 | CQUE_NONE
        assert_eq!(word.to_bits(), 0x8000 | 0x4000 | 0x0000 | 0x0100 | 0x0080 | 0x0003);
    }

    #[test]
    fn test_continuous_clears_mode_bit() {
        let word = ConfigWord::continuous(Mux::Single3, Gain::One, Ads1015Rate::Sps3300.into());
        assert_eq!(word.to_bits() & Mode::MASK, 0);
        assert_eq!(word.to_bits() & Mux::MASK, 0x7000);
    }

    #[test]
    fn test_with_start() {
        let word = ConfigWord::default().with_start(false);
        assert_eq!(word.to_bits(), 0x0583);
        assert!(!ConfigWord::conversion_ready(word.to_bits()));
        assert!(ConfigWord::conversion_ready(0x8000));
    }

    #[test]
    fn test_aliased_pga_decodes_as_sixteen() {
        assert_eq!(ConfigWord::from_bits(0x0C00).gain, Gain::Sixteen);
        assert_eq!(ConfigWord::from_bits(0x0E00).gain, Gain::Sixteen);
    }

    proptest! {
        #[test]
        fn prop_decode_encode_is_identity_outside_aliased_pga(bits in any::<u16>()) {
            let pga = (bits & Gain::MASK) >> 9;
            prop_assume!(pga < 6);
            prop_assert_eq!(ConfigWord::from_bits(bits).to_bits(), bits);
        }

        #[test]
        fn prop_gain_lands_only_in_pga_field(index in 0usize..6, mux in 0u8..8, rate in 0u8..8) {
            let gain = Gain::ALL[index];
            let word = ConfigWord::single_shot(
                Mux::from_bits((mux as u16) << 12),
                gain,
                DataRate::from_code(rate),
            );
            prop_assert_eq!(word.to_bits() & Gain::MASK, gain.bits());
            prop_assert_eq!(ConfigWord::from_bits(word.to_bits()).gain, gain);
        }
    }
}
