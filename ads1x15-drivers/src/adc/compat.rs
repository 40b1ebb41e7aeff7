//! Sentinel API
//!
//! Mirrors the classic Arduino-style ADS1x15 interface: every failure
//! collapses to 0, 0.0 or `false`. Use the `try_` methods on
//! [`Ads1x15`] to tell a real zero reading from a failure.

use ads1x15_core::registers::Mux;
use ads1x15_core::traits::AdcError;
use ads1x15_hal::{BusClock, I2cBus};
use embedded_hal::delay::DelayNs;

use super::ads1x15::Ads1x15;

fn or_sentinel<T, E>(result: Result<T, AdcError<E>>, sentinel: T) -> T {
    match result {
        Ok(value) => value,
        Err(_) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("ADS1x15: request failed, returning sentinel");
            sentinel
        }
    }
}

impl<I2C: I2cBus, D: DelayNs> Ads1x15<I2C, D> {
    /// Probe the device; `true` if it answered
    pub fn begin(&mut self) -> bool {
        self.try_begin().is_ok()
    }

    /// Single-ended read, 0 for a channel above 3 or any failure
    pub fn read_single_ended(&mut self, channel: u8) -> i16 {
        or_sentinel(self.try_read_single_ended(channel), 0)
    }

    /// Legacy differential read
    ///
    /// Keeps the historical channel mapping:
    ///
    /// - 0 and 1: AIN0-AIN1, written without the start bit
    /// - 2: returns 0 without touching the bus
    /// - 3: AIN2-AIN3
    /// - anything else: returns 0
    ///
    /// The result is negated (wrapping, so -32768 stays -32768).
    /// [`Ads1x15::try_read_differential`] has none of these quirks.
    pub fn read_differential(&mut self, channel: i32) -> i16 {
        let word = match channel {
            0 | 1 => self.conversion_word(Mux::DiffP0N1).with_start(false),
            3 => self.conversion_word(Mux::DiffP2N3),
            _ => return 0,
        };
        or_sentinel(self.convert(word).map(i16::wrapping_neg), 0)
    }

    /// Last conversion result, 0 on failure
    pub fn get_last_conversion(&mut self) -> i16 {
        or_sentinel(self.try_get_last_conversion(), 0)
    }

    /// Single-ended read in volts, 0.0 on failure
    ///
    /// Inherent methods win over trait methods, so `adc.read_volts(ch)`
    /// always lands here even with [`AnalogInput`] in scope. Call
    /// `AnalogInput::read_volts(&mut adc, ch)` or [`Ads1x15::try_read_volts`]
    /// for the `Result` form.
    ///
    /// [`AnalogInput`]: ads1x15_core::traits::AnalogInput
    pub fn read_volts(&mut self, channel: u8) -> f32 {
        or_sentinel(self.try_read_volts(channel), 0.0)
    }

    /// `true` once the pending conversion is done, `false` on failure
    pub fn conversion_complete(&mut self) -> bool {
        or_sentinel(self.try_conversion_complete(), false)
    }
}

impl<I2C: BusClock, D> Ads1x15<I2C, D> {
    /// Change the bus clock, ignoring failures
    pub fn set_clock(&mut self, hz: u32) {
        if let Err(_e) = self.try_set_clock(hz) {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADS1x15: bus rejected clock {} Hz", hz);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::mock::{MockBus, MockDelay};
    use ads1x15_core::registers::Gain;
    use ads1x15_core::Variant;

    fn begun(bus: MockBus) -> Ads1x15<MockBus, MockDelay> {
        let mut adc = Ads1x15::new(bus, MockDelay::default(), Variant::Ads1115);
        assert!(adc.begin());
        adc
    }

    #[test]
    fn test_begin_false_without_device() {
        let mut bus = MockBus::new();
        bus.present = false;
        let mut adc = Ads1x15::new_ads1015(bus, MockDelay::default());
        assert!(!adc.begin());
        assert_eq!(adc.read_single_ended(0), 0);
        assert_eq!(adc.read_volts(0), 0.0);
        assert!(!adc.conversion_complete());

        // only the probe went out
        let (bus, _) = adc.release();
        assert_eq!(bus.transactions.len(), 1);
    }

    #[test]
    fn test_not_begun_returns_zero_silently() {
        let mut adc = Ads1x15::new_ads1115(MockBus::new().with_conversion(500), MockDelay::default());
        assert_eq!(adc.read_single_ended(1), 0);
        assert_eq!(adc.read_differential(3), 0);
        assert_eq!(adc.get_last_conversion(), 0);

        let (bus, _) = adc.release();
        assert!(bus.transactions.is_empty());
    }

    #[test]
    fn test_read_single_ended() {
        let mut adc = begun(MockBus::new().with_conversion(1234));
        assert_eq!(adc.read_single_ended(3), 1234);
        assert_eq!(adc.get_last_conversion(), 1234);
    }

    #[test]
    fn test_channel_out_of_range_is_zero() {
        let mut adc = begun(MockBus::new().with_conversion(1234));
        assert_eq!(adc.read_single_ended(4), 0);
        assert_eq!(adc.read_single_ended(255), 0);

        let (bus, _) = adc.release();
        assert_eq!(bus.transactions.len(), 1);
    }

    #[test]
    fn test_differential_channel_two_skips_bus() {
        let mut adc = begun(MockBus::new().with_conversion(1234));
        assert_eq!(adc.read_differential(2), 0);
        assert_eq!(adc.read_differential(4), 0);
        assert_eq!(adc.read_differential(-1), 0);

        let (bus, _) = adc.release();
        assert_eq!(bus.transactions.len(), 1);
    }

    #[test]
    fn test_differential_legacy_words_and_negation() {
        let mut adc = begun(MockBus::new().with_conversion(0x0100));
        assert_eq!(adc.read_differential(0), -256);
        assert_eq!(adc.read_differential(1), -256);
        assert_eq!(adc.read_differential(3), -256);

        let (bus, _) = adc.release();
        // channels 0 and 1 go out without the start bit
        assert_eq!(bus.config_writes(), vec![0x0183, 0x0183, 0xB183]);
    }

    #[test]
    fn test_differential_negation_wraps() {
        let mut adc = begun(MockBus::new().with_conversion(0x8000));
        assert_eq!(adc.read_differential(3), i16::MIN);

        let mut adc = begun(MockBus::new().with_conversion(0xFF00));
        assert_eq!(adc.read_differential(3), 256);
    }

    #[test]
    fn test_timeout_returns_zero() {
        let mut bus = MockBus::new().with_conversion(1234);
        bus.busy_polls = u16::MAX;
        let mut adc = begun(bus);
        adc.set_poll_config(ads1x15_core::config::PollConfig {
            max_polls: 3,
            interval_us: 50,
        });
        assert_eq!(adc.read_single_ended(0), 0);
        assert_eq!(adc.read_differential(3), 0);
    }

    #[test]
    fn test_read_volts() {
        let mut adc = begun(MockBus::new().with_conversion(8000));
        adc.set_gain(Gain::Two);
        let volts = adc.read_volts(0);
        assert!((volts - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_read_volts_resolves_to_sentinel_form() {
        use ads1x15_core::traits::AnalogInput;

        let mut adc = Ads1x15::new_ads1115(MockBus::new().with_conversion(8000), MockDelay::default());
        // method syntax picks the inherent sentinel method
        assert_eq!(adc.read_volts(0), 0.0);
        assert_eq!(
            AnalogInput::read_volts(&mut adc, 0),
            Err(AdcError::NotInitialized)
        );

        assert!(adc.begin());
        adc.set_gain(Gain::Two);
        let via_trait = AnalogInput::read_volts(&mut adc, 0).unwrap();
        assert_eq!(adc.read_volts(0), via_trait);
    }

    #[test]
    fn test_set_clock_ignores_rejection() {
        let mut adc = begun(MockBus::new());
        adc.set_clock(400_000);
        assert_eq!(adc.get_clock(), 400_000);
        adc.set_clock(10_000_000);
        assert_eq!(adc.get_clock(), 400_000);
    }
}
