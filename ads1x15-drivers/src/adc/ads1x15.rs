//! ADS1015 / ADS1115 I2C driver
//!
//! The converters are driven in single-shot mode: each read writes a
//! config word with the start bit set, polls the config register until
//! the OS bit reads back as 1, then reads the conversion register.
//!
//! # Transactions
//!
//! - Register write: `[pointer, value_hi, value_lo]`
//! - Register read: `[pointer]` write, then a separate 2-byte read
//!
//! Every operation has a strict `try_` form returning [`AdcError`]. The
//! sentinel forms that return 0 on failure live in [`super::compat`].

use ads1x15_core::config::{AdcConfig, PollConfig};
use ads1x15_core::conversion::{compute_volts, decode_conversion, encode_threshold};
use ads1x15_core::registers::{
    decode_register, pointer_frame, write_frame, ComparatorLatch, ComparatorQueue, ConfigWord,
    DataRate, DifferentialPair, Gain, Mode, Mux, Register, DEFAULT_ADDRESS,
};
use ads1x15_core::state::{Event, State};
use ads1x15_core::traits::{AdcError, AnalogInput};
use ads1x15_core::Variant;
use ads1x15_hal::{BusClock, I2cBus};
use embedded_hal::delay::DelayNs;

/// ADS1x15 driver
///
/// Gain and data rate persist across reads until changed. The channel
/// is chosen per read and never stored.
pub struct Ads1x15<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    variant: Variant,
    gain: Gain,
    data_rate: DataRate,
    poll: PollConfig,
    began: bool,
    state: State,
}

impl<I2C, D> Ads1x15<I2C, D> {
    /// Create a driver for `variant` at the default address (0x48)
    ///
    /// Gain and data rate start at the variant's defaults. Call
    /// [`Ads1x15::begin`] or [`Ads1x15::try_begin`] before reading.
    pub fn new(i2c: I2C, delay: D, variant: Variant) -> Self {
        Self {
            i2c,
            delay,
            address: DEFAULT_ADDRESS,
            variant,
            gain: variant.default_gain(),
            data_rate: variant.default_data_rate(),
            poll: PollConfig::default(),
            began: false,
            state: State::Idle,
        }
    }

    /// Create an ADS1015 driver (12-bit, 1600 SPS default)
    pub fn new_ads1015(i2c: I2C, delay: D) -> Self {
        Self::new(i2c, delay, Variant::Ads1015)
    }

    /// Create an ADS1115 driver (16-bit, 128 SPS default)
    pub fn new_ads1115(i2c: I2C, delay: D) -> Self {
        Self::new(i2c, delay, Variant::Ads1115)
    }

    /// Create a driver from loaded configuration
    pub fn from_config(i2c: I2C, delay: D, config: &AdcConfig, poll: PollConfig) -> Self {
        let mut adc = Self::new(i2c, delay, config.variant);
        adc.address = config.address;
        adc.gain = config.gain;
        adc.data_rate = config.data_rate;
        adc.poll = poll;
        adc
    }

    /// Use a different 7-bit address, either a [`SlaveAddress`] strapping
    /// or a raw value
    ///
    /// [`SlaveAddress`]: ads1x15_core::registers::SlaveAddress
    pub fn with_address(mut self, address: impl Into<u8>) -> Self {
        self.address = address.into();
        self
    }

    /// Release the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn set_gain(&mut self, gain: Gain) {
        self.gain = gain;
    }

    pub fn get_gain(&self) -> Gain {
        self.gain
    }

    /// Set the data rate code
    ///
    /// Not checked against the variant; an ADS1115 rate code on an
    /// ADS1015 selects whatever that code means there.
    pub fn set_data_rate(&mut self, rate: impl Into<DataRate>) {
        self.data_rate = rate.into();
    }

    pub fn get_data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// Replace the poll budget used while waiting for conversions
    pub fn set_poll_config(&mut self, poll: PollConfig) {
        self.poll = poll;
    }

    pub fn get_poll_config(&self) -> PollConfig {
        self.poll
    }

    /// Whether the last `begin` found the device
    pub fn is_begun(&self) -> bool {
        self.began
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Where the last conversion request stands
    pub fn state(&self) -> State {
        self.state
    }

    /// Convert counts to volts at the stored gain
    pub fn compute_volts(&self, counts: i16) -> f32 {
        compute_volts(counts, self.gain, self.variant.bit_shift())
    }

    /// Config word for a single-shot conversion on `mux`
    pub fn conversion_word(&self, mux: Mux) -> ConfigWord {
        ConfigWord::single_shot(mux, self.gain, self.data_rate)
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }
}

impl<I2C: I2cBus, D: DelayNs> Ads1x15<I2C, D> {
    /// Probe the device and record whether it answered
    pub fn try_begin(&mut self) -> Result<(), AdcError<I2C::Error>> {
        let result = self.i2c.probe(self.address);
        self.began = result.is_ok();
        self.state = State::Idle;

        #[cfg(feature = "defmt")]
        if !self.began {
            defmt::warn!("ADS1x15: no response at {=u8:#x}", self.address);
        }

        result.map_err(AdcError::Bus)
    }

    /// Read a single-ended channel (0-3) as signed counts
    pub fn try_read_single_ended(&mut self, channel: u8) -> Result<i16, AdcError<I2C::Error>> {
        let mux = Mux::single_ended(channel).ok_or(AdcError::InvalidChannel(channel))?;
        self.convert(self.conversion_word(mux))
    }

    /// Read a differential pairing as signed counts
    pub fn try_read_differential(
        &mut self,
        pair: DifferentialPair,
    ) -> Result<i16, AdcError<I2C::Error>> {
        self.convert(self.conversion_word(pair.into()))
    }

    /// Read a single-ended channel in volts
    pub fn try_read_volts(&mut self, channel: u8) -> Result<f32, AdcError<I2C::Error>> {
        let counts = self.try_read_single_ended(channel)?;
        Ok(self.compute_volts(counts))
    }

    /// Read and decode the conversion register without starting a conversion
    pub fn try_get_last_conversion(&mut self) -> Result<i16, AdcError<I2C::Error>> {
        self.ensure_begun()?;
        let raw = self
            .read_register(Register::Conversion)
            .map_err(AdcError::Bus)?;
        Ok(decode_conversion(raw, self.variant.bit_shift()))
    }

    /// Check the OS bit of the config register
    pub fn try_conversion_complete(&mut self) -> Result<bool, AdcError<I2C::Error>> {
        self.ensure_begun()?;
        let config = self.read_register(Register::Config).map_err(AdcError::Bus)?;
        Ok(ConfigWord::conversion_ready(config))
    }

    /// Start a conversion on `mux` without waiting for it
    ///
    /// In continuous mode the conversion register keeps refreshing;
    /// read it with [`Ads1x15::try_get_last_conversion`].
    pub fn try_start_reading(&mut self, mux: Mux, mode: Mode) -> Result<(), AdcError<I2C::Error>> {
        self.ensure_begun()?;
        let mut word = self.conversion_word(mux);
        word.mode = mode;
        self.write_config(word)
    }

    /// Run the comparator continuously on a single-ended channel
    ///
    /// ALERT/RDY asserts (active low, latching) once a conversion
    /// exceeds `threshold`, given in counts at the variant's resolution.
    pub fn try_start_comparator_single_ended(
        &mut self,
        channel: u8,
        threshold: i16,
    ) -> Result<(), AdcError<I2C::Error>> {
        let mux = Mux::single_ended(channel).ok_or(AdcError::InvalidChannel(channel))?;
        self.ensure_begun()?;

        let mut word = ConfigWord::continuous(mux, self.gain, self.data_rate).with_start(false);
        word.latch = ComparatorLatch::Latching;
        word.queue = ComparatorQueue::One;

        let bit_shift = self.variant.bit_shift();
        self.write_register(Register::HighThreshold, encode_threshold(threshold, bit_shift))
            .map_err(AdcError::Bus)?;
        self.write_config(word)
    }

    /// Write both comparator thresholds, in counts
    pub fn try_set_thresholds(&mut self, low: i16, high: i16) -> Result<(), AdcError<I2C::Error>> {
        self.ensure_begun()?;
        let bit_shift = self.variant.bit_shift();
        self.write_register(Register::LowThreshold, encode_threshold(low, bit_shift))
            .map_err(AdcError::Bus)?;
        self.write_register(Register::HighThreshold, encode_threshold(high, bit_shift))
            .map_err(AdcError::Bus)
    }

    /// Read and decode the live config register
    pub fn try_read_config(&mut self) -> Result<ConfigWord, AdcError<I2C::Error>> {
        self.ensure_begun()?;
        let bits = self.read_register(Register::Config).map_err(AdcError::Bus)?;
        Ok(ConfigWord::from_bits(bits))
    }

    /// Write a config word, wait for the conversion and read it back
    pub(crate) fn convert(&mut self, word: ConfigWord) -> Result<i16, AdcError<I2C::Error>> {
        self.ensure_begun()?;
        self.write_config(word)?;
        self.wait_for_conversion()?;
        self.try_get_last_conversion().inspect_err(|_| self.apply(Event::Abort))
    }

    fn ensure_begun(&self) -> Result<(), AdcError<I2C::Error>> {
        if self.began {
            Ok(())
        } else {
            Err(AdcError::NotInitialized)
        }
    }

    fn write_config(&mut self, word: ConfigWord) -> Result<(), AdcError<I2C::Error>> {
        match self.write_register(Register::Config, word.to_bits()) {
            Ok(()) => {
                self.apply(Event::ConfigWritten);
                Ok(())
            }
            Err(e) => {
                self.apply(Event::Abort);
                Err(AdcError::Bus(e))
            }
        }
    }

    /// Poll the OS bit within the configured budget
    fn wait_for_conversion(&mut self) -> Result<(), AdcError<I2C::Error>> {
        let max_polls = self.poll.max_polls.max(1);

        for attempt in 0..max_polls {
            let config = match self.read_register(Register::Config) {
                Ok(config) => config,
                Err(e) => {
                    self.apply(Event::Abort);
                    return Err(AdcError::Bus(e));
                }
            };

            if ConfigWord::conversion_ready(config) {
                self.apply(Event::PollReady);
                return Ok(());
            }
            self.apply(Event::PollBusy);

            if attempt + 1 < max_polls {
                self.delay.delay_us(self.poll.interval_us);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "ADS1x15 at {=u8:#x}: conversion not ready after {} polls",
            self.address,
            max_polls
        );

        self.apply(Event::Abort);
        Err(AdcError::Timeout)
    }

    fn write_register(&mut self, register: Register, value: u16) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &write_frame(register, value))
    }

    fn read_register(&mut self, register: Register) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write(self.address, &pointer_frame(register))?;
        self.i2c.read(self.address, &mut buf)?;
        Ok(decode_register(buf))
    }
}

impl<I2C: BusClock, D> Ads1x15<I2C, D> {
    /// Current bus clock in Hz
    pub fn get_clock(&self) -> u32 {
        self.i2c.clock_frequency()
    }

    /// Change the bus clock
    pub fn try_set_clock(&mut self, hz: u32) -> Result<(), I2C::Error> {
        self.i2c.set_clock_frequency(hz)
    }
}

impl<I2C: I2cBus, D: DelayNs> AnalogInput for Ads1x15<I2C, D> {
    type Error = AdcError<I2C::Error>;

    fn read_counts(&mut self, channel: u8) -> Result<i16, Self::Error> {
        self.try_read_single_ended(channel)
    }

    fn counts_to_volts(&self, counts: i16) -> f32 {
        self.compute_volts(counts)
    }
}
