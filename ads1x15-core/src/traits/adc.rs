//! Analog input trait and errors

/// Errors from a strict ADC operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError<E> {
    /// Transport error
    Bus(E),
    /// `begin` has not succeeded on this handle
    NotInitialized,
    /// Channel outside 0-3
    InvalidChannel(u8),
    /// Conversion-ready bit never set within the poll budget
    Timeout,
}

impl<E> AdcError<E> {
    /// Check if the error came from the transport
    pub fn is_bus(&self) -> bool {
        matches!(self, AdcError::Bus(_))
    }
}

/// Trait for multi-channel analog inputs
///
/// Implemented by ADC drivers so sampling code can be written once and
/// tested against a fake.
pub trait AnalogInput {
    /// Error type for reads
    type Error;

    /// Read a single-ended channel as signed counts
    ///
    /// Takes `&mut self` because a read drives the bus.
    fn read_counts(&mut self, channel: u8) -> Result<i16, Self::Error>;

    /// Convert counts to volts at the current gain
    fn counts_to_volts(&self, counts: i16) -> f32;

    /// Read a single-ended channel in volts
    fn read_volts(&mut self, channel: u8) -> Result<f32, Self::Error> {
        let counts = self.read_counts(channel)?;
        Ok(self.counts_to_volts(counts))
    }

    /// Mean of `samples` consecutive readings in volts
    ///
    /// Zero samples is treated as one.
    fn read_volts_averaged(&mut self, channel: u8, samples: u8) -> Result<f32, Self::Error> {
        let samples = samples.max(1);
        let mut sum = 0.0f32;
        for _ in 0..samples {
            sum += self.read_volts(channel)?;
        }
        Ok(sum / samples as f32)
    }
}
