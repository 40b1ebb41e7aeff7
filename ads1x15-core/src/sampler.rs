//! Periodic multi-channel sampling
//!
//! One sampling cycle reads every configured channel, averaging
//! `samples_per_reading` conversions each, and collects the results into
//! a [`Snapshot`]. A failed channel is recorded and the cycle carries on
//! with the next one.

use heapless::Vec;

use crate::config::{SamplerConfig, MAX_CHANNELS};
use crate::traits::AnalogInput;

/// Result for one channel in a cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelReading {
    pub channel: u8,
    /// Averaged voltage, `None` if any conversion failed
    pub volts: Option<f32>,
}

/// All readings from one sampling cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Cycle counter, wraps
    pub sequence: u32,
    pub readings: Vec<ChannelReading, MAX_CHANNELS>,
}

impl Snapshot {
    /// Number of channels that failed this cycle
    pub fn failures(&self) -> usize {
        self.readings.iter().filter(|r| r.volts.is_none()).count()
    }

    /// Reading for `channel`, if it was sampled
    pub fn get(&self, channel: u8) -> Option<&ChannelReading> {
        self.readings.iter().find(|r| r.channel == channel)
    }
}

/// Runs sampling cycles against an analog input
pub struct Sampler {
    config: SamplerConfig,
    sequence: u32,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            sequence: 0,
        }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Read every configured channel once
    pub fn sample<A: AnalogInput>(&mut self, input: &mut A) -> Snapshot {
        let mut readings = Vec::new();
        for &channel in &self.config.channels {
            let volts = input
                .read_volts_averaged(channel, self.config.samples_per_reading)
                .ok();
            // channels is bounded by the same capacity
            let _ = readings.push(ChannelReading { channel, volts });
        }

        let snapshot = Snapshot {
            sequence: self.sequence,
            readings,
        };
        self.sequence = self.sequence.wrapping_add(1);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::AdcError;

    /// Channel n reads n volts; `broken` always times out
    struct Fixture {
        broken: Option<u8>,
        reads: usize,
    }

    impl AnalogInput for Fixture {
        type Error = AdcError<()>;

        fn read_counts(&mut self, channel: u8) -> Result<i16, Self::Error> {
            self.reads += 1;
            if self.broken == Some(channel) {
                return Err(AdcError::Timeout);
            }
            Ok(channel as i16 * 1000)
        }

        fn counts_to_volts(&self, counts: i16) -> f32 {
            counts as f32 / 1000.0
        }
    }

    fn config(channels: &[u8], samples: u8) -> SamplerConfig {
        let mut config = SamplerConfig::default();
        config.channels = Vec::from_slice(channels).unwrap();
        config.samples_per_reading = samples;
        config
    }

    #[test]
    fn test_samples_each_channel() {
        let mut sampler = Sampler::new(config(&[0, 2, 3], 2));
        let mut input = Fixture {
            broken: None,
            reads: 0,
        };

        let snapshot = sampler.sample(&mut input);
        assert_eq!(snapshot.sequence, 0);
        assert_eq!(snapshot.readings.len(), 3);
        assert_eq!(snapshot.get(2).and_then(|r| r.volts), Some(2.0));
        assert!(snapshot.get(1).is_none());
        assert_eq!(snapshot.failures(), 0);
        assert_eq!(input.reads, 6);
    }

    #[test]
    fn test_failed_channel_does_not_stop_cycle() {
        let mut sampler = Sampler::new(config(&[0, 1, 2], 1));
        let mut input = Fixture {
            broken: Some(1),
            reads: 0,
        };

        let snapshot = sampler.sample(&mut input);
        assert_eq!(snapshot.get(1).map(|r| r.volts), Some(None));
        assert_eq!(snapshot.get(2).and_then(|r| r.volts), Some(2.0));
        assert_eq!(snapshot.failures(), 1);
    }

    #[test]
    fn test_sequence_advances() {
        let mut sampler = Sampler::new(config(&[0], 1));
        let mut input = Fixture {
            broken: None,
            reads: 0,
        };

        assert_eq!(sampler.sample(&mut input).sequence, 0);
        assert_eq!(sampler.sample(&mut input).sequence, 1);

        sampler.sequence = u32::MAX;
        assert_eq!(sampler.sample(&mut input).sequence, u32::MAX);
        assert_eq!(sampler.sample(&mut input).sequence, 0);
    }
}
