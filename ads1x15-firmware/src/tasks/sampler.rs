//! ADC sampling task
//!
//! Probes the converter until it answers, then runs one sampling cycle
//! per configured interval and publishes the snapshot.

use defmt::*;
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Ticker, Timer};

use ads1x15_core::sampler::Sampler;
use ads1x15_drivers::Ads1x15;
use ads1x15_hal_rp2040::Rp2040I2c;

use crate::channels::SNAPSHOT;

/// Concrete driver type owned by the task
pub type SamplerAdc = Ads1x15<Rp2040I2c<'static, I2C0>, Delay>;

/// Delay between probes while the converter is missing
const PROBE_RETRY: Duration = Duration::from_secs(2);

#[embassy_executor::task]
pub async fn sampler_task(mut adc: SamplerAdc, mut sampler: Sampler) {
    info!(
        "Sampler task started ({} at {=u8:#x}, {} Hz bus)",
        adc.variant(),
        adc.address(),
        adc.get_clock()
    );

    while !adc.begin() {
        warn!("No ADS1x15 at {=u8:#x}, retrying", adc.address());
        Timer::after(PROBE_RETRY).await;
    }
    info!(
        "ADS1x15 found: gain {}, {} SPS",
        adc.get_gain(),
        adc.get_data_rate().samples_per_second(adc.variant())
    );

    let interval_ms = sampler.config().interval_ms.max(1);
    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        let snapshot = sampler.sample(&mut adc);
        if snapshot.failures() > 0 {
            warn!(
                "Cycle {}: {} of {} channels failed",
                snapshot.sequence,
                snapshot.failures(),
                snapshot.readings.len()
            );
        }
        SNAPSHOT.signal(snapshot);

        ticker.next().await;
    }
}
