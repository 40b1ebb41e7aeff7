//! Reading report task

use defmt::*;
use heapless::String;

use ads1x15_core::config::MAX_LABEL_LEN;

use crate::channels::SNAPSHOT;

#[embassy_executor::task]
pub async fn report_task(label: String<MAX_LABEL_LEN>) {
    info!("Report task started");

    loop {
        let snapshot = SNAPSHOT.wait().await;

        for reading in &snapshot.readings {
            match reading.volts {
                Some(volts) => info!(
                    "[{}] #{} AIN{}: {} V",
                    label.as_str(),
                    snapshot.sequence,
                    reading.channel,
                    volts
                ),
                None => warn!(
                    "[{}] #{} AIN{}: read failed",
                    label.as_str(),
                    snapshot.sequence,
                    reading.channel
                ),
            }
        }
    }
}
