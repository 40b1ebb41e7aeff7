//! ADS1x15 sampler firmware
//!
//! Main firmware binary for RP2040 boards with an ADS1015 or ADS1115
//! on I2C0. Periodically samples the configured channels and logs the
//! voltages over defmt.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::I2c;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use ads1x15_core::config::{parse_config, DeviceConfig};
use ads1x15_core::sampler::Sampler;
use ads1x15_drivers::Ads1x15;
use ads1x15_hal_rp2040::{controller_config, validate_pins, I2cConfig, I2cId, Rp2040I2c};

/// Embedded configuration (compiled into firmware)
/// Edit sampler.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../sampler.toml");

/// QWIIC connector pins on I2C0
const SDA_GPIO: u8 = 4;
const SCL_GPIO: u8 = 5;

mod channels;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ADS1x15 sampler starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    if validate_pins(SDA_GPIO, SCL_GPIO) != Some(I2cId::I2c0) {
        error!("GPIO{}/GPIO{} are not an I2C0 pair", SDA_GPIO, SCL_GPIO);
    }

    let requested = I2cConfig {
        frequency: config.adc.i2c_frequency,
    };
    let bus_config = if requested.is_supported() {
        requested
    } else {
        warn!(
            "I2C clock {} Hz outside the ADS1x15 range, using default",
            requested.frequency
        );
        I2cConfig::default()
    };

    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_5, // SCL
        p.PIN_4, // SDA
        controller_config(bus_config),
    );
    let bus = Rp2040I2c::new(i2c, bus_config);
    let adc = Ads1x15::from_config(bus, Delay, &config.adc, config.poll);
    info!("I2C0 initialized at {} Hz", bus_config.frequency);

    let label = config.sampler.label.clone();
    let sampler = Sampler::new(config.sampler);

    info!("Spawning tasks...");
    spawner.spawn(unwrap!(tasks::report_task(label)));
    spawner.spawn(unwrap!(tasks::sampler_task(adc, sampler)));
    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// build.rs runs the same parser over the same file, so a firmware
/// that built never takes the fallback branch.
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded configuration (version {})", config.version);
            config
        }
        Err(e) => {
            warn!("Invalid embedded configuration ({}), using defaults", e);
            DeviceConfig::new()
        }
    }
}
