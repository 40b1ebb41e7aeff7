//! Build script for ads1x15-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sampler.toml at compile time, first with the same parser
//!   the firmware runs, then with range checks on the full TOML document

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sample rates per variant, indexed by rate code
const ADS1015_RATES: [i64; 8] = [128, 250, 490, 920, 1600, 2400, 3300, 3300];
const ADS1115_RATES: [i64; 8] = [8, 16, 32, 64, 128, 250, 475, 860];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate sampler.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=sampler.toml");

    let config_path = Path::new("sampler.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: sampler.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds sampler.toml from the ads1x15-firmware      ║\n\
            ║  directory. Create one with [adc], [poll] and [sampler].         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read sampler.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    if let Err(e) = ads1x15_core::config::parse_config(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: sampler.toml rejected by the firmware config parser      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  Error: {:<56} ║\n\
            ║                                                                  ║\n\
            ║  The device parser reads one `key = value` per line, with flat   ║\n\
            ║  single-line arrays and the [adc], [poll], [sampler] sections.   ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in sampler.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_layout(&config, &mut errors);
    validate_adc(&config, &mut errors);
    validate_poll(&config, &mut errors);
    validate_sampler(&config, &mut errors);
    report_errors(&errors);

    println!("cargo:warning=sampler.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid sampler configuration                            ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only the sections and keys the firmware parser understands
fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (key, value) in root {
        let allowed: &[&str] = match key.as_str() {
            "version" => continue,
            "adc" => &["variant", "address", "gain", "data_rate", "i2c_frequency"],
            "poll" => &["max_polls", "interval_us"],
            "sampler" => &["label", "interval_ms", "channels", "samples_per_reading"],
            _ => {
                errors.push(format!("unknown section or key '{}'", key));
                continue;
            }
        };

        match value.as_table() {
            Some(table) => {
                for name in table.keys() {
                    if !allowed.contains(&name.as_str()) {
                        errors.push(format!("[{}] unknown key '{}'", key, name));
                    }
                }
            }
            None => errors.push(format!("[{}] must be a table", key)),
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    config.get(name).and_then(|v| v.as_table())
}

fn check_range(
    errors: &mut Vec<String>,
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(_) => errors.push(format!("[{}] {} must be {}-{}", section, key, min, max)),
    }
}

/// Validate the [adc] section
fn validate_adc(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(adc) = section(config, "adc") else {
        return;
    };

    let rates = match adc.get("variant") {
        None => &ADS1115_RATES,
        Some(toml::Value::String(v)) if v == "ads1115" => &ADS1115_RATES,
        Some(toml::Value::String(v)) if v == "ads1015" => &ADS1015_RATES,
        Some(_) => {
            errors.push("[adc] variant must be 'ads1015' or 'ads1115'".to_string());
            &ADS1115_RATES
        }
    };

    check_range(errors, adc, "adc", "address", 0, 0x7F);
    check_range(errors, adc, "adc", "i2c_frequency", 10_000, 3_400_000);

    let gain_ok = match adc.get("gain") {
        None => true,
        Some(toml::Value::String(g)) => [
            "2/3", "1", "2", "4", "8", "16", "two_thirds", "one", "two", "four", "eight",
            "sixteen",
        ]
        .contains(&g.as_str()),
        Some(toml::Value::Integer(g)) => [1, 2, 4, 8, 16].contains(g),
        Some(_) => false,
    };
    if !gain_ok {
        errors.push("[adc] gain must be \"2/3\", 1, 2, 4, 8 or 16".to_string());
    }

    match adc.get("data_rate") {
        None => {}
        Some(toml::Value::Integer(sps)) if rates.contains(sps) => {}
        Some(_) => errors.push(format!("[adc] data_rate must be one of {:?}", rates)),
    }
}

/// Validate the [poll] section
fn validate_poll(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(poll) = section(config, "poll") else {
        return;
    };

    check_range(errors, poll, "poll", "max_polls", 1, u16::MAX as i64);
    check_range(errors, poll, "poll", "interval_us", 50, 1_000_000);
}

/// Validate the [sampler] section
fn validate_sampler(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sampler) = section(config, "sampler") else {
        return;
    };

    if let Some(label) = sampler.get("label") {
        match label.as_str() {
            Some(l) if l.len() <= 16 => {}
            _ => errors.push("[sampler] label must be a string of at most 16 bytes".to_string()),
        }
    }

    check_range(errors, sampler, "sampler", "interval_ms", 1, u32::MAX as i64);
    check_range(errors, sampler, "sampler", "samples_per_reading", 1, 255);

    match sampler.get("channels") {
        None => {}
        Some(toml::Value::Array(channels)) => {
            if channels.len() > 4 {
                errors.push("[sampler] at most 4 channels".to_string());
            }
            for channel in channels {
                match channel {
                    toml::Value::Integer(c) if (0..=3).contains(c) => {}
                    _ => errors.push("[sampler] channels must be 0-3".to_string()),
                }
            }
        }
        Some(_) => errors.push("[sampler] channels must be an array".to_string()),
    }
}
