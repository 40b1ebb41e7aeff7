//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the sampler configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, hex integer, boolean)
//! - [adc], [poll] and [sampler] section headers
//! - Flat integer arrays: channels = [0, 1, 2]
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Inline tables
//! - Dotted keys

use heapless::{String as HString, Vec as HVec};

use super::types::{DeviceConfig, MAX_CHANNELS};
use crate::registers::{DataRate, Gain};
use crate::variant::Variant;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type or out-of-range value
    InvalidValue,
    /// Key not valid in its section
    UnknownKey,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Adc,
    Poll,
    Sampler,
}

/// Parse TOML configuration into DeviceConfig
///
/// Keys not present keep their defaults. The data rate is given in
/// samples per second and resolved against the variant once the whole
/// file has been read, so key order does not matter.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::new();
    let mut section = Section::Root;
    let mut rate_sps: Option<u16> = None;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config, &mut rate_sps)?;
    }

    config.adc.data_rate = match rate_sps {
        Some(sps) => DataRate::from_samples_per_second(config.adc.variant, sps)
            .ok_or(ParseError::InvalidValue)?,
        None => config.adc.variant.default_data_rate(),
    };

    Ok(config)
}

/// Cut a trailing `# comment`, ignoring `#` inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse section header like "adc" or "poll"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "adc" => Ok(Section::Adc),
        "poll" => Ok(Section::Poll),
        "sampler" => Ok(Section::Sampler),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a decimal or 0x-prefixed hexadecimal integer
fn parse_int(value: &str) -> Result<u32, ParseError> {
    let digits = strip_separators(value)?;
    let parsed = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else {
        digits.parse()
    };
    parsed.map_err(|_| ParseError::InvalidValue)
}

/// Narrow a parsed integer, rejecting values that do not fit
fn parse_int_as<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    T::try_from(parse_int(value)?).map_err(|_| ParseError::InvalidValue)
}

/// Drop `_` digit separators (400_000)
fn strip_separators(value: &str) -> Result<HString<16>, ParseError> {
    let mut digits = HString::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    Ok(digits)
}

/// Parse a gain as written on the datasheet: "2/3", 1, 2, 4, 8, 16
fn parse_gain(value: &str) -> Result<Gain, ParseError> {
    match parse_string(value) {
        "2/3" | "two_thirds" => Ok(Gain::TwoThirds),
        "1" | "one" => Ok(Gain::One),
        "2" | "two" => Ok(Gain::Two),
        "4" | "four" => Ok(Gain::Four),
        "8" | "eight" => Ok(Gain::Eight),
        "16" | "sixteen" => Ok(Gain::Sixteen),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a channel list like "[0, 1, 3]"
fn parse_channels(value: &str) -> Result<HVec<u8, MAX_CHANNELS>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut channels = HVec::new();
    for item in inner.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let channel: u8 = parse_int_as(item)?;
        if channel > 3 {
            return Err(ParseError::InvalidValue);
        }
        channels
            .push(channel)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(channels)
}

/// Apply a key-value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
    rate_sps: &mut Option<u16>,
) -> Result<(), ParseError> {
    match section {
        Section::Root => match key {
            "version" => config.version = parse_int_as(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Adc => match key {
            "variant" => {
                config.adc.variant =
                    Variant::from_name(parse_string(value)).ok_or(ParseError::InvalidValue)?;
            }
            "address" => {
                let address: u8 = parse_int_as(value)?;
                if address > 0x7F {
                    return Err(ParseError::InvalidValue);
                }
                config.adc.address = address;
            }
            "gain" => config.adc.gain = parse_gain(value)?,
            "data_rate" => *rate_sps = Some(parse_int_as(value)?),
            "i2c_frequency" => config.adc.i2c_frequency = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Poll => match key {
            "max_polls" => config.poll.max_polls = parse_int_as(value)?,
            "interval_us" => config.poll.interval_us = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Sampler => match key {
            "label" => {
                config.sampler.label =
                    HString::try_from(parse_string(value)).map_err(|_| ParseError::TooManyItems)?;
            }
            "interval_ms" => config.sampler.interval_ms = parse_int(value)?,
            "channels" => config.sampler.channels = parse_channels(value)?,
            "samples_per_reading" => config.sampler.samples_per_reading = parse_int_as(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("adc"), Ok(Section::Adc));
        assert_eq!(parse_section_header(" poll "), Ok(Section::Poll));
        assert_eq!(parse_section_header("sampler"), Ok(Section::Sampler));
        assert_eq!(parse_section_header("stepper"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("72"), Ok(72));
        assert_eq!(parse_int("0x48"), Ok(0x48));
        assert_eq!(parse_int("400_000"), Ok(400_000));
        assert_eq!(parse_int("fast"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int_as::<u8>("300"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_gain() {
        assert_eq!(parse_gain("\"2/3\""), Ok(Gain::TwoThirds));
        assert_eq!(parse_gain("1"), Ok(Gain::One));
        assert_eq!(parse_gain("\"sixteen\""), Ok(Gain::Sixteen));
        assert_eq!(parse_gain("3"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_channels() {
        let channels = parse_channels("[0, 2, 3]").unwrap();
        assert_eq!(channels.as_slice(), &[0, 2, 3]);

        assert_eq!(parse_channels("[4]"), Err(ParseError::InvalidValue));
        assert_eq!(parse_channels("[0, 1, 2, 3, 0]"), Err(ParseError::TooManyItems));
        assert_eq!(parse_channels("0, 1"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
version = 1

[adc]
variant = "ads1015"   # 12-bit part
address = 0x49
gain = "1"
data_rate = 3300
i2c_frequency = 400_000

[poll]
max_polls = 20
interval_us = 100

[sampler]
label = "battery"
interval_ms = 250
channels = [0, 3]
samples_per_reading = 4
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.adc.variant, Variant::Ads1015);
        assert_eq!(config.adc.address, 0x49);
        assert_eq!(config.adc.gain, Gain::One);
        assert_eq!(config.adc.data_rate, DataRate::from_code(6));
        assert_eq!(config.adc.i2c_frequency, 400_000);
        assert_eq!(config.poll.max_polls, 20);
        assert_eq!(config.poll.interval_us, 100);
        assert_eq!(config.sampler.label.as_str(), "battery");
        assert_eq!(config.sampler.interval_ms, 250);
        assert_eq!(config.sampler.channels.as_slice(), &[0, 3]);
        assert_eq!(config.sampler.samples_per_reading, 4);
    }

    #[test]
    fn test_rate_resolved_after_variant() {
        // data_rate before variant still resolves against the ADS1015 table
        let config = parse_config("[adc]\ndata_rate = 1600\nvariant = \"ads1015\"\n").unwrap();
        assert_eq!(config.adc.data_rate, DataRate::from_code(4));

        // 1600 SPS does not exist on the ADS1115
        assert_eq!(
            parse_config("[adc]\ndata_rate = 1600\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_missing_rate_uses_variant_default() {
        let config = parse_config("[adc]\nvariant = \"ads1015\"\n").unwrap();
        assert_eq!(config.adc.data_rate, Variant::Ads1015.default_data_rate());
    }

    #[test]
    fn test_rejects_unknown_keys_and_sections() {
        assert_eq!(
            parse_config("[adc]\ncomparator = true\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse_config("[heater]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[adc]\naddress = 0x80\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[adc]\nvariant\n"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("[adc] # 12-bit part"), "[adc] ");
        assert_eq!(strip_comment("label = \"a#b\" # tag"), "label = \"a#b\" ");
        assert_eq!(strip_comment("# whole line"), "");
        assert_eq!(strip_comment("gain = 1"), "gain = 1");
    }

    #[test]
    fn test_section_header_with_comment() {
        let config = parse_config(
            "[adc] # 12-bit part\nvariant = \"ads1015\"\naddress = 0x49\n  [poll]#budget\nmax_polls = 5\n",
        )
        .unwrap();
        assert_eq!(config.adc.variant, Variant::Ads1015);
        assert_eq!(config.adc.address, 0x49);
        assert_eq!(config.poll.max_polls, 5);
    }

    #[test]
    fn test_hash_inside_label() {
        let config = parse_config("[sampler]\nlabel = \"rail #2\" # note\n").unwrap();
        assert_eq!(config.sampler.label.as_str(), "rail #2");
    }

    #[test]
    fn test_multiline_array_rejected() {
        assert_eq!(
            parse_config("[sampler]\nchannels = [\n  0,\n  1,\n]\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_shipped_firmware_config() {
        let config = parse_config(include_str!("../../../ads1x15-firmware/sampler.toml")).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.adc.variant, Variant::Ads1115);
        assert_eq!(config.adc.address, 0x48);
        assert_eq!(config.adc.gain, Gain::One);
        assert_eq!(config.adc.data_rate, DataRate::from_code(4));
        assert_eq!(config.adc.i2c_frequency, 400_000);
        assert_eq!(config.poll.max_polls, 80);
        assert_eq!(config.poll.interval_us, 250);
        assert_eq!(config.sampler.channels.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(config.sampler.samples_per_reading, 4);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("# nothing here\n\n"), Ok(DeviceConfig::new()));
    }
}
