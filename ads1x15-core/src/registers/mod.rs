//! ADS1x15 register map and wire framing
//!
//! The chip exposes four 16-bit registers selected through an 8-bit
//! pointer register. All register values travel MSB first.
//!
//! The driver only ever issues two transaction shapes:
//! - 3-byte write: pointer, value high byte, value low byte
//! - 1-byte pointer write followed by a 2-byte read

pub mod config_word;
pub mod fields;

pub use config_word::ConfigWord;
pub use fields::{
    full_scale_for_pga_bits, Ads1015Rate, Ads1115Rate, ComparatorLatch, ComparatorMode,
    ComparatorPolarity, ComparatorQueue, DataRate, DifferentialPair, Gain, Mode, Mux,
};

/// 7-bit address with ADDR tied to GND
pub const DEFAULT_ADDRESS: u8 = SlaveAddress::Gnd.addr();

/// Address selected by the ADDR pin strapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SlaveAddress {
    #[default]
    Gnd = 0x48,
    Vdd = 0x49,
    Sda = 0x4A,
    Scl = 0x4B,
}

impl SlaveAddress {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl From<SlaveAddress> for u8 {
    fn from(address: SlaveAddress) -> u8 {
        address.addr()
    }
}

/// Pointer register codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Last conversion result
    Conversion = 0x00,
    /// Configuration
    Config = 0x01,
    /// Comparator low threshold
    LowThreshold = 0x02,
    /// Comparator high threshold
    HighThreshold = 0x03,
}

impl Register {
    pub const fn pointer(self) -> u8 {
        self as u8
    }
}

/// Build a register write: pointer followed by the big-endian value
pub const fn write_frame(register: Register, value: u16) -> [u8; 3] {
    let [hi, lo] = value.to_be_bytes();
    [register.pointer(), hi, lo]
}

/// Build the pointer write that precedes a register read
pub const fn pointer_frame(register: Register) -> [u8; 1] {
    [register.pointer()]
}

/// Decode the 2 bytes returned by a register read
pub const fn decode_register(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}
