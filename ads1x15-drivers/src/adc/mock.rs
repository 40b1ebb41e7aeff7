//! Register-level ADS1x15 emulation for driver tests

use ads1x15_hal::{BusClock, I2cBus};
use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write(u8, Vec<u8>),
    Read(u8, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

/// Emulates the four registers behind one address
///
/// A config write with the start bit set keeps OS low for `busy_polls`
/// config reads. `fail_writes` spares the empty probe write.
pub struct MockBus {
    pub address: u8,
    pub present: bool,
    pub registers: [u16; 4],
    pub busy_polls: u16,
    pub fail_writes: bool,
    pub fail_reads: bool,
    pub clock: u32,
    pub transactions: Vec<Transaction>,
    pointer: u8,
    remaining_busy: u16,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            address: 0x48,
            present: true,
            registers: [0, 0x8583, 0x8000, 0x7FFF],
            busy_polls: 0,
            fail_writes: false,
            fail_reads: false,
            clock: 100_000,
            transactions: Vec::new(),
            pointer: 0,
            remaining_busy: 0,
        }
    }

    pub fn with_conversion(mut self, raw: u16) -> Self {
        self.registers[0] = raw;
        self
    }

    /// Config words written, in order
    pub fn config_writes(&self) -> Vec<u16> {
        self.register_writes(1)
    }

    pub fn register_writes(&self, pointer: u8) -> Vec<u16> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                Transaction::Write(_, bytes) if bytes.len() == 3 && bytes[0] == pointer => {
                    Some(u16::from_be_bytes([bytes[1], bytes[2]]))
                }
                _ => None,
            })
            .collect()
    }

    /// Number of config register reads (pointer write + 2-byte read)
    pub fn config_reads(&self) -> usize {
        self.transactions
            .windows(2)
            .filter(|w| {
                matches!(&w[0], Transaction::Write(_, b) if b.as_slice() == [1])
                    && matches!(w[1], Transaction::Read(_, 2))
            })
            .count()
    }

    fn current(&mut self) -> u16 {
        let value = self.registers[self.pointer as usize];
        if self.pointer != 1 {
            return value;
        }
        if self.remaining_busy > 0 {
            self.remaining_busy = self.remaining_busy.saturating_sub(1);
            value & !0x8000
        } else {
            value | 0x8000
        }
    }
}

impl I2cBus for MockBus {
    type Error = Nack;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
        self.transactions
            .push(Transaction::Write(address, data.to_vec()));
        if address != self.address || !self.present {
            return Err(Nack);
        }
        if self.fail_writes && !data.is_empty() {
            return Err(Nack);
        }

        match data {
            [] => {}
            [pointer] => self.pointer = pointer & 0x03,
            [pointer, hi, lo] => {
                self.pointer = pointer & 0x03;
                let value = u16::from_be_bytes([*hi, *lo]);
                if self.pointer == 1 {
                    self.remaining_busy = if value & 0x8000 != 0 { self.busy_polls } else { 0 };
                    self.registers[1] = value & !0x8000;
                } else {
                    self.registers[self.pointer as usize] = value;
                }
            }
            _ => return Err(Nack),
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Nack> {
        self.transactions.push(Transaction::Read(address, buffer.len()));
        if address != self.address || !self.present || self.fail_reads {
            return Err(Nack);
        }
        let value = self.current().to_be_bytes();
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = value.get(i).copied().unwrap_or(0);
        }
        Ok(())
    }
}

impl BusClock for MockBus {
    type Error = Nack;

    fn clock_frequency(&self) -> u32 {
        self.clock
    }

    fn set_clock_frequency(&mut self, hz: u32) -> Result<(), Nack> {
        if hz == 0 || hz > 3_400_000 {
            return Err(Nack);
        }
        self.clock = hz;
        Ok(())
    }
}

/// Counts delay calls instead of sleeping
#[derive(Default)]
pub struct MockDelay {
    pub calls: u32,
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }
}
