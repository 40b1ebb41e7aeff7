//! ADC driver implementations

pub mod ads1x15;
pub mod compat;

#[cfg(test)]
pub(crate) mod mock;

pub use ads1x15::Ads1x15;
