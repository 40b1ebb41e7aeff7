//! Hardware abstraction traits
//!
//! These traits define the interface between sampling logic and
//! converter drivers.

pub mod adc;

pub use adc::{AdcError, AnalogInput};
