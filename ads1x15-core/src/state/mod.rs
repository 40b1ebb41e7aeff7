//! Conversion request state machine
//!
//! `Idle → ConfigWritten → Polling → ResultAvailable`. The machine is
//! explicit, finite and deterministic; the driver feeds it bus events.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
