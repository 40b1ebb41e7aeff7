//! Events that trigger state transitions

/// Bus-level milestones of a conversion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Config register written
    ConfigWritten,
    /// Config register read back with OS = 0
    PollBusy,
    /// Config register read back with OS = 1
    PollReady,
    /// Bus error or poll timeout
    Abort,
}
