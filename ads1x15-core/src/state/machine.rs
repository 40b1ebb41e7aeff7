//! Conversion state machine
//!
//! A request moves through config write, polling and result readout.
//! Anything unexpected aborts back to idle.

use super::events::Event;

/// Where the current conversion request stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No request in flight
    #[default]
    Idle,
    /// Config word written, start bit sent
    ConfigWritten,
    /// Device reported busy at least once
    Polling,
    /// Device reported ready, conversion register holds the result
    ResultAvailable,
}

impl State {
    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            // A new config write restarts from any state
            (_, Event::ConfigWritten) => State::ConfigWritten,

            (State::ConfigWritten | State::Polling, Event::PollBusy) => State::Polling,
            (State::ConfigWritten | State::Polling, Event::PollReady) => State::ResultAvailable,

            (_, Event::Abort) => State::Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
