//! Inter-task communication channels
//!
//! Defines the static signals used between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use ads1x15_core::sampler::Snapshot;

/// Latest sampling cycle (updated by sampler task)
///
/// A snapshot not yet reported is overwritten by the next one.
pub static SNAPSHOT: Signal<CriticalSectionRawMutex, Snapshot> = Signal::new();
