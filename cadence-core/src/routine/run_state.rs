//! Per-run routine state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of one autonomous run
///
/// Created fresh by every `initialize()` and mutated only by the periodic
/// step. `armed` and `finished` are one-shot latches; `tick_count` never
/// decreases within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutineState {
    armed: bool,
    finished: bool,
    last_tick_us: u64,
    tick_count: u32,
}

impl RoutineState {
    /// Fresh state for a run starting at `now_us`
    pub const fn new(now_us: u64) -> Self {
        Self {
            armed: false,
            finished: false,
            last_tick_us: now_us,
            tick_count: 0,
        }
    }

    /// Pneumatic pressure has been latched
    pub const fn armed(&self) -> bool {
        self.armed
    }

    /// The routine has reached its terminal phase
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Timestamp of the last accepted tick (or of the run start)
    pub const fn last_tick_us(&self) -> u64 {
        self.last_tick_us
    }

    /// Number of accepted ticks so far
    pub const fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Accept a tick at `now_us` and return the new tick count
    pub(crate) fn record_tick(&mut self, now_us: u64) -> u32 {
        self.last_tick_us = now_us;
        self.tick_count = self.tick_count.saturating_add(1);
        self.tick_count
    }

    /// Latch `armed`; returns `true` only on the first call
    pub(crate) fn latch_armed(&mut self) -> bool {
        !core::mem::replace(&mut self.armed, true)
    }

    /// Latch `finished`; returns `true` only on the first call
    pub(crate) fn latch_finished(&mut self) -> bool {
        !core::mem::replace(&mut self.finished, true)
    }
}

impl Default for RoutineState {
    fn default() -> Self {
        Self::new(0)
    }
}
