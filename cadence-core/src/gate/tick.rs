//! Fixed-cadence tick gate

use crate::routine::RoutineState;

/// Minimum spacing between accepted ticks (ms)
pub const TICK_INTERVAL_MS: u32 = 100;

/// Rate limiter converting scheduler calls into numbered ticks
///
/// The scheduler may call at any rate; only calls at least
/// `interval_ms` after the previous accepted tick get through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickGate {
    interval_ms: u32,
}

impl Default for TickGate {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl TickGate {
    /// Create a gate with the given interval
    pub const fn new(interval_ms: u32) -> Self {
        Self { interval_ms }
    }

    /// Configured interval (ms)
    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Whole milliseconds since the last accepted tick
    ///
    /// A clock reading earlier than the last tick counts as no time elapsed.
    pub fn elapsed_ms(&self, state: &RoutineState, now_us: u64) -> u64 {
        now_us.saturating_sub(state.last_tick_us()) / 1000
    }

    /// Try to accept a tick at `now_us`
    ///
    /// Returns the new tick number, or `None` (leaving `state` untouched)
    /// when the interval has not yet elapsed.
    pub fn poll(&self, state: &mut RoutineState, now_us: u64) -> Option<u32> {
        if self.elapsed_ms(state, now_us) < u64::from(self.interval_ms) {
            return None;
        }

        Some(state.record_tick(now_us))
    }
}
