//! Step gating
//!
//! Two gates stand between a scheduler callback and the phase sequencer:
//! the tick gate enforces the fixed cadence, the pressure gate holds the
//! routine until the pneumatics are charged.

mod pressure;
mod tick;

pub use pressure::{Arming, PressureGate, ARM_PRESSURE_PSI};
pub use tick::{TickGate, TICK_INTERVAL_MS};
