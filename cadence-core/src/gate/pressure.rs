//! One-shot pneumatic pressure latch

use crate::routine::RoutineState;

/// Stored pressure required before any phase runs (psi)
pub const ARM_PRESSURE_PSI: f32 = 75.0;

/// Outcome of a pressure check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arming {
    /// Not yet armed; hold the routine
    Waiting,
    /// Threshold crossed on this check
    Latched,
    /// Armed on an earlier check
    Armed,
}

impl Arming {
    /// Check if the routine may proceed
    pub const fn may_proceed(self) -> bool {
        !matches!(self, Arming::Waiting)
    }
}

/// Pressure threshold latch
///
/// Once armed, the run stays armed regardless of later readings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureGate {
    threshold_psi: f32,
}

impl Default for PressureGate {
    fn default() -> Self {
        Self::new(ARM_PRESSURE_PSI)
    }
}

impl PressureGate {
    /// Create a gate with the given threshold
    pub const fn new(threshold_psi: f32) -> Self {
        Self { threshold_psi }
    }

    /// Configured threshold (psi)
    pub const fn threshold_psi(&self) -> f32 {
        self.threshold_psi
    }

    /// Evaluate a pressure reading against the latch
    ///
    /// NaN readings never arm.
    pub fn check(&self, state: &mut RoutineState, psi: f32) -> Arming {
        if state.armed() {
            return Arming::Armed;
        }

        if psi >= self.threshold_psi && state.latch_armed() {
            Arming::Latched
        } else {
            Arming::Waiting
        }
    }
}
