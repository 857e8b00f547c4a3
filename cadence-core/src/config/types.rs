//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gate::{PressureGate, TickGate, ARM_PRESSURE_PSI, TICK_INTERVAL_MS};
use crate::routine::{Routine, RoutineKind};
use crate::sequencer::PhaseSignal;
use crate::status::{StatusSignal, ROUTINE_DONE, WAITING_FOR_PRESSURE};

/// Configuration rejected by [`SequencerConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick interval of zero would accept every call
    ZeroTickInterval,
    /// Arm pressure is NaN, infinite, or not positive
    InvalidArmPressure,
    /// Two roles share one status code
    StatusCollision {
        /// The shared code
        code: u8,
    },
}

/// Sequencer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequencerConfig {
    /// Minimum spacing between ticks (ms)
    pub tick_interval_ms: u32,
    /// Stored pressure that arms the routine (psi)
    pub arm_pressure_psi: f32,
    /// Shown while waiting for pressure
    pub waiting_status: StatusSignal,
    /// Shown once when the routine finishes
    pub done_status: StatusSignal,
    /// Routine to run
    pub routine: RoutineKind,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            arm_pressure_psi: ARM_PRESSURE_PSI,
            waiting_status: WAITING_FOR_PRESSURE,
            done_status: ROUTINE_DONE,
            routine: RoutineKind::default(),
        }
    }
}

impl SequencerConfig {
    /// Default configuration running `routine`
    pub fn for_routine(routine: RoutineKind) -> Self {
        Self {
            routine,
            ..Self::default()
        }
    }

    /// Tick gate for this configuration
    pub const fn tick_gate(&self) -> TickGate {
        TickGate::new(self.tick_interval_ms)
    }

    /// Pressure gate for this configuration
    pub const fn pressure_gate(&self) -> PressureGate {
        PressureGate::new(self.arm_pressure_psi)
    }

    /// Check the configuration for values that would break a run
    ///
    /// The waiting and done codes must differ from each other and from every
    /// code the selected routine shows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if !self.arm_pressure_psi.is_finite() || self.arm_pressure_psi <= 0.0 {
            return Err(ConfigError::InvalidArmPressure);
        }

        if self.waiting_status == self.done_status {
            return Err(ConfigError::StatusCollision {
                code: self.done_status.code(),
            });
        }

        let table = self.routine.build().table();
        for phase in table.phases() {
            let (first, second) = match phase.signal {
                PhaseSignal::Silent => (None, None),
                PhaseSignal::Fixed(signal) => (Some(signal), None),
                PhaseSignal::Feedback { reached, pending } => (Some(reached), Some(pending)),
            };

            for signal in [first, second].into_iter().flatten() {
                if signal == self.waiting_status || signal == self.done_status {
                    return Err(ConfigError::StatusCollision {
                        code: signal.code(),
                    });
                }
            }
        }

        Ok(())
    }
}
