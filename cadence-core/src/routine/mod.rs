//! Autonomous routines
//!
//! A routine is a phase table plus an identity. Routines share the lifecycle
//! and gating machinery in [`crate::command`]; only the table differs.

mod reorientation;
mod run_state;
mod single_delivery;

pub use reorientation::{Reorientation, REORIENTATION_TABLE, TARGET_HEADING_DEG};
pub use run_state::RoutineState;
pub use single_delivery::{
    SingleDelivery, FEEDER_STAGE_OUTPUT, RETREAT_SPEED_MPS, SHOOTER_OUTPUT, SHOOTER_TARGET_RPM,
    SINGLE_DELIVERY_TABLE,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencer::{PhaseTable, Subsystems};
use crate::traits::{Drive, Feeder, Infrastructure, Shooter};

/// One autonomous strategy
pub trait Routine {
    /// Which strategy this is
    fn kind(&self) -> RoutineKind;

    /// The routine's phase table
    fn table(&self) -> PhaseTable;

    /// Run one step at `tick` (1-based)
    ///
    /// Returns `true` when the routine is complete.
    fn iteration<D, F, S, I>(&mut self, tick: u32, subsystems: &mut Subsystems<D, F, S, I>) -> bool
    where
        D: Drive,
        F: Feeder,
        S: Shooter,
        I: Infrastructure,
    {
        self.table().run(tick, subsystems)
    }
}

/// Selectable routine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoutineKind {
    /// Back off the hub and score the preloaded ball
    #[default]
    SingleDelivery,
    /// Turn around and re-zero heading
    Reorientation,
}

impl RoutineKind {
    /// Every selectable routine
    pub const ALL: [RoutineKind; 2] = [RoutineKind::SingleDelivery, RoutineKind::Reorientation];

    /// Short name for dashboards and logs
    pub const fn name(self) -> &'static str {
        match self {
            RoutineKind::SingleDelivery => "single-delivery",
            RoutineKind::Reorientation => "reorientation",
        }
    }

    /// Instantiate the routine
    pub const fn build(self) -> AnyRoutine {
        match self {
            RoutineKind::SingleDelivery => AnyRoutine::SingleDelivery(SingleDelivery),
            RoutineKind::Reorientation => AnyRoutine::Reorientation(Reorientation),
        }
    }
}

/// Routine chosen at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnyRoutine {
    /// See [`SingleDelivery`]
    SingleDelivery(SingleDelivery),
    /// See [`Reorientation`]
    Reorientation(Reorientation),
}

impl Routine for AnyRoutine {
    fn kind(&self) -> RoutineKind {
        match self {
            AnyRoutine::SingleDelivery(routine) => routine.kind(),
            AnyRoutine::Reorientation(routine) => routine.kind(),
        }
    }

    fn table(&self) -> PhaseTable {
        match self {
            AnyRoutine::SingleDelivery(routine) => routine.table(),
            AnyRoutine::Reorientation(routine) => routine.table(),
        }
    }

    fn iteration<D, F, S, I>(&mut self, tick: u32, subsystems: &mut Subsystems<D, F, S, I>) -> bool
    where
        D: Drive,
        F: Feeder,
        S: Shooter,
        I: Infrastructure,
    {
        match self {
            AnyRoutine::SingleDelivery(routine) => routine.iteration(tick, subsystems),
            AnyRoutine::Reorientation(routine) => routine.iteration(tick, subsystems),
        }
    }
}

impl From<RoutineKind> for AnyRoutine {
    fn from(kind: RoutineKind) -> Self {
        kind.build()
    }
}
