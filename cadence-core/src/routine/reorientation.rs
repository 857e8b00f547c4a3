//! Reorientation routine
//!
//! Spins the robot to face the opposite direction, then re-zeroes odometry
//! and the gyro so teleop starts from the new heading. The turn is commanded
//! every tick until tick 39 whether or not the heading is already reached;
//! reaching it early never shortens the schedule.

use super::{Routine, RoutineKind};
use crate::sequencer::{Actuation, Phase, PhaseSignal, PhaseTable};
use crate::status::StatusSignal;

/// Heading commanded while turning (degrees)
pub const TARGET_HEADING_DEG: f32 = 180.0;

const PHASES: [Phase; 3] = [
    Phase::through(
        "rotate-to-target",
        39,
        &[Actuation::TurnToAngle(TARGET_HEADING_DEG)],
        PhaseSignal::Feedback {
            reached: StatusSignal::new(80),
            pending: StatusSignal::new(79),
        },
    ),
    Phase::through(
        "settle",
        40,
        &[
            Actuation::DRIVE_STOP,
            Actuation::ResetDrive,
            Actuation::ZeroHeading,
        ],
        PhaseSignal::Fixed(StatusSignal::new(81)),
    ),
    Phase::terminal("done"),
];

/// Phase table of the reorientation routine
pub const REORIENTATION_TABLE: PhaseTable = PhaseTable::new(&PHASES);

/// Turn around in place and re-zero heading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reorientation;

impl Routine for Reorientation {
    fn kind(&self) -> RoutineKind {
        RoutineKind::Reorientation
    }

    fn table(&self) -> PhaseTable {
        REORIENTATION_TABLE
    }
}
