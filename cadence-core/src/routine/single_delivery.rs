//! Single-delivery routine
//!
//! Starts with one preloaded ball: drop the intake into position, back away
//! from the hub while the flywheel spins up, stop, then fire.
//!
//! | ticks | phase               | status |
//! |-------|---------------------|--------|
//! | 1-5   | hold-and-prep       | 79     |
//! | 6-10  | drop-intake         | 80     |
//! | 11-15 | relock-and-lower    | 81     |
//! | 16-35 | retreat-and-spin-up | 82     |
//! | 36-40 | hold-stop           | 83     |
//! | 41-60 | release             | 84     |
//! | 61+   | done                | -      |

use super::{Routine, RoutineKind};
use crate::sequencer::{Actuation, Phase, PhaseSignal, PhaseTable};
use crate::status::StatusSignal;
use crate::traits::DriveCommand;

/// Feeder output while staging the preloaded ball
pub const FEEDER_STAGE_OUTPUT: f32 = 1.0;
/// Reverse speed while backing away from the hub (m/s)
pub const RETREAT_SPEED_MPS: f32 = -0.55;
/// Flywheel open-loop output
pub const SHOOTER_OUTPUT: f32 = 1.0;
/// Flywheel velocity target (rpm)
pub const SHOOTER_TARGET_RPM: f32 = 930.0;

const PHASES: [Phase; 7] = [
    // Sit still and run intake/elevator
    Phase::through(
        "hold-and-prep",
        5,
        &[
            Actuation::DRIVE_STOP,
            Actuation::FeederDefault(FEEDER_STAGE_OUTPUT),
            Actuation::LockIntake,
            Actuation::RaiseIntake,
            Actuation::ShooterStop,
        ],
        PhaseSignal::Fixed(StatusSignal::new(79)),
    ),
    // First ball is preloaded
    Phase::through(
        "drop-intake",
        10,
        &[Actuation::DropIntake],
        PhaseSignal::Fixed(StatusSignal::new(80)),
    ),
    // Re-extend the drop catches
    Phase::through(
        "relock-and-lower",
        15,
        &[Actuation::LockIntake, Actuation::LowerIntake],
        PhaseSignal::Fixed(StatusSignal::new(81)),
    ),
    Phase::through(
        "retreat-and-spin-up",
        35,
        &[
            Actuation::Drive(DriveCommand::robot_relative(RETREAT_SPEED_MPS, 0.0, 0.0)),
            Actuation::FeederDefault(0.0),
            Actuation::ShooterDefault {
                speed_fraction: SHOOTER_OUTPUT,
                target_rpm: SHOOTER_TARGET_RPM,
            },
        ],
        PhaseSignal::Fixed(StatusSignal::new(82)),
    ),
    Phase::through(
        "hold-stop",
        40,
        &[Actuation::DRIVE_STOP],
        PhaseSignal::Fixed(StatusSignal::new(83)),
    ),
    Phase::through(
        "release",
        60,
        &[Actuation::Fire],
        PhaseSignal::Fixed(StatusSignal::new(84)),
    ),
    Phase::terminal("done"),
];

/// Phase table of the single-delivery routine
pub const SINGLE_DELIVERY_TABLE: PhaseTable = PhaseTable::new(&PHASES);

/// Score the preloaded ball after backing off the hub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SingleDelivery;

impl Routine for SingleDelivery {
    fn kind(&self) -> RoutineKind {
        RoutineKind::SingleDelivery
    }

    fn table(&self) -> PhaseTable {
        SINGLE_DELIVERY_TABLE
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::{Bench, Record};

    fn run_tick(tick: u32) -> (bool, heapless::Vec<Record, 64>) {
        let bench = Bench::new();
        let mut subsystems = bench.subsystems();
        let finished = SingleDelivery.iteration(tick, &mut subsystems);
        (finished, bench.take())
    }

    #[test]
    fn test_table_is_valid() {
        assert_eq!(SINGLE_DELIVERY_TABLE.validate(), Ok(()));
        assert_eq!(SINGLE_DELIVERY_TABLE.max_bound(), 60);
        assert_eq!(SINGLE_DELIVERY_TABLE.nominal_duration_ms(100), 6_000);
    }

    #[test]
    fn test_hold_and_prep() {
        for tick in 1..=5 {
            let (finished, records) = run_tick(tick);
            assert!(!finished);
            assert_eq!(
                records.as_slice(),
                &[
                    Record::Act(Actuation::DRIVE_STOP),
                    Record::Act(Actuation::FeederDefault(1.0)),
                    Record::Act(Actuation::LockIntake),
                    Record::Act(Actuation::RaiseIntake),
                    Record::Act(Actuation::ShooterStop),
                    Record::Status(StatusSignal::new(79)),
                ]
            );
        }
    }

    #[test]
    fn test_drop_intake() {
        let (finished, records) = run_tick(6);
        assert!(!finished);
        assert_eq!(
            records.as_slice(),
            &[
                Record::Act(Actuation::DropIntake),
                Record::Status(StatusSignal::new(80)),
            ]
        );
    }

    #[test]
    fn test_retreat_and_spin_up() {
        for tick in [16, 35] {
            let (finished, records) = run_tick(tick);
            assert!(!finished);
            assert_eq!(
                records.as_slice(),
                &[
                    Record::Act(Actuation::Drive(DriveCommand::robot_relative(-0.55, 0.0, 0.0))),
                    Record::Act(Actuation::FeederDefault(0.0)),
                    Record::Act(Actuation::ShooterDefault {
                        speed_fraction: 1.0,
                        target_rpm: 930.0,
                    }),
                    Record::Status(StatusSignal::new(82)),
                ]
            );
        }
    }

    #[test]
    fn test_hold_stop_starts_at_tick_36() {
        let (finished, records) = run_tick(36);
        assert!(!finished);
        assert_eq!(
            records.as_slice(),
            &[
                Record::Act(Actuation::DRIVE_STOP),
                Record::Status(StatusSignal::new(83)),
            ]
        );
    }

    #[test]
    fn test_release_then_done() {
        let (finished, records) = run_tick(60);
        assert!(!finished);
        assert_eq!(
            records.as_slice(),
            &[Record::Act(Actuation::Fire), Record::Status(StatusSignal::new(84))]
        );

        let (finished, records) = run_tick(61);
        assert!(finished);
        assert!(records.is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_tick_fires_exactly_one_phase(tick in 1u32..=61) {
            let (finished, records) = run_tick(tick);
            let statuses = records
                .iter()
                .filter(|record| matches!(record, Record::Status(_)))
                .count();

            if tick <= SINGLE_DELIVERY_TABLE.max_bound() {
                prop_assert!(!finished);
                prop_assert_eq!(statuses, 1);
            } else {
                prop_assert!(finished);
                prop_assert_eq!(statuses, 0);
            }
        }

        #[test]
        fn prop_terminal_is_idempotent(tick in 61u32..=u32::MAX) {
            let (finished, records) = run_tick(tick);
            prop_assert!(finished);
            prop_assert!(records.is_empty());
        }
    }
}
