//! Actuation commands and their dispatch onto the subsystems

use crate::status::StatusSignal;
use crate::traits::{Drive, DriveCommand, Feeder, Infrastructure, Shooter};

/// A single command issued to one of the robot subsystems
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actuation {
    /// Command drivetrain velocities
    Drive(DriveCommand),
    /// Reset drivetrain modules
    ResetDrive,
    /// Declare the current heading to be 0°
    ZeroHeading,
    /// Turn in place towards a heading (degrees); reports feedback
    TurnToAngle(f32),
    /// Run the feeder rollers at a fraction of full output
    FeederDefault(f32),
    /// Extend the drop catches
    LockIntake,
    /// Raise the intake arm
    RaiseIntake,
    /// Lower the intake arm
    LowerIntake,
    /// Retract the drop catches
    DropIntake,
    /// Feed the staged ball into the shooter
    Fire,
    /// Stop the flywheel
    ShooterStop,
    /// Spin up the flywheel
    ShooterDefault {
        /// Open-loop output fraction
        speed_fraction: f32,
        /// Closed-loop velocity target
        target_rpm: f32,
    },
}

impl Actuation {
    /// Robot-relative drivetrain stop
    pub const DRIVE_STOP: Self = Actuation::Drive(DriveCommand::STOP);

    /// Check if this actuation reports feedback when applied
    pub fn has_feedback(&self) -> bool {
        matches!(self, Actuation::TurnToAngle(_))
    }
}

/// Neutral actuation issued when a routine starts
pub const INITIALIZE_ACTUATIONS: [Actuation; 7] = [
    Actuation::DRIVE_STOP,
    Actuation::ResetDrive,
    Actuation::ZeroHeading,
    Actuation::FeederDefault(0.0),
    Actuation::LockIntake,
    Actuation::RaiseIntake,
    Actuation::ShooterStop,
];

/// Neutral actuation issued when a routine ends, interrupted or not
pub const END_ACTUATIONS: [Actuation; 3] = [
    Actuation::DRIVE_STOP,
    Actuation::FeederDefault(0.0),
    Actuation::ShooterStop,
];

/// The set of subsystems a routine commands
///
/// Owned exclusively by one autonomous command for the duration of a run.
#[derive(Debug, Clone)]
pub struct Subsystems<D, F, S, I> {
    /// Drivetrain
    pub drive: D,
    /// Intake and elevator
    pub feeder: F,
    /// Flywheel shooter
    pub shooter: S,
    /// Pneumatic hub and status indicator
    pub infrastructure: I,
}

impl<D, F, S, I> Subsystems<D, F, S, I>
where
    D: Drive,
    F: Feeder,
    S: Shooter,
    I: Infrastructure,
{
    /// Bundle the subsystems
    pub const fn new(drive: D, feeder: F, shooter: S, infrastructure: I) -> Self {
        Self {
            drive,
            feeder,
            shooter,
            infrastructure,
        }
    }

    /// Apply one actuation
    ///
    /// Returns the feedback reported by feedback-driven actuations
    /// (`TurnToAngle`), or `None` for plain commands.
    pub fn apply(&mut self, actuation: Actuation) -> Option<bool> {
        match actuation {
            Actuation::Drive(command) => self.drive.drive(command),
            Actuation::ResetDrive => self.drive.reset_drive(),
            Actuation::ZeroHeading => self.drive.zero_heading(),
            Actuation::TurnToAngle(angle_deg) => {
                return Some(self.drive.set_turn_to_angle(angle_deg));
            }
            Actuation::FeederDefault(value) => self.feeder.set_default(value),
            Actuation::LockIntake => self.feeder.lock_intake(),
            Actuation::RaiseIntake => self.feeder.raise_intake(),
            Actuation::LowerIntake => self.feeder.lower_intake(),
            Actuation::DropIntake => self.feeder.drop_intake(),
            Actuation::Fire => self.feeder.fire(),
            Actuation::ShooterStop => self.shooter.stop(),
            Actuation::ShooterDefault {
                speed_fraction,
                target_rpm,
            } => self.shooter.set_default(speed_fraction, target_rpm),
        }
        None
    }

    /// Apply actuations in order
    ///
    /// Returns the feedback of the last feedback-driven actuation, if any.
    pub fn apply_all(&mut self, actuations: &[Actuation]) -> Option<bool> {
        actuations
            .iter()
            .fold(None, |feedback, actuation| self.apply(*actuation).or(feedback))
    }

    /// Forward a status signal to the indicator
    pub fn signal(&mut self, signal: StatusSignal) {
        self.infrastructure.set_status_signal(signal);
    }

    /// Read the stored pneumatic pressure
    pub fn pressure_psi(&mut self) -> f32 {
        self.infrastructure.pressure_psi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Bench, Record};

    #[test]
    fn test_apply_routes_to_subsystem() {
        let bench = Bench::new();
        let mut subsystems = bench.subsystems();

        assert_eq!(subsystems.apply(Actuation::DropIntake), None);
        assert_eq!(
            subsystems.apply(Actuation::ShooterDefault {
                speed_fraction: 1.0,
                target_rpm: 930.0,
            }),
            None
        );

        assert_eq!(
            bench.take().as_slice(),
            &[
                Record::Act(Actuation::DropIntake),
                Record::Act(Actuation::ShooterDefault {
                    speed_fraction: 1.0,
                    target_rpm: 930.0,
                }),
            ]
        );
    }

    #[test]
    fn test_turn_reports_feedback() {
        let bench = Bench::new();
        let mut subsystems = bench.subsystems();

        assert_eq!(subsystems.apply(Actuation::TurnToAngle(180.0)), Some(false));
        bench.set_turn_reached(true);
        assert_eq!(subsystems.apply(Actuation::TurnToAngle(180.0)), Some(true));
    }

    #[test]
    fn test_apply_all_keeps_order_and_feedback() {
        let bench = Bench::new();
        bench.set_turn_reached(true);
        let mut subsystems = bench.subsystems();

        let feedback = subsystems.apply_all(&[
            Actuation::TurnToAngle(90.0),
            Actuation::DRIVE_STOP,
        ]);
        assert_eq!(feedback, Some(true));
        assert_eq!(subsystems.apply_all(&END_ACTUATIONS), None);

        let records = bench.take();
        assert_eq!(records.len(), 2 + END_ACTUATIONS.len());
        assert_eq!(records[0], Record::Act(Actuation::TurnToAngle(90.0)));
        assert_eq!(records[1], Record::Act(Actuation::DRIVE_STOP));
    }

    #[test]
    fn test_neutral_sets() {
        assert!(INITIALIZE_ACTUATIONS.contains(&Actuation::ZeroHeading));
        assert!(INITIALIZE_ACTUATIONS.iter().all(|a| !a.has_feedback()));
        // Ending never re-zeroes the heading
        assert!(!END_ACTUATIONS.contains(&Actuation::ZeroHeading));
        assert!(END_ACTUATIONS.contains(&Actuation::ShooterStop));
    }
}
