//! Drivetrain trait
//!
//! The drivetrain accepts holonomic velocity commands and exposes a
//! feedback-driven turn helper used by the reorientation routine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Velocity command for a holonomic drivetrain
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveCommand {
    /// Forward velocity (m/s, negative drives backwards)
    pub forward_mps: f32,
    /// Strafe velocity (m/s, positive to the left)
    pub strafe_mps: f32,
    /// Angular velocity (deg/s, counter-clockwise positive)
    pub rotation_dps: f32,
    /// Interpret velocities relative to the field instead of the robot
    pub field_relative: bool,
}

impl DriveCommand {
    /// Robot-relative stop
    pub const STOP: Self = Self::robot_relative(0.0, 0.0, 0.0);

    /// Create a robot-relative command
    pub const fn robot_relative(forward_mps: f32, strafe_mps: f32, rotation_dps: f32) -> Self {
        Self {
            forward_mps,
            strafe_mps,
            rotation_dps,
            field_relative: false,
        }
    }

    /// Check if every velocity component is zero
    pub fn is_stop(&self) -> bool {
        self.forward_mps == 0.0 && self.strafe_mps == 0.0 && self.rotation_dps == 0.0
    }
}

impl Default for DriveCommand {
    fn default() -> Self {
        Self::STOP
    }
}

/// Trait for the drivetrain subsystem
pub trait Drive {
    /// Command the drivetrain velocities
    fn drive(&mut self, command: DriveCommand);

    /// Reset module state (encoders, odometry) to a known idle condition
    fn reset_drive(&mut self);

    /// Declare the current heading to be 0°
    fn zero_heading(&mut self);

    /// Rotate in place towards `angle_deg`
    ///
    /// Must be called every control cycle until it returns `true`, which
    /// signals the heading is within tolerance of the target.
    fn set_turn_to_angle(&mut self, angle_deg: f32) -> bool;
}
