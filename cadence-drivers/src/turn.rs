//! Proportional turn-to-angle controller
//!
//! Implements the call-until-true turn contract of
//! [`Drive::set_turn_to_angle`](cadence_core::traits::Drive::set_turn_to_angle):
//! every control cycle the drivetrain asks for a rotation rate and learns
//! whether the heading is inside tolerance.

/// Default proportional gain (deg/s per degree of error)
pub const DEFAULT_KP: f32 = 4.0;

/// Default rotation rate limit (deg/s)
pub const DEFAULT_MAX_RATE_DPS: f32 = 270.0;

/// Default on-target tolerance (degrees)
pub const DEFAULT_TOLERANCE_DEG: f32 = 2.0;

/// One controller update
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurnOutput {
    /// Commanded rotation rate (deg/s, counter-clockwise positive)
    pub rotation_dps: f32,
    /// Heading is within tolerance of the target
    pub on_target: bool,
}

/// Turn controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurnConfig {
    /// Proportional gain (deg/s per degree)
    pub kp: f32,
    /// Rotation rate limit (deg/s)
    pub max_rate_dps: f32,
    /// On-target tolerance (degrees)
    pub tolerance_deg: f32,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            kp: DEFAULT_KP,
            max_rate_dps: DEFAULT_MAX_RATE_DPS,
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
        }
    }
}

/// Proportional heading controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurnController {
    config: TurnConfig,
}

impl TurnController {
    /// Create a controller
    pub fn new(config: TurnConfig) -> Self {
        Self { config }
    }

    /// Controller configuration
    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    /// Signed shortest-path error from `current_deg` to `target_deg`
    ///
    /// Result is in (-180, 180].
    pub fn heading_error(target_deg: f32, current_deg: f32) -> f32 {
        wrap_degrees(target_deg - current_deg)
    }

    /// Compute the rotation command for the current heading
    ///
    /// Inside tolerance the command is zero so the robot settles.
    pub fn update(&self, target_deg: f32, current_deg: f32) -> TurnOutput {
        let error = Self::heading_error(target_deg, current_deg);

        if error.abs() <= self.config.tolerance_deg {
            return TurnOutput {
                rotation_dps: 0.0,
                on_target: true,
            };
        }

        let limit = self.config.max_rate_dps.abs();
        let rate = (self.config.kp * error).clamp(-limit, limit);
        TurnOutput {
            rotation_dps: rate,
            on_target: false,
        }
    }
}

/// Wrap an angle into (-180, 180]
pub fn wrap_degrees(angle_deg: f32) -> f32 {
    if !angle_deg.is_finite() {
        return 0.0;
    }

    // Coarse reduction first so large inputs don't loop
    let turns = (angle_deg / 360.0) as i32;
    let mut wrapped = angle_deg - 360.0 * turns as f32;
    while wrapped > 180.0 {
        wrapped -= 360.0;
    }
    while wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}
