//! Simulated subsystems
//!
//! Minimal plant models for running whole autonomous routines on the host.
//! Each model records the last command it received; the drivetrain also
//! integrates heading so turn-to-angle feedback behaves like the real robot.

use core::cell::Cell;

use cadence_core::sequencer::Subsystems;
use cadence_core::status::StatusSignal;
use cadence_core::traits::{Clock, Drive, DriveCommand, Feeder, Infrastructure, Shooter};
use heapless::HistoryBuffer;

use crate::turn::{wrap_degrees, TurnConfig, TurnController};

/// Number of status changes kept by [`SimInfrastructure`]
pub const STATUS_HISTORY: usize = 16;

/// Fully simulated subsystem set
pub type SimSubsystems = Subsystems<SimDrive, SimFeeder, SimShooter, SimInfrastructure>;

/// Build a simulated subsystem set around a pressure model
pub fn sim_subsystems(infrastructure: SimInfrastructure) -> SimSubsystems {
    Subsystems::new(
        SimDrive::default(),
        SimFeeder::default(),
        SimShooter::default(),
        infrastructure,
    )
}

/// Manually advanced clock
///
/// Shared by reference, so a test can move time while the command owns
/// `&SimClock`.
#[derive(Debug, Default)]
pub struct SimClock {
    now_us: Cell<u64>,
}

impl SimClock {
    /// Create a clock at `now_us`
    pub fn new(now_us: u64) -> Self {
        Self {
            now_us: Cell::new(now_us),
        }
    }

    /// Move time forward
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms.saturating_mul(1000));
    }

    /// Move time forward
    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get().saturating_add(us));
    }

    /// Jump to an absolute time, possibly backwards
    pub fn set_us(&self, now_us: u64) {
        self.now_us.set(now_us);
    }
}

impl Clock for SimClock {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}

/// Simulated drivetrain
#[derive(Debug, Clone)]
pub struct SimDrive {
    heading_deg: f32,
    command: DriveCommand,
    turn: TurnController,
    /// Time one turn update is applied for (s)
    step_s: f32,
    resets: u32,
}

impl Default for SimDrive {
    fn default() -> Self {
        Self::new(TurnConfig::default(), 0.1)
    }
}

impl SimDrive {
    /// Create a drivetrain with a turn controller stepped every `step_s`
    pub fn new(turn: TurnConfig, step_s: f32) -> Self {
        Self {
            heading_deg: 0.0,
            command: DriveCommand::STOP,
            turn: TurnController::new(turn),
            step_s,
            resets: 0,
        }
    }

    /// Current heading (degrees, (-180, 180])
    pub fn heading_deg(&self) -> f32 {
        self.heading_deg
    }

    /// Last velocity command
    pub fn command(&self) -> DriveCommand {
        self.command
    }

    /// Number of drive resets
    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl Drive for SimDrive {
    fn drive(&mut self, command: DriveCommand) {
        self.command = command;
    }

    fn reset_drive(&mut self) {
        self.command = DriveCommand::STOP;
        self.resets += 1;
    }

    fn zero_heading(&mut self) {
        self.heading_deg = 0.0;
    }

    fn set_turn_to_angle(&mut self, angle_deg: f32) -> bool {
        let output = self.turn.update(angle_deg, self.heading_deg);
        self.command = DriveCommand::robot_relative(0.0, 0.0, output.rotation_dps);
        self.heading_deg = wrap_degrees(self.heading_deg + output.rotation_dps * self.step_s);
        output.on_target
    }
}

/// Simulated feeder
#[derive(Debug, Clone, Default)]
pub struct SimFeeder {
    output: f32,
    catches_locked: bool,
    intake_raised: bool,
    shots: u32,
}

impl SimFeeder {
    /// Roller output fraction
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Drop catches are extended
    pub fn catches_locked(&self) -> bool {
        self.catches_locked
    }

    /// Intake arm is up
    pub fn intake_raised(&self) -> bool {
        self.intake_raised
    }

    /// Number of fire commands
    pub fn shots(&self) -> u32 {
        self.shots
    }
}

impl Feeder for SimFeeder {
    fn set_default(&mut self, value: f32) {
        self.output = value;
    }

    fn lock_intake(&mut self) {
        self.catches_locked = true;
    }

    fn raise_intake(&mut self) {
        self.intake_raised = true;
    }

    fn lower_intake(&mut self) {
        self.intake_raised = false;
    }

    fn drop_intake(&mut self) {
        self.catches_locked = false;
    }

    fn fire(&mut self) {
        self.shots += 1;
    }
}

/// Simulated flywheel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimShooter {
    /// Open-loop output fraction
    pub output: f32,
    /// Velocity target (rpm)
    pub target_rpm: f32,
}

impl SimShooter {
    /// Flywheel is commanded to spin
    pub fn spinning(&self) -> bool {
        self.output != 0.0 || self.target_rpm != 0.0
    }
}

impl Shooter for SimShooter {
    fn stop(&mut self) {
        self.output = 0.0;
        self.target_rpm = 0.0;
    }

    fn set_default(&mut self, speed_fraction: f32, target_rpm: f32) {
        self.output = speed_fraction;
        self.target_rpm = target_rpm;
    }
}

/// Simulated compressor and status indicator
///
/// Pressure rises by a fixed step on every read until it reaches the
/// regulator limit.
#[derive(Debug, Clone)]
pub struct SimInfrastructure {
    psi: f32,
    fill_psi_per_read: f32,
    max_psi: f32,
    shown: Option<StatusSignal>,
    changes: HistoryBuffer<StatusSignal, STATUS_HISTORY>,
    signals: u32,
}

impl SimInfrastructure {
    /// Create a model starting at `psi` and filling by `fill_psi_per_read`
    pub fn new(psi: f32, fill_psi_per_read: f32, max_psi: f32) -> Self {
        Self {
            psi,
            fill_psi_per_read,
            max_psi,
            shown: None,
            changes: HistoryBuffer::new(),
            signals: 0,
        }
    }

    /// Tanks already charged to `psi`
    pub fn charged(psi: f32) -> Self {
        Self::new(psi, 0.0, psi)
    }

    /// Current stored pressure
    pub fn psi(&self) -> f32 {
        self.psi
    }

    /// Override the stored pressure, e.g. to model a leak
    pub fn set_psi(&mut self, psi: f32) {
        self.psi = psi;
    }

    /// Pattern currently shown
    pub fn shown(&self) -> Option<StatusSignal> {
        self.shown
    }

    /// Distinct patterns shown, oldest first
    pub fn status_changes(&self) -> impl Iterator<Item = u8> + '_ {
        self.changes.oldest_ordered().map(|signal| signal.code())
    }

    /// Total status writes, including repeats
    pub fn signals(&self) -> u32 {
        self.signals
    }
}

impl Infrastructure for SimInfrastructure {
    fn pressure_psi(&mut self) -> f32 {
        let psi = self.psi;
        self.psi = (self.psi + self.fill_psi_per_read).min(self.max_psi);
        psi
    }

    fn set_status_signal(&mut self, signal: StatusSignal) {
        self.signals += 1;
        if self.shown != Some(signal) {
            self.changes.write(signal);
        }
        self.shown = Some(signal);
    }
}
