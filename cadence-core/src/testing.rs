//! Recording test bench shared by the unit tests
//!
//! `&Bench` implements every collaborator trait, so one bench can stand in
//! for all subsystems at once while keeping a single ordered log.

use core::cell::{Cell, RefCell};

use heapless::Vec;

use crate::sequencer::{Actuation, Subsystems};
use crate::status::StatusSignal;
use crate::traits::{Clock, Drive, DriveCommand, Feeder, Infrastructure, Shooter};

pub(crate) const LOG_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Record {
    Act(Actuation),
    Status(StatusSignal),
}

pub(crate) struct Bench {
    log: RefCell<Vec<Record, LOG_CAPACITY>>,
    now_us: Cell<u64>,
    pressure_psi: Cell<f32>,
    turn_reached: Cell<bool>,
}

impl Bench {
    pub(crate) fn new() -> Self {
        Self {
            log: RefCell::new(Vec::new()),
            now_us: Cell::new(0),
            pressure_psi: Cell::new(0.0),
            turn_reached: Cell::new(false),
        }
    }

    pub(crate) fn subsystems(&self) -> Subsystems<&Self, &Self, &Self, &Self> {
        Subsystems::new(self, self, self, self)
    }

    pub(crate) fn set_pressure(&self, psi: f32) {
        self.pressure_psi.set(psi);
    }

    pub(crate) fn set_turn_reached(&self, reached: bool) {
        self.turn_reached.set(reached);
    }

    pub(crate) fn advance_ms(&self, ms: u64) {
        self.now_us.set(self.now_us.get() + ms * 1000);
    }

    pub(crate) fn set_now_us(&self, now_us: u64) {
        self.now_us.set(now_us);
    }

    /// Drain the log
    pub(crate) fn take(&self) -> Vec<Record, LOG_CAPACITY> {
        core::mem::take(&mut *self.log.borrow_mut())
    }

    /// Status signals in the log, in order, without draining it
    pub(crate) fn statuses(&self) -> Vec<u8, LOG_CAPACITY> {
        self.log
            .borrow()
            .iter()
            .filter_map(|record| match record {
                Record::Status(signal) => Some(signal.code()),
                Record::Act(_) => None,
            })
            .collect()
    }

    fn record(&self, record: Record) {
        self.log
            .borrow_mut()
            .push(record)
            .expect("bench log capacity exceeded");
    }

    fn act(&self, actuation: Actuation) {
        self.record(Record::Act(actuation));
    }
}

impl Clock for Bench {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}

impl Drive for &Bench {
    fn drive(&mut self, command: DriveCommand) {
        self.act(Actuation::Drive(command));
    }

    fn reset_drive(&mut self) {
        self.act(Actuation::ResetDrive);
    }

    fn zero_heading(&mut self) {
        self.act(Actuation::ZeroHeading);
    }

    fn set_turn_to_angle(&mut self, angle_deg: f32) -> bool {
        self.act(Actuation::TurnToAngle(angle_deg));
        self.turn_reached.get()
    }
}

impl Feeder for &Bench {
    fn set_default(&mut self, value: f32) {
        self.act(Actuation::FeederDefault(value));
    }

    fn lock_intake(&mut self) {
        self.act(Actuation::LockIntake);
    }

    fn raise_intake(&mut self) {
        self.act(Actuation::RaiseIntake);
    }

    fn lower_intake(&mut self) {
        self.act(Actuation::LowerIntake);
    }

    fn drop_intake(&mut self) {
        self.act(Actuation::DropIntake);
    }

    fn fire(&mut self) {
        self.act(Actuation::Fire);
    }
}

impl Shooter for &Bench {
    fn stop(&mut self) {
        self.act(Actuation::ShooterStop);
    }

    fn set_default(&mut self, speed_fraction: f32, target_rpm: f32) {
        self.act(Actuation::ShooterDefault {
            speed_fraction,
            target_rpm,
        });
    }
}

impl Infrastructure for &Bench {
    fn pressure_psi(&mut self) -> f32 {
        self.pressure_psi.get()
    }

    fn set_status_signal(&mut self, signal: StatusSignal) {
        self.record(Record::Status(signal));
    }
}
