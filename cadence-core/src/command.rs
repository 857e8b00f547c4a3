//! Autonomous command
//!
//! Binds a routine to its collaborators and the scheduler lifecycle. Each
//! `execute()` call passes through the tick gate, then the pressure gate,
//! and only then runs exactly one phase of the routine.

use crate::config::{ConfigError, SequencerConfig};
use crate::gate::{Arming, PressureGate, TickGate};
use crate::routine::{AnyRoutine, Routine, RoutineKind, RoutineState};
use crate::sequencer::{Phase, Subsystems, TableError, END_ACTUATIONS, INITIALIZE_ACTUATIONS};
use crate::state::{Event, State};
use crate::traits::{Clock, Drive, Feeder, Infrastructure, Shooter};

/// Scheduler-facing lifecycle of a command
pub trait Lifecycle {
    /// Start a run: neutral outputs, fresh routine state
    fn initialize(&mut self);

    /// Periodic step; safe to call at any rate
    fn execute(&mut self);

    /// Stop the run and return outputs to neutral
    fn end(&mut self, interrupted: bool);

    /// Check if the scheduler may end the command
    fn is_finished(&self) -> bool;
}

/// Errors building a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// Configuration rejected
    Config(ConfigError),
    /// Routine table rejected
    Table(TableError),
    /// Routine does not match the configured routine kind
    RoutineMismatch {
        /// Kind named in the configuration
        configured: RoutineKind,
        /// Kind of the routine supplied
        supplied: RoutineKind,
    },
}

impl From<ConfigError> for SetupError {
    fn from(err: ConfigError) -> Self {
        SetupError::Config(err)
    }
}

impl From<TableError> for SetupError {
    fn from(err: TableError) -> Self {
        SetupError::Table(err)
    }
}

/// Tick-gated autonomous command
pub struct AutonomousCommand<R, C, D, F, S, I> {
    routine: R,
    clock: C,
    subsystems: Subsystems<D, F, S, I>,
    config: SequencerConfig,
    tick_gate: TickGate,
    pressure_gate: PressureGate,
    routine_state: RoutineState,
    state: State,
}

impl<C, D, F, S, I> AutonomousCommand<AnyRoutine, C, D, F, S, I>
where
    C: Clock,
    D: Drive,
    F: Feeder,
    S: Shooter,
    I: Infrastructure,
{
    /// Build the routine named by `config`
    pub fn from_config(
        clock: C,
        subsystems: Subsystems<D, F, S, I>,
        config: SequencerConfig,
    ) -> Result<Self, SetupError> {
        Self::try_new(config.routine.build(), clock, subsystems, config)
    }
}

impl<R, C, D, F, S, I> AutonomousCommand<R, C, D, F, S, I>
where
    R: Routine,
    C: Clock,
    D: Drive,
    F: Feeder,
    S: Shooter,
    I: Infrastructure,
{
    /// Create a command without validating the configuration
    pub fn new(
        routine: R,
        clock: C,
        subsystems: Subsystems<D, F, S, I>,
        config: SequencerConfig,
    ) -> Self {
        Self {
            routine,
            clock,
            subsystems,
            tick_gate: config.tick_gate(),
            pressure_gate: config.pressure_gate(),
            config,
            routine_state: RoutineState::default(),
            state: State::Idle,
        }
    }

    /// Create a command, validating the configuration and routine table
    pub fn try_new(
        routine: R,
        clock: C,
        subsystems: Subsystems<D, F, S, I>,
        config: SequencerConfig,
    ) -> Result<Self, SetupError> {
        if routine.kind() != config.routine {
            return Err(SetupError::RoutineMismatch {
                configured: config.routine,
                supplied: routine.kind(),
            });
        }
        config.validate()?;
        routine.table().validate()?;

        Ok(Self::new(routine, clock, subsystems, config))
    }

    /// The routine being run
    pub fn routine(&self) -> &R {
        &self.routine
    }

    /// The clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The commanded subsystems
    pub fn subsystems(&self) -> &Subsystems<D, F, S, I> {
        &self.subsystems
    }

    /// Mutable access to the subsystems, e.g. to advance a simulation
    pub fn subsystems_mut(&mut self) -> &mut Subsystems<D, F, S, I> {
        &mut self.subsystems
    }

    /// Active configuration
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Current run state
    pub fn state(&self) -> State {
        self.state
    }

    /// Current routine state
    pub fn routine_state(&self) -> &RoutineState {
        &self.routine_state
    }

    /// Phase that ran on the latest tick, once armed
    pub fn current_phase(&self) -> Option<&'static Phase> {
        if !self.routine_state.armed() || self.routine_state.tick_count() == 0 {
            return None;
        }
        self.routine.table().phase_for(self.routine_state.tick_count())
    }

    /// Release the routine and collaborators
    pub fn into_parts(self) -> (R, C, Subsystems<D, F, S, I>) {
        (self.routine, self.clock, self.subsystems)
    }

    fn apply_event(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next != self.state {
            #[cfg(feature = "defmt")]
            defmt::debug!("State: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

impl<R, C, D, F, S, I> Lifecycle for AutonomousCommand<R, C, D, F, S, I>
where
    R: Routine,
    C: Clock,
    D: Drive,
    F: Feeder,
    S: Shooter,
    I: Infrastructure,
{
    fn initialize(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("Autonomous {=str}: initialize", self.routine.kind().name());

        self.subsystems.apply_all(&INITIALIZE_ACTUATIONS);
        self.routine_state = RoutineState::new(self.clock.now_us());
        self.apply_event(Event::Initialize);
    }

    fn execute(&mut self) {
        if !self.state.is_active() {
            return;
        }

        let now_us = self.clock.now_us();
        let Some(tick) = self.tick_gate.poll(&mut self.routine_state, now_us) else {
            return;
        };

        let psi = self.subsystems.pressure_psi();
        match self.pressure_gate.check(&mut self.routine_state, psi) {
            Arming::Waiting => {
                self.subsystems.signal(self.config.waiting_status);
                return;
            }
            Arming::Latched => {
                #[cfg(feature = "defmt")]
                defmt::info!("Pressure latched at tick {} ({} psi)", tick, psi);
                self.apply_event(Event::PressureLatched);
            }
            Arming::Armed => {}
        }

        if self.routine.iteration(tick, &mut self.subsystems) {
            #[cfg(feature = "defmt")]
            defmt::info!("Autonomous finished at tick {}", tick);

            self.subsystems.signal(self.config.done_status);
            self.routine_state.latch_finished();
            self.apply_event(Event::RoutineFinished);
        }
    }

    fn end(&mut self, interrupted: bool) {
        #[cfg(feature = "defmt")]
        defmt::info!("Autonomous end (interrupted: {})", interrupted);

        self.subsystems.apply_all(&END_ACTUATIONS);
        self.apply_event(Event::End { interrupted });
    }

    fn is_finished(&self) -> bool {
        self.routine_state.finished()
    }
}
