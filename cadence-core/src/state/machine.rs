//! Run state machine
//!
//! Tracks where one autonomous run is in its lifecycle. The command drives
//! it from lifecycle calls and gate outcomes; actuation never depends on
//! anything but the current state and the routine state.

use super::events::Event;

/// Run states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed, never initialized
    #[default]
    Idle,
    /// Initialized; ticking while the pneumatics charge
    AwaitingPressure,
    /// Armed; walking the phase table
    Running,
    /// Terminal phase reached; waiting for the scheduler to end the run
    Finished,
    /// Run ended by the scheduler; outputs are neutral
    Ended(EndReason),
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndReason {
    /// Scheduler ended the run normally
    Completed,
    /// Scheduler cancelled the run
    Interrupted,
}

impl EndReason {
    /// Map the scheduler's `interrupted` flag
    pub const fn from_interrupted(interrupted: bool) -> Self {
        if interrupted {
            EndReason::Interrupted
        } else {
            EndReason::Completed
        }
    }
}

impl State {
    /// Check if periodic steps should run
    pub fn is_active(&self) -> bool {
        matches!(self, State::AwaitingPressure | State::Running)
    }

    /// Check if the pressure latch has been set in this run
    pub fn is_armed(&self) -> bool {
        matches!(self, State::Running | State::Finished)
    }

    /// Check if the routine reached its terminal phase
    pub fn is_finished(&self) -> bool {
        matches!(self, State::Finished)
    }

    /// Check if the scheduler has ended the run
    pub fn is_ended(&self) -> bool {
        matches!(self, State::Ended(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Initialize always starts a fresh run
            (_, Initialize) => AwaitingPressure,

            (AwaitingPressure, PressureLatched) => Running,

            (Running, RoutineFinished) => Finished,

            (AwaitingPressure | Running | Finished, End { interrupted }) => {
                Ended(EndReason::from_interrupted(interrupted))
            }

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_run() {
        let state = State::Idle.transition(Event::Initialize);
        assert_eq!(state, State::AwaitingPressure);

        let state = state.transition(Event::PressureLatched);
        assert_eq!(state, State::Running);

        let state = state.transition(Event::RoutineFinished);
        assert_eq!(state, State::Finished);

        let state = state.transition(Event::End { interrupted: false });
        assert_eq!(state, State::Ended(EndReason::Completed));
    }

    #[test]
    fn test_interrupt_from_any_active_state() {
        for state in [State::AwaitingPressure, State::Running, State::Finished] {
            let next = state.transition(Event::End { interrupted: true });
            assert_eq!(next, State::Ended(EndReason::Interrupted));
        }
    }

    #[test]
    fn test_initialize_restarts_from_anywhere() {
        let states = [
            State::Idle,
            State::AwaitingPressure,
            State::Running,
            State::Finished,
            State::Ended(EndReason::Interrupted),
        ];

        for state in states {
            assert_eq!(state.transition(Event::Initialize), State::AwaitingPressure);
        }
    }

    #[test]
    fn test_out_of_order_events_ignored() {
        assert_eq!(State::Idle.transition(Event::PressureLatched), State::Idle);
        assert_eq!(State::Idle.transition(Event::End { interrupted: true }), State::Idle);
        assert_eq!(
            State::AwaitingPressure.transition(Event::RoutineFinished),
            State::AwaitingPressure
        );
        assert_eq!(State::Running.transition(Event::PressureLatched), State::Running);

        let ended = State::Ended(EndReason::Completed);
        assert_eq!(ended.transition(Event::End { interrupted: true }), ended);
    }

    #[test]
    fn test_state_predicates() {
        assert!(State::AwaitingPressure.is_active());
        assert!(State::Running.is_active());
        assert!(!State::Finished.is_active());
        assert!(!State::Idle.is_active());

        assert!(State::Running.is_armed());
        assert!(State::Finished.is_armed());
        assert!(!State::AwaitingPressure.is_armed());

        assert!(State::Finished.is_finished());
        assert!(State::Ended(EndReason::Completed).is_ended());
    }
}
