//! Events that trigger run state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Scheduler lifecycle events
    /// Scheduler started the command
    Initialize,
    /// Scheduler ended the command
    End {
        /// Run was cancelled rather than completed
        interrupted: bool,
    },

    // Progress events
    /// Pressure gate latched
    PressureLatched,
    /// Routine reported its terminal phase
    RoutineFinished,
}

impl Event {
    /// Check if this event comes from the scheduler
    pub fn is_lifecycle_event(&self) -> bool {
        matches!(self, Event::Initialize | Event::End { .. })
    }

    /// Check if this event comes from the periodic step
    pub fn is_progress_event(&self) -> bool {
        matches!(self, Event::PressureLatched | Event::RoutineFinished)
    }
}
