//! Timed phases
//!
//! A phase is the atomic unit of a routine: a contiguous range of tick
//! counts mapped to one fixed set of actuations and a status signal.

use super::actuation::Actuation;
use crate::status::StatusSignal;

/// Inclusive upper bound of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseBound {
    /// Phase is active up to and including this tick
    Through(u32),
    /// Open-ended terminal phase; reaching it completes the routine
    Terminal,
}

impl PhaseBound {
    /// Check if `tick` falls at or below this bound
    pub const fn covers(self, tick: u32) -> bool {
        match self {
            PhaseBound::Through(last) => tick <= last,
            PhaseBound::Terminal => true,
        }
    }

    /// Last tick covered, or `None` for the terminal bound
    pub const fn last_tick(self) -> Option<u32> {
        match self {
            PhaseBound::Through(last) => Some(last),
            PhaseBound::Terminal => None,
        }
    }
}

/// Status signal reported while a phase runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseSignal {
    /// No signal; leave the indicator untouched
    Silent,
    /// Always show this pattern
    Fixed(StatusSignal),
    /// Pattern chosen by the feedback of the phase's actuations
    Feedback {
        /// Shown once the feedback reports success
        reached: StatusSignal,
        /// Shown while the feedback is still pending
        pending: StatusSignal,
    },
}

impl PhaseSignal {
    /// Resolve the signal for one tick given the actuation feedback
    pub fn resolve(self, feedback: Option<bool>) -> Option<StatusSignal> {
        match self {
            PhaseSignal::Silent => None,
            PhaseSignal::Fixed(signal) => Some(signal),
            PhaseSignal::Feedback { reached, pending } => {
                if feedback == Some(true) {
                    Some(reached)
                } else {
                    Some(pending)
                }
            }
        }
    }
}

/// A timed phase of a routine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase {
    /// Short label for diagnostics
    pub label: &'static str,
    /// Last tick this phase is active for
    pub bound: PhaseBound,
    /// Actuations issued on every tick of the phase, in order
    pub actions: &'static [Actuation],
    /// Status reported after the actuations
    pub signal: PhaseSignal,
}

impl Phase {
    /// Create a bounded phase active through `last_tick`
    pub const fn through(
        label: &'static str,
        last_tick: u32,
        actions: &'static [Actuation],
        signal: PhaseSignal,
    ) -> Self {
        Self {
            label,
            bound: PhaseBound::Through(last_tick),
            actions,
            signal,
        }
    }

    /// Create the open-ended terminal phase
    pub const fn terminal(label: &'static str) -> Self {
        Self {
            label,
            bound: PhaseBound::Terminal,
            actions: &[],
            signal: PhaseSignal::Silent,
        }
    }

    /// Check if reaching this phase completes the routine
    pub const fn is_terminal(&self) -> bool {
        matches!(self.bound, PhaseBound::Terminal)
    }
}
