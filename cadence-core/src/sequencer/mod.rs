//! Phase sequencer
//!
//! Maps the tick counter of a run onto an ordered table of timed phases
//! and dispatches each phase's actuations onto the robot subsystems.

pub mod actuation;
pub mod phase;
pub mod table;

pub use actuation::{Actuation, Subsystems, END_ACTUATIONS, INITIALIZE_ACTUATIONS};
pub use phase::{Phase, PhaseBound, PhaseSignal};
pub use table::{PhaseTable, TableError};
