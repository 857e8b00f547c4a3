//! Pneumatics and indicator trait

use crate::status::StatusSignal;

/// Trait for shared robot infrastructure
///
/// Groups the pneumatic hub (pressure transducer) and the status
/// indicator (LED pattern controller).
pub trait Infrastructure {
    /// Current stored pneumatic pressure in psi
    fn pressure_psi(&mut self) -> f32;

    /// Show a status pattern on the indicator
    fn set_status_signal(&mut self, signal: StatusSignal);
}
