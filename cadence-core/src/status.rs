//! Status signal codes
//!
//! Status signals are integer pattern codes forwarded to the LED
//! controller. They are purely observational: nothing reads them back.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pattern code shown while waiting for pneumatic pressure
pub const WAITING_FOR_PRESSURE: StatusSignal = StatusSignal::new(78);

/// Pattern code shown once a routine has completed
pub const ROUTINE_DONE: StatusSignal = StatusSignal::new(95);

/// Indicator pattern code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusSignal(u8);

impl StatusSignal {
    /// Wrap a raw pattern code
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Raw pattern code
    pub const fn code(self) -> u8 {
        self.0
    }
}

impl From<u8> for StatusSignal {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<StatusSignal> for u8 {
    fn from(signal: StatusSignal) -> Self {
        signal.0
    }
}
