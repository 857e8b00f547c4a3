//! DIO status-signal output
//!
//! The LED pattern controller listens on a small parallel bus of digital
//! lines. A pattern code is written as an N-bit binary number, bit 0 on the
//! first pin.

use cadence_core::status::StatusSignal;
use embedded_hal::digital::OutputPin;

/// Status output errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusOutputError {
    /// Code needs more bits than there are pins
    CodeTooWide {
        /// The rejected code
        code: u8,
    },
    /// A pin refused to change level
    Pin {
        /// Bit index of the failing pin
        index: u8,
    },
}

/// Sink for status pattern codes
pub trait StatusOutput {
    /// Present `signal` to the pattern controller
    fn show(&mut self, signal: StatusSignal) -> Result<(), StatusOutputError>;
}

/// N-bit parallel status output
pub struct DioStatusSignal<P, const N: usize> {
    pins: [P; N],
    /// Last code successfully written
    shown: Option<StatusSignal>,
}

impl<P: OutputPin, const N: usize> DioStatusSignal<P, N> {
    /// Create an output over `pins`, least significant bit first
    pub fn new(pins: [P; N]) -> Self {
        Self { pins, shown: None }
    }

    /// Largest code representable on this bus
    pub const fn max_code() -> u8 {
        if N >= 8 {
            u8::MAX
        } else {
            ((1u16 << N) - 1) as u8
        }
    }

    /// Last code successfully written
    pub fn shown(&self) -> Option<StatusSignal> {
        self.shown
    }

    /// Release the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> StatusOutput for DioStatusSignal<P, N> {
    fn show(&mut self, signal: StatusSignal) -> Result<(), StatusOutputError> {
        let code = signal.code();
        if code > Self::max_code() {
            return Err(StatusOutputError::CodeTooWide { code });
        }

        // Skip rewriting an unchanged pattern
        if self.shown == Some(signal) {
            return Ok(());
        }

        for (index, pin) in self.pins.iter_mut().enumerate() {
            let high = index < 8 && code & (1 << index) != 0;
            let result = if high { pin.set_high() } else { pin.set_low() };
            result.map_err(|_| StatusOutputError::Pin { index: index as u8 })?;
        }

        self.shown = Some(signal);
        Ok(())
    }
}
