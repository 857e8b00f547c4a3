//! Pneumatic hub
//!
//! Combines the pressure transducer and the status output into the
//! [`Infrastructure`] collaborator. Sensor faults read as 0 psi so a broken
//! transducer holds the routine instead of arming it.

use cadence_core::status::StatusSignal;
use cadence_core::traits::Infrastructure;

use crate::pressure::{PressureSource, SensorError};
use crate::status::{StatusOutput, StatusOutputError};

/// Pneumatic hub with status indicator
pub struct PneumaticHub<P, O> {
    pressure: P,
    status: O,
    last_sensor_error: Option<SensorError>,
    last_status_error: Option<StatusOutputError>,
}

impl<P: PressureSource, O: StatusOutput> PneumaticHub<P, O> {
    /// Create a hub
    pub fn new(pressure: P, status: O) -> Self {
        Self {
            pressure,
            status,
            last_sensor_error: None,
            last_status_error: None,
        }
    }

    /// Error of the most recent pressure read, if it failed
    pub fn last_sensor_error(&self) -> Option<SensorError> {
        self.last_sensor_error
    }

    /// Error of the most recent status write, if it failed
    pub fn last_status_error(&self) -> Option<StatusOutputError> {
        self.last_status_error
    }

    /// The status output
    pub fn status_output(&self) -> &O {
        &self.status
    }

    /// Release the parts
    pub fn release(self) -> (P, O) {
        (self.pressure, self.status)
    }
}

impl<P: PressureSource, O: StatusOutput> Infrastructure for PneumaticHub<P, O> {
    fn pressure_psi(&mut self) -> f32 {
        match self.pressure.read_psi() {
            Ok(psi) => {
                self.last_sensor_error = None;
                psi
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Pressure read failed: {:?}", err);
                self.last_sensor_error = Some(err);
                0.0
            }
        }
    }

    fn set_status_signal(&mut self, signal: StatusSignal) {
        match self.status.show(signal) {
            Ok(()) => self.last_status_error = None,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Status signal {} not shown: {:?}", signal, err);
                self.last_status_error = Some(err);
            }
        }
    }
}
