//! Analog pressure transducer
//!
//! Supply-ratiometric transducer on the pneumatic hub's analog input. The
//! output sits at 10% of supply at 0 psi and rises 0.4% of supply per psi:
//!
//! `psi = 250 * V / Vcc - 25`
//!
//! Working with the raw ADC ratio keeps the conversion independent of the
//! actual supply voltage.

/// Slope of the transfer function (psi per unit supply ratio)
pub const PSI_PER_RATIO: f32 = 250.0;

/// Offset of the transfer function (psi)
pub const PSI_OFFSET: f32 = -25.0;

/// Below this supply ratio the signal line is considered disconnected
pub const MIN_VALID_RATIO: f32 = 0.05;

/// ADC codes within this distance of full scale are a short to supply
const FULL_SCALE_MARGIN: u16 = 10;

/// Pressure sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// ADC conversion failed
    ConversionError,
    /// Signal near ground; sensor unplugged
    Disconnected,
    /// Signal at full scale; signal shorted to supply
    ShortToSupply,
}

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read a raw ADC code (0..full scale)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Source of stored-pressure readings
pub trait PressureSource {
    /// Read the stored pressure in psi
    fn read_psi(&mut self) -> Result<f32, SensorError>;
}

/// Supply-ratiometric analog pressure transducer
pub struct AnalogPressureSensor<ADC> {
    adc: ADC,
    /// ADC code count (4096 for 12-bit)
    adc_max: u16,
}

impl<ADC> AnalogPressureSensor<ADC> {
    /// Create a sensor on a 12-bit ADC channel
    pub fn new(adc: ADC) -> Self {
        Self::with_resolution(adc, 4096)
    }

    /// Create a sensor with an explicit ADC code count
    pub fn with_resolution(adc: ADC, adc_max: u16) -> Self {
        Self { adc, adc_max }
    }

    /// Convert a raw ADC code to psi
    ///
    /// Readings below the 0 psi point are clamped to 0.
    pub fn code_to_psi(&self, code: u16) -> Result<f32, SensorError> {
        if code >= self.adc_max.saturating_sub(FULL_SCALE_MARGIN) {
            return Err(SensorError::ShortToSupply);
        }

        let ratio = f32::from(code) / f32::from(self.adc_max);
        if ratio < MIN_VALID_RATIO {
            return Err(SensorError::Disconnected);
        }

        let psi = PSI_PER_RATIO * ratio + PSI_OFFSET;
        Ok(if psi < 0.0 { 0.0 } else { psi })
    }
}

impl<ADC: AdcReader> PressureSource for AnalogPressureSensor<ADC> {
    fn read_psi(&mut self) -> Result<f32, SensorError> {
        let code = self.adc.read().map_err(|_| SensorError::ConversionError)?;
        self.code_to_psi(code)
    }
}

/// Fixed-code ADC for testing
#[cfg(test)]
pub struct DummyAdc(pub Option<u16>);

#[cfg(test)]
impl AdcReader for DummyAdc {
    fn read(&mut self) -> Result<u16, ()> {
        self.0.ok_or(())
    }
}
