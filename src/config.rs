//! Thermistor configuration parameters
//!
//! Everything about the measurement circuit and the sampling loop that the
//! temperature pipeline needs, apart from the thermistor model itself.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sensors::divider::{Connection, Divider};
use crate::sensors::sampler::SamplingPolicy;

/// Default EMA weight of a new raw sample.
pub const DEFAULT_EMA_ALPHA: f64 = 0.79;
/// Default number of filtered samples per reading.
pub const DEFAULT_NUM_SAMPLES: u8 = 15;
/// Default ADC code count (10-bit converter).
pub const DEFAULT_ADC_MAX: u32 = 1024;

/// Delay between raw samples in microseconds: `prescaler` CPU cycles at
/// `cpu_hz`, i.e. one ADC clock period on an AVR-style converter.
pub const fn adc_clock_delay_us(prescaler: u32, cpu_hz: u32) -> u32 {
    if cpu_hz == 0 {
        return 0;
    }
    ((prescaler as u64 * 1_000_000) / cpu_hz as u64) as u32
}

/// Measurement circuit and sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermistorConfig {
    // --- Divider ---
    /// Known fixed resistor of the divider (ohms)
    pub fixed_resistor_ohms: f64,
    /// ADC full-scale reference voltage (volts)
    pub reference_voltage: f64,
    /// One past the maximum raw ADC code (1024 for 10-bit)
    pub adc_max: u32,
    /// Which leg of the divider the thermistor sits in
    pub connection: Connection,

    // --- Sampler ---
    /// EMA weight of each new raw sample, in (0, 1]
    pub ema_alpha: f64,
    /// Filtered samples taken per reading
    pub num_samples: u8,
    /// Busy-wait between raw samples (microseconds)
    pub sample_delay_us: u32,
    /// Whether the filter restarts on every reading
    pub sampling: SamplingPolicy,
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        Self {
            // Divider
            fixed_resistor_ohms: 10_000.0,
            reference_voltage: 3.3,
            adc_max: DEFAULT_ADC_MAX,
            connection: Connection::Vcc,

            // Sampler
            ema_alpha: DEFAULT_EMA_ALPHA,
            num_samples: DEFAULT_NUM_SAMPLES,
            sample_delay_us: adc_clock_delay_us(128, 16_000_000), // 8 µs
            sampling: SamplingPolicy::Fresh,
        }
    }
}

impl ThermistorConfig {
    /// Reject values that would make the divider math or the filter
    /// meaningless.  Values are never clamped.
    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_resistor_ohms.is_finite() && self.fixed_resistor_ohms > 0.0) {
            return Err(Error::Config("fixed_resistor_ohms must be positive"));
        }
        if !(self.reference_voltage.is_finite() && self.reference_voltage > 0.0) {
            return Err(Error::Config("reference_voltage must be positive"));
        }
        if self.adc_max < 4 {
            return Err(Error::Config("adc_max must be at least 4"));
        }
        if !(self.ema_alpha > 0.0 && self.ema_alpha <= 1.0) {
            return Err(Error::Config("ema_alpha must be in (0, 1]"));
        }
        if self.num_samples == 0 {
            return Err(Error::Config("num_samples must be non-zero"));
        }
        Ok(())
    }

    /// Divider parameters for the resistance estimator.
    pub fn divider(&self) -> Divider {
        Divider {
            fixed_resistor_ohms: self.fixed_resistor_ohms,
            reference_voltage: self.reference_voltage,
            adc_max: self.adc_max,
        }
    }
}
