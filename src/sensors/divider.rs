//! Voltage-divider resistance reconstruction.
//!
//! ```text
//!   Gnd:  Vref ── R_fixed ──┬── NTC ── GND       Vcc:  Vref ── NTC ──┬── R_fixed ── GND
//!                           └── ADC                                  └── ADC
//! ```
//!
//! The smoothed reading `v` is in ADC-code units, `0..adc_max`.  The two
//! extreme codes mean the thermistor leg is open or shorted; both are
//! reported as errors instead of infinite or zero resistances.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SensorError};

/// Which leg of the divider the thermistor occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connection {
    /// Thermistor between the ADC node and supply, fixed resistor to ground.
    Vcc,
    /// Thermistor between the ADC node and ground, fixed resistor to supply.
    Gnd,
}

/// Electrical parameters of the divider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    pub fixed_resistor_ohms: f64,
    pub reference_voltage: f64,
    pub adc_max: u32,
}

/// Thermistor resistance in ohms for a smoothed ADC reading.
pub fn ntc_resistance(reading: f64, connection: Connection, divider: &Divider) -> Result<f64> {
    let adc_max = f64::from(divider.adc_max);
    let r_fixed = divider.fixed_resistor_ohms;

    // Readings pinned at either rail leave nothing to divide by.
    let low_rail = reading.is_nan() || reading <= 0.0;
    let high_rail = reading >= adc_max - 1.0;
    if low_rail || high_rail {
        let fault = match (connection, low_rail) {
            (Connection::Gnd, true) | (Connection::Vcc, false) => SensorError::ShortCircuit,
            (Connection::Gnd, false) | (Connection::Vcc, true) => SensorError::Disconnected,
        };
        warn!("divider: reading {reading:.1} of {adc_max} at rail -> {fault}");
        return Err(fault.into());
    }

    let ohms = match connection {
        Connection::Vcc => (adc_max * r_fixed - reading * r_fixed) / reading,
        Connection::Gnd => {
            let vref = divider.reference_voltage;
            let v_node = reading * vref / adc_max;
            v_node / (vref - v_node) * r_fixed
        }
    };

    if ohms.is_finite() && ohms > 0.0 {
        Ok(ohms)
    } else {
        Err(SensorError::OutOfRange.into())
    }
}
