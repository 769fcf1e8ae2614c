//! NTC thermistor temperature library.
//!
//! Turns one ADC channel wired to a thermistor divider into a temperature,
//! using the Steinhart-Hart or Beta model, and fits either model from
//! calibration points.  Hardware access goes through [`ports::AdcPort`] and
//! `embedded_hal::delay::DelayNs`; the ESP-IDF adapter is guarded by
//! `#[cfg(target_os = "espidf")]`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod error;
pub mod model;
pub mod ports;
pub mod sensors;

pub use config::ThermistorConfig;
pub use error::{CalibrationError, Error, Result, SensorError};
pub use model::calibration::{Calibration, CalibrationPoint};
pub use model::{BetaModel, Formula, SteinhartHart, Temperature, ThermalModel};
pub use sensors::{Connection, SamplingPolicy, TemperatureReading, Thermistor};
