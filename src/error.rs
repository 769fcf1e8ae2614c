//! Unified error types for the thermistor library.
//!
//! A single `Error` enum that every stage of the pipeline converts into,
//! so callers of a temperature query handle one type.  All variants are
//! `Copy`; none of them are retried internally, the caller decides whether
//! to abort, retry after a delay, or report a stale reading.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The divider reading cannot be turned into a resistance or temperature.
    Sensor(SensorError),
    /// Calibration points could not produce model parameters.
    Calibration(CalibrationError),
    /// A temperature was requested before usable coefficients were set.
    ModelNotConfigured,
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Calibration(e) => write!(f, "calibration: {e}"),
            Self::ModelNotConfigured => write!(f, "thermistor model not configured"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Thermistor leg reads as an open circuit (resistance would be infinite).
    Disconnected,
    /// Thermistor leg reads as a short (resistance would be zero).
    ShortCircuit,
    /// Resistance or temperature came out non-finite or non-physical.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "thermistor disconnected"),
            Self::ShortCircuit => write!(f, "thermistor short circuit"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Calibration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// Points share (nearly) the same log-resistance or temperature, so the
    /// linear system has no unique solution.
    Singular,
    /// A point has a non-positive resistance, a temperature at or below
    /// absolute zero, or a non-finite value.
    InvalidPoint,
    /// Only 2, 3 or 4 points can be fitted.
    PointCount(usize),
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular => write!(f, "singular calibration points"),
            Self::InvalidPoint => write!(f, "invalid calibration point"),
            Self::PointCount(n) => write!(f, "{n} points given, expected 2 to 4"),
        }
    }
}

impl From<CalibrationError> for Error {
    fn from(e: CalibrationError) -> Self {
        Self::Calibration(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
