//! Thermistor models: resistance to absolute temperature.
//!
//! Two model families, chosen explicitly at construction:
//!
//! | Model            | Equation                                   |
//! |------------------|--------------------------------------------|
//! | Steinhart-Hart   | `1/T = A + B·E + C·E² + D·E³`              |
//! | Beta (exact)     | `1/T = E/β + 1/T25`                        |
//! | Beta (fast)      | `T = β·T25 / (β + T25·E)`                  |
//!
//! with `E = ln(R / R_ref)` and `T25 = 298.15 K`.  The fast Beta form is
//! the same curve rearranged to a single division, which is what matters
//! on an MCU without an FPU.

pub mod calibration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, SensorError};

/// 0 °C in Kelvin.
pub const ZERO_CELSIUS_K: f64 = 273.15;
/// 25 °C in Kelvin, the Beta model's reference point.
pub const T25_K: f64 = 298.15;

// ───────────────────────────────────────────────────────────────
// Temperature
// ───────────────────────────────────────────────────────────────

/// Absolute temperature, convertible to the usual scales.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature {
    kelvin: f64,
}

impl Temperature {
    pub const fn from_kelvin(kelvin: f64) -> Self {
        Self { kelvin }
    }

    pub fn from_celsius(celsius: f64) -> Self {
        Self { kelvin: celsius + ZERO_CELSIUS_K }
    }

    pub fn kelvin(self) -> f64 {
        self.kelvin
    }

    pub fn celsius(self) -> f64 {
        self.kelvin - ZERO_CELSIUS_K
    }

    /// Derived from [`celsius`](Self::celsius) with no rounding of its own.
    pub fn fahrenheit(self) -> f64 {
        self.celsius() * 9.0 / 5.0 + 32.0
    }
}

// ───────────────────────────────────────────────────────────────
// Formula selection
// ───────────────────────────────────────────────────────────────

/// Which Beta equation to evaluate.  Steinhart-Hart models have a single
/// equation and ignore this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formula {
    #[default]
    Exact,
    Fast,
}

// ───────────────────────────────────────────────────────────────
// Steinhart-Hart
// ───────────────────────────────────────────────────────────────

/// Cubic Steinhart-Hart coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteinhartHart {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Resistance the logarithm is normalised by.  1 Ω for coefficients
    /// fitted against plain `ln R`.
    pub reference_ohms: f64,
}

impl SteinhartHart {
    /// Four coefficients against `ln(R / reference_ohms)`.
    pub fn new(reference_ohms: f64, a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        let model = Self { a, b, c, d, reference_ohms };
        model.validate()?;
        Ok(model)
    }

    /// Three-term form with no square term (C = 0).
    pub fn without_square(reference_ohms: f64, a: f64, b: f64, d: f64) -> Result<Self> {
        Self::new(reference_ohms, a, b, 0.0, d)
    }

    /// Coefficients fitted against `ln R` with R in ohms.
    pub fn absolute(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        Self::new(1.0, a, b, c, d)
    }

    fn validate(&self) -> Result<()> {
        let coeffs = [self.a, self.b, self.c, self.d];
        let usable = coeffs.iter().all(|v| v.is_finite())
            && coeffs.iter().any(|v| *v != 0.0)
            && self.reference_ohms.is_finite()
            && self.reference_ohms > 0.0;
        if usable { Ok(()) } else { Err(Error::ModelNotConfigured) }
    }

    /// `1/T` for resistance `ohms`.
    pub fn inverse_kelvin(&self, ohms: f64) -> f64 {
        let e = (ohms / self.reference_ohms).ln();
        self.a + self.b * e + self.c * e * e + self.d * e * e * e
    }
}

// ───────────────────────────────────────────────────────────────
// Beta
// ───────────────────────────────────────────────────────────────

/// Single-parameter exponential model around 25 °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaModel {
    pub beta: f64,
    /// Thermistor resistance at 25 °C.
    pub reference_ohms: f64,
}

impl BetaModel {
    pub fn new(reference_ohms: f64, beta: f64) -> Result<Self> {
        let usable = beta.is_finite()
            && beta > 0.0
            && reference_ohms.is_finite()
            && reference_ohms > 0.0;
        if usable {
            Ok(Self { beta, reference_ohms })
        } else {
            Err(Error::ModelNotConfigured)
        }
    }

    /// Resistance the model predicts at `kelvin`.
    pub fn resistance_at(&self, kelvin: f64) -> f64 {
        self.reference_ohms * (self.beta * (1.0 / kelvin - 1.0 / T25_K)).exp()
    }

    pub fn exact_kelvin(&self, ohms: f64) -> f64 {
        let e = (ohms / self.reference_ohms).ln();
        1.0 / (e / self.beta + 1.0 / T25_K)
    }

    pub fn fast_kelvin(&self, ohms: f64) -> f64 {
        let e = (ohms / self.reference_ohms).ln();
        (self.beta * T25_K) / (self.beta + T25_K * e)
    }
}

// ───────────────────────────────────────────────────────────────
// ThermalModel
// ───────────────────────────────────────────────────────────────

/// The model a thermistor evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThermalModel {
    SteinhartHart(SteinhartHart),
    Beta(BetaModel),
}

impl ThermalModel {
    /// Temperature for resistance `ohms`.
    ///
    /// Resistances outside the model's valid span can produce a negative
    /// or infinite absolute temperature; those are reported as
    /// [`SensorError::OutOfRange`].
    pub fn temperature(&self, ohms: f64, formula: Formula) -> Result<Temperature> {
        if !(ohms.is_finite() && ohms > 0.0) {
            return Err(SensorError::OutOfRange.into());
        }
        let kelvin = match (self, formula) {
            (Self::SteinhartHart(sh), _) => 1.0 / sh.inverse_kelvin(ohms),
            (Self::Beta(b), Formula::Exact) => b.exact_kelvin(ohms),
            (Self::Beta(b), Formula::Fast) => b.fast_kelvin(ohms),
        };
        if kelvin.is_finite() && kelvin > 0.0 {
            Ok(Temperature::from_kelvin(kelvin))
        } else {
            Err(SensorError::OutOfRange.into())
        }
    }

    /// Resistance normalising the logarithm.
    pub fn reference_ohms(&self) -> f64 {
        match self {
            Self::SteinhartHart(sh) => sh.reference_ohms,
            Self::Beta(b) => b.reference_ohms,
        }
    }
}

impl From<SteinhartHart> for ThermalModel {
    fn from(m: SteinhartHart) -> Self {
        Self::SteinhartHart(m)
    }
}

impl From<BetaModel> for ThermalModel {
    fn from(m: BetaModel) -> Self {
        Self::Beta(m)
    }
}
