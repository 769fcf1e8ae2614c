//! Coefficient calibration from measured (temperature, resistance) pairs.
//!
//! Everything is fitted in log-resistance space:
//!
//! ```text
//!   L_i = ln(R_i)        Y_i = 1 / T_i   (Kelvin)
//!   Y   = A + B·L + C·L² + D·L³
//! ```
//!
//! Each run produces both a Beta model (β averaged over adjacent pairs,
//! R25 averaged over every point) and Steinhart-Hart coefficients.  The
//! Steinhart-Hart coefficients are against plain `ln R`, so the model they
//! build uses a 1 Ω reference (see [`SteinhartHart::absolute`]).
//!
//! Points should be ordered by temperature.  Coincident or nearly
//! coincident log-resistances, or coincident temperatures, make the system
//! singular and are rejected.

use heapless::Vec;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{BetaModel, SteinhartHart, T25_K, ZERO_CELSIUS_K};
use crate::error::{CalibrationError, Result};

/// Most points any fit uses.
pub const MAX_POINTS: usize = 4;

/// Two log-resistances closer than this are the same point.
const MIN_LOG_SEPARATION: f64 = 1e-9;
/// Two log-resistances closer than this fraction of the span of `ln R` are
/// the same point.
const MIN_RELATIVE_LOG_SEPARATION: f64 = 1e-4;
/// Two calibration temperatures closer than this (K) are the same point.
const MIN_KELVIN_SEPARATION: f64 = 1e-6;
/// Relative size below which a fit's determinant counts as zero.
const MIN_RELATIVE_DETERMINANT: f64 = 1e-12;

/// One datasheet row or bench measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub celsius: f64,
    pub ohms: f64,
}

impl CalibrationPoint {
    pub const fn new(celsius: f64, ohms: f64) -> Self {
        Self { celsius, ohms }
    }

    pub fn kelvin(&self) -> f64 {
        self.celsius + ZERO_CELSIUS_K
    }
}

/// Up to four calibration points without allocation.
pub type CalibrationSet = Vec<CalibrationPoint, MAX_POINTS>;

/// Output of a calibration run.  The caller picks which model to use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub beta: f64,
    pub reference_ohms_25c: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Calibration {
    pub fn beta_model(&self) -> Result<BetaModel> {
        BetaModel::new(self.reference_ohms_25c, self.beta)
    }

    pub fn steinhart_hart_model(&self) -> Result<SteinhartHart> {
        SteinhartHart::absolute(self.a, self.b, self.c, self.d)
    }
}

// ───────────────────────────────────────────────────────────────
// Entry points
// ───────────────────────────────────────────────────────────────

/// Fit whatever the number of points supports: 2 → Beta only,
/// 3 → Beta + A,B,D (C = 0), 4 → Beta + A,B,C,D.
pub fn calibrate(points: &[CalibrationPoint]) -> Result<Calibration> {
    match points {
        [p1, p2] => two_point(&[*p1, *p2]),
        [p1, p2, p3] => three_point(&[*p1, *p2, *p3]),
        [p1, p2, p3, p4] => four_point(&[*p1, *p2, *p3, *p4]),
        _ => Err(CalibrationError::PointCount(points.len()).into()),
    }
}

/// Beta and R25 from two points.  The Steinhart-Hart output is the same
/// curve: `A = 1/T25 - ln(R25)/β`, `B = 1/β`, `C = D = 0`.
pub fn two_point(points: &[CalibrationPoint; 2]) -> Result<Calibration> {
    let logs = prepare(points)?;
    let (beta, r25) = beta_and_reference(points, &logs)?;

    let cal = Calibration {
        beta,
        reference_ohms_25c: r25,
        a: 1.0 / T25_K - r25.ln() / beta,
        b: 1.0 / beta,
        c: 0.0,
        d: 0.0,
    };
    finish(cal)
}

/// Beta, R25 and the three-term Steinhart-Hart fit (no square term).
pub fn three_point(points: &[CalibrationPoint; 3]) -> Result<Calibration> {
    let p = prepare(points)?;
    let (beta, r25) = beta_and_reference(points, &p)?;

    let (l1, l2, l3) = (p[0].l, p[1].l, p[2].l);
    let (y1, y2, y3) = (p[0].y, p[1].y, p[2].y);

    let system = [[1.0, l1, l1.powi(3)], [1.0, l2, l2.powi(3)], [1.0, l3, l3.powi(3)]];
    if is_singular(&system) {
        return Err(CalibrationError::Singular.into());
    }
    let sum = l1 + l2 + l3;

    let slope2 = (y2 - y1) / (l2 - l1);
    let slope3 = (y3 - y1) / (l3 - l1);

    let d = (slope3 - slope2) / ((l3 - l2) * sum);
    let b = slope2 - d * (l1 * l1 + l1 * l2 + l2 * l2);
    let a = y1 - (b + d * l1 * l1) * l1;

    finish(Calibration {
        beta,
        reference_ohms_25c: r25,
        a,
        b,
        c: 0.0,
        d,
    })
}

/// Beta, R25 and the full cubic Steinhart-Hart fit.
///
/// Subtracting the first equation from the other three leaves a 3×3
/// system in B, C, D over `ΔL`, `ΔL²`, `ΔL³` against point 1, solved by
/// Cramer's rule; A follows from point 1.
pub fn four_point(points: &[CalibrationPoint; 4]) -> Result<Calibration> {
    let p = prepare(points)?;
    let (beta, r25) = beta_and_reference(points, &p)?;

    let (l1, y1) = (p[0].l, p[0].y);
    let mut m = [[0.0_f64; 3]; 3];
    let mut rhs = [0.0_f64; 3];
    for (row, q) in p[1..].iter().enumerate() {
        m[row] = [q.l - l1, q.l * q.l - l1 * l1, q.l.powi(3) - l1.powi(3)];
        rhs[row] = q.y - y1;
    }

    if is_singular(&m) {
        return Err(CalibrationError::Singular.into());
    }
    let det = det3(&m);

    let solve = |col: usize| {
        let mut mc = m;
        for (r, v) in rhs.iter().enumerate() {
            mc[r][col] = *v;
        }
        det3(&mc) / det
    };
    let (b, c, d) = (solve(0), solve(1), solve(2));
    let a = y1 - b * l1 - c * l1 * l1 - d * l1.powi(3);

    finish(Calibration {
        beta,
        reference_ohms_25c: r25,
        a,
        b,
        c,
        d,
    })
}

/// β of the Beta curve through two points.
pub fn beta_between(p1: &CalibrationPoint, p2: &CalibrationPoint) -> Result<f64> {
    let pair = prepare(&[*p1, *p2])?;
    pair_beta(p1, p2, pair[0].l, pair[1].l)
}

// ───────────────────────────────────────────────────────────────
// Internals
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct LogPoint {
    l: f64,
    y: f64,
}

/// Validate the points and move them to (ln R, 1/T).
fn prepare(points: &[CalibrationPoint]) -> Result<Vec<LogPoint, MAX_POINTS>> {
    let mut out: Vec<LogPoint, MAX_POINTS> = Vec::new();
    for pt in points {
        let usable = pt.ohms.is_finite()
            && pt.ohms > 0.0
            && pt.celsius.is_finite()
            && pt.kelvin() > 0.0;
        if !usable {
            return Err(CalibrationError::InvalidPoint.into());
        }
        let lp = LogPoint {
            l: pt.ohms.ln(),
            y: 1.0 / pt.kelvin(),
        };
        if out.iter().any(|q| (q.l - lp.l).abs() < MIN_LOG_SEPARATION) {
            return Err(CalibrationError::Singular.into());
        }
        out.push(lp)
            .map_err(|_| CalibrationError::PointCount(points.len()))?;
    }

    let (lo, hi) = out
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), q| (lo.min(q.l), hi.max(q.l)));
    let min_gap = MIN_RELATIVE_LOG_SEPARATION * (hi - lo);
    for (i, p) in out.iter().enumerate() {
        if out[i + 1..].iter().any(|q| (q.l - p.l).abs() <= min_gap) {
            return Err(CalibrationError::Singular.into());
        }
    }
    Ok(out)
}

/// Determinant of `m` is zero relative to the product of its column maxima.
fn is_singular(m: &[[f64; 3]; 3]) -> bool {
    let det = det3(m);
    let scale: f64 = (0..3)
        .map(|col| m.iter().map(|r| r[col].abs()).fold(0.0, f64::max))
        .product();
    det.is_nan() || det.abs() <= MIN_RELATIVE_DETERMINANT * scale
}

fn pair_beta(p1: &CalibrationPoint, p2: &CalibrationPoint, l1: f64, l2: f64) -> Result<f64> {
    let (t1, t2) = (p1.kelvin(), p2.kelvin());
    if (t2 - t1).abs() < MIN_KELVIN_SEPARATION {
        return Err(CalibrationError::Singular.into());
    }
    Ok(t1 * t2 * (l1 - l2) / (t2 - t1))
}

/// β averaged over adjacent pairs, then R25 averaged over every point.
fn beta_and_reference(points: &[CalibrationPoint], logs: &[LogPoint]) -> Result<(f64, f64)> {
    let mut betas: Vec<f64, MAX_POINTS> = Vec::new();
    for i in 1..points.len() {
        let beta = pair_beta(&points[i - 1], &points[i], logs[i - 1].l, logs[i].l)?;
        betas
            .push(beta)
            .map_err(|_| CalibrationError::PointCount(points.len()))?;
    }
    let beta = mean(&betas);

    let r25 = points
        .iter()
        .map(|p| p.ohms / (beta * (1.0 / p.kelvin() - 1.0 / T25_K)).exp())
        .sum::<f64>()
        / points.len() as f64;

    Ok((beta, r25))
}

fn finish(cal: Calibration) -> Result<Calibration> {
    let values = [cal.beta, cal.reference_ohms_25c, cal.a, cal.b, cal.c, cal.d];
    if values.iter().all(|v| v.is_finite()) {
        debug!(
            "calibration: beta={:.2} r25={:.1} A={:e} B={:e} C={:e} D={:e}",
            cal.beta, cal.reference_ohms_25c, cal.a, cal.b, cal.c, cal.d
        );
        Ok(cal)
    } else {
        Err(CalibrationError::Singular.into())
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}
