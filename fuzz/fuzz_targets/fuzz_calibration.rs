//! Fuzz target: coefficient calibrator
//!
//! Feeds 0–5 arbitrary (celsius, ohms) pairs to `calibrate` and verifies:
//! - No panics for any bit pattern, NaN and infinities included
//! - Wrong point counts are always `PointCount`
//! - A successful fit carries only finite coefficients
//!
//! cargo fuzz run fuzz_calibration

#![no_main]

use libfuzzer_sys::fuzz_target;
use ntc_thermistor::model::calibration::{self, CalibrationPoint};
use ntc_thermistor::{CalibrationError, Error};

fn f64_at(data: &[u8], at: usize) -> f64 {
    data.get(at..at + 8)
        .and_then(|s| s.try_into().ok())
        .map_or(0.0, f64::from_le_bytes)
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let count = data[0] as usize % 6;
    let body = &data[1..];
    let points: Vec<CalibrationPoint> = (0..count)
        .map(|i| CalibrationPoint::new(f64_at(body, i * 16), f64_at(body, i * 16 + 8)))
        .collect();

    match calibration::calibrate(&points) {
        Ok(cal) => {
            assert!((2..=4).contains(&count), "fit from {count} points");
            for v in [cal.beta, cal.reference_ohms_25c, cal.a, cal.b, cal.c, cal.d] {
                assert!(v.is_finite(), "non-finite coefficient in {cal:?}");
            }
        }
        Err(Error::Calibration(CalibrationError::PointCount(n))) => {
            assert_eq!(n, count);
            assert!(!(2..=4).contains(&count));
        }
        Err(Error::Calibration(_)) => {}
        Err(e) => panic!("unexpected error kind: {e}"),
    }
});
