//! Calibrate → query flows: a thermistor fitted from points, then read back
//! through the ADC at those same points.

use ntc_thermistor::model::calibration::{self, CalibrationPoint};
use ntc_thermistor::{
    BetaModel, CalibrationError, Connection, Error, SteinhartHart, ThermalModel, Thermistor, ThermistorConfig,
};

use crate::mock_hw::{MockAdc, RecordingDelay};

const R_FIXED: f64 = 10_000.0;

fn gnd_config(adc_max: u32) -> ThermistorConfig {
    ThermistorConfig {
        fixed_resistor_ohms: R_FIXED,
        reference_voltage: 3.3,
        adc_max,
        connection: Connection::Gnd,
        ..Default::default()
    }
}

/// Nearest ADC code a thermistor of `ohms` produces in the GND divider.
fn code_for(ohms: f64, adc_max: u32) -> u16 {
    (f64::from(adc_max) * ohms / (ohms + R_FIXED)).round() as u16
}

fn synthetic_points<const N: usize>(beta: f64, r25: f64, celsius: [f64; N]) -> [CalibrationPoint; N] {
    let truth = BetaModel::new(r25, beta).unwrap();
    celsius.map(|c| CalibrationPoint::new(c, truth.resistance_at(c + 273.15)))
}

#[test]
fn three_point_round_trip_through_the_adc() {
    let pts = synthetic_points(3950.0, 10_000.0, [0.0, 25.0, 50.0]);
    let mut t = Thermistor::new(MockAdc::new(0), RecordingDelay::new(), 0, gnd_config(1024)).unwrap();
    t.calibrate(&pts).unwrap();
    let model = *t.model().unwrap();

    for p in &pts {
        let adc = MockAdc::new(code_for(p.ohms, 1024));
        let mut t = Thermistor::new(adc, RecordingDelay::new(), 0, gnd_config(1024))
            .unwrap()
            .with_model(model);
        let exact = t.temp_celsius().unwrap();
        let fast = t.fast_temp_celsius().unwrap();
        assert!((exact - p.celsius).abs() < 0.5, "{} vs {exact}", p.celsius);
        assert!((fast - p.celsius).abs() < 0.5, "{} vs {fast}", p.celsius);
    }
}

#[test]
fn four_point_steinhart_hart_round_trip() {
    let pts = synthetic_points(3435.0, 10_000.0, [-20.0, 10.0, 40.0, 80.0]);
    let cal = calibration::four_point(&pts).unwrap();
    let sh = cal.steinhart_hart_model().unwrap();

    for p in &pts {
        let adc = MockAdc::new(code_for(p.ohms, 4096));
        let mut t = Thermistor::new(adc, RecordingDelay::new(), 0, gnd_config(4096))
            .unwrap()
            .with_model(sh);
        let c = t.temp_celsius().unwrap();
        assert!((c - p.celsius).abs() < 0.1, "{} vs {c}", p.celsius);
    }
}

#[test]
fn caller_can_choose_the_steinhart_hart_output() {
    let pts = synthetic_points(3950.0, 10_000.0, [0.0, 25.0, 50.0]);
    let mut t = Thermistor::new(MockAdc::new(code_for(10_000.0, 4096)), RecordingDelay::new(), 0, gnd_config(4096))
        .unwrap();
    let cal = t.calibrate(&pts).unwrap();
    assert!(matches!(t.model(), Some(ThermalModel::Beta(_))));

    t.set_model(cal.steinhart_hart_model().unwrap());
    assert!(matches!(t.model(), Some(ThermalModel::SteinhartHart(_))));
    assert!((t.temp_celsius().unwrap() - 25.0).abs() < 0.05);
}

#[test]
fn two_point_calibration_matches_known_beta() {
    let pts = synthetic_points(4300.0, 47_000.0, [25.0, 85.0]);
    let cal = calibration::calibrate(&pts).unwrap();
    assert!((cal.beta - 4300.0).abs() < 1e-6);
    assert!((cal.reference_ohms_25c - 47_000.0).abs() < 1e-3);
}

#[test]
fn singular_points_leave_thermistor_unconfigured() {
    let pts = [
        CalibrationPoint::new(0.0, 10_000.0),
        CalibrationPoint::new(25.0, 10_000.0),
        CalibrationPoint::new(50.0, 3_600.0),
    ];
    let mut t = Thermistor::new(MockAdc::new(512), RecordingDelay::new(), 0, gnd_config(1024)).unwrap();
    assert_eq!(t.calibrate(&pts), Err(Error::Calibration(CalibrationError::Singular)));
    assert_eq!(t.temp_celsius(), Err(Error::ModelNotConfigured));
}

#[test]
fn datasheet_coefficients_and_calibration_agree() {
    // Beta model built from the datasheet vs. fitted from its own curve.
    let datasheet = BetaModel::new(10_000.0, 3950.0).unwrap();
    let pts = synthetic_points(3950.0, 10_000.0, [-10.0, 20.0, 60.0, 90.0]);
    let fitted = calibration::four_point(&pts).unwrap().beta_model().unwrap();
    assert!((datasheet.beta - fitted.beta).abs() < 1e-6);
    assert!((datasheet.reference_ohms - fitted.reference_ohms).abs() < 1e-3);

    // A zeroed coefficient set is never a usable model.
    assert_eq!(SteinhartHart::absolute(0.0, 0.0, 0.0, 0.0), Err(Error::ModelNotConfigured));
}
