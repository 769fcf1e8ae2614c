//! Fuzz target: divider → model pipeline
//!
//! Drives `ntc_resistance` and `ThermalModel::temperature` with arbitrary
//! readings and divider parameters, verifying:
//! - No panics under any input
//! - `Ok` resistances are finite and positive
//! - `Ok` temperatures are finite and above absolute zero
//!
//! cargo fuzz run fuzz_divider

#![no_main]

use libfuzzer_sys::fuzz_target;
use ntc_thermistor::sensors::divider::{Divider, ntc_resistance};
use ntc_thermistor::{BetaModel, Connection, Formula, ThermalModel};

fn f64_at(data: &[u8], at: usize) -> f64 {
    data.get(at..at + 8)
        .and_then(|s| s.try_into().ok())
        .map_or(0.0, f64::from_le_bytes)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let connection = if data[0] & 1 == 0 { Connection::Gnd } else { Connection::Vcc };
    let adc_max = u32::from(u16::from_le_bytes([data[1], data[2]])).max(2);
    let body = &data[3..];
    let divider = Divider {
        fixed_resistor_ohms: f64_at(body, 0).abs().clamp(1.0, 1.0e7),
        reference_voltage: f64_at(body, 8).abs().clamp(0.1, 24.0),
        adc_max,
    };
    let reading = f64_at(body, 16);

    let Ok(ohms) = ntc_resistance(reading, connection, &divider) else {
        return;
    };
    assert!(ohms.is_finite() && ohms > 0.0, "resistance {ohms}");

    let beta = 1000.0 + f64::from(data[0] >> 1) * 40.0;
    let Ok(model) = BetaModel::new(10_000.0, beta) else {
        return;
    };
    let model = ThermalModel::from(model);
    for formula in [Formula::Exact, Formula::Fast] {
        if let Ok(t) = model.temperature(ohms, formula) {
            assert!(t.kelvin().is_finite() && t.kelvin() > 0.0);
        }
    }
});
