//! Thermistor demo firmware — Main Entry Point
//!
//! Reads a 10 kΩ / B = 3950 NTC on ADC1 CH8 once per second and logs the
//! temperature.
//!
//! ```text
//!   3V3 ── 10k ──┬── NTC ── GND
//!                └── GPIO9 (ADC1 CH8)
//! ```

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use log::{info, warn};

use ntc_thermistor::adapters::esp_adc::{ADC_MAX_12BIT, EspOneshotAdc};
use ntc_thermistor::{BetaModel, Connection, Formula, SamplingPolicy, Thermistor, ThermistorConfig};

/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
const THERMISTOR_ADC_CHANNEL: u8 = 8;
/// Effective full scale at 12 dB attenuation.
const ADC_FULL_SCALE_V: f64 = 3.1;
const READ_INTERVAL_MS: u32 = 1000;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ntc-thermistor v{}", env!("CARGO_PKG_VERSION"));

    let config = ThermistorConfig {
        reference_voltage: ADC_FULL_SCALE_V,
        adc_max: ADC_MAX_12BIT,
        connection: Connection::Gnd,
        sample_delay_us: 20,
        sampling: SamplingPolicy::Persistent,
        ..Default::default()
    };

    let adc = EspOneshotAdc::new()?;
    let mut thermistor = Thermistor::new(adc, Ets, THERMISTOR_ADC_CHANNEL, config)?
        .with_model(BetaModel::new(10_000.0, 3950.0)?);

    loop {
        match thermistor.read(Formula::Fast) {
            Ok(r) => info!(
                "TEMP | adc={:.1} | R={:.0} ohm | T={:.2}\u{00b0}C ({:.2}\u{00b0}F)",
                r.adc,
                r.ohms,
                r.temperature.celsius(),
                r.temperature.fahrenheit()
            ),
            Err(e) => warn!("TEMP | read failed: {}", e),
        }
        FreeRtos::delay_ms(READ_INTERVAL_MS);
    }
}
