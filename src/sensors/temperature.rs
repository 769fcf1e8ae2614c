//! NTC thermistor temperature sensor.
//!
//! A [`Thermistor`] owns one ADC channel, the delay used between samples,
//! the circuit configuration, the EMA filter and the active model.  Every
//! query runs the full chain:
//!
//! ```text
//! AdcPort ─▶ Sampler (EMA) ─▶ divider::ntc_resistance ─▶ ThermalModel ─▶ Temperature
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF the ADC port is [`EspOneshotAdc`](crate::adapters::esp_adc);
//! on host/test it is [`SimAdc`](crate::adapters::sim_adc) or a mock.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::ThermistorConfig;
use crate::error::{Error, Result};
use crate::model::calibration::{self, Calibration, CalibrationPoint};
use crate::model::{Formula, Temperature, ThermalModel};
use crate::ports::AdcPort;

use super::divider::{self, Connection};
use super::sampler::{Sampler, SamplingPolicy};

/// Everything one query derived, for callers that want more than the
/// temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    /// Smoothed ADC reading, in codes.
    pub adc: f64,
    pub ohms: f64,
    pub temperature: Temperature,
}

pub struct Thermistor<A, D> {
    adc: A,
    delay: D,
    channel: u8,
    config: ThermistorConfig,
    sampler: Sampler,
    model: Option<ThermalModel>,
    debug_timing: bool,
}

impl<A: AdcPort, D: DelayNs> Thermistor<A, D> {
    /// Attach to `channel` and configure it as an analog input.
    ///
    /// The thermistor has no model yet; set one with
    /// [`with_model`](Self::with_model) or [`calibrate`](Self::calibrate)
    /// before querying temperatures.
    pub fn new(mut adc: A, delay: D, channel: u8, config: ThermistorConfig) -> Result<Self> {
        config.validate()?;
        adc.configure_pin(channel);
        info!(
            "thermistor ch{}: {:?} divider, R_fixed={:.0} ohm, Vref={:.2} V, adc_max={}",
            channel, config.connection, config.fixed_resistor_ohms, config.reference_voltage, config.adc_max
        );
        Ok(Self {
            adc,
            delay,
            channel,
            config,
            sampler: Sampler::from_config(&config),
            model: None,
            debug_timing: false,
        })
    }

    pub fn with_model(mut self, model: impl Into<ThermalModel>) -> Self {
        self.set_model(model);
        self
    }

    pub fn set_model(&mut self, model: impl Into<ThermalModel>) {
        self.model = Some(model.into());
    }

    pub fn model(&self) -> Option<&ThermalModel> {
        self.model.as_ref()
    }

    pub fn config(&self) -> &ThermistorConfig {
        &self.config
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Give the ports back.
    pub fn release(self) -> (A, D) {
        (self.adc, self.delay)
    }

    // ── Calibration ───────────────────────────────────────────

    /// Fit 2, 3 or 4 points and switch to the fitted Beta model.
    ///
    /// The Steinhart-Hart fit is returned alongside; pass
    /// `cal.steinhart_hart_model()?` to [`set_model`](Self::set_model) to
    /// use it instead.  On error the current model is left untouched.
    ///
    /// A fit whose averaged β is not positive (resistance rising with
    /// temperature) is still returned, but the current model is kept.
    pub fn calibrate(&mut self, points: &[CalibrationPoint]) -> Result<Calibration> {
        let cal = calibration::calibrate(points)?;
        match cal.beta_model() {
            Ok(beta) => {
                info!(
                    "thermistor ch{}: calibrated from {} points, beta={:.1} r25={:.0}",
                    self.channel,
                    points.len(),
                    beta.beta,
                    beta.reference_ohms
                );
                self.model = Some(ThermalModel::Beta(beta));
            }
            Err(_) => warn!(
                "thermistor ch{}: fitted beta={:.1} is unusable, model unchanged",
                self.channel, cal.beta
            ),
        }
        Ok(cal)
    }

    // ── Configuration ─────────────────────────────────────────

    /// ADC code count of the active resolution (4096 for 12-bit).
    pub fn set_adc_max(&mut self, adc_max: u32) -> Result<()> {
        self.reconfigure(|c| c.adc_max = adc_max)
    }

    pub fn set_reference_voltage(&mut self, volts: f64) -> Result<()> {
        self.reconfigure(|c| c.reference_voltage = volts)
    }

    pub fn set_fixed_resistor(&mut self, ohms: f64) -> Result<()> {
        self.reconfigure(|c| c.fixed_resistor_ohms = ohms)
    }

    pub fn set_connection(&mut self, connection: Connection) {
        self.config.connection = connection;
    }

    /// New EMA weight; the running filter value is dropped.
    pub fn set_ema_alpha(&mut self, alpha: f64) -> Result<()> {
        self.reconfigure(|c| c.ema_alpha = alpha)?;
        self.sampler.set_alpha(alpha);
        Ok(())
    }

    pub fn set_num_samples(&mut self, num_samples: u8) -> Result<()> {
        self.reconfigure(|c| c.num_samples = num_samples)?;
        self.sampler.set_num_samples(num_samples);
        Ok(())
    }

    pub fn set_sample_delay_us(&mut self, delay_us: u32) {
        self.config.sample_delay_us = delay_us;
        self.sampler.set_delay_us(delay_us);
    }

    pub fn set_sampling_policy(&mut self, policy: SamplingPolicy) {
        self.config.sampling = policy;
        self.sampler.set_policy(policy);
    }

    /// Log how long each formula evaluation takes, at debug level.
    pub fn set_debug_timing(&mut self, enabled: bool) {
        self.debug_timing = enabled;
    }

    fn reconfigure(&mut self, change: impl FnOnce(&mut ThermistorConfig)) -> Result<()> {
        let mut next = self.config;
        change(&mut next);
        next.validate()?;
        self.config = next;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Smoothed ADC reading in codes.
    pub fn read_adc(&mut self) -> f64 {
        self.sampler.sample(&mut self.adc, &mut self.delay, self.channel)
    }

    /// Thermistor resistance in ohms.
    pub fn ntc_resistance(&mut self) -> Result<f64> {
        let reading = self.read_adc();
        divider::ntc_resistance(reading, self.config.connection, &self.config.divider())
    }

    /// Run the full chain once.
    ///
    /// The model is checked before the ADC is touched.
    pub fn read(&mut self, formula: Formula) -> Result<TemperatureReading> {
        let model = self.model.ok_or(Error::ModelNotConfigured)?;

        let adc = self.read_adc();
        let ohms = divider::ntc_resistance(adc, self.config.connection, &self.config.divider())?;

        let started = self.debug_timing.then(std::time::Instant::now);
        let temperature = model.temperature(ohms, formula)?;
        if let Some(t0) = started {
            debug!(
                "thermistor ch{}: {:?} formula took {} us",
                self.channel,
                formula,
                t0.elapsed().as_micros()
            );
        }

        Ok(TemperatureReading { adc, ohms, temperature })
    }

    pub fn temp_kelvin(&mut self) -> Result<f64> {
        Ok(self.read(Formula::Exact)?.temperature.kelvin())
    }

    pub fn temp_celsius(&mut self) -> Result<f64> {
        Ok(self.read(Formula::Exact)?.temperature.celsius())
    }

    pub fn temp_fahrenheit(&mut self) -> Result<f64> {
        Ok(self.read(Formula::Exact)?.temperature.fahrenheit())
    }

    /// Beta models use the single-division form; Steinhart-Hart models are
    /// evaluated as usual.
    pub fn fast_temp_kelvin(&mut self) -> Result<f64> {
        Ok(self.read(Formula::Fast)?.temperature.kelvin())
    }

    pub fn fast_temp_celsius(&mut self) -> Result<f64> {
        Ok(self.read(Formula::Fast)?.temperature.celsius())
    }

    pub fn fast_temp_fahrenheit(&mut self) -> Result<f64> {
        Ok(self.read(Formula::Fast)?.temperature.fahrenheit())
    }
}
