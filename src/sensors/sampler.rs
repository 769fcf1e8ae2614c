//! EMA-smoothed ADC sampling.
//!
//! Every reading is a short burst of raw conversions folded into an
//! exponential moving average:
//!
//! ```text
//! filtered = alpha * raw + (1 - alpha) * filtered
//! ```
//!
//! `alpha` is the weight of the **new** sample, so larger values track the
//! input faster.  With the default 0.79 a full-scale step is within 1 % of
//! its final value after three updates.  The filter is seeded with the
//! first raw sample instead of zero, which keeps start-up readings unbiased.

use embedded_hal::delay::DelayNs;
use serde::{Deserialize, Serialize};

use crate::config::ThermistorConfig;
use crate::ports::AdcPort;

/// How the filter state behaves between readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplingPolicy {
    /// Reseed the filter at the start of every reading.
    Fresh,
    /// Low-noise mode: select the channel on the multiplexer before each
    /// burst and carry the filter across readings.
    Persistent,
}

/// Exponential moving average with lazy seeding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaFilter {
    alpha: f64,
    state: Option<f64>,
}

impl EmaFilter {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, state: None }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Change the smoothing weight.  Reconfiguring drops the running value.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
        self.state = None;
    }

    /// Current filtered value, `None` until the first sample.
    pub fn value(&self) -> Option<f64> {
        self.state
    }

    pub fn is_seeded(&self) -> bool {
        self.state.is_some()
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Fold one raw sample in and return the new filtered value.
    pub fn update(&mut self, raw: f64) -> f64 {
        let next = match self.state {
            None => raw,
            Some(prev) => self.alpha * raw + (1.0 - self.alpha) * prev,
        };
        self.state = Some(next);
        next
    }
}

/// Signal sampler: owns the filter and the burst parameters.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    filter: EmaFilter,
    policy: SamplingPolicy,
    num_samples: u8,
    delay_us: u32,
}

impl Sampler {
    pub fn new(alpha: f64, num_samples: u8, delay_us: u32, policy: SamplingPolicy) -> Self {
        Self {
            filter: EmaFilter::new(alpha),
            policy,
            num_samples,
            delay_us,
        }
    }

    pub fn from_config(config: &ThermistorConfig) -> Self {
        Self::new(
            config.ema_alpha,
            config.num_samples,
            config.sample_delay_us,
            config.sampling,
        )
    }

    pub fn filter(&self) -> &EmaFilter {
        &self.filter
    }

    pub fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    pub fn num_samples(&self) -> u8 {
        self.num_samples
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.filter.set_alpha(alpha);
    }

    pub fn set_num_samples(&mut self, num_samples: u8) {
        self.num_samples = num_samples;
    }

    pub fn set_delay_us(&mut self, delay_us: u32) {
        self.delay_us = delay_us;
    }

    /// Switching policy is a reconfiguration, so the filter restarts.
    pub fn set_policy(&mut self, policy: SamplingPolicy) {
        self.policy = policy;
        self.filter.reset();
    }

    /// Take a reading with the configured burst length.
    pub fn sample<A, D>(&mut self, adc: &mut A, delay: &mut D, channel: u8) -> f64
    where
        A: AdcPort,
        D: DelayNs,
    {
        self.sample_n(adc, delay, channel, self.num_samples)
    }

    /// Take a reading of `num_samples` filtered conversions, in ADC-code
    /// units.
    ///
    /// An unseeded filter costs one extra conversion for the seed.  Each
    /// filtered conversion is preceded by the inter-sample delay.
    pub fn sample_n<A, D>(&mut self, adc: &mut A, delay: &mut D, channel: u8, num_samples: u8) -> f64
    where
        A: AdcPort,
        D: DelayNs,
    {
        match self.policy {
            SamplingPolicy::Fresh => self.filter.reset(),
            SamplingPolicy::Persistent => adc.select_channel(channel),
        }

        if !self.filter.is_seeded() {
            self.filter.update(f64::from(adc.read_raw(channel)));
        }

        for _ in 0..num_samples {
            delay.delay_us(self.delay_us);
            self.filter.update(f64::from(adc.read_raw(channel)));
        }

        self.filter.value().unwrap_or_default()
    }
}
