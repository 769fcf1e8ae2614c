//! Mock hardware for integration tests.
//!
//! Records every ADC and delay call so tests can assert on the full
//! sampling history without touching real converter registers.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use ntc_thermistor::ports::AdcPort;

// ── ADC call record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum AdcCall {
    Configure(u8),
    Select(u8),
    Read(u8),
}

// ── MockAdc ───────────────────────────────────────────────────

pub struct MockAdc {
    pub calls: Vec<AdcCall>,
    script: VecDeque<u16>,
    level: u16,
}

#[allow(dead_code)]
impl MockAdc {
    pub fn new(level: u16) -> Self {
        Self {
            calls: Vec::new(),
            script: VecDeque::new(),
            level,
        }
    }

    pub fn with_script(level: u16, samples: &[u16]) -> Self {
        let mut adc = Self::new(level);
        adc.script.extend(samples);
        adc
    }

    pub fn set_level(&mut self, level: u16) {
        self.level = level;
    }

    pub fn reads(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, AdcCall::Read(_))).count()
    }

    pub fn selects(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, AdcCall::Select(_))).count()
    }
}

impl AdcPort for MockAdc {
    fn configure_pin(&mut self, channel: u8) {
        self.calls.push(AdcCall::Configure(channel));
    }

    fn select_channel(&mut self, channel: u8) {
        self.calls.push(AdcCall::Select(channel));
    }

    fn read_raw(&mut self, channel: u8) -> u16 {
        self.calls.push(AdcCall::Read(channel));
        self.script.pop_front().unwrap_or(self.level)
    }
}

// ── RecordingDelay ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ns: Vec<u32>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_us(&self) -> u64 {
        self.waits_ns.iter().map(|&ns| u64::from(ns)).sum::<u64>() / 1_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns);
    }
}
