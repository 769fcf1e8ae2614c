//! Simulated ADC for host builds and tests.
//!
//! Returns queued samples first, then a steady level.  Queue depth is
//! fixed; samples pushed past it are dropped with a warning.

use heapless::{Deque, Vec};
use log::warn;

use crate::ports::AdcPort;

const QUEUE_DEPTH: usize = 64;
const MAX_CHANNELS: usize = 8;

pub struct SimAdc {
    level: u16,
    queue: Deque<u16, QUEUE_DEPTH>,
    configured: Vec<u8, MAX_CHANNELS>,
    reads: u32,
    selects: u32,
}

impl SimAdc {
    pub fn new(level: u16) -> Self {
        Self {
            level,
            queue: Deque::new(),
            configured: Vec::new(),
            reads: 0,
            selects: 0,
        }
    }

    /// Steady value returned once the queue is empty.
    pub fn set_level(&mut self, level: u16) {
        self.level = level;
    }

    pub fn push_samples(&mut self, samples: &[u16]) {
        for &s in samples {
            if self.queue.push_back(s).is_err() {
                warn!("sim_adc: queue full, dropping sample {s}");
            }
        }
    }

    pub fn is_configured(&self, channel: u8) -> bool {
        self.configured.contains(&channel)
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }

    pub fn selects(&self) -> u32 {
        self.selects
    }
}

impl AdcPort for SimAdc {
    fn configure_pin(&mut self, channel: u8) {
        if !self.configured.contains(&channel) && self.configured.push(channel).is_err() {
            warn!("sim_adc: more than {MAX_CHANNELS} channels configured");
        }
    }

    fn select_channel(&mut self, _channel: u8) {
        self.selects += 1;
    }

    fn read_raw(&mut self, _channel: u8) -> u16 {
        self.reads += 1;
        self.queue.pop_front().unwrap_or(self.level)
    }
}
