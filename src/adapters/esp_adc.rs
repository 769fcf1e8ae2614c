//! ESP32 ADC1 oneshot adapter.
//!
//! Owns an ADC1 oneshot unit created through raw ESP-IDF sys calls.  Each
//! configured channel uses 12 dB attenuation and 12-bit width, so the
//! thermistor config should set `adc_max = 4096`.

use esp_idf_svc::sys::*;
use log::{error, info};

use crate::ports::AdcPort;

/// ADC code count of the 12-bit oneshot driver.
pub const ADC_MAX_12BIT: u32 = 4096;

// ── Error type ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcInitError {
    UnitInitFailed(i32),
}

impl core::fmt::Display for AdcInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnitInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
        }
    }
}

impl std::error::Error for AdcInitError {}

// ── Adapter ───────────────────────────────────────────────────

pub struct EspOneshotAdc {
    handle: adc_oneshot_unit_handle_t,
}

impl EspOneshotAdc {
    pub fn new() -> Result<Self, AdcInitError> {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id: adc_unit_t_ADC_UNIT_1,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: init_cfg outlives the call; handle is written on success only.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
        if ret != ESP_OK as i32 {
            return Err(AdcInitError::UnitInitFailed(ret));
        }
        info!("esp_adc: ADC1 oneshot unit ready");
        Ok(Self { handle })
    }
}

impl AdcPort for EspOneshotAdc {
    fn configure_pin(&mut self, channel: u8) {
        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        // SAFETY: handle is a live unit owned by self.
        let ret = unsafe { adc_oneshot_config_channel(self.handle, adc_channel_t::from(channel), &chan_cfg) };
        if ret == ESP_OK as i32 {
            info!("esp_adc: ADC1 CH{} configured", channel);
        } else {
            error!("esp_adc: ADC1 CH{} config failed (rc={})", channel, ret);
        }
    }

    fn read_raw(&mut self, channel: u8) -> u16 {
        let mut raw: i32 = 0;
        // SAFETY: handle is a live unit owned by self; &mut self rules out
        // concurrent reads through this adapter.
        let ret = unsafe { adc_oneshot_read(self.handle, adc_channel_t::from(channel), &mut raw) };
        if ret != ESP_OK as i32 {
            // A failed conversion reads as the low rail, which the divider
            // reports as a sensor fault.
            return 0;
        }
        raw.max(0) as u16
    }
}

impl Drop for EspOneshotAdc {
    fn drop(&mut self) {
        // SAFETY: handle came from adc_oneshot_new_unit and is released once.
        unsafe {
            adc_oneshot_del_unit(self.handle);
        }
    }
}
