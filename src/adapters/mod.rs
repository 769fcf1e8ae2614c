//! Adapters — concrete implementations of [`AdcPort`](crate::ports::AdcPort).
//!
//! | Adapter   | Connects to                         |
//! |-----------|-------------------------------------|
//! | `esp_adc` | ESP32 ADC1 oneshot driver (ESP-IDF) |
//! | `sim_adc` | scripted samples (host / tests)     |

#[cfg(all(feature = "espidf", target_os = "espidf"))]
pub mod esp_adc;
#[cfg(not(target_os = "espidf"))]
pub mod sim_adc;
