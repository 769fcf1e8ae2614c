//! Sensor subsystem — the thermistor and the two stages below it.
//!
//! | Module        | Stage                                        |
//! |---------------|----------------------------------------------|
//! | `sampler`     | raw ADC codes → EMA-smoothed reading         |
//! | `divider`     | smoothed reading → thermistor resistance     |
//! | `temperature` | [`Thermistor`]: ports + config + model       |

pub mod divider;
pub mod sampler;
pub mod temperature;

pub use divider::Connection;
pub use sampler::SamplingPolicy;
pub use temperature::{TemperatureReading, Thermistor};
