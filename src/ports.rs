//! Port traits: the boundary between the temperature pipeline and the ADC.
//!
//! ```text
//!   EspOneshotAdc / SimAdc ──▶ AdcPort ──▶ Thermistor (domain)
//! ```
//!
//! The blocking inter-sample delay is not a port of its own: the
//! [`Thermistor`](crate::sensors::Thermistor) takes any
//! `embedded_hal::delay::DelayNs`, which every HAL in the ecosystem already
//! implements.

// ───────────────────────────────────────────────────────────────
// ADC port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw single-channel ADC access.
///
/// Implementations return codes in `[0, adc_max)` for whatever resolution
/// the platform is configured for; the domain never sees registers.
pub trait AdcPort {
    /// Put `channel` into analog input mode.  Called once when a
    /// thermistor is attached to it.
    fn configure_pin(&mut self, channel: u8);

    /// Route the multiplexer to `channel` ahead of a burst of reads.
    ///
    /// Only the low-noise sampling policy calls this.  Converters without
    /// a shared multiplexer can keep the default no-op.
    fn select_channel(&mut self, _channel: u8) {}

    /// One blocking conversion on `channel`.
    fn read_raw(&mut self, channel: u8) -> u16;
}

impl<T: AdcPort + ?Sized> AdcPort for &mut T {
    fn configure_pin(&mut self, channel: u8) {
        (**self).configure_pin(channel);
    }

    fn select_channel(&mut self, channel: u8) {
        (**self).select_channel(channel);
    }

    fn read_raw(&mut self, channel: u8) -> u16 {
        (**self).read_raw(channel)
    }
}
