//! Thermistor → sampler → divider → model, against the mock ADC.

use ntc_thermistor::{
    BetaModel, Connection, Error, Formula, SamplingPolicy, SensorError, Thermistor, ThermistorConfig,
};

use crate::mock_hw::{AdcCall, MockAdc, RecordingDelay};

fn gnd_config() -> ThermistorConfig {
    ThermistorConfig {
        fixed_resistor_ohms: 10_000.0,
        reference_voltage: 3.3,
        adc_max: 1024,
        connection: Connection::Gnd,
        ..Default::default()
    }
}

fn beta_3950() -> BetaModel {
    BetaModel::new(10_000.0, 3950.0).unwrap()
}

#[test]
fn midscale_divider_reads_room_temperature() {
    let mut adc = MockAdc::new(512);
    let mut delay = RecordingDelay::new();
    let mut t = Thermistor::new(&mut adc, &mut delay, 2, gnd_config())
        .unwrap()
        .with_model(beta_3950());

    let ohms = t.ntc_resistance().unwrap();
    assert!((ohms - 10_000.0).abs() < 1.0, "ohms = {ohms}");

    let c = t.temp_celsius().unwrap();
    assert!((c - 25.0).abs() < 1.0, "celsius = {c}");
    let k = t.temp_kelvin().unwrap();
    assert!((k - 298.15).abs() < 1.0);
}

#[test]
fn one_reading_is_seed_plus_burst_with_delays() {
    let mut adc = MockAdc::new(600);
    let mut delay = RecordingDelay::new();
    {
        let mut t = Thermistor::new(&mut adc, &mut delay, 4, gnd_config()).unwrap();
        t.read_adc();
    }

    assert_eq!(adc.calls[0], AdcCall::Configure(4));
    assert_eq!(adc.reads(), 16);
    assert_eq!(adc.selects(), 0);
    assert!(adc.calls[1..].iter().all(|c| *c == AdcCall::Read(4)));
    assert_eq!(delay.waits_ns.len(), 15);
    assert_eq!(delay.total_us(), 15 * 8);
}

#[test]
fn low_noise_policy_selects_channel_and_keeps_filter() {
    let mut adc = MockAdc::with_script(0, &[400, 400, 400, 400]);
    adc.set_level(800);
    let mut delay = RecordingDelay::new();
    let cfg = ThermistorConfig {
        num_samples: 3,
        ema_alpha: 0.5,
        sampling: SamplingPolicy::Persistent,
        ..gnd_config()
    };
    let mut t = Thermistor::new(&mut adc, &mut delay, 1, cfg).unwrap();

    assert!((t.read_adc() - 400.0).abs() < 1e-9);
    // Filter carries over: 400 → 600 → 700 → 750, no reseed.
    assert!((t.read_adc() - 750.0).abs() < 1e-9);
    drop(t);
    assert_eq!(adc.selects(), 2);
    assert_eq!(adc.reads(), 7);
}

#[test]
fn fresh_policy_tracks_a_step_between_readings() {
    let mut adc = MockAdc::new(400);
    let mut t = Thermistor::new(&mut adc, RecordingDelay::new(), 0, gnd_config()).unwrap();
    assert!((t.read_adc() - 400.0).abs() < 1e-9);
    drop(t);
    adc.set_level(800);
    let mut t = Thermistor::new(&mut adc, RecordingDelay::new(), 0, gnd_config()).unwrap();
    assert!((t.read_adc() - 800.0).abs() < 1e-9);
}

#[test]
fn ema_settles_a_step_within_the_default_burst() {
    // First conversion seeds at 200; the rest sit at 800.
    let mut adc = MockAdc::with_script(800, &[200]);
    let mut t = Thermistor::new(&mut adc, RecordingDelay::new(), 0, gnd_config()).unwrap();
    let v = t.read_adc();
    // 0.21^15 of the 600-code step is left.
    assert!((800.0 - v) < 1e-6, "v = {v}");
}

#[test]
fn smaller_alpha_settles_slower() {
    let reading = |alpha: f64| {
        let mut adc = MockAdc::with_script(800, &[200]);
        let cfg = ThermistorConfig { ema_alpha: alpha, num_samples: 3, ..gnd_config() };
        let mut t = Thermistor::new(&mut adc, RecordingDelay::new(), 0, cfg).unwrap();
        t.read_adc()
    };
    let fast = reading(0.79);
    let slow = reading(0.2);
    assert!(fast > slow);
    // 200 + 600 * (1 - 0.8^3)
    assert!((slow - 492.8).abs() < 1e-9, "slow = {slow}");
}

#[test]
fn vcc_topology_mirrors_gnd() {
    let model = beta_3950();
    let mut gnd = Thermistor::new(MockAdc::new(300), RecordingDelay::new(), 0, gnd_config())
        .unwrap()
        .with_model(model);
    let vcc_cfg = ThermistorConfig { connection: Connection::Vcc, ..gnd_config() };
    let mut vcc = Thermistor::new(MockAdc::new(1024 - 300), RecordingDelay::new(), 0, vcc_cfg)
        .unwrap()
        .with_model(model);
    let a = gnd.temp_celsius().unwrap();
    let b = vcc.temp_celsius().unwrap();
    assert!((a - b).abs() < 1e-9, "{a} vs {b}");
}

#[test]
fn hotter_thermistor_reads_hotter_in_both_topologies() {
    // Lower NTC resistance: lower node voltage to ground, higher to supply.
    let model = beta_3950();
    let mut t = Thermistor::new(MockAdc::new(200), RecordingDelay::new(), 0, gnd_config())
        .unwrap()
        .with_model(model);
    assert!(t.temp_celsius().unwrap() > 25.0);

    let vcc_cfg = ThermistorConfig { connection: Connection::Vcc, ..gnd_config() };
    let mut t = Thermistor::new(MockAdc::new(800), RecordingDelay::new(), 0, vcc_cfg)
        .unwrap()
        .with_model(model);
    assert!(t.temp_celsius().unwrap() > 25.0);
}

#[test]
fn disconnected_and_shorted_sensors_are_reported() {
    let cases = [
        (Connection::Gnd, 1023, SensorError::Disconnected),
        (Connection::Gnd, 0, SensorError::ShortCircuit),
        (Connection::Vcc, 0, SensorError::Disconnected),
        (Connection::Vcc, 1023, SensorError::ShortCircuit),
    ];
    for (connection, level, fault) in cases {
        let cfg = ThermistorConfig { connection, ..gnd_config() };
        let mut t = Thermistor::new(MockAdc::new(level), RecordingDelay::new(), 0, cfg)
            .unwrap()
            .with_model(beta_3950());
        assert_eq!(t.read(Formula::Exact), Err(Error::Sensor(fault)), "{connection:?} @ {level}");
        assert_eq!(t.ntc_resistance(), Err(Error::Sensor(fault)));
    }
}

#[test]
fn fahrenheit_is_derived_from_the_same_celsius() {
    let mut t = Thermistor::new(MockAdc::new(350), RecordingDelay::new(), 0, gnd_config())
        .unwrap()
        .with_model(beta_3950());
    let c = t.temp_celsius().unwrap();
    let f = t.temp_fahrenheit().unwrap();
    assert_eq!(f, c * 9.0 / 5.0 + 32.0);
    let c = t.fast_temp_celsius().unwrap();
    let f = t.fast_temp_fahrenheit().unwrap();
    assert_eq!(f, c * 9.0 / 5.0 + 32.0);
}
