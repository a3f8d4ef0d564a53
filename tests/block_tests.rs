use clocked_dsp::{
    DspError, FringeConfig, FringeCounter, LowPass, LowPassConfig, WaveGen, WaveGenConfig,
};
use std::f64::consts::PI;

#[test]
fn lowpass_step_response() {
    let mut lp = LowPass::new(LowPassConfig::default()).unwrap();
    assert_eq!(lp.pole(), 0.9);

    for n in 1..=60 {
        lp.step(false, 1.0);
        let y = lp.step(true, 1.0);
        let expected = 1.0 - 0.9f64.powi(n);
        assert!((y - expected).abs() < 1e-12, "edge {n}: {y} vs {expected}");
    }
}

#[test]
fn lowpass_holds_between_edges() {
    let mut lp = LowPass::new(LowPassConfig { pole: 0.5 }).unwrap();
    lp.step(false, 4.0);
    assert_eq!(lp.step(true, 4.0), 2.0);

    // Input changes while the clock stays high or low are ignored.
    assert_eq!(lp.step(true, -100.0), 2.0);
    assert_eq!(lp.step(false, -100.0), 2.0);
    assert_eq!(lp.step(true, 0.0), 1.0);
}

#[test]
fn tick_is_none_while_holding() {
    let mut lp = LowPass::new(LowPassConfig { pole: 0.5 }).unwrap();
    assert_eq!(lp.tick(false, 4.0), None);
    assert_eq!(lp.tick(true, 4.0), Some(2.0));
    assert_eq!(lp.tick(true, 4.0), None);

    let mut osc = WaveGen::new(WaveGenConfig::default()).unwrap();
    assert_eq!(osc.tick(true), Some(0.0));
    assert_eq!(osc.tick(false), None);
    assert_eq!(osc.tick(true), Some((PI / 8.0).sin()));

    let mut fringe = FringeCounter::new(FringeConfig::default()).unwrap();
    assert_eq!(fringe.tick(false, 1.0), None);
    assert!(fringe.tick(true, 1.0).is_some());
    assert_eq!(fringe.tick(true, 1.0), None);
}

#[test]
fn lowpass_rejects_unstable_pole() {
    for pole in [1.0, 1.5, -0.1, f64::NAN] {
        assert!(matches!(
            LowPass::new(LowPassConfig { pole }),
            Err(DspError::InvalidParameter { name: "pole", .. })
        ));
    }
}

#[test]
fn wavegen_produces_sine_from_second_edge() {
    let omega = PI / 8.0;
    let mut osc = WaveGen::new(WaveGenConfig::default()).unwrap();

    for k in 1..=200 {
        osc.step(false);
        let y = osc.step(true);
        let expected = ((k - 1) as f64 * omega).sin();
        assert!((y - expected).abs() < 1e-9, "edge {k}: {y} vs {expected}");
    }
}

#[test]
fn wavegen_scales_with_amplitude_and_resets() {
    let config = WaveGenConfig {
        omega: 0.3,
        amplitude: 2.5,
    };
    let mut osc = WaveGen::new(config).unwrap();
    let mut first = Vec::new();
    for _ in 0..10 {
        osc.step(false);
        first.push(osc.step(true));
    }
    assert!((first[3] - 2.5 * 0.9f64.sin()).abs() < 1e-12);

    osc.reset();
    assert_eq!(osc.output(), 0.0);
    let mut second = Vec::new();
    for _ in 0..10 {
        osc.step(false);
        second.push(osc.step(true));
    }
    assert_eq!(first, second);
}

#[test]
fn wavegen_ignores_held_clock() {
    let mut osc = WaveGen::new(WaveGenConfig::default()).unwrap();
    osc.step(true);
    osc.step(false);
    let y = osc.step(true);
    for _ in 0..5 {
        assert_eq!(osc.step(true), y);
    }
}

#[test]
fn fringe_zero_input_sits_on_dark_fringe() {
    let mut fringe = FringeCounter::new(FringeConfig::default()).unwrap();
    assert!((fringe.phase(0.0) - 1.5 * PI).abs() < 1e-12);
    let y = fringe.step(true, 0.0);
    assert!(y.abs() < 1e-20, "{y}");
}

#[test]
fn fringe_eighth_wave_displacement_reaches_bright_fringe() {
    let config = FringeConfig::default();
    // Displacement of λ/8 adds π/2 of phase: 3π/2 → 2π.
    let input = config.wavelength / 8.0 * config.spring_constant / config.input_gain;
    let mut fringe = FringeCounter::new(config).unwrap();

    assert!((fringe.displacement(input) - 850e-9 / 8.0).abs() < 1e-18);
    let y = fringe.step(true, input);
    assert!((y - 1.0).abs() < 1e-9, "{y}");

    // Held until the next rising edge.
    assert_eq!(fringe.step(true, 0.0), y);
    fringe.step(false, 0.0);
    assert!(fringe.step(true, 0.0) < 1e-20);
}

#[test]
fn fringe_output_is_bounded() {
    let mut fringe = FringeCounter::new(FringeConfig::default()).unwrap();
    for n in 0..1000 {
        fringe.step(false, 0.0);
        let y = fringe.step(true, (n as f64 * 0.01).sin() * 1e-3);
        assert!((0.0..=1.0).contains(&y));
    }
}

#[test]
fn fringe_rejects_non_physical_constants() {
    let config = FringeConfig {
        wavelength: 0.0,
        ..FringeConfig::default()
    };
    assert!(matches!(
        FringeCounter::new(config),
        Err(DspError::InvalidParameter {
            name: "wavelength",
            ..
        })
    ));
}
