use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use emwaves::errors::WaveError;
use emwaves::medium::{Medium, MediumKind};
use emwaves::settings::{self, Shape};
use emwaves::wave::Wave;
use num_complex::Complex;

// Tolerance for comparing coefficients computed along different paths
const TOL: f64 = 1e-12;

fn passive_media() -> Vec<Medium> {
    vec![
        Medium::vacuum(),
        Medium::new(4.0, 1.0, 0.0).unwrap(),
        Medium::new(2.0, 1.0, 0.81).unwrap(),
        Medium::new(1.5, 1.0, 0.21).unwrap(),
        Medium::new(4.0, 2.5, 4e-10).unwrap(),
        Medium::new(1.0, 1.0, 1e7).unwrap(),
        Medium::new(80.0, 1.0, 4.0).unwrap(),
    ]
}

#[test]
fn default_configuration() {
    let settings = settings::load_default_config().unwrap();
    let wave = settings.wave().unwrap();
    assert_eq!(wave.frequency(), 1.8e9);
    assert_eq!(wave.amplitude(), Complex::new(10.0, 0.0));
    assert_eq!(**wave.medium1(), Medium::vacuum());
    assert_eq!(**wave.medium2(), Medium::new(4.0, 2.5, 4e-10).unwrap());

    let report = wave.report();
    assert_eq!(report.media[0].kind, MediumKind::Insulator);
    assert_eq!(report.media[1].kind, MediumKind::Insulator);
    assert!(report.to_string().contains("S_t = "));
}

#[test]
fn coefficients_over_passive_media() {
    let wave = Wave::default();
    for m1 in passive_media() {
        for m2 in passive_media() {
            let gamma = wave.reflection(&m1, &m2);
            let tau = wave.transmission(&m1, &m2);
            assert!(gamma.norm() <= 1.0 + TOL, "|Γ| = {} for {} -> {}", gamma.norm(), m1, m2);
            assert!((tau - (gamma + 1.0)).norm() < 1e-9);
            assert!((gamma + wave.reflection(&m2, &m1)).norm() < 1e-9);
        }
    }
}

#[test]
fn energy_balance() {
    for m2 in passive_media() {
        let mut wave = Wave::default();
        wave.add_mediums(Medium::vacuum(), m2);
        let s_i = wave.incident_power_density(wave.medium1());
        let s_t = wave.transmitted_power_density(wave.medium1(), wave.medium2());
        assert_relative_eq!(s_t, s_i * (1.0 - wave.gamma().norm_sqr()), max_relative = 1e-12);
        assert!(s_t <= s_i);
    }
}

#[test]
fn identical_media_for_every_waveform() {
    let mut settings = settings::load_default_config().unwrap();
    settings.medium2 = settings.medium1;
    let wave = settings.wave().unwrap();
    assert_eq!(wave.gamma(), Complex::new(0.0, 0.0));
    assert_eq!(wave.tau(), Complex::new(1.0, 0.0));

    for waveform in Shape::All.waveforms(&settings).unwrap() {
        let animation = wave.demo_animation(waveform.as_ref());
        assert!(!animation.is_empty());
        for frame in &animation.frames {
            assert!(frame.reflected.iter().all(|&e| e == 0.0), "{}", animation.name);
        }
    }
}

#[test]
fn good_conductor_skin_depth() {
    let copper_like = Medium::new(1.0, 1.0, 1e7).unwrap();
    let wave = Wave::default();
    let (u, kind) = copper_like.classify(wave.angular_frequency());
    assert!(u > 1e2);
    assert_eq!(kind, MediumKind::GoodConductor);

    let delta = wave.skin_depth(&copper_like);
    assert!(delta.is_finite() && delta > 0.0 && delta < 1e-4);
    assert_relative_eq!(
        delta,
        wave.skin_depth_conductor_approx(&copper_like),
        max_relative = 1e-6
    );
}

#[test]
fn media_shared_across_threads() {
    let medium1 = Arc::new(Medium::vacuum());
    let medium2 = Arc::new(Medium::new(2.0, 1.0, 0.81).unwrap());

    let handles: Vec<_> = [1.0e9, 1.8e9, 2.4e9]
        .into_iter()
        .map(|f| {
            let (m1, m2) = (Arc::clone(&medium1), Arc::clone(&medium2));
            thread::spawn(move || {
                let mut wave = Wave::new(f, 10.0).unwrap();
                wave.add_mediums(m1, m2);
                wave.gamma()
            })
        })
        .collect();

    for handle in handles {
        let gamma = handle.join().unwrap();
        assert!(gamma.norm() < 1.0);
    }
    assert_eq!(Arc::strong_count(&medium2), 1);
}

#[test]
fn invalid_inputs() {
    assert_eq!(Wave::new(-1.0, 10.0), Err(WaveError::InvalidFrequency(-1.0)));
    assert!(Wave::new(1.8e9, f64::NAN).is_err());
    assert_eq!(Medium::new(0.0, 1.0, 0.0), Err(WaveError::InvalidPermittivity(0.0)));
    assert_eq!(Medium::new(1.0, -2.0, 0.0), Err(WaveError::InvalidPermeability(-2.0)));
    assert_eq!(Medium::new(1.0, 1.0, -0.1), Err(WaveError::InvalidConductivity(-0.1)));

    let mut settings = settings::load_default_config().unwrap();
    settings.medium1.permittivity = -4.0;
    assert!(settings.validate().is_err());
}

#[test]
fn save_is_unsupported() {
    let wave = Wave::default();
    for waveform in Shape::All.waveforms(&Default::default()).unwrap() {
        let result = wave.demo_animation(waveform.as_ref()).save("out.gif");
        assert!(matches!(result, Err(WaveError::Unimplemented(_))));
    }
}
