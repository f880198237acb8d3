//! Plane waves at normal incidence on a planar interface.
//!
//! A [`Wave`] carries a frequency and an amplitude and is evaluated against a
//! pair of media: medium 1 fills the half-space `z < 0`, medium 2 fills
//! `z > 0`, and the interface is the plane `z = 0`. Every quantity below is a
//! closed-form function of the current state; nothing is cached, so replacing
//! the media with [`Wave::add_mediums`] is reflected immediately.
//!
//! Sign conventions follow the `exp(jωt)` phasor convention: the wavenumber of
//! a passive medium has a non-positive imaginary part, and a wave travelling
//! towards `+z` is written `exp(-jkz)`.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use num_complex::Complex;

use crate::constants::{DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY};
use crate::errors::{positive, WaveError};
use crate::medium::Medium;
use crate::report::Report;

#[cfg(test)]
mod tests {

    use super::*;
    use crate::constants::{VACUUM_PERMEABILITY, VACUUM_PERMITTIVITY};
    use approx::assert_relative_eq;

    fn passive_media() -> Vec<Medium> {
        let mut media = Vec::new();
        for eps_r in [1.0, 1.5, 4.0, 80.0] {
            for mu_r in [1.0, 2.5] {
                for sigma in [0.0, 4e-10, 0.21, 0.81, 58.0, 1e7] {
                    media.push(Medium::new(eps_r, mu_r, sigma).unwrap());
                }
            }
        }
        media
    }

    #[test]
    fn defaults() {
        let wave = Wave::default();
        assert_eq!(wave.frequency(), 1.8e9);
        assert_eq!(wave.amplitude(), Complex::new(10.0, 0.0));
        assert!((wave.angular_frequency() - 2.0 * PI * 1.8e9).abs() < 1e-3);
        assert_eq!(**wave.medium1(), Medium::vacuum());
        assert_eq!(**wave.medium2(), Medium::vacuum());
        assert_eq!(Ok(wave), Wave::new(DEFAULT_FREQUENCY, DEFAULT_AMPLITUDE));
    }

    #[test]
    fn rejects_invalid_frequency() {
        assert_eq!(Wave::new(0.0, 10.0), Err(WaveError::InvalidFrequency(0.0)));
        assert_eq!(
            Wave::new(-1e9, 10.0),
            Err(WaveError::InvalidFrequency(-1e9))
        );
        assert!(Wave::new(f64::NAN, 10.0).is_err());
        assert!(Wave::new(1e9, f64::INFINITY).is_err());
    }

    #[test]
    fn vacuum_wavenumber() {
        let wave = Wave::default();
        let k = wave.wavenumber(&Medium::vacuum());
        let c = 1.0 / (VACUUM_PERMITTIVITY * VACUUM_PERMEABILITY).sqrt();
        assert_relative_eq!(k.re, wave.angular_frequency() / c, max_relative = 1e-12);
        assert_eq!(k.im, 0.0);
    }

    #[test]
    fn lossy_wavenumber_attenuates_forward() {
        let wave = Wave::default();
        let k = wave.wavenumber(&Medium::new(2.0, 1.0, 0.81).unwrap());
        assert!(k.re > 0.0);
        assert!(k.im < 0.0);
    }

    #[test]
    fn lossless_skin_depth_is_infinite() {
        let wave = Wave::default();
        for eps_r in [1.0, 2.0, 4.0] {
            let medium = Medium::new(eps_r, 1.0, 0.0).unwrap();
            assert_eq!(medium.equivalent_permittivity(wave.angular_frequency()).im, 0.0);
            assert_eq!(wave.skin_depth(&medium), f64::INFINITY);
            assert_eq!(wave.skin_depth_conductor_approx(&medium), f64::INFINITY);
            assert!(wave.wavelength(&medium).is_finite());
        }
    }

    #[test]
    fn good_conductor_skin_depth() {
        let wave = Wave::new(1.8e9, 10.0).unwrap();
        let copper_like = Medium::new(1.0, 1.0, 1e7).unwrap();
        let delta = wave.skin_depth(&copper_like);
        assert!(delta > 0.0);
        assert!(delta.is_finite());
        assert!(delta < 1e-5);
        assert_relative_eq!(
            delta,
            wave.skin_depth_conductor_approx(&copper_like),
            max_relative = 1e-6
        );
    }

    #[test]
    fn skin_depth_forms_diverge_for_poor_conductors() {
        let wave = Wave::default();
        let medium = Medium::new(2.0, 1.0, 0.01).unwrap();
        let exact = wave.skin_depth(&medium);
        let approx = wave.skin_depth_conductor_approx(&medium);
        assert!(exact > approx);
    }

    #[test]
    fn vacuum_on_dielectric() {
        let mut wave = Wave::default();
        wave.add_mediums(Medium::vacuum(), Medium::new(4.0, 1.0, 0.0).unwrap());
        let gamma = wave.gamma();
        let tau = wave.tau();
        assert_relative_eq!(gamma.re, -1.0 / 3.0, max_relative = 1e-12);
        assert!(gamma.im.abs() < 1e-15);
        assert_relative_eq!(tau.re, 2.0 / 3.0, max_relative = 1e-12);
        assert!(tau.im.abs() < 1e-15);
    }

    #[test]
    fn null_interface() {
        let wave = Wave::default();
        for medium in passive_media() {
            let gamma = wave.reflection(&medium, &medium);
            let tau = wave.transmission(&medium, &medium);
            assert_eq!(gamma, Complex::new(0.0, 0.0));
            assert!((tau - Complex::new(1.0, 0.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn interface_relations() {
        for frequency in [1e6, 1.8e9, 3e10] {
            let wave = Wave::new(frequency, 1.0).unwrap();
            let media = passive_media();
            for m1 in &media {
                for m2 in &media {
                    let gamma = wave.reflection(m1, m2);
                    let tau = wave.transmission(m1, m2);
                    assert!(gamma.norm() <= 1.0 + 1e-12, "|Γ| = {}", gamma.norm());
                    assert!((tau - (gamma + 1.0)).norm() < 1e-9);
                    assert!((wave.reflection(m2, m1) + gamma).norm() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn energy_conservation() {
        let wave = Wave::new(2.4e9, Complex::new(3.0, -4.0)).unwrap();
        let media = passive_media();
        for m1 in &media {
            for m2 in &media {
                let incident = wave.incident_power_density(m1);
                let gamma = wave.reflection(m1, m2);
                let transmitted = wave.transmitted_power_density(m1, m2);
                assert!(incident >= 0.0);
                assert_relative_eq!(
                    transmitted,
                    incident * (1.0 - gamma.norm_sqr()),
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn lossless_transmitted_power_matches_transmitted_field() {
        let wave = Wave::default();
        let m1 = Medium::vacuum();
        let m2 = Medium::new(4.0, 2.5, 0.0).unwrap();
        let tau = wave.transmission(&m1, &m2);
        let zeta2 = m2.characteristic_impedance(wave.angular_frequency());
        let from_field = 0.5 * (tau * wave.amplitude()).norm_sqr() / zeta2.norm();
        assert_relative_eq!(
            wave.transmitted_power_density(&m1, &m2),
            from_field,
            max_relative = 1e-12
        );
    }

    #[test]
    fn vacuum_power_density() {
        let wave = Wave::default();
        let expected = 0.5 * 100.0 / 376.730313;
        assert_relative_eq!(
            wave.incident_power_density(&Medium::vacuum()),
            expected,
            max_relative = 1e-6
        );
    }

    #[test]
    fn velocity_and_wavelength() {
        let wave = Wave::new(1e9, 1.0).unwrap();
        let c = wave.phase_velocity(&Medium::vacuum());
        assert_relative_eq!(c, 299_792_458.0, max_relative = 1e-8);
        assert_relative_eq!(wave.wavelength(&Medium::vacuum()), c / 1e9);

        let glass = Medium::new(4.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(wave.phase_velocity(&glass), c / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn media_are_shared() {
        let m1 = Arc::new(Medium::vacuum());
        let m2 = Arc::new(Medium::new(2.0, 1.0, 0.81).unwrap());
        let mut first = Wave::default();
        let mut second = Wave::new(1e9, 1.0).unwrap();
        first.add_mediums(m1.clone(), m2.clone());
        second.add_mediums(m1.clone(), m2.clone());
        assert!(Arc::ptr_eq(first.medium2(), second.medium2()));
        assert_eq!(Arc::strong_count(&m2), 3);
    }

    #[test]
    fn replacing_media_updates_coefficients() {
        let mut wave = Wave::default();
        assert_eq!(wave.gamma(), Complex::new(0.0, 0.0));
        wave.add_mediums(Medium::vacuum(), Medium::new(4.0, 1.0, 0.0).unwrap());
        assert!(wave.gamma().re < 0.0);
    }
}

/// Monochromatic plane wave incident on the interface between two media.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    frequency: f64,
    omega: f64,
    amplitude: Complex<f64>,
    medium1: Arc<Medium>,
    medium2: Arc<Medium>,
}

impl Wave {
    /// Creates a wave with frequency `frequency` [Hz] and amplitude
    /// `amplitude` [V/m], travelling through vacuum on both sides.
    pub fn new(frequency: f64, amplitude: impl Into<Complex<f64>>) -> Result<Self, WaveError> {
        if !positive(frequency) {
            return Err(WaveError::InvalidFrequency(frequency));
        }
        let amplitude = amplitude.into();
        if !amplitude.is_finite() {
            return Err(WaveError::InvalidAmplitude(amplitude.to_string()));
        }
        Ok(Self::in_vacuum(frequency, amplitude))
    }

    /// Builds a wave from values already known to be valid.
    fn in_vacuum(frequency: f64, amplitude: Complex<f64>) -> Self {
        let vacuum = Arc::new(Medium::vacuum());
        Self {
            frequency,
            omega: 2.0 * PI * frequency,
            amplitude,
            medium1: vacuum.clone(),
            medium2: vacuum,
        }
    }

    /// Replaces both media at once.
    ///
    /// Accepts either owned media or shared handles, so the same pair can be
    /// attached to several waves.
    pub fn add_mediums(&mut self, medium1: impl Into<Arc<Medium>>, medium2: impl Into<Arc<Medium>>) {
        self.medium1 = medium1.into();
        self.medium2 = medium2.into();
        tracing::debug!(
            medium1 = %self.medium1,
            medium2 = %self.medium2,
            "replaced interface media"
        );
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn angular_frequency(&self) -> f64 {
        self.omega
    }

    pub fn amplitude(&self) -> Complex<f64> {
        self.amplitude
    }

    /// Medium filling `z < 0`.
    pub fn medium1(&self) -> &Arc<Medium> {
        &self.medium1
    }

    /// Medium filling `z > 0`.
    pub fn medium2(&self) -> &Arc<Medium> {
        &self.medium2
    }

    /// Complex wavenumber [1/m]: the real part is the phase constant, the
    /// imaginary part is minus the attenuation constant.
    pub fn wavenumber(&self, medium: &Medium) -> Complex<f64> {
        let mu = medium.equivalent_permeability();
        let eps = medium.equivalent_permittivity(self.omega);
        (eps * mu).sqrt() * self.omega
    }

    /// Reflection coefficient of the electric field going from `medium1`
    /// into `medium2`.
    pub fn reflection(&self, medium1: &Medium, medium2: &Medium) -> Complex<f64> {
        let zeta1 = medium1.characteristic_impedance(self.omega);
        let zeta2 = medium2.characteristic_impedance(self.omega);
        (zeta2 - zeta1) / (zeta2 + zeta1)
    }

    /// Transmission coefficient of the electric field going from `medium1`
    /// into `medium2`.
    pub fn transmission(&self, medium1: &Medium, medium2: &Medium) -> Complex<f64> {
        let zeta1 = medium1.characteristic_impedance(self.omega);
        let zeta2 = medium2.characteristic_impedance(self.omega);
        2.0 * zeta2 / (zeta2 + zeta1)
    }

    /// Reflection coefficient of the configured interface.
    pub fn gamma(&self) -> Complex<f64> {
        self.reflection(&self.medium1, &self.medium2)
    }

    /// Transmission coefficient of the configured interface.
    pub fn tau(&self) -> Complex<f64> {
        self.transmission(&self.medium1, &self.medium2)
    }

    /// Distance [m] over which the amplitude decays by `1/e`.
    ///
    /// Infinite when the medium does not attenuate.
    pub fn skin_depth(&self, medium: &Medium) -> f64 {
        let alpha = self.wavenumber(medium).im;
        if alpha == 0.0 {
            f64::INFINITY
        } else {
            -1.0 / alpha
        }
    }

    /// Good-conductor approximation `sqrt(2/(ωμσ))` of the skin depth.
    ///
    /// Agrees with [`Wave::skin_depth`] only when the loss tangent is large.
    pub fn skin_depth_conductor_approx(&self, medium: &Medium) -> f64 {
        if medium.is_lossless() {
            return f64::INFINITY;
        }
        (2.0 / (self.omega * medium.equivalent_permeability() * medium.conductivity())).sqrt()
    }

    /// Phase velocity [m/s].
    pub fn phase_velocity(&self, medium: &Medium) -> f64 {
        let eps = medium.equivalent_permittivity(self.omega);
        (eps * medium.equivalent_permeability()).sqrt().inv().re
    }

    /// Wavelength [m].
    pub fn wavelength(&self, medium: &Medium) -> f64 {
        self.phase_velocity(medium) / self.frequency
    }

    /// Power density [W/m²] carried by the incident wave in `medium`.
    pub fn incident_power_density(&self, medium: &Medium) -> f64 {
        0.5 * self.amplitude.norm_sqr() / medium.characteristic_impedance(self.omega).norm()
    }

    /// Power density [W/m²] crossing the interface, i.e. the part of the
    /// incident power that is not reflected.
    pub fn transmitted_power_density(&self, medium1: &Medium, medium2: &Medium) -> f64 {
        let gamma = self.reflection(medium1, medium2);
        self.incident_power_density(medium1) * (1.0 - gamma.norm_sqr())
    }

    /// Collects every derived quantity of the configured interface.
    pub fn report(&self) -> Report {
        Report::new(self)
    }
}

impl Default for Wave {
    fn default() -> Self {
        Self::in_vacuum(DEFAULT_FREQUENCY, Complex::new(DEFAULT_AMPLITUDE, 0.0))
    }
}

impl fmt::Display for Wave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wave: f = {} Hz; A = {}", self.frequency, self.amplitude)
    }
}
