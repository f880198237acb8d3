use std::path::PathBuf;

use emwaves::errors::WaveError;
use emwaves::medium::Medium;
use emwaves::wave::Wave;
use emwaves::waveform::{Gaussian, Rect, Sine, Waveform};
use num_complex::Complex;
use pyo3::exceptions::{PyNotImplementedError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: WaveError) -> PyErr {
    match err {
        WaveError::Unimplemented(_) => PyNotImplementedError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// A homogeneous, isotropic, linear medium.
#[pyclass(name = "Medium", module = "emwaves_py")]
#[derive(Clone)]
struct PyMedium {
    medium: Medium,
}

#[pymethods]
impl PyMedium {
    #[new]
    #[pyo3(signature = (eps_r = 1.0, mu_r = 1.0, sigma = 0.0))]
    fn py_new(eps_r: f64, mu_r: f64, sigma: f64) -> PyResult<Self> {
        let medium = Medium::new(eps_r, mu_r, sigma).map_err(to_py_err)?;
        Ok(Self { medium })
    }

    #[getter]
    fn eps_r(&self) -> f64 {
        self.medium.relative_permittivity()
    }

    #[getter]
    fn mu_r(&self) -> f64 {
        self.medium.relative_permeability()
    }

    #[getter]
    fn sigma(&self) -> f64 {
        self.medium.conductivity()
    }

    /// Equivalent complex permittivity at the frequency of `wave`.
    fn eps_eq(&self, wave: PyRef<'_, PyWave>) -> Complex<f64> {
        self.medium
            .equivalent_permittivity(wave.wave.angular_frequency())
    }

    /// Equivalent permeability.
    fn mu_eq(&self) -> f64 {
        self.medium.equivalent_permeability()
    }

    /// Characteristic impedance at the frequency of `wave`.
    fn zeta_eq(&self, wave: PyRef<'_, PyWave>) -> Complex<f64> {
        self.medium
            .characteristic_impedance(wave.wave.angular_frequency())
    }

    /// Loss tangent and classification at the frequency of `wave`.
    fn kind(&self, wave: PyRef<'_, PyWave>) -> (f64, String) {
        let (u, kind) = self.medium.classify(wave.wave.angular_frequency());
        (u, kind.to_string())
    }

    fn __repr__(&self) -> String {
        self.medium.to_string()
    }
}

#[derive(Clone)]
enum Pulse {
    Sine(Sine),
    Gaussian(Gaussian),
    Rect(Rect),
}

impl Pulse {
    fn waveform(&self) -> &dyn Waveform {
        match self {
            Pulse::Sine(w) => w,
            Pulse::Gaussian(w) => w,
            Pulse::Rect(w) => w,
        }
    }
}

/// Sampled positions of both half-spaces, then one
/// `(t, incident, reflected, total, transmitted)` tuple per frame.
type Frames = (
    Vec<f64>,
    Vec<f64>,
    Vec<(f64, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)>,
);

/// A plane wave at normal incidence on the interface between two media.
#[pyclass(name = "Wave", module = "emwaves_py", subclass)]
#[derive(Clone)]
struct PyWave {
    wave: Wave,
    pulse: Option<Pulse>,
}

impl PyWave {
    fn build(f: f64, a: Complex<f64>, pulse: Option<Pulse>) -> PyResult<Self> {
        let wave = Wave::new(f, a).map_err(to_py_err)?;
        Ok(Self { wave, pulse })
    }

    fn pulse(&self) -> PyResult<&dyn Waveform> {
        self.pulse
            .as_ref()
            .map(Pulse::waveform)
            .ok_or_else(|| PyNotImplementedError::new_err("a plain Wave has no pulse shape"))
    }
}

#[pymethods]
impl PyWave {
    #[new]
    #[pyo3(signature = (f = 1.8e9, a = Complex::new(10.0, 0.0)))]
    fn py_new(f: f64, a: Complex<f64>) -> PyResult<Self> {
        Self::build(f, a, None)
    }

    #[getter]
    fn f(&self) -> f64 {
        self.wave.frequency()
    }

    #[getter]
    fn omega(&self) -> f64 {
        self.wave.angular_frequency()
    }

    #[getter]
    fn amplitude(&self) -> Complex<f64> {
        self.wave.amplitude()
    }

    #[getter]
    fn medium1(&self) -> PyMedium {
        PyMedium {
            medium: **self.wave.medium1(),
        }
    }

    #[getter]
    fn medium2(&self) -> PyMedium {
        PyMedium {
            medium: **self.wave.medium2(),
        }
    }

    /// Replaces both media. `medium1` fills z < 0 and `medium2` fills z > 0.
    fn add_mediums(&mut self, medium1: PyMedium, medium2: PyMedium) {
        self.wave.add_mediums(medium1.medium, medium2.medium);
    }

    /// Complex wavenumber in `medium`.
    fn k(&self, medium: PyMedium) -> Complex<f64> {
        self.wave.wavenumber(&medium.medium)
    }

    /// Reflection coefficient of the configured interface.
    fn gamma(&self) -> Complex<f64> {
        self.wave.gamma()
    }

    /// Transmission coefficient of the configured interface.
    fn tau(&self) -> Complex<f64> {
        self.wave.tau()
    }

    /// Skin depth in `medium`, medium 2 when omitted. Infinite when lossless.
    #[pyo3(signature = (medium = None))]
    fn skin_depth(&self, medium: Option<PyMedium>) -> f64 {
        match medium {
            Some(m) => self.wave.skin_depth(&m.medium),
            None => self.wave.skin_depth(self.wave.medium2()),
        }
    }

    fn v(&self, medium: PyMedium) -> f64 {
        self.wave.phase_velocity(&medium.medium)
    }

    fn wavelength(&self, medium: PyMedium) -> f64 {
        self.wave.wavelength(&medium.medium)
    }

    fn power_density_inc(&self) -> f64 {
        self.wave.incident_power_density(self.wave.medium1())
    }

    fn power_density_trans(&self) -> f64 {
        self.wave
            .transmitted_power_density(self.wave.medium1(), self.wave.medium2())
    }

    /// Prints the diagnostic report.
    fn print_data(&self) {
        println!("{}", self.wave);
        println!("{}", self.wave.report());
    }

    /// Diagnostic report as a JSON string.
    fn report(&self) -> PyResult<String> {
        serde_json::to_string_pretty(&self.wave.report())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Samples the pulse over its default time window.
    fn frames(&self) -> PyResult<Frames> {
        let animation = self.wave.demo_animation(self.pulse()?);
        let frames = animation
            .frames
            .into_iter()
            .map(|frame| {
                (
                    frame.time,
                    frame.incident.to_vec(),
                    frame.reflected.to_vec(),
                    frame.total.to_vec(),
                    frame.transmitted.to_vec(),
                )
            })
            .collect();
        Ok((animation.grid.z1.to_vec(), animation.grid.z2.to_vec(), frames))
    }

    /// Vertical plotting range of the pulse.
    fn ylim(&self) -> PyResult<(f64, f64)> {
        Ok(self.pulse()?.plot_range(&self.wave))
    }

    /// Always raises `NotImplementedError`.
    fn save(&self, path: PathBuf) -> PyResult<()> {
        let animation = self.wave.demo_animation(self.pulse()?);
        animation.save(path).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        self.wave.to_string()
    }
}

/// Continuous sinusoidal wave.
#[pyclass(name = "Sine", module = "emwaves_py", extends = PyWave)]
struct PySine;

#[pymethods]
impl PySine {
    #[new]
    #[pyo3(signature = (f = 1.8e9, a = Complex::new(10.0, 0.0)))]
    fn py_new(f: f64, a: Complex<f64>) -> PyResult<(Self, PyWave)> {
        Ok((Self, PyWave::build(f, a, Some(Pulse::Sine(Sine)))?))
    }
}

/// Gaussian pulse.
#[pyclass(name = "Gaussian", module = "emwaves_py", extends = PyWave)]
struct PyGaussian;

#[pymethods]
impl PyGaussian {
    #[new]
    #[pyo3(signature = (f = 1.8e9, a = Complex::new(10.0, 0.0), rms = 2.20))]
    fn py_new(f: f64, a: Complex<f64>, rms: f64) -> PyResult<(Self, PyWave)> {
        let gaussian = Gaussian::new(rms).map_err(to_py_err)?;
        Ok((Self, PyWave::build(f, a, Some(Pulse::Gaussian(gaussian)))?))
    }
}

/// Rectangular pulse.
#[pyclass(name = "Rect", module = "emwaves_py", extends = PyWave)]
struct PyRect;

#[pymethods]
impl PyRect {
    #[new]
    #[pyo3(signature = (f = 1.8e9, a = Complex::new(10.0, 0.0), width = 6.5))]
    fn py_new(f: f64, a: Complex<f64>, width: f64) -> PyResult<(Self, PyWave)> {
        let rect = Rect::new(width).map_err(to_py_err)?;
        Ok((Self, PyWave::build(f, a, Some(Pulse::Rect(rect)))?))
    }
}

/// Plane wave reflection and transmission at a planar interface.
#[pymodule]
fn emwaves_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMedium>()?;
    m.add_class::<PyWave>()?;
    m.add_class::<PySine>()?;
    m.add_class::<PyGaussian>()?;
    m.add_class::<PyRect>()?;
    Ok(())
}
