use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::constants::{DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, DEFAULT_RMS, DEFAULT_WIDTH};
use crate::medium::{Medium, MediumParams};
use crate::wave::Wave;
use crate::waveform::{Gaussian, Rect, Sine, Waveform};


/// Waveform selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Sine,
    Gaussian,
    Rect,
    All,
}

impl Shape {
    /// The waveforms selected by this shape, parameterised from `settings`.
    pub fn waveforms(&self, settings: &Settings) -> Result<Vec<Box<dyn Waveform>>> {
        let waveforms: Vec<Box<dyn Waveform>> = match self {
            Shape::Sine => vec![Box::new(Sine)],
            Shape::Gaussian => vec![Box::new(Gaussian::new(settings.rms)?)],
            Shape::Rect => vec![Box::new(Rect::new(settings.width)?)],
            Shape::All => vec![
                Box::new(Sine),
                Box::new(Gaussian::new(settings.rms)?),
                Box::new(Rect::new(settings.width)?),
            ],
        };
        Ok(waveforms)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Sine => "sine",
            Shape::Gaussian => "gaussian",
            Shape::Rect => "rect",
            Shape::All => "all",
        }
    }
}

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Carrier frequency [Hz].
    pub frequency: f64,
    /// Field amplitude [V/m].
    pub amplitude: f64,
    pub medium1: MediumParams,
    pub medium2: MediumParams,
    /// RMS spread of the gaussian pulse.
    pub rms: f64,
    /// Half-width of the rectangular pulse.
    pub width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
            medium1: MediumParams {
                permittivity: 1.0,
                permeability: 1.0,
                conductivity: 0.0,
            },
            medium2: MediumParams {
                permittivity: 4.0,
                permeability: 2.5,
                conductivity: 4e-10,
            },
            rms: DEFAULT_RMS,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Settings {
    /// Checks every parameter by building the objects they describe.
    pub fn validate(&self) -> Result<()> {
        self.wave()?;
        Shape::All.waveforms(self)?;
        Ok(())
    }

    pub fn media(&self) -> Result<(Medium, Medium)> {
        let medium1 = Medium::try_from(self.medium1).context("invalid medium 1")?;
        let medium2 = Medium::try_from(self.medium2).context("invalid medium 2")?;
        Ok((medium1, medium2))
    }

    /// Builds the configured wave with both media attached.
    pub fn wave(&self) -> Result<Wave> {
        let (medium1, medium2) = self.media()?;
        let mut wave = Wave::new(self.frequency, self.amplitude)?;
        wave.add_mediums(medium1, medium2);
        Ok(wave)
    }

    /// Overrides values with those given on the command line.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(freq) = args.freq {
            self.frequency = freq * 1e9;
        }
        if let Some(amplitude) = args.amplitude {
            self.amplitude = amplitude;
        }
        if let Some(er1) = args.er1 {
            self.medium1.permittivity = er1;
        }
        if let Some(er2) = args.er2 {
            self.medium2.permittivity = er2;
        }
        if let Some(mur1) = args.mur1 {
            self.medium1.permeability = mur1;
        }
        if let Some(mur2) = args.mur2 {
            self.medium2.permeability = mur2;
        }
        if let Some(sigma1) = args.sigma1 {
            self.medium1.conductivity = sigma1;
        }
        if let Some(sigma2) = args.sigma2 {
            self.medium2.conductivity = sigma2;
        }
        if let Some(rms) = args.rms {
            self.rms = rms;
        }
        if let Some(width) = args.width {
            self.width = width;
        }
    }

    /// Asks for frequency, permittivities and conductivities, keeping the
    /// current value whenever the answer is empty.
    pub fn prompt<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        self.frequency = ask(input, output, "Insert frequency in GHz: ", self.frequency / 1e9)? * 1e9;
        self.medium1.permittivity = ask(input, output, "Insert ε_r_1: ", self.medium1.permittivity)?;
        self.medium2.permittivity = ask(input, output, "Insert ε_r_2: ", self.medium2.permittivity)?;
        self.medium1.conductivity = ask(input, output, "Insert σ_1: ", self.medium1.conductivity)?;
        self.medium2.conductivity = ask(input, output, "Insert σ_2: ", self.medium2.conductivity)?;
        Ok(())
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str, default: f64) -> Result<f64> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    answer
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number", answer))
}

/// Loads the shipped default configuration, ignoring local overrides,
/// environment variables and command line arguments.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root();
    let settings = builder_with_defaults()?
        .add_source(File::from(root.join("config/default.toml")).required(true))
        .build()
        .context("Error loading configuration")?;

    settings
        .try_deserialize()
        .context("Error deserializing configuration")
}

/// Loads the configuration: built-in defaults, then `config/local.toml` if it
/// exists or `config/default.toml` otherwise, then `EMWAVES_*` environment
/// variables, then the command line.
pub fn load_config(args: &CliArgs) -> Result<Settings> {
    let root = retrieve_project_root();

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    let config_file = if local_config.exists() {
        tracing::info!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        tracing::info!("Using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings = builder_with_defaults()?
        .add_source(File::from(config_file).required(false))
        .add_source(
            Environment::with_prefix("EMWAVES")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    config.apply_args(args);
    tracing::debug!("{:#?}", config);

    Ok(config)
}

fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let defaults = Settings::default();
    let builder = Config::builder()
        .set_default("frequency", defaults.frequency)?
        .set_default("amplitude", defaults.amplitude)?
        .set_default("medium1.permittivity", defaults.medium1.permittivity)?
        .set_default("medium1.permeability", defaults.medium1.permeability)?
        .set_default("medium1.conductivity", defaults.medium1.conductivity)?
        .set_default("medium2.permittivity", defaults.medium2.permittivity)?
        .set_default("medium2.permeability", defaults.medium2.permeability)?
        .set_default("medium2.conductivity", defaults.medium2.conductivity)?
        .set_default("rms", defaults.rms)?
        .set_default("width", defaults.width)?;
    Ok(builder)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the EMWAVES_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
/// If none of these work, the current directory is used.
fn retrieve_project_root() -> PathBuf {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir);
    }
    if let Ok(path) = env::var("EMWAVES_ROOT_DIR") {
        return PathBuf::from(path);
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    if let Some(exe_dir) = exe_dir {
        if let Some(found) = exe_dir.ancestors().find(|dir| dir.join("config").is_dir()) {
            return found.to_path_buf();
        }
    }

    PathBuf::from(".")
}

#[derive(Parser, Debug, Default)]
#[command(
    version,
    about = "emwaves - a plane wave hitting the interface between two media"
)]
pub struct CliArgs {
    /// Carrier frequency in GHz.
    #[arg(short, long)]
    pub freq: Option<f64>,

    /// Field amplitude in V/m.
    #[arg(short, long)]
    pub amplitude: Option<f64>,

    /// Relative permittivity of medium 1 (z < 0).
    #[arg(long)]
    pub er1: Option<f64>,

    /// Relative permittivity of medium 2 (z > 0).
    #[arg(long)]
    pub er2: Option<f64>,

    /// Relative permeability of medium 1.
    #[arg(long)]
    pub mur1: Option<f64>,

    /// Relative permeability of medium 2.
    #[arg(long)]
    pub mur2: Option<f64>,

    /// Conductivity of medium 1 in S/m.
    #[arg(long)]
    pub sigma1: Option<f64>,

    /// Conductivity of medium 2 in S/m.
    #[arg(long)]
    pub sigma2: Option<f64>,

    /// RMS spread of the gaussian pulse.
    #[arg(long)]
    pub rms: Option<f64>,

    /// Half-width of the rectangular pulse.
    #[arg(long)]
    pub width: Option<f64>,

    /// Prompt for frequency, permittivities and conductivities.
    /// Empty answers keep the configured value.
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the diagnostic report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Skip the recap and the diagnostic report.
    #[arg(long)]
    pub no_report: bool,

    /// Show each waveform with its own demonstration media instead of the configured ones.
    #[arg(long)]
    pub demo: bool,

    /// Animate the given waveform. `all` opens one window per waveform.
    #[arg(long, value_enum)]
    pub animate: Option<Shape>,

    /// Save the animation to a file.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(20);
        writeln!(f, "{}", rule)?;
        writeln!(f, "f_0: {} GHz", self.frequency / 1e9)?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "ε_r_1: {:<10} ε_r_2: {}",
            self.medium1.permittivity, self.medium2.permittivity
        )?;
        writeln!(
            f,
            "μ_r_1: {:<10} μ_r_2: {}",
            self.medium1.permeability, self.medium2.permeability
        )?;
        writeln!(
            f,
            "σ_1: {:<10}   σ_2: {}",
            self.medium1.conductivity, self.medium2.conductivity
        )?;
        write!(f, "{}", rule)
    }
}
