use std::env;
use std::io;
use std::process::Command;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use emwaves::errors::WaveError;
use emwaves::field::Animation;
use emwaves::settings::{self, CliArgs, Settings, Shape};
use emwaves::wave::Wave;
use emwaves::waveform::Waveform;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let mut settings = settings::load_config(&args)?;

    if args.interactive {
        println!("Insert data when prompted, if skipped default value will be used.");
        let stdin = io::stdin();
        settings.prompt(&mut stdin.lock(), &mut io::stdout())?;
    }
    settings.validate()?;

    if let Some(path) = &args.save {
        let error = WaveError::Unimplemented("saving animations to a file");
        return Err(anyhow::Error::new(error).context(format!("could not save to {:?}", path)));
    }

    let wave = settings.wave()?;

    if !args.no_report {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&wave.report())?);
        } else {
            println!("{}", settings);
            println!("{}", wave);
            println!("{}", wave.report());
        }
    }

    let Some(shape) = args.animate else {
        return Ok(());
    };

    match shape {
        Shape::All => spawn_windows(&settings, &args),
        single => {
            let waveforms = single.waveforms(&settings)?;
            for waveform in waveforms {
                let animation = build_animation(&wave, waveform.as_ref(), args.demo)?;
                show(animation)?;
            }
            Ok(())
        }
    }
}

/// Samples `waveform` either on the configured media or, with `demo`, on the
/// media it is best shown with.
fn build_animation(wave: &Wave, waveform: &dyn Waveform, demo: bool) -> Result<Animation> {
    if !demo {
        return Ok(wave.demo_animation(waveform));
    }
    let (medium1, medium2) = waveform.default_media();
    let mut wave = Wave::new(wave.frequency(), wave.amplitude())?;
    wave.add_mediums(medium1, medium2);
    tracing::info!(waveform = waveform.name(), %medium1, %medium2, "using demonstration media");
    Ok(wave.demo_animation(waveform))
}

/// Opens one window per waveform, each in its own process, and waits for all
/// of them to be closed.
fn spawn_windows(settings: &Settings, args: &CliArgs) -> Result<()> {
    let exe = env::current_exe().context("could not locate the running executable")?;
    let mut children = Vec::new();

    for shape in [Shape::Sine, Shape::Gaussian, Shape::Rect] {
        let mut command = Command::new(&exe);
        command
            .arg("--no-report")
            .args(["--animate", shape.name()])
            .arg(format!("--freq={}", settings.frequency / 1e9))
            .arg(format!("--amplitude={}", settings.amplitude))
            .arg(format!("--er1={}", settings.medium1.permittivity))
            .arg(format!("--er2={}", settings.medium2.permittivity))
            .arg(format!("--mur1={}", settings.medium1.permeability))
            .arg(format!("--mur2={}", settings.medium2.permeability))
            .arg(format!("--sigma1={}", settings.medium1.conductivity))
            .arg(format!("--sigma2={}", settings.medium2.conductivity))
            .arg(format!("--rms={}", settings.rms))
            .arg(format!("--width={}", settings.width));
        if args.demo {
            command.arg("--demo");
        }
        tracing::debug!("spawning {:?}", command);
        let child = command
            .spawn()
            .with_context(|| format!("could not open the {} window", shape.name()))?;
        children.push(child);
    }

    for mut child in children {
        let status = child.wait()?;
        if !status.success() {
            tracing::warn!("animation window exited with {}", status);
        }
    }
    Ok(())
}

#[cfg(feature = "visualization")]
fn show(animation: Animation) -> Result<()> {
    emwaves::plot::show(animation);
    Ok(())
}

#[cfg(not(feature = "visualization"))]
fn show(_animation: Animation) -> Result<()> {
    anyhow::bail!("animations require the `visualization` feature")
}
