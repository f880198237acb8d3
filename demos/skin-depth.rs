use emwaves::medium::Medium;
use emwaves::report::Sig;
use emwaves::wave::Wave;

/// Sweeps the conductivity of medium 2 and compares the exact skin depth with
/// the good-conductor approximation.
fn main() -> anyhow::Result<()> {
    let wave = Wave::new(1.8e9, 10.0)?;
    let omega = wave.angular_frequency();

    println!("{:>10} {:>16} {:>12} {:>12} {:>8}", "σ [S/m]", "kind", "δ", "δ approx", "|Γ|");
    for exponent in -4..=8 {
        let sigma = 10f64.powi(exponent);
        let medium = Medium::new(4.0, 1.0, sigma)?;
        let (_, kind) = medium.classify(omega);
        let gamma = wave.reflection(&Medium::vacuum(), &medium);

        println!(
            "{:>10} {:>16} {:>12} {:>12} {:>8}",
            Sig(sigma).to_string(),
            kind.to_string(),
            Sig(wave.skin_depth(&medium)).to_string(),
            Sig(wave.skin_depth_conductor_approx(&medium)).to_string(),
            Sig(gamma.norm()).to_string(),
        );
    }
    Ok(())
}
