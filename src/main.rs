use std::path::PathBuf;

use anyhow::Context;
use charge_field::prelude::*;
use clap::Parser;
use log::info;

/// Plot the electrostatic field of three fixed point charges.
#[derive(Debug, Parser)]
#[command(name = "charge-field", version, about)]
struct Args {
    /// Output image; `.svg`, or `.png` when built with the `ttf` feature.
    #[arg(short, long, default_value = "electrostatic_field.svg")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SimulationConfig::three_charge_system();
    let solution = plot_to_file(&config, &PlotStyle::default(), &args.output)
        .with_context(|| format!("plotting {} to {}", config.name, args.output.display()))?;

    if let Some((lo, hi)) = solution.normalized.magnitude_range() {
        info!("field magnitude spans {lo:.3e} .. {hi:.3e} V/m");
    }
    Ok(())
}
