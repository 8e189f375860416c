//! coil-homogeneity: CLI for locating the homogeneous field region of a coil setup

use anyhow::{bail, Context, Result};
use clap::Parser;
use coil_homogeneity::{AnalysisConfig, HelmholtzPreset, HomogeneityAnalysis, SetupFile};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "coil-homogeneity")]
#[command(about = "Locate the homogeneous magnetic field region of a coaxial coil arrangement")]
#[command(version)]
struct Args {
    /// Setup JSON file (domain bounds and coils)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Helmholtz pair radius in m, used when no input file is given
    #[arg(long)]
    helmholtz_radius: Option<f64>,

    /// Coil current in A for the Helmholtz pair
    #[arg(long, default_value = "1")]
    current: f64,

    /// Turns per coil for the Helmholtz pair
    #[arg(long, default_value = "1")]
    turns: f64,

    /// Homogeneity threshold in percent, e.g. 97 or 97%
    #[arg(long, default_value = "97", value_parser = parse_percent)]
    homogeneity: f64,

    /// Norm field samples per axis
    #[arg(long, default_value = "101")]
    grid: usize,

    /// Segments per coil in the Biot-Savart sum
    #[arg(long, default_value = "128")]
    segments: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Append the thresholded homogeneity mask
    #[arg(long)]
    mask: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Accept `97`, `97.5`, ` 97 %`
fn parse_percent(s: &str) -> std::result::Result<f64, String> {
    let value = s.trim().trim_end_matches('%').trim();
    value
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", s))
}

fn load_setup(args: &Args) -> Result<SetupFile> {
    if let Some(path) = &args.input {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read setup file: {:?}", path))?;
        return SetupFile::from_json(&json)
            .with_context(|| format!("Failed to parse setup file: {:?}", path));
    }

    match args.helmholtz_radius {
        Some(radius) => Ok(SetupFile {
            helmholtz: Some(HelmholtzPreset {
                radius,
                current: args.current,
                turns: args.turns,
            }),
            ..SetupFile::default()
        }),
        None => bail!("Provide a setup file with --input or a Helmholtz pair with --helmholtz-radius"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let domain = load_setup(&args)?.into_domain().context("Invalid setup")?;
    info!(
        "Domain: z [{}, {}], y [{}, {}], {} coils",
        domain.z_min,
        domain.z_max,
        domain.y_min,
        domain.y_max,
        domain.coils.len()
    );

    let config = AnalysisConfig {
        threshold_percent: args.homogeneity,
        grid_nz: args.grid,
        grid_ny: args.grid,
        segments: args.segments,
    };

    let analysis = HomogeneityAnalysis::from_config(domain, &config)
        .context("Failed to sample the field")?;
    let report = analysis
        .compute(config.threshold_percent)
        .context("Homogeneity computation failed")?;

    let mut text = if args.json {
        serde_json::to_string_pretty(&report)? + "\n"
    } else {
        report.render()?
    };

    if args.mask {
        let grid = analysis.uniformity()?;
        text.push('\n');
        text.push_str(&grid.mask_to_text(report.threshold));
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            eprintln!("Wrote homogeneity report: {:?}", path);
        }
        None => print!("{}", text),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("97").unwrap(), 97.0);
        assert_eq!(parse_percent("97.5%").unwrap(), 97.5);
        assert_eq!(parse_percent(" 100 % ").unwrap(), 100.0);
        assert!(parse_percent("abc").is_err());
    }

    #[test]
    fn test_args_require_a_setup() {
        let args = Args::parse_from(["coil-homogeneity"]);
        assert!(load_setup(&args).is_err());

        let args = Args::parse_from(["coil-homogeneity", "--helmholtz-radius", "0.2", "--homogeneity", "99%"]);
        assert_eq!(args.homogeneity, 99.0);
        let setup = load_setup(&args).unwrap();
        assert_eq!(setup.helmholtz.unwrap().radius, 0.2);
    }
}
