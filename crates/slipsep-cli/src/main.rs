use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slipsep_analysis::{AnalysisConfig, AnalysisInput, SeparationAnalyzer};
use slipsep_geology::{cutoff_pitch, FaultPlaneDiagram, Orientation};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "slipsep")]
#[command(about = "Dip and strike separation of a bed offset by a fault")]
struct Cmd {
    /// Log geometry decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute dip and strike separation
    Analyze {
        #[command(flatten)]
        planes: Planes,
        /// Net-slip rake in degrees, 0 to 360
        #[arg(long, value_parser = parse_rake)]
        rake: f64,
        /// Net-slip magnitude; defaults to the configured value
        #[arg(long, value_parser = parse_magnitude)]
        magnitude: Option<f64>,
        /// JSON analysis config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the whole analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pitch of the bedding cutoff line on the fault plane
    Cutoff {
        #[command(flatten)]
        planes: Planes,
        /// Net-slip rake; prints the fault plane diagram when given
        #[arg(long, value_parser = parse_rake)]
        rake: Option<f64>,
    },
}

#[derive(Args)]
struct Planes {
    #[arg(long, value_parser = parse_dip)]
    fault_dip: f64,
    #[arg(long, value_parser = parse_azimuth)]
    fault_dip_direction: f64,
    #[arg(long, value_parser = parse_dip)]
    bedding_dip: f64,
    #[arg(long, value_parser = parse_azimuth)]
    bedding_dip_direction: f64,
}

impl Planes {
    fn orientations(&self) -> Result<(Orientation, Orientation)> {
        Ok((
            Orientation::new(self.fault_dip, self.fault_dip_direction)?,
            Orientation::new(self.bedding_dip, self.bedding_dip_direction)?,
        ))
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::WARN };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cmd.action {
        Action::Analyze {
            planes,
            rake,
            magnitude,
            config,
            json,
        } => analyze(&planes, rake, magnitude, config, json),
        Action::Cutoff { planes, rake } => cutoff(&planes, rake),
    }
}

fn analyze(
    planes: &Planes,
    rake: f64,
    magnitude: Option<f64>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let magnitude = magnitude.unwrap_or(config.default_magnitude);
    tracing::info!(rake, magnitude, "analyze");

    let input = AnalysisInput::new(
        planes.fault_dip,
        planes.fault_dip_direction,
        planes.bedding_dip,
        planes.bedding_dip_direction,
        rake,
        magnitude,
    )?;
    let analysis = SeparationAnalyzer::new(config)?
        .analyze(&input)
        .context("separation analysis failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("Dip separation: {}", analysis.dip_separation);
        println!("Strike separation: {}", analysis.strike_separation);
    }
    Ok(())
}

fn cutoff(planes: &Planes, rake: Option<f64>) -> Result<()> {
    let (fault, bedding) = planes.orientations()?;
    match rake {
        Some(rake) => {
            let diagram = FaultPlaneDiagram::new(&fault, &bedding, rake)?;
            println!("{}", serde_json::to_string_pretty(&diagram)?);
        }
        None => println!("Cutoff pitch: {:.2}", cutoff_pitch(&fault, &bedding)?),
    }
    Ok(())
}

fn bounded(s: &str, name: &str, lo: f64, hi: f64) -> std::result::Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("{name} must be a number"))?;
    if !(lo..=hi).contains(&v) {
        return Err(format!("{name} must be between {lo} and {hi}"));
    }
    Ok(v)
}

fn parse_dip(s: &str) -> std::result::Result<f64, String> {
    bounded(s, "dip", 0.0, 90.0)
}

fn parse_azimuth(s: &str) -> std::result::Result<f64, String> {
    bounded(s, "dip direction", 0.0, 360.0)
}

fn parse_rake(s: &str) -> std::result::Result<f64, String> {
    bounded(s, "rake", 0.0, 360.0)
}

fn parse_magnitude(s: &str) -> std::result::Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| "magnitude must be a number".to_string())?;
    if !(v > 0.0) || !v.is_finite() {
        return Err("magnitude must be positive".to_string());
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLANES: [&str; 8] = [
        "--fault-dip",
        "60",
        "--fault-dip-direction",
        "0",
        "--bedding-dip",
        "30",
        "--bedding-dip-direction",
        "90",
    ];

    fn parse(action: &str, extra: &[&str]) -> std::result::Result<Cmd, clap::Error> {
        let args = ["slipsep", action]
            .into_iter()
            .chain(PLANES)
            .chain(extra.iter().copied());
        Cmd::try_parse_from(args)
    }

    #[test]
    fn test_analyze_defaults() {
        let cmd = parse("analyze", &["--rake", "90"]).unwrap();
        match cmd.action {
            Action::Analyze {
                planes,
                rake,
                magnitude,
                json,
                ..
            } => {
                assert_eq!(planes.fault_dip, 60.0);
                assert_eq!(planes.bedding_dip_direction, 90.0);
                assert_eq!(rake, 90.0);
                assert_eq!(magnitude, None);
                assert!(!json);
            }
            Action::Cutoff { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(parse("analyze", &["--rake", "361"]).is_err());
        assert!(parse("analyze", &["--rake", "90", "--magnitude", "0"]).is_err());
        assert!(parse("analyze", &["--rake", "90", "--magnitude", "-3"]).is_err());
        let bad_dip = Cmd::try_parse_from([
            "slipsep",
            "cutoff",
            "--fault-dip",
            "91",
            "--fault-dip-direction",
            "0",
            "--bedding-dip",
            "30",
            "--bedding-dip-direction",
            "90",
        ]);
        assert!(bad_dip.is_err());
    }

    #[test]
    fn test_cutoff_rake_is_optional() {
        let cmd = parse("cutoff", &["--verbose"]).unwrap();
        assert!(cmd.verbose);
        assert!(matches!(cmd.action, Action::Cutoff { rake: None, .. }));
    }

    #[test]
    fn test_bounded_parsers() {
        assert_eq!(parse_dip("45.5"), Ok(45.5));
        assert!(parse_azimuth("north").is_err());
        assert_eq!(parse_magnitude("12"), Ok(12.0));
        assert!(parse_magnitude("inf").is_err());
    }
}
