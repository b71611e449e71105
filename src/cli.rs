use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hazardwatch",
    version,
    about = "Natural hazard alerts for Indian states and union territories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Current conditions, forecast and alerts for one region
    Report {
        /// Region id or name, e.g. "kerala" or "Tamil Nadu"
        region: String,
        #[arg(long)]
        json: bool,
    },
    /// Active alerts for one region
    Alerts {
        region: String,
        /// Only show alerts of this hazard type (flood, heatwave, ...)
        #[arg(short, long)]
        kind: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Alert summary for every region
    Overview {
        #[arg(long)]
        json: bool,
    },
    /// List known regions
    Regions,
    /// Show the thresholds in effect, optionally for one region
    Thresholds { region: Option<String> },
    /// Evaluate hand-entered metrics against a region's rules
    Evaluate {
        region: String,
        /// Air temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        /// Relative humidity in %
        #[arg(long)]
        humidity: f64,
        /// Wind speed in km/h
        #[arg(long, default_value_t = 0.0)]
        wind: f64,
        /// Precipitation over the last 24 hours in mm
        #[arg(long = "precip-24h", default_value_t = 0.0)]
        precip_24h: f64,
        /// Precipitation over the last 7 days in mm (drought is skipped without it)
        #[arg(long = "precip-7d")]
        precip_7d: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Validate config and test the data source connection
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_evaluate_arguments() {
        let cli = Cli::try_parse_from([
            "hazardwatch",
            "-vv",
            "evaluate",
            "ladakh",
            "--temperature",
            "-12",
            "--humidity",
            "40",
            "--precip-24h",
            "3.5",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Evaluate {
                region,
                temperature,
                precip_24h,
                precip_7d,
                wind,
                ..
            } => {
                assert_eq!(region, "ladakh");
                assert_eq!(temperature, -12.0);
                assert_eq!(precip_24h, 3.5);
                assert_eq!(wind, 0.0);
                assert!(precip_7d.is_none());
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn parses_alert_filter() {
        let cli = Cli::try_parse_from(["hazardwatch", "alerts", "odisha", "--kind", "cyclone"])
            .unwrap();
        match cli.command {
            Commands::Alerts { region, kind, json } => {
                assert_eq!(region, "odisha");
                assert_eq!(kind.as_deref(), Some("cyclone"));
                assert!(!json);
            }
            _ => panic!("expected alerts"),
        }
    }
}
