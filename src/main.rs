mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands};
use hazardwatch::logic::rules::{
    FLOOD_WARNING_PRECIPITATION_24H_MM, HEATWAVE_WARNING_TEMPERATURE_C,
};
use hazardwatch::models::{Alert, AlertSummary, HazardKind, WeatherReport, WeatherSample};
use hazardwatch::{Config, RegionOverview, ThresholdSet, WeatherService};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load(cli.config.clone()).context("Failed to load configuration")?;
    let service = Arc::new(
        WeatherService::from_config(&config).context("Failed to initialize weather service")?,
    );

    match cli.command {
        Commands::Report { region, json } => {
            let report = service
                .report(&region)
                .await
                .with_context(|| format!("Failed to build report for '{}'", region))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Alerts { region, kind, json } => {
            let kind = match kind {
                Some(k) => match HazardKind::from_str(&k) {
                    Some(kind) => Some(kind),
                    None => bail!("Unknown hazard type '{}'", k),
                },
                None => None,
            };
            let alerts = service
                .alerts(&region, kind)
                .await
                .with_context(|| format!("Failed to fetch alerts for '{}'", region))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            } else {
                print_alerts(&alerts);
            }
        }
        Commands::Overview { json } => {
            let overview = service.overview().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                print_overview(&overview);
            }
        }
        Commands::Regions => {
            for profile in service.regions().iter() {
                println!(
                    "{:<30} {:<32} {}",
                    profile.id,
                    profile.name,
                    profile.terrain()
                );
            }
        }
        Commands::Thresholds { region } => match region {
            Some(query) => {
                let (profile, thresholds) = service.thresholds_for(&query)?;
                println!("Thresholds for {} ({})", profile.name, profile.id);
                print_thresholds(thresholds);
            }
            None => {
                println!("Default thresholds");
                print_thresholds(&config.thresholds.default);
                for (region_id, thresholds) in &config.thresholds.overrides {
                    println!();
                    println!("Override: {}", region_id);
                    print_thresholds(thresholds);
                }
            }
        },
        Commands::Evaluate {
            region,
            temperature,
            humidity,
            wind,
            precip_24h,
            precip_7d,
            json,
        } => {
            let sample = WeatherSample {
                temperature_c: temperature,
                humidity_pct: humidity,
                wind_speed_kmh: wind,
                precipitation_24h_mm: precip_24h,
                precipitation_7d_mm: precip_7d.unwrap_or(f64::NAN),
            };
            let alerts = service.evaluate_sample(&region, &sample)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            } else {
                print_alerts(&alerts);
            }
        }
        Commands::Check => {
            println!("Configuration OK");
            println!("  Regions: {}", service.regions().len());
            println!("  Threshold overrides: {}", config.thresholds.overrides.len());
            println!("  Data source: {}", service.provider().kind());

            match service.test_connection().await {
                Ok(true) => println!("  Connection: OK"),
                Ok(false) => println!("  Connection: FAILED"),
                Err(e) => println!("  Connection: ERROR - {}", e),
            }
        }
    }

    Ok(())
}

fn print_report(report: &WeatherReport) {
    let current = &report.current;
    println!("{} ({})", report.region_name, report.source);
    println!(
        "  Now: {} {:.0}°C (feels like {:.0}°C), humidity {:.0}%, wind {:.0} km/h",
        current.condition,
        current.temperature_c,
        current.feels_like_c,
        current.humidity_pct,
        current.wind_speed_kmh
    );
    println!(
        "  Rainfall: {:.1} mm last 24h, {:.1} mm last 7 days",
        report.sample.precipitation_24h_mm, report.sample.precipitation_7d_mm
    );

    if !report.forecast.is_empty() {
        println!();
        println!("Forecast");
        for day in &report.forecast {
            println!(
                "  {} {:<14} {:>3.0}° / {:>3.0}°",
                day.day, day.condition, day.high_c, day.low_c
            );
        }
    }

    println!();
    print_alerts(&report.alerts);
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No active alerts");
        return;
    }

    println!("Alerts ({})", alerts.len());
    for alert in alerts {
        println!(
            "  {} [{}] {} - {}",
            alert.severity.symbol(),
            alert.severity,
            alert.title,
            alert.kind
        );
        println!("      {}", alert.description);
    }
}

fn print_overview(overview: &[RegionOverview]) {
    for entry in overview {
        match (&entry.summary, &entry.error) {
            (Some(summary), _) => println!("{:<32} {}", entry.region_name, summarize(summary)),
            (None, Some(error)) => println!("{:<32} unavailable: {}", entry.region_name, error),
            (None, None) => println!("{:<32} -", entry.region_name),
        }
    }
}

fn summarize(summary: &AlertSummary) -> String {
    match summary.highest {
        None => "clear".to_string(),
        Some(highest) => {
            let kinds: Vec<_> = summary.kinds.iter().map(|k| k.as_str()).collect();
            format!(
                "{} {} ({} alert{}: {})",
                highest.symbol(),
                highest,
                summary.total,
                if summary.total == 1 { "" } else { "s" },
                kinds.join(", ")
            )
        }
    }
}

fn print_thresholds(t: &ThresholdSet) {
    println!(
        "  Flood:     24h rain > {} mm or humidity > {}% (warning above {} mm)",
        t.flood.precipitation_24h_mm, t.flood.humidity_pct, FLOOD_WARNING_PRECIPITATION_24H_MM
    );
    println!(
        "  Heatwave:  temperature > {}°C (warning above {}°C)",
        t.heatwave.temperature_c, HEATWAVE_WARNING_TEMPERATURE_C
    );
    println!(
        "  Cyclone:   coastal, wind > {} km/h and 24h rain > {} mm",
        t.cyclone.wind_speed_kmh, t.cyclone.precipitation_24h_mm
    );
    println!(
        "  Drought:   7d rain < {} mm and temperature > {}°C",
        t.drought.precipitation_7d_mm, t.drought.temperature_c
    );
    println!(
        "  Landslide: mountainous, 24h rain > {} mm",
        t.landslide.precipitation_24h_mm
    );
}
