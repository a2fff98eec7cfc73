use std::{path::PathBuf, thread, time::Duration};

use anyhow::Result;
use clap::Parser;
use scanbot::Scan;
use scanbot_apps::{
    report::{format_scan_table, save_scan_csv},
    utils::{get_scenario_config_path, init_tracing},
    ScenarioConfig,
};
use tracing::{debug, info, warn};

/// Runs the simulated LIDAR and sonar in a scenario and prints the resulting scan.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    /// Path to the scenario file. Falls back to SCANBOT_SCENARIO_PATH, then to
    /// an empty 25m x 25m arena.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Scan continuously for this many seconds. 0 takes a single scan.
    #[clap(short, long, default_value_t = 0.0)]
    duration_secs: f64,
    /// Print every reading instead of a sample.
    #[clap(long)]
    show_all: bool,
    /// Save the last scan as CSV.
    #[clap(long, value_parser)]
    csv: Option<PathBuf>,
    /// Print the default scenario and exit.
    #[clap(long)]
    show_default_config: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    debug!(?args);

    if args.show_default_config {
        print!("{}", toml::to_string(&ScenarioConfig::default())?);
        return Ok(());
    }

    let config = match get_scenario_config_path(args.config_path) {
        Some(path) => ScenarioConfig::try_new(path)?,
        None => ScenarioConfig::default(),
    };
    let duration = Duration::try_from_secs_f64(args.duration_secs)?;

    let (_environment, mut bot) = config.create_bot()?;
    bot.initialize();

    let scan = if duration.is_zero() {
        Some(bot.get_lidar_scan()?)
    } else {
        bot.start(Some(Box::new(|scan: &Scan| -> Result<(), scanbot::Error> {
            info!(
                "Scan at {:.3}: {} of {} readings detected",
                scan.timestamp().unwrap_or_default(),
                scan.detected_count(),
                scan.len()
            );
            Ok(())
        })))?;
        thread::sleep(duration);
        bot.stop();
        info!("{} scans completed", bot.lidar().scan_count());
        bot.get_latest_lidar_scan().map(|scan| (*scan).clone())
    };
    let sonar = bot.get_sonar_distance()?;
    bot.shutdown();

    let Some(scan) = scan else {
        warn!("No scan completed");
        return Ok(());
    };
    print!("{}", format_scan_table(&scan, args.show_all));
    println!("Sonar distance: {:.3} m", sonar.distance);
    if let Some(path) = args.csv {
        save_scan_csv(&scan, path)?;
    }
    Ok(())
}
