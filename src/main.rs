use chrono::Local;
use color_eyre::{eyre::eyre, Result};
use fieldpad::controller::GamepadBus;
use fieldpad::{DriverStation, StationConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = load_config()?;
    info!(
        "Polling {} controllers every {}ms",
        config.controllers.len(),
        config.poll_interval_ms
    );

    let bus = GamepadBus::new().map_err(|e| eyre!("Failed to open gamepad bus: {}", e))?;
    let period = Duration::from_millis(config.poll_interval_ms);
    let mut station = DriverStation::create(config, Box::new(bus))?
        .connect()
        .map_err(|e| eyre!("Failed to connect controllers: {}", e))?;

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut edge_count = 0u64;
    let mut last_log_time = Local::now();
    let log_interval = chrono::Duration::seconds(10);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = station.poll();
                edge_count += snapshot.edges().count() as u64;

                let now = Local::now();
                if now - last_log_time > log_interval {
                    info!(
                        "Station stats: {} cycles, {} edges in last {} seconds",
                        station.cycles(),
                        edge_count,
                        log_interval.num_seconds()
                    );
                    debug!("Latest axes: {:?}", snapshot.axes);
                    edge_count = 0;
                    last_log_time = now;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down after {} cycles", station.cycles());
                break;
            }
        }
    }

    Ok(())
}

fn load_config() -> Result<StationConfig> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(StationConfig::default_path);

    match path {
        Some(path) => Ok(StationConfig::load_or_default(&path)?),
        None => {
            info!("No config directory available, using defaults");
            Ok(StationConfig::default())
        }
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
