use clap::Parser;
use radar_data::{DistanceBand, Snapshot};
use radar_driver::{Radar, RadarConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Prints radar telemetry read from a serial port.
#[derive(Parser)]
#[command(about = "Reads telemetry from a sonar radar.", disable_version_flag = true)]
struct Args {
    /// The device path to a serial port
    port: String,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this many seconds. Runs until the link drops if omitted.
    #[arg(long)]
    seconds: Option<u64>,
    /// Print each frame as JSON instead of a summary line
    #[arg(long)]
    json: bool,
    /// Frames between two printed lines
    #[arg(long, default_value_t = 60)]
    every: u64,
}

fn summary(snapshot: &Snapshot) -> String {
    let pose = snapshot.pose;
    let band = if pose.is_empty() {
        "-".to_string()
    } else {
        format!("{:?}", DistanceBand::of(pose.distance))
    };
    format!(
        "{:>3}° {:>6.1}cm {:<4} trail={:<3} map={:<4} scans={} {}",
        pose.angle,
        pose.distance,
        band,
        snapshot.trail.len(),
        snapshot.map.len(),
        snapshot.session.scan_count,
        if snapshot.session.scanning { "scanning" } else { "idle" },
    )
}

fn main() -> radar_driver::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RadarConfig::from_file(path)?,
        None => RadarConfig::default(),
    };

    let mut radar = Radar::new(config)?;
    let notice_rx = radar.notices();
    radar.connect(&args.port)?;

    let json = args.json;
    let every = args.every.max(1);
    let mut frame: u64 = 0;
    let ticker = radar.start_ticker(move |snapshot: &Snapshot| {
        frame += 1;
        if frame % every != 0 {
            return;
        }
        if json {
            match serde_json::to_string(snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => log::error!("Failed to serialize frame: {}", e),
            }
        } else {
            println!("{}", summary(snapshot));
        }
    });

    let deadline = args.seconds.map(|s| Instant::now() + Duration::from_secs(s));
    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        match notice_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(notice) => {
                eprintln!("[{:?}] {}", radar.link_status(), notice);
                if matches!(notice, radar_driver::Notice::ConnectionLost(_)) {
                    break;
                }
            }
            Err(_) => continue,
        }
    }

    ticker.stop();
    radar.disconnect();
    Ok(())
}
