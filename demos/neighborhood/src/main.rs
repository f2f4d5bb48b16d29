//! neighborhood — a pawtrack walkthrough on a handful of Lima pets.
//!
//! Two modes:
//!
//! - **live** (default): drives `ProximitySimulation` on its wall-clock
//!   timer and prints alerts as they arrive.  `--interval-ms 100` makes it
//!   finish quickly.
//! - **record** (`--out DIR`): runs the engine synchronously, as fast as it
//!   can, and writes `positions.csv` / `alerts.csv` into `DIR`.
//!
//! Logging goes through `tracing` at `warn` by default; set `RUST_LOG=info`
//! for alert lines or `RUST_LOG=debug` for per-tick summaries.

mod sample;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pt_core::{GeoPoint, PetProfile, ProximityConfig, TrackedEntity, parse_incidents};
use pt_output::{CsvWriter, ProximityOutputObserver};
use pt_proximity::{EngineBuilder, ProximityAlert, nearby_entities};
use pt_runtime::ProximitySimulation;

use sample::SAMPLE_INCIDENTS;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "neighborhood", about = "Simulated BLE proximity around lost pets")]
struct Args {
    /// Incident feed (JSON array).  Defaults to a built-in Lima sample.
    #[arg(long)]
    incidents: Option<PathBuf>,

    /// Engine configuration (TOML).  Missing keys take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = -12.0464, allow_hyphen_values = true)]
    observer_lat: f64,

    #[arg(long, default_value_t = -77.0428, allow_hyphen_values = true)]
    observer_lon: f64,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Override `tick_interval_ms` from the config.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Record mode: write CSV output into this directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// How many nearby pets to list at the end.
    #[arg(long, default_value_t = 5)]
    top: usize,
}

// ── Loading ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>, interval_ms: Option<u64>) -> Result<ProximityConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ProximityConfig::default(),
    };
    if let Some(ms) = interval_ms {
        config.tick_interval_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

fn load_pets(path: Option<&Path>) -> Result<Vec<TrackedEntity<PetProfile>>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading incidents {}", path.display()))?,
        None => SAMPLE_INCIDENTS.to_owned(),
    };
    let all = parse_incidents(&json)?;
    let total = all.len();
    let lost: Vec<_> = all.into_iter().filter(|e| e.kind.is_trackable()).collect();
    info!(total, lost = lost.len(), "incidents loaded");
    Ok(lost)
}

// ── Modes ─────────────────────────────────────────────────────────────────────

enum Event {
    Update(Vec<TrackedEntity<PetProfile>>),
    Alert(ProximityAlert),
}

/// Run on the wall-clock timer; returns the last position feed.
async fn run_live(
    config:   ProximityConfig,
    pets:     Vec<TrackedEntity<PetProfile>>,
    observer: GeoPoint,
    ticks:    u64,
) -> Result<(Vec<TrackedEntity<PetProfile>>, usize)> {
    let sim = ProximitySimulation::new(config)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let alert_tx = tx.clone();

    sim.start(
        pets.clone(),
        observer,
        move |feed| {
            let _ = tx.send(Event::Update(feed));
        },
        move |alert| {
            let _ = alert_tx.send(Event::Alert(alert));
        },
    )?;

    let mut latest = pets;
    let mut seen = 0;
    let mut alerts = 0;
    while seen < ticks {
        match rx.recv().await {
            Some(Event::Alert(alert)) => {
                alerts += 1;
                print_alert(&alert);
            }
            Some(Event::Update(feed)) => {
                seen += 1;
                latest = feed;
            }
            None => break,
        }
    }
    sim.stop();
    Ok((latest, alerts))
}

/// Run synchronously and record to CSV; returns the final positions.
fn run_recorded(
    config:   ProximityConfig,
    pets:     Vec<TrackedEntity<PetProfile>>,
    observer: GeoPoint,
    ticks:    u64,
    out:      &Path,
) -> Result<(Vec<TrackedEntity<PetProfile>>, usize)> {
    let mut engine = EngineBuilder::new(config)
        .observer(observer)
        .entities(pets)
        .build()?;

    let mut obs = ProximityOutputObserver::new(CsvWriter::new(out)?);
    let summaries = engine.run_ticks(ticks, &mut obs);
    obs.finish()?;

    let alerts = summaries.iter().map(|s| s.alerts).sum();
    println!("Wrote {} and {}", out.join("positions.csv").display(), out.join("alerts.csv").display());
    Ok((engine.entities().to_vec(), alerts))
}

fn print_alert(alert: &ProximityAlert) {
    println!(
        "  ALERT  {:<10} {:>4} m  signal {:>3}%",
        alert.entity.payload.name, alert.distance_m, alert.signal_strength
    );
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.interval_ms)?;
    let pets = load_pets(args.incidents.as_deref())?;
    let observer = GeoPoint::new(args.observer_lat, args.observer_lon);

    println!("=== neighborhood — pawtrack proximity ===");
    println!(
        "Pets: {}  |  Ticks: {}  |  Radius: {} m  |  Observer: {observer}",
        pets.len(),
        args.ticks,
        config.detection_radius_m
    );
    println!();

    let radius = config.detection_radius_m;
    let t0 = Instant::now();
    let (latest, alerts) = match args.out.as_deref() {
        Some(out) => run_recorded(config, pets, observer, args.ticks, out)?,
        None => run_live(config, pets, observer, args.ticks).await?,
    };

    println!();
    println!("Done in {:.3} s, {alerts} alert(s)", t0.elapsed().as_secs_f64());
    println!();

    let nearby = nearby_entities(observer, &latest, radius);
    println!("{:<10} {:<8} {:>8} {:>8}", "Pet", "Species", "Dist(m)", "Signal");
    println!("{}", "-".repeat(37));
    for hit in nearby.iter().take(args.top) {
        println!(
            "{:<10} {:<8} {:>8} {:>7}%",
            hit.entity.payload.name,
            format!("{:?}", hit.entity.payload.species),
            hit.distance_m,
            hit.signal_strength
        );
    }
    if nearby.is_empty() {
        println!("(nobody within range)");
    }

    Ok(())
}
