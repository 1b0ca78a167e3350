//! ring — a small tpnet run on an eight-station ring with a cross line.
//!
//! Usage: `ring [TOPOLOGY.json]`.  Without an argument the embedded network
//! below is used.  Writes `output/ring/events.csv` plus one statistics CSV
//! per table, and prints the final passenger table.
//!
//! Set `RUST_LOG=debug` to see per-step summaries.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use tp_core::SimConfig;
use tp_output::{CsvEventLog, EventLogObserver, write_stat_csv_path};
use tp_sim::{Labels, SimBuilder, SpawnTarget, StatKind};
use tp_topology::TopologySpec;

// ── Embedded inputs ───────────────────────────────────────────────────────────

const NETWORK_JSON: &str = r#"{
    "kind": "explicit",
    "stations": ["Harbor", "Market", "Castle", "Mill", "Abbey", "Forge", "Bridge", "Gate"],
    "lines": [
        {"a": "Harbor", "b": "Market"},
        {"a": "Market", "b": "Castle"},
        {"a": "Castle", "b": "Mill"},
        {"a": "Mill",   "b": "Abbey"},
        {"a": "Abbey",  "b": "Forge"},
        {"a": "Forge",  "b": "Bridge"},
        {"a": "Bridge", "b": "Gate"},
        {"a": "Gate",   "b": "Harbor"},
        {"a": "Market", "b": "Forge", "weight": 3}
    ]
}"#;

const CONFIG_JSON: &str = r#"{
    "seed": 7,
    "default_car_capacity": 4,
    "arrival_policy": "regenerate",
    "total_steps": 60,
    "step_duration": 2,
    "step_units": "min"
}"#;

const OUTPUT_DIR: &str = "output/ring";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Network.
    let spec = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => TopologySpec::from_json_path(&path)
            .with_context(|| format!("loading topology from {}", path.display()))?,
        None => TopologySpec::from_json_str(NETWORK_JSON)?,
    };
    let topology = spec.build()?;
    println!("=== ring: tpnet transport simulation ===");
    println!(
        "Network: {} stations, {} lines",
        topology.station_count(),
        topology.line_count()
    );

    // 2. Config.
    let config: SimConfig = serde_json::from_str(CONFIG_JSON)?;
    println!(
        "Config: seed {}, capacity {}, policy {}, {} steps of {} {}",
        config.seed,
        config.default_car_capacity,
        config.arrival_policy,
        config.total_steps,
        config.step_duration,
        config.step_units,
    );
    println!();

    // 3. Sim with a CSV event log.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let log = CsvEventLog::create(&Path::new(OUTPUT_DIR).join("events.csv"))?;
    let mut observer = EventLogObserver::new(log);
    observer.note(&format!("seed {}", config.seed))?;

    let mut sim = SimBuilder::seeded(topology, config).observer(observer).build()?;

    // 4. Population.
    let first = sim.topology().station_name(tp_core::StationId(0))?.to_owned();
    sim.spawn_cars(first.as_str(), SpawnTarget::Random, 3)?;
    sim.spawn_car("Abbey", SpawnTarget::Destination("Harbor".into()))?;
    let start_names: Vec<String> = sim
        .topology()
        .stations()
        .filter_map(|s| sim.topology().station_name(s).ok().map(str::to_owned))
        .collect();
    for name in &start_names {
        sim.spawn_passengers(name.as_str(), SpawnTarget::Random, 2)?;
    }
    info!(
        "spawned {} cars and {} passengers",
        sim.registry().car_count(),
        sim.registry().passenger_count()
    );

    // 5. Run.
    let t0 = Instant::now();
    let steps = sim.run()?;
    let elapsed = t0.elapsed();

    if let Some(e) = sim.observer_mut().take_error() {
        eprintln!("event log error: {e}");
    }

    // 6. Statistics.
    for kind in StatKind::ALL {
        let path = Path::new(OUTPUT_DIR).join(format!("{kind}.csv"));
        write_stat_csv_path(&path, &sim.get_stat(kind), sim.topology(), Labels::Names)?;
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  steps executed : {steps}");
    println!("  clock          : {}", sim.clock);
    println!();

    let table = sim.get_stat(StatKind::Passengers);
    let headers = table.headers();
    println!("{}", headers.iter().map(|h| format!("{h:<12}")).collect::<String>());
    println!("{}", "-".repeat(12 * headers.len()));
    for record in table.records(sim.topology(), Labels::Names) {
        println!("{}", record.iter().map(|f| format!("{f:<12}")).collect::<String>());
    }

    Ok(())
}
