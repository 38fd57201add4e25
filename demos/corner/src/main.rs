//! corner — a two-lane street bending round a building.
//!
//! Two westbound and two eastbound vehicles pass a rectangular building with
//! a base station on the far side.  `car1`'s station link disappears behind
//! the building for part of every lap; whenever that happens the engine
//! looks for another vehicle to relay through.
//!
//! Usage: `corner [scene.json]`.  Without an argument the embedded scene is
//! used.  Set `RUST_LOG=debug` for per-tick detail.
//!
//! After the scene run, the same street is filled with a seeded random fleet
//! to compare occlusion rates.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::LevelFilter;

use v2x_core::{SimConfig, SimRng, Tick};
use v2x_link::LinkClass;
use v2x_mobility::{Lane, spawn_fleet};
use v2x_output::{CsvWriter, OcclusionStats, SimOutputObserver};
use v2x_sim::{Scene, SimBuilder, SimObserver, TickOutput, load_scene, load_scene_str};

// ── Constants ─────────────────────────────────────────────────────────────────

const SCENE_JSON:      &str  = include_str!("../scene.json");
const OUTPUT_DIR:      &str  = "output/corner";
const SEED:            u64   = 42;
const RANDOM_VEHICLES: usize = 16;
const TOP_BLOCKED:     usize = 5;

// ── Relay counter ─────────────────────────────────────────────────────────────

/// Counts ticks in which at least one relay path was offered.
#[derive(Default)]
struct RelayCounter {
    ticks_with_relay: u64,
    total_paths:      u64,
    first_relay:      Option<Tick>,
}

impl SimObserver for RelayCounter {
    fn on_tick_end(&mut self, tick: Tick, output: &TickOutput) -> std::ops::ControlFlow<()> {
        if !output.relays.is_empty() {
            self.ticks_with_relay += 1;
            self.total_paths += output.relays.len() as u64;
            self.first_relay.get_or_insert(tick);
        }
        std::ops::ControlFlow::Continue(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Distinct lanes used by the scene's vehicles, in first-seen order.
fn scene_lanes(scene: &Scene) -> Vec<Lane> {
    let mut lanes: Vec<Lane> = Vec::new();
    for v in &scene.fleet {
        if !lanes.contains(&v.lane) {
            lanes.push(v.lane);
        }
    }
    lanes
}

/// The scene's config with relay search switched to every blocked vehicle.
/// Spawned vehicles are named `vehicle_<n>`, so a scene's distinguished id
/// would never match.
fn random_traffic_config(scene: &SimConfig) -> SimConfig {
    SimConfig {
        distinguished:     None,
        relay_all_blocked: true,
        ..scene.clone()
    }
}

fn print_stats(stats: &OcclusionStats) {
    let v2i = stats.iter().filter(|(_, s)| s.class == LinkClass::V2I).count();
    println!(
        "  {} distinct links ({} V2I, {} V2V), {} occlusion events",
        stats.len(),
        v2i,
        stats.len() - v2i,
        stats.total_occlusion_events(),
    );
    println!();
    println!("  {:<20} {:<5} {:>8} {:>8} {:>7}", "Link", "Class", "Present", "Blocked", "Events");
    println!("  {}", "-".repeat(52));
    for (id, s) in stats.most_blocked(TOP_BLOCKED) {
        println!(
            "  {:<20} {:<5} {:>8} {:>7.1}% {:>7}",
            id.as_str(),
            s.class.as_str(),
            s.ticks_present,
            s.blocked_fraction() * 100.0,
            s.occlusion_events,
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    println!("=== corner — v2x connectivity engine ===");

    // 1. Load the scene.
    let scene = match std::env::args().nth(1) {
        Some(path) => load_scene(&path)?,
        None => load_scene_str(SCENE_JSON)?,
    };
    let lanes = scene_lanes(&scene);
    let config = scene.config.clone();
    println!(
        "Vehicles: {}  |  Range: {}  |  Ticks: {}  |  Distinguished: {}",
        scene.fleet.len(),
        config.range,
        config.total_ticks,
        config.distinguished.as_ref().map_or("-", |id| id.as_str()),
    );
    println!();

    // 2. Build the sim.
    let mut sim = SimBuilder::from_scene(scene).build()?;

    // 3. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = (
        (SimOutputObserver::new(writer), OcclusionStats::new()),
        RelayCounter::default(),
    );

    // 4. Run.
    let t0 = Instant::now();
    let ticks = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    let ((output, stats), relays) = &mut obs;
    if let Some(e) = output.take_error() {
        eprintln!("output error: {e}");
    }
    stats.write_csv(&Path::new(OUTPUT_DIR).join("link_stats.csv"))?;

    // 5. Summary.
    println!("Scene run: {ticks} ticks in {:.3} s", elapsed.as_secs_f64());
    if let Some(last) = sim.last_output() {
        println!(
            "  final tick: {} links, {} active",
            last.links.len(),
            last.active_connections(),
        );
    }
    match relays.first_relay {
        Some(first) => println!(
            "  relay offered on {} ticks ({} paths), first at {first}",
            relays.ticks_with_relay, relays.total_paths,
        ),
        None => println!("  no relay was ever needed"),
    }
    print_stats(stats);
    println!();
    println!("CSV output written to {OUTPUT_DIR}/");
    println!();

    // 6. Same street, random traffic.
    let mut rng = SimRng::new(SEED);
    let fleet = spawn_fleet(&mut rng, RANDOM_VEHICLES, &lanes, 1.0..3.0)?;
    let mut random = SimBuilder::new(random_traffic_config(&config), fleet, sim.station.clone());
    if let Some(obstacle) = sim.obstacle {
        random = random.obstacle(obstacle);
    }
    let mut random = random.build()?;
    let mut random_obs = (OcclusionStats::new(), RelayCounter::default());
    random.run(&mut random_obs)?;
    let (random_stats, random_relays) = &random_obs;

    println!("Random traffic ({RANDOM_VEHICLES} vehicles, seed {SEED}):");
    println!(
        "  relay offered on {} ticks ({} paths)",
        random_relays.ticks_with_relay, random_relays.total_paths,
    );
    print_stats(random_stats);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_traffic_searches_every_blocked_vehicle() {
        let scene = load_scene_str(SCENE_JSON).unwrap();
        let cfg = random_traffic_config(&scene.config);
        assert!(cfg.distinguished.is_none());
        assert!(cfg.relay_all_blocked);
        assert_eq!(cfg.range, scene.config.range);
        assert_eq!(cfg.total_ticks, scene.config.total_ticks);
    }

    #[test]
    fn random_traffic_run_reports_no_lookup_failures() {
        let scene = load_scene_str(SCENE_JSON).unwrap();
        let lanes = scene_lanes(&scene);
        let cfg = SimConfig { total_ticks: 50, ..random_traffic_config(&scene.config) };
        let fleet = spawn_fleet(&mut SimRng::new(SEED), RANDOM_VEHICLES, &lanes, 1.0..3.0).unwrap();

        let mut builder = SimBuilder::new(cfg, fleet, scene.station.clone());
        if let Some(obstacle) = scene.obstacle {
            builder = builder.obstacle(obstacle);
        }
        let mut sim = builder.build().unwrap();

        struct NoRelayErrors(bool);
        impl SimObserver for NoRelayErrors {
            fn on_tick_end(&mut self, _tick: Tick, output: &TickOutput) -> std::ops::ControlFlow<()> {
                self.0 &= output.relay_error.is_none();
                std::ops::ControlFlow::Continue(())
            }
        }
        let mut obs = NoRelayErrors(true);
        sim.run(&mut obs).unwrap();
        assert!(obs.0);
    }
}
