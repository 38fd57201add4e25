//! Integration tests for v2x-sim.

use std::ops::ControlFlow;

use v2x_core::{BaseStation, Direction, NodeId, Point, SimConfig, Tick};
use v2x_link::{LinkError, LinkRole};
use v2x_mobility::{Fleet, Lane, Vehicle};
use v2x_spatial::Obstacle;

use crate::{
    FixedTicks, NoopObserver, SceneError, Sim, SimBuilder, SimError, SimObserver, SimState,
    TickOutput, Unbounded, load_scene, load_scene_str,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn building() -> Obstacle {
    Obstacle::new(300.0, 250.0, 200.0, 100.0)
}

fn station() -> BaseStation {
    BaseStation::new("base", Point::new(400.0, 450.0))
}

fn parked(id: &str, x: f64, y: f64) -> Vehicle {
    Vehicle::at(id, x, Lane::new(0.0, 2000.0, y), Direction::Right, 0.0)
}

fn config(total_ticks: u64) -> SimConfig {
    SimConfig {
        range: 300.0,
        distinguished: Some(NodeId::from("car1")),
        total_ticks,
        ..SimConfig::default()
    }
}

/// `car1` is shadowed by the building and `car2` can bridge it.  Nothing
/// moves, so every tick looks the same.
fn shadowed_sim(total_ticks: u64) -> Sim {
    let fleet = Fleet::new(vec![
        parked("car1", 400.0, 150.0),
        parked("car2", 200.0, 300.0),
        parked("car3", 1000.0, 150.0),
    ])
    .unwrap();
    SimBuilder::new(config(total_ticks), fleet, station())
        .obstacle(building())
        .build()
        .unwrap()
}

/// Two opposing lanes around the building.
fn moving_sim(total_ticks: u64) -> Sim {
    let west = Lane::new(1200.0, 50.0, 180.0);
    let east = Lane::new(50.0, 1200.0, 420.0);
    let fleet = Fleet::new(vec![
        Vehicle::on_lane("car1", west, Direction::Left, 2.0),
        Vehicle::at("car2", 600.0, west, Direction::Left, 3.0),
        Vehicle::on_lane("car3", east, Direction::Right, 2.5),
        Vehicle::at("car4", 700.0, east, Direction::Right, 1.5),
    ])
    .unwrap();
    SimBuilder::new(config(total_ticks), fleet, station())
        .obstacle(building())
        .build()
        .unwrap()
}

/// Records which hooks fired.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    ends:      Vec<Tick>,
    snapshots: Vec<Tick>,
    finished:  Option<Tick>,
    outputs:   Vec<TickOutput>,
    break_at:  Option<usize>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, output: &TickOutput) -> ControlFlow<()> {
        self.ends.push(tick);
        self.outputs.push(output.clone());
        match self.break_at {
            Some(n) if self.ends.len() >= n => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    fn on_snapshot(&mut self, tick: Tick, _fleet: &Fleet, _output: &TickOutput) {
        self.snapshots.push(tick);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_idle() {
        let sim = shadowed_sim(10);
        assert_eq!(sim.state(), SimState::Idle);
        assert_eq!(sim.fleet().len(), 3);
        assert!(sim.registry().is_empty());
        assert!(sim.last_output().is_none());
    }

    #[test]
    fn negative_range_rejected() {
        let cfg = SimConfig { range: -1.0, ..SimConfig::default() };
        let result = SimBuilder::new(cfg, Fleet::empty(), station()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn non_finite_obstacle_rejected() {
        let result = SimBuilder::new(SimConfig::default(), Fleet::empty(), station())
            .obstacle(Obstacle::new(f64::NAN, 0.0, 10.0, 10.0))
            .build();
        assert!(matches!(result, Err(SimError::Spatial(_))));
    }

    #[test]
    fn vehicle_named_like_station_rejected() {
        let fleet = Fleet::new(vec![parked("base", 0.0, 0.0)]).unwrap();
        let result = SimBuilder::new(SimConfig::default(), fleet, station()).build();
        assert!(matches!(result, Err(SimError::StationIdClash(_))));
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn legal_transitions() {
        let mut sim = shadowed_sim(10);
        sim.start().unwrap();
        assert_eq!(sim.state(), SimState::Running);
        sim.stop().unwrap();
        assert_eq!(sim.state(), SimState::Stopped);
        sim.start().unwrap();
        assert_eq!(sim.state(), SimState::Running);
        sim.reset();
        assert_eq!(sim.state(), SimState::Idle);
    }

    #[test]
    fn illegal_transitions_error() {
        let mut sim = shadowed_sim(10);
        assert!(matches!(
            sim.stop(),
            Err(SimError::InvalidTransition { from: SimState::Idle, action: "stop" })
        ));
        sim.start().unwrap();
        assert!(matches!(
            sim.start(),
            Err(SimError::InvalidTransition { from: SimState::Running, action: "start" })
        ));
    }

    #[test]
    fn step_requires_running() {
        let mut sim = shadowed_sim(10);
        assert!(sim.step().is_err());
        sim.start().unwrap();
        assert!(sim.step().is_ok());
        sim.stop().unwrap();
        assert!(sim.step().is_err());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut sim = moving_sim(100);
        let initial: Vec<Point> = sim.fleet().positions();

        sim.run_ticks(25, &mut NoopObserver).unwrap();
        assert_ne!(sim.fleet().positions(), initial);
        assert!(!sim.registry().is_empty());

        sim.reset();
        assert_eq!(sim.fleet().positions(), initial);
        assert!(sim.registry().is_empty());
        assert!(sim.last_output().is_none());
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    #[test]
    fn replay_after_reset_is_identical() {
        let mut sim = moving_sim(50);
        let mut first = Recorder::default();
        sim.run(&mut first).unwrap();

        sim.reset();
        let mut second = Recorder::default();
        sim.run(&mut second).unwrap();

        assert_eq!(first.outputs, second.outputs);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_covers_every_tick() {
        let mut sim = shadowed_sim(7);
        let mut obs = Recorder::default();
        let ticks = sim.run(&mut obs).unwrap();

        assert_eq!(ticks, 7);
        assert_eq!(obs.starts, (0..7).map(Tick).collect::<Vec<_>>());
        assert_eq!(obs.ends, obs.starts);
        assert_eq!(obs.finished, Some(Tick(7)));
        assert_eq!(sim.state(), SimState::Stopped);
    }

    #[test]
    fn run_resumes_where_it_stopped() {
        let mut sim = shadowed_sim(10);
        sim.run_ticks(4, &mut NoopObserver).unwrap();
        let rest = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(rest, 6);
        assert_eq!(sim.clock.current_tick, Tick(10));
    }

    #[test]
    fn snapshots_follow_interval() {
        let mut sim = shadowed_sim(10);
        sim.config.output_interval_ticks = 3;
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(3), Tick(6), Tick(9)]);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut sim = shadowed_sim(5);
        sim.config.output_interval_ticks = 0;
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert!(obs.snapshots.is_empty());
    }

    #[test]
    fn observer_break_stops_unbounded_source() {
        let mut sim = moving_sim(0);
        let mut obs = Recorder { break_at: Some(5), ..Recorder::default() };
        let ticks = sim.run_with(&mut Unbounded, &mut obs).unwrap();
        assert_eq!(ticks, 5);
        assert_eq!(sim.state(), SimState::Stopped);
        assert_eq!(obs.finished, Some(Tick(5)));
    }

    #[test]
    fn closure_tick_source() {
        let mut sim = shadowed_sim(0);
        let mut budget = 3;
        let mut source = || {
            budget -= 1;
            budget >= 0
        };
        let ticks = sim.run_with(&mut source, &mut NoopObserver).unwrap();
        assert_eq!(ticks, 3);
    }

    #[test]
    fn exhausted_source_runs_nothing() {
        let mut sim = shadowed_sim(10);
        let ticks = sim.run_with(&mut FixedTicks(0), &mut NoopObserver).unwrap();
        assert_eq!(ticks, 0);
        assert!(sim.last_output().is_none());
    }

    #[test]
    fn vehicles_move_before_links_are_measured() {
        let fleet = Fleet::new(vec![
            Vehicle::at("a", 100.0, Lane::new(0.0, 2000.0, 0.0), Direction::Right, 10.0),
            parked("b", 0.0, 0.0),
        ])
        .unwrap();
        let cfg = SimConfig { range: 1000.0, ..SimConfig::default() };
        let mut sim = SimBuilder::new(cfg, fleet, station()).build().unwrap();
        sim.start().unwrap();
        let out = sim.step().unwrap();
        let link = out.links.between(&NodeId::from("a"), &NodeId::from("b")).unwrap();
        assert_eq!(link.distance, 110.0);
    }

    #[test]
    fn static_scene_is_deterministic() {
        let mut sim = shadowed_sim(3);
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.outputs[1].links, obs.outputs[2].links);
        assert_eq!(obs.outputs[1].active_connections(), obs.outputs[2].active_connections());
    }

    #[test]
    fn first_tick_creates_then_updates() {
        let mut sim = shadowed_sim(2);
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.outputs[0].diff.created.len(), obs.outputs[0].links.len());
        assert!(obs.outputs[1].diff.created.is_empty());
        assert!(obs.outputs[1].diff.removed.is_empty());
    }
}

// ── Relay integration ─────────────────────────────────────────────────────────

#[cfg(test)]
mod relay_tests {
    use super::*;

    #[test]
    fn blocked_distinguished_link_yields_relay() {
        let mut sim = shadowed_sim(1);
        sim.start().unwrap();
        let out = sim.step().unwrap();

        assert_eq!(out.relays.len(), 1);
        assert_eq!(out.relays[0].relay, NodeId::from("car2"));
        assert!(out.relay_error.is_none());

        let hop1 = out.links.get(&out.relays[0].hop1).unwrap();
        assert_eq!(hop1.role, LinkRole::Relay);
        let registered = sim.registry().get(&sim.last_output().unwrap().relays[0].hop2).unwrap();
        assert_eq!(registered.role, LinkRole::Relay);
    }

    #[test]
    fn no_distinguished_vehicle_means_no_search() {
        let mut sim = shadowed_sim(1);
        sim.config.distinguished = None;
        sim.start().unwrap();
        let out = sim.step().unwrap();
        assert!(out.relays.is_empty());
        assert!(out.links.links.iter().all(|l| l.role == LinkRole::Direct));
    }

    #[test]
    fn unknown_distinguished_vehicle_still_completes_tick() {
        let mut sim = shadowed_sim(1);
        sim.config.distinguished = Some(NodeId::from("ghost"));
        sim.start().unwrap();
        let out = sim.step().unwrap();
        assert_eq!(out.relay_error, Some(LinkError::UnknownVehicle(NodeId::from("ghost"))));
        assert!(out.relays.is_empty());
        assert!(!out.links.is_empty());

        let kept = out.clone();
        assert_eq!(&kept, sim.last_output().unwrap());
    }

    #[test]
    fn relay_all_blocked_searches_every_vehicle() {
        let mut sim = shadowed_sim(1);
        sim.config.distinguished = None;
        sim.config.relay_all_blocked = true;
        sim.start().unwrap();
        let out = sim.step().unwrap();
        assert_eq!(out.relays.len(), 1);
        assert_eq!(out.relays[0].origin, NodeId::from("car1"));
    }
}

// ── Scene loading ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod scene_tests {
    use std::io::Write;

    use super::*;

    const CORNER: &str = r#"{
        "config": { "range": 250, "distinguished": "car1", "total_ticks": 20 },
        "base_station": { "id": "base", "x": 400, "y": 450 },
        "obstacle": { "x": 300, "y": 250, "width": 200, "height": 100 },
        "vehicles": [
            { "id": "car1", "lane": { "start_x": 1200, "end_x": 50, "y": 180 }, "speed": 2 },
            { "id": "car2", "lane": { "start_x": 50, "end_x": 1200, "y": 420 },
              "direction": "right", "speed": 1.5, "x": 300 }
        ]
    }"#;

    #[test]
    fn parses_full_scene() {
        let scene = load_scene_str(CORNER).unwrap();
        assert_eq!(scene.config.range, 250.0);
        assert_eq!(scene.config.total_ticks, 20);
        assert_eq!(scene.config.output_interval_ticks, 1);
        assert_eq!(scene.station.position, Point::new(400.0, 450.0));
        assert_eq!(scene.obstacle, Some(building()));

        let car1 = scene.fleet.get(&NodeId::from("car1")).unwrap();
        assert_eq!(car1.direction, Direction::Left);
        assert_eq!(car1.position, Point::new(1200.0, 180.0));
        let car2 = scene.fleet.get(&NodeId::from("car2")).unwrap();
        assert_eq!(car2.position, Point::new(300.0, 420.0));
    }

    #[test]
    fn scene_builds_and_runs() {
        let scene = load_scene_str(CORNER).unwrap();
        let mut sim = SimBuilder::from_scene(scene).build().unwrap();
        assert_eq!(sim.run(&mut NoopObserver).unwrap(), 20);
    }

    #[test]
    fn missing_or_null_obstacle_is_accepted() {
        let json = r#"{ "base_station": { "id": "b", "x": 0, "y": 0 }, "obstacle": null }"#;
        let scene = load_scene_str(json).unwrap();
        assert!(scene.obstacle.is_none());
        assert!(scene.fleet.is_empty());

        let json = r#"{ "base_station": { "id": "b", "x": 0, "y": 0 } }"#;
        assert!(load_scene_str(json).unwrap().obstacle.is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"{
            "base_station": { "id": "base", "x": 0, "y": 0 },
            "vehicles": [
                { "id": "a", "lane": { "start_x": 0, "end_x": 10, "y": 0 }, "speed": 1 },
                { "id": "a", "lane": { "start_x": 0, "end_x": 10, "y": 5 }, "speed": 1 }
            ]
        }"#;
        assert!(matches!(load_scene_str(json), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn vehicle_sharing_station_id_rejected() {
        let json = r#"{
            "base_station": { "id": "base", "x": 0, "y": 0 },
            "vehicles": [ { "id": "base", "lane": { "start_x": 0, "end_x": 10, "y": 0 }, "speed": 1 } ]
        }"#;
        assert!(matches!(load_scene_str(json), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn negative_speed_rejected() {
        let json = r#"{
            "base_station": { "id": "base", "x": 0, "y": 0 },
            "vehicles": [ { "id": "a", "lane": { "start_x": 0, "end_x": 10, "y": 0 }, "speed": -1 } ]
        }"#;
        assert!(matches!(load_scene_str(json), Err(SceneError::Mobility(_))));
    }

    #[test]
    fn negative_range_rejected() {
        let json = r#"{ "config": { "range": -5 }, "base_station": { "id": "b", "x": 0, "y": 0 } }"#;
        assert!(matches!(load_scene_str(json), Err(SceneError::Config(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(load_scene_str("{ not json"), Err(SceneError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CORNER.as_bytes()).unwrap();
        let scene = load_scene(file.path()).unwrap();
        assert_eq!(scene.fleet.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_scene(dir.path().join("absent.json"));
        assert!(matches!(result, Err(SceneError::Io { .. })));
    }
}
