//! The `Sim` struct, its lifecycle, and its tick loop.

use v2x_core::{BaseStation, SimClock, SimConfig, Tick};
use v2x_link::{
    EvalParams, LinkError, LinkRegistry, LinkSet, RegistryDiff, RelayPath, evaluate,
    relay_paths_for_all_blocked, relay_paths_if_blocked,
};
use v2x_mobility::Fleet;
use v2x_spatial::Obstacle;

use crate::{FixedTicks, SimError, SimObserver, SimResult, SimState, TickSource};

// ── TickOutput ────────────────────────────────────────────────────────────────

/// Everything one tick produced.  This is what a renderer consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutput {
    pub tick:        Tick,
    /// Links in evaluation order, with relay hops already tagged.
    pub links:       LinkSet,
    /// Two-hop alternatives found this tick.  Possibly empty.
    pub relays:      Vec<RelayPath>,
    /// Registry membership changes relative to the previous tick.
    pub diff:        RegistryDiff,
    /// Set when the distinguished vehicle could not be found.  The rest of
    /// the tick is still complete.
    pub relay_error: Option<LinkError>,
}

impl TickOutput {
    /// Number of links with `blocked == false`.
    #[inline]
    pub fn active_connections(&self) -> usize {
        self.links.active_count
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// Holds the fleet, the static scene (station + optional obstacle), and the
/// link registry.  All per-tick results are recomputed from positions; the
/// registry is the only link state carried between ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config:   SimConfig,
    pub clock:    SimClock,
    pub station:  BaseStation,
    pub obstacle: Option<Obstacle>,

    pub(crate) fleet:    Fleet,
    pub(crate) registry: LinkRegistry,
    pub(crate) state:    SimState,
    pub(crate) last:     Option<TickOutput>,
    /// Suppresses repeated warnings for a missing distinguished vehicle.
    pub(crate) warned_unknown: bool,
}

impl Sim {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Vehicle positions as of the last completed tick.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn registry(&self) -> &LinkRegistry {
        &self.registry
    }

    /// Output of the most recent tick, if any tick ran since the last reset.
    pub fn last_output(&self) -> Option<&TickOutput> {
        self.last.as_ref()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// `Idle | Stopped → Running`.
    pub fn start(&mut self) -> SimResult<()> {
        match self.state {
            SimState::Idle | SimState::Stopped => {
                log::info!("sim {} → running at {}", self.state, self.clock.current_tick);
                self.state = SimState::Running;
                Ok(())
            }
            from => Err(SimError::InvalidTransition { from, action: "start" }),
        }
    }

    /// `Running → Stopped`.  Never interrupts a tick; positions stay where
    /// the last completed tick left them.
    pub fn stop(&mut self) -> SimResult<()> {
        match self.state {
            SimState::Running => {
                log::info!("sim stopped at {}", self.clock.current_tick);
                self.state = SimState::Stopped;
                Ok(())
            }
            from => Err(SimError::InvalidTransition { from, action: "stop" }),
        }
    }

    /// Any state `→ Idle`.  Restores initial positions and discards every
    /// per-tick result, the registry, and the clock.
    pub fn reset(&mut self) {
        log::info!("sim reset from {}", self.state);
        self.fleet.reset();
        self.registry.clear();
        self.clock.reset();
        self.last = None;
        self.warned_unknown = false;
        self.state = SimState::Idle;
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Process exactly one tick.  Requires [`SimState::Running`].
    pub fn step(&mut self) -> SimResult<&TickOutput> {
        if self.state != SimState::Running {
            return Err(SimError::InvalidTransition { from: self.state, action: "step" });
        }
        let now = self.clock.current_tick;
        let output = self.process_tick(now);
        self.clock.advance();
        Ok(self.last.insert(output))
    }

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Starts the sim if needed; it is `Stopped` afterwards.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<u64> {
        let remaining = self.config.end_tick().0.saturating_sub(self.clock.current_tick.0);
        self.run_with(&mut FixedTicks(remaining), observer)
    }

    /// Run exactly `n` more ticks (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<u64> {
        self.run_with(&mut FixedTicks(n), observer)
    }

    /// Pull ticks from `source` until it is exhausted or `observer` breaks.
    ///
    /// Starts the sim if it is not already running and leaves it `Stopped`.
    /// Returns the number of ticks processed.
    pub fn run_with<S, O>(&mut self, source: &mut S, observer: &mut O) -> SimResult<u64>
    where
        S: TickSource + ?Sized,
        O: SimObserver,
    {
        if self.state != SimState::Running {
            self.start()?;
        }

        let mut ticks = 0;
        while source.next_tick() {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let output = self.process_tick(now);
            let flow = observer.on_tick_end(now, &output);
            let interval = self.config.output_interval_ticks;
            if interval > 0 && now.0.is_multiple_of(interval) {
                observer.on_snapshot(now, &self.fleet, &output);
            }
            self.last = Some(output);
            self.clock.advance();
            ticks += 1;

            if flow.is_break() {
                log::info!("observer requested stop after {now}");
                break;
            }
        }

        self.stop()?;
        observer.on_sim_end(self.clock.current_tick);
        Ok(ticks)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> TickOutput {
        // ── Phase 1: motion ───────────────────────────────────────────────
        //
        // All vehicles move before any link is measured.
        self.fleet.advance_all();

        // ── Phase 2: connectivity ─────────────────────────────────────────
        let params = EvalParams::from(&self.config);
        let mut links = evaluate(&self.fleet, &self.station, self.obstacle.as_ref(), params);

        // ── Phase 3: relay search ─────────────────────────────────────────
        let (relays, relay_error) = self.find_relays(&links);
        links.mark_relay_hops(&relays);

        // ── Phase 4: registry ─────────────────────────────────────────────
        let diff = self.registry.apply(&links, &relays);

        log::debug!(
            "{now}: {} links, {} active, {} relay path(s)",
            links.len(),
            links.active_count,
            relays.len(),
        );

        TickOutput { tick: now, links, relays, diff, relay_error }
    }

    fn find_relays(&mut self, links: &LinkSet) -> (Vec<RelayPath>, Option<LinkError>) {
        let obstacle = self.obstacle.as_ref();
        let range = self.config.range;

        if self.config.relay_all_blocked {
            let paths = relay_paths_for_all_blocked(links, &self.fleet, &self.station, obstacle, range);
            return (paths, None);
        }

        let Some(origin) = &self.config.distinguished else {
            return (Vec::new(), None);
        };
        match relay_paths_if_blocked(origin, links, &self.fleet, &self.station, obstacle, range) {
            Ok(paths) => (paths, None),
            Err(e) => {
                if !self.warned_unknown {
                    log::warn!("relay search skipped: {e}");
                    self.warned_unknown = true;
                }
                (Vec::new(), Some(e))
            }
        }
    }
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim")
            .field("state", &self.state)
            .field("tick", &self.clock.current_tick)
            .field("vehicles", &self.fleet.len())
            .field("links", &self.registry.len())
            .finish()
    }
}
