//! Simulation observer trait for progress reporting and data collection.

use std::ops::ControlFlow;

use v2x_core::Tick;
use v2x_mobility::Fleet;

use crate::TickOutput;

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: stop once the distinguished vehicle needs a relay
///
/// ```rust,ignore
/// struct StopOnRelay;
///
/// impl SimObserver for StopOnRelay {
///     fn on_tick_end(&mut self, _tick: Tick, out: &TickOutput) -> ControlFlow<()> {
///         if out.relays.is_empty() { ControlFlow::Continue(()) } else { ControlFlow::Break(()) }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before vehicles move.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's links, relay paths, and registry diff are
    /// final.  Returning [`ControlFlow::Break`] stops the simulation before
    /// the next tick.
    fn on_tick_end(&mut self, _tick: Tick, _output: &TickOutput) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks), after `on_tick_end`.
    fn on_snapshot(&mut self, _tick: Tick, _fleet: &Fleet, _output: &TickOutput) {}

    /// Called once when a run ends, whether the tick source ran out or an
    /// observer broke.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, output: &TickOutput) -> ControlFlow<()> {
        (**self).on_tick_end(tick, output)
    }

    fn on_snapshot(&mut self, tick: Tick, fleet: &Fleet, output: &TickOutput) {
        (**self).on_snapshot(tick, fleet, output);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        (**self).on_sim_end(final_tick);
    }
}

/// Fan out to two observers.  Both always see every hook; the run stops if
/// either one breaks.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, output: &TickOutput) -> ControlFlow<()> {
        let a = self.0.on_tick_end(tick, output);
        let b = self.1.on_tick_end(tick, output);
        if a.is_break() || b.is_break() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn on_snapshot(&mut self, tick: Tick, fleet: &Fleet, output: &TickOutput) {
        self.0.on_snapshot(tick, fleet, output);
        self.1.on_snapshot(tick, fleet, output);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.0.on_sim_end(final_tick);
        self.1.on_sim_end(final_tick);
    }
}
