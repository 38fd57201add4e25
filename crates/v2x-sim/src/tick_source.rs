//! Where ticks come from.
//!
//! The engine does not care whether ticks are paced by a display refresh, a
//! wall-clock timer, or nothing at all.  It only asks its [`TickSource`]
//! whether another tick should run, and runs it synchronously if so.

/// Supplies ticks to [`Sim::run_with`][crate::Sim::run_with].
pub trait TickSource {
    /// Block (if necessary) until the next tick is due.  Returns `false` once
    /// the source is exhausted.
    fn next_tick(&mut self) -> bool;
}

/// Exactly `n` ticks, then exhausted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedTicks(pub u64);

impl TickSource for FixedTicks {
    fn next_tick(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

/// Never exhausted.  Pair with an observer that eventually breaks.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unbounded;

impl TickSource for Unbounded {
    fn next_tick(&mut self) -> bool {
        true
    }
}

/// Any `FnMut() -> bool` is a tick source, e.g. a closure waiting on a
/// frame-pacing channel.
impl<F: FnMut() -> bool> TickSource for F {
    fn next_tick(&mut self) -> bool {
        self()
    }
}
