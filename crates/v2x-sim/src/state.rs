//! Simulation lifecycle states.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum SimState {
    /// Freshly built or reset.  Positions are at their initial values.
    #[default]
    Idle,
    /// Ticks may be processed.
    Running,
    /// Halted between ticks.  `start` resumes from the current positions.
    Stopped,
}

impl SimState {
    pub fn as_str(self) -> &'static str {
        match self {
            SimState::Idle    => "idle",
            SimState::Running => "running",
            SimState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
