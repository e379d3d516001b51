use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{WorldConfig, clamp_time_scale};

/// Whether world time is flowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Time advances on every tick.
    Running,
    /// Time is frozen; ticks are no-ops.
    #[default]
    Paused,
    /// The next tick advances once, then the world pauses.
    Step,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Step => write!(f, "step"),
        }
    }
}

/// Global simulation clock: a tick counter and elapsed game-days, gated by a
/// run/pause/step state machine.
///
/// Worlds start paused. Time only moves while running or stepping, and both
/// counters are monotonic.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    state: RunState,
    current_tick: u64,
    current_time: f64,
}

impl World {
    /// Create a paused world at tick 0.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            state: RunState::Paused,
            current_tick: 0,
            current_time: 0.0,
        }
    }

    /// Advance the clock by `delta_time` scaled by the time scale.
    ///
    /// Running worlds advance and keep running; a stepping world advances once
    /// and pauses; a paused world is left untouched. Returns whether time moved.
    /// `delta_time` is expected to be non-negative.
    pub fn tick(&mut self, delta_time: f64) -> bool {
        match self.state {
            RunState::Paused => false,
            RunState::Running => {
                self.advance(delta_time);
                true
            }
            RunState::Step => {
                self.advance(delta_time);
                self.transition(RunState::Paused);
                true
            }
        }
    }

    fn advance(&mut self, delta_time: f64) {
        self.current_tick += 1;
        self.current_time += delta_time * self.config.time_scale;
    }

    fn transition(&mut self, to: RunState) -> RunState {
        let from = std::mem::replace(&mut self.state, to);
        if from != to {
            debug!(%from, %to, tick = self.current_tick, "world run state changed");
        }
        from
    }

    /// Freeze time. Returns the previous run state.
    pub fn pause(&mut self) -> RunState {
        self.transition(RunState::Paused)
    }

    /// Let time flow on every tick. Returns the previous run state.
    pub fn resume(&mut self) -> RunState {
        self.transition(RunState::Running)
    }

    /// Arm a single advance on the next tick. Returns the previous run state.
    pub fn step(&mut self) -> RunState {
        self.transition(RunState::Step)
    }

    /// Set the game-time multiplier, clamped to `[0, 10]`. Applies from the next tick.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.config.time_scale = clamp_time_scale(scale);
    }

    /// The current game-time multiplier.
    pub fn time_scale(&self) -> f64 {
        self.config.time_scale
    }

    /// Game-days elapsed since the world was created.
    pub fn days_passed(&self) -> f64 {
        self.current_time
    }

    /// Number of ticks that actually advanced time.
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Elapsed game time (same value as [`World::days_passed`]).
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Return `true` if ticks are currently no-ops.
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// The world configuration, including the current time scale.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// World width in position units.
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// World height in position units.
    pub fn height(&self) -> u32 {
        self.config.height
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
