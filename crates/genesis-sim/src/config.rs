use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Lowest accepted game-time multiplier.
pub const MIN_TIME_SCALE: f64 = 0.0;
/// Highest accepted game-time multiplier.
pub const MAX_TIME_SCALE: f64 = 10.0;

/// Clamp a requested time scale into `[MIN_TIME_SCALE, MAX_TIME_SCALE]`.
pub fn clamp_time_scale(scale: f64) -> f64 {
    scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
}

/// Global world parameters: bounds and time flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in position units.
    pub width: u32,
    /// World height in position units.
    pub height: u32,
    /// Game-time multiplier applied to each tick's delta, within `[0, 10]`.
    pub time_scale: f64,
    /// Intended driver call frequency in frames per second. Advisory only.
    pub tick_rate: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            time_scale: 1.0,
            tick_rate: 60,
        }
    }
}

impl WorldConfig {
    /// Set the world bounds.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the time scale (clamped to `[0, 10]`).
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = clamp_time_scale(scale);
        self
    }

    /// Set the advisory tick rate.
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Frame delta in seconds a driver should pass when calling at `tick_rate`.
    pub fn frame_delta(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }

    /// Reject dimensions or rates the simulation cannot use meaningfully.
    pub fn validate(&self) -> SimResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "world size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.tick_rate == 0 {
            return Err(SimError::InvalidConfig("tick rate must be positive".into()));
        }
        if !self.time_scale.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "time scale must be finite, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World bounds and time flow.
    pub world: WorldConfig,
    /// RNG seed for deterministic runs.
    pub seed: u64,
    /// Number of NPCs spawned by [`crate::Simulation::new`].
    pub population: usize,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            seed: 42,
            population: 100,
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Replace the world configuration.
    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the size of the initial population.
    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults and the
    /// time scale is clamped the same way `set_time_scale` clamps it.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.world.time_scale = clamp_time_scale(config.world.time_scale);
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Validate the nested world configuration.
    pub fn validate(&self) -> SimResult<()> {
        self.world.validate()
    }
}
