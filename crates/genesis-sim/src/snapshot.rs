use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentState};
use crate::error::{SimError, SimResult};
use crate::world::{RunState, World};

/// How many agents are in each behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    /// Agents standing around.
    pub idle: usize,
    /// Agents walking to a target.
    pub moving: usize,
    /// Agents at work.
    pub working: usize,
    /// Agents recovering energy.
    pub resting: usize,
}

impl StateCounts {
    /// Count states across `agents`.
    pub fn tally<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> Self {
        let mut counts = Self::default();
        for agent in agents {
            match agent.state() {
                AgentState::Idle => counts.idle += 1,
                AgentState::Moving { .. } => counts.moving += 1,
                AgentState::Working => counts.working += 1,
                AgentState::Resting => counts.resting += 1,
            }
        }
        counts
    }

    /// Total number of agents counted.
    pub fn total(&self) -> usize {
        self.idle + self.moving + self.working + self.resting
    }
}

/// A serializable, point-in-time view of a simulation for renderers and tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    /// World tick at capture time.
    pub tick: u64,
    /// Game-days elapsed.
    pub days_passed: f64,
    /// World run state.
    pub run_state: RunState,
    /// Current game-time multiplier.
    pub time_scale: f64,
    /// World width.
    pub width: u32,
    /// World height.
    pub height: u32,
    /// Number of agents.
    pub npc_count: usize,
    /// Agents per behavior state.
    pub state_counts: StateCounts,
    /// Mean energy across agents, 0 for an empty population.
    pub average_energy: f64,
    /// Every agent, in simulation order.
    pub npcs: Vec<Agent>,
}

impl SimSnapshot {
    /// Capture the world clock and a copy of `npcs`.
    pub fn capture(world: &World, npcs: &[Agent]) -> Self {
        let average_energy = if npcs.is_empty() {
            0.0
        } else {
            npcs.iter().map(Agent::energy).sum::<f64>() / npcs.len() as f64
        };
        Self {
            tick: world.current_tick(),
            days_passed: world.days_passed(),
            run_state: world.state(),
            time_scale: world.time_scale(),
            width: world.width(),
            height: world.height(),
            npc_count: npcs.len(),
            state_counts: StateCounts::tally(npcs),
            average_energy,
            npcs: npcs.to_vec(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Config(e.to_string()))
    }
}
