use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::population::Occupation;
use crate::position::{NpcId, Position};

/// Chance per `update` call that an idle agent picks a new destination.
///
/// Evaluated once per call regardless of the frame delta, so drivers calling
/// at a higher rate see agents leave idle more often in game time.
pub const IDLE_DEPART_CHANCE: f64 = 0.01;
/// Distance below which a moving agent snaps onto its target.
pub const ARRIVAL_RADIUS: f64 = 5.0;
/// Energy regained per unit of delta time, in every state.
pub const ENERGY_REGEN_RATE: f64 = 10.0;
/// Energy spent per unit of delta time while working.
pub const WORK_DRAIN_RATE: f64 = 5.0;
/// Upper bound for energy.
pub const MAX_ENERGY: f64 = 100.0;
/// Upper bound for health.
pub const MAX_HEALTH: f64 = 100.0;
/// Default movement speed in position units per unit of delta time.
pub const DEFAULT_SPEED: f64 = 50.0;

/// What an agent is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentState {
    /// Standing still, occasionally deciding to wander off.
    #[default]
    Idle,
    /// Walking toward `target`.
    Moving {
        /// Where the agent is headed.
        target: Position,
    },
    /// Spending energy on a job.
    Working,
    /// Recovering until energy is full.
    Resting,
}

impl AgentState {
    /// Short lowercase name of the state.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving { .. } => "moving",
            Self::Working => "working",
            Self::Resting => "resting",
        }
    }

    /// The movement target, present only while moving.
    pub fn target(&self) -> Option<Position> {
        match self {
            Self::Moving { target } => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moving { target } => write!(f, "moving to {target}"),
            other => f.write_str(other.label()),
        }
    }
}

/// A behavior change produced by [`Agent::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State before the update.
    pub from: AgentState,
    /// State after the update.
    pub to: AgentState,
}

/// An NPC living in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: NpcId,
    position: Position,
    state: AgentState,
    energy: f64,
    health: f64,
    /// Movement speed in position units per unit of delta time.
    pub speed: f64,
    /// Age in years.
    pub age: u32,
    /// Display name.
    pub name: String,
    /// Trade the agent follows.
    pub occupation: Occupation,
    /// Accumulated wealth. Not touched by the core loop.
    pub wealth: f64,
    /// Affinity toward other agents. Not touched by the core loop, and not
    /// purged when the other agent leaves the simulation.
    pub relationships: BTreeMap<NpcId, f64>,
}

impl Agent {
    /// Create an idle agent at `(x, y)` with default attributes.
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        let id = NpcId(id);
        Self {
            id,
            position: Position::new(x, y),
            state: AgentState::Idle,
            energy: MAX_ENERGY,
            health: MAX_HEALTH,
            speed: DEFAULT_SPEED,
            age: 20,
            name: format!("NPC_{}", id.0),
            occupation: Occupation::Citizen,
            wealth: 100.0,
            relationships: BTreeMap::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the occupation.
    pub fn with_occupation(mut self, occupation: Occupation) -> Self {
        self.occupation = occupation;
        self
    }

    /// Set the age in years.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Set the wealth.
    pub fn with_wealth(mut self, wealth: f64) -> Self {
        self.wealth = wealth;
        self
    }

    /// Set the movement speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Set the energy (clamped to `[0, 100]`).
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy.clamp(0.0, MAX_ENERGY);
        self
    }

    /// Set the health (clamped to `[0, 100]`).
    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health.clamp(0.0, MAX_HEALTH);
        self
    }

    /// Advance this agent by `delta_time` inside a `width` x `height` world.
    ///
    /// Energy regenerates first, in every state, then the current state acts:
    /// idle agents may pick a random destination, moving agents walk or
    /// arrive, working agents spend energy, resting agents wake up once full.
    /// Returns the state change, if any. `delta_time` must be non-negative.
    pub fn update<R: Rng>(
        &mut self,
        delta_time: f64,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Option<Transition> {
        self.energy = (self.energy + ENERGY_REGEN_RATE * delta_time).min(MAX_ENERGY);

        let next = match self.state {
            AgentState::Idle => {
                if rng.random::<f64>() < IDLE_DEPART_CHANCE {
                    let target = Position::new(
                        rng.random_range(0.0..=f64::from(width)),
                        rng.random_range(0.0..=f64::from(height)),
                    );
                    Some(AgentState::Moving { target })
                } else {
                    None
                }
            }
            AgentState::Moving { target } => self.walk_toward(target, delta_time, width, height),
            AgentState::Working => {
                self.energy = (self.energy - WORK_DRAIN_RATE * delta_time).max(0.0);
                (self.energy <= 0.0).then_some(AgentState::Resting)
            }
            AgentState::Resting => (self.energy >= MAX_ENERGY).then_some(AgentState::Idle),
        };

        next.map(|to| {
            let from = std::mem::replace(&mut self.state, to);
            Transition { from, to }
        })
    }

    fn walk_toward(
        &mut self,
        target: Position,
        delta_time: f64,
        width: u32,
        height: u32,
    ) -> Option<AgentState> {
        let distance = self.position.distance_to(target);
        if distance < ARRIVAL_RADIUS {
            self.position = target.clamped(width, height);
            return Some(AgentState::Idle);
        }

        let step = (self.speed * delta_time).min(distance);
        let next = Position::new(
            self.position.x + (target.x - self.position.x) / distance * step,
            self.position.y + (target.y - self.position.y) / distance * step,
        );
        self.position = next.clamped(width, height);
        None
    }

    /// Head for `(x, y)`, interrupting whatever the agent was doing.
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.state = AgentState::Moving {
            target: Position::new(x, y),
        };
    }

    /// Put the agent to work, interrupting whatever it was doing.
    pub fn start_working(&mut self) {
        self.state = AgentState::Working;
    }

    /// Send the agent to rest until its energy is full.
    pub fn rest(&mut self) {
        self.state = AgentState::Resting;
    }

    /// Record this agent's affinity toward `other`.
    pub fn set_relationship(&mut self, other: NpcId, affinity: f64) {
        self.relationships.insert(other, affinity);
    }

    /// Affinity toward `other`, if any was recorded.
    pub fn relationship(&self, other: NpcId) -> Option<f64> {
        self.relationships.get(&other).copied()
    }

    /// Drop any relationship entry for `other`. Returns true if one existed.
    pub fn forget(&mut self, other: NpcId) -> bool {
        self.relationships.remove(&other).is_some()
    }

    /// The agent's identity.
    pub fn id(&self) -> NpcId {
        self.id
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current behavior state.
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Movement target, present only while moving.
    pub fn target(&self) -> Option<Position> {
        self.state.target()
    }

    /// Current energy, within `[0, 100]`.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Current health, within `[0, 100]`.
    pub fn health(&self) -> f64 {
        self.health
    }
}
