use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::agent::{Agent, AgentState, Transition};
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::population;
use crate::position::NpcId;
use crate::snapshot::{SimSnapshot, StateCounts};
use crate::world::{RunState, World};

/// The top-level simulation orchestrator.
///
/// Owns the world clock, the NPC population (in insertion order), the RNG,
/// and the event log. Each [`Simulation::update`] ticks the world once and
/// then advances every NPC exactly once. NPCs never observe each other, so
/// their order only matters for which RNG draws each one receives.
pub struct Simulation {
    world: World,
    npcs: Vec<Agent>,
    rng: StdRng,
    events: EventLog,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.world.current_tick())
            .field("state", &self.world.state())
            .field("npcs", &self.npcs.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a paused simulation with `config.population` generated citizens.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let npcs = population::generate(config.population, &config.world, &mut rng);
        debug!(count = npcs.len(), seed = config.seed, "spawned initial population");
        Self::assemble(config, npcs, rng)
    }

    /// Create a paused simulation with an explicit population instead of a generated one.
    pub fn with_npcs(config: SimConfig, npcs: Vec<Agent>) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::assemble(config, npcs, rng)
    }

    fn assemble(config: SimConfig, npcs: Vec<Agent>, rng: StdRng) -> Self {
        Self {
            world: World::new(config.world),
            npcs,
            rng,
            events: EventLog::new(config.max_events),
        }
    }

    /// Advance one frame: tick the world, then update every NPC in order.
    ///
    /// NPCs update even while the world is paused; pausing only freezes the
    /// clock. `delta_time` must be non-negative.
    pub fn update(&mut self, delta_time: f64) {
        self.world.tick(delta_time);

        let width = self.world.width();
        let height = self.world.height();
        let tick = self.world.current_tick();
        for npc in &mut self.npcs {
            if let Some(transition) = npc.update(delta_time, width, height, &mut self.rng) {
                record_transition(&mut self.events, tick, npc, transition);
            }
        }
    }

    /// Advance `frames` frames of `delta_time` each.
    pub fn run(&mut self, frames: u64, delta_time: f64) {
        let start_tick = self.world.current_tick();
        for _ in 0..frames {
            self.update(delta_time);
        }
        let counts = self.state_counts();
        info!(
            frames,
            ticks = self.world.current_tick() - start_tick,
            days = self.world.days_passed(),
            idle = counts.idle,
            moving = counts.moving,
            working = counts.working,
            resting = counts.resting,
            "simulation run complete"
        );
    }

    /// Freeze the world clock.
    pub fn pause(&mut self) {
        let from = self.world.pause();
        self.record_run_state(from);
    }

    /// Let the world clock run.
    pub fn resume(&mut self) {
        let from = self.world.resume();
        self.record_run_state(from);
    }

    /// Arm a single clock advance on the next update.
    pub fn step(&mut self) {
        let from = self.world.step();
        self.record_run_state(from);
    }

    fn record_run_state(&mut self, from: RunState) {
        let to = self.world.state();
        if from != to {
            self.events.push(SimEvent::new(
                self.world.current_tick(),
                SimEventKind::RunStateChanged { from, to },
                format!("World {from} -> {to}"),
            ));
        }
    }

    /// Append an NPC. Ids are not checked; keeping them unique is the caller's job.
    pub fn add_npc(&mut self, npc: Agent) {
        let id = npc.id();
        debug!(%id, name = %npc.name, "npc added");
        self.events.push(SimEvent::new(
            self.world.current_tick(),
            SimEventKind::NpcAdded { npc: id },
            format!("{} joined at {}", npc.name, npc.position()),
        ));
        self.npcs.push(npc);
    }

    /// Append an NPC after checking its id is unused and it stands inside the world.
    pub fn try_add_npc(&mut self, npc: Agent) -> SimResult<()> {
        if self.npc(npc.id()).is_some() {
            return Err(SimError::DuplicateNpc(npc.id()));
        }
        if !npc.position().within(self.world.width(), self.world.height()) {
            return Err(SimError::OutOfBounds {
                id: npc.id(),
                position: npc.position(),
            });
        }
        self.add_npc(npc);
        Ok(())
    }

    /// Remove every NPC with this id. Returns how many were removed (normally 0 or 1).
    ///
    /// Other NPCs keep their relationship entries for the removed id; see
    /// [`Simulation::prune_relationships`].
    pub fn remove_npc(&mut self, id: NpcId) -> usize {
        let before = self.npcs.len();
        self.npcs.retain(|npc| npc.id() != id);
        let removed = before - self.npcs.len();
        if removed > 0 {
            debug!(%id, removed, "npc removed");
            self.events.push(SimEvent::new(
                self.world.current_tick(),
                SimEventKind::NpcRemoved { npc: id },
                format!("NPC {id} left the simulation"),
            ));
        }
        removed
    }

    /// Drop relationship entries that point at NPCs no longer in the simulation.
    /// Returns the number of entries dropped.
    pub fn prune_relationships(&mut self) -> usize {
        let live: HashSet<NpcId> = self.npcs.iter().map(Agent::id).collect();
        let mut dropped = 0;
        for npc in &mut self.npcs {
            let before = npc.relationships.len();
            npc.relationships.retain(|other, _| live.contains(other));
            dropped += before - npc.relationships.len();
        }
        dropped
    }

    /// Look up an NPC by id.
    pub fn npc(&self, id: NpcId) -> Option<&Agent> {
        self.npcs.iter().find(|npc| npc.id() == id)
    }

    /// Look up an NPC by id for mutation (e.g. to give it a target).
    pub fn npc_mut(&mut self, id: NpcId) -> Option<&mut Agent> {
        self.npcs.iter_mut().find(|npc| npc.id() == id)
    }

    /// Look up an NPC by id, failing if it is absent.
    pub fn require_npc(&self, id: NpcId) -> SimResult<&Agent> {
        self.npc(id).ok_or(SimError::NpcNotFound(id))
    }

    /// Number of NPCs in the simulation.
    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    /// All NPCs, in update order.
    pub fn npcs(&self) -> &[Agent] {
        &self.npcs
    }

    /// Agents per behavior state.
    pub fn state_counts(&self) -> StateCounts {
        StateCounts::tally(&self.npcs)
    }

    /// Capture a serializable view of the current state.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot::capture(&self.world, &self.npcs)
    }

    /// The world clock.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world clock, mutably. Run-state changes made here are not logged as events.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Events recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Forget recorded events.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

fn record_transition(events: &mut EventLog, tick: u64, npc: &Agent, transition: Transition) {
    let id = npc.id();
    let (kind, description) = match (transition.from, transition.to) {
        (_, AgentState::Moving { target }) => (
            SimEventKind::Departed { npc: id, target },
            format!("{} set off toward {target}", npc.name),
        ),
        (AgentState::Moving { .. }, AgentState::Idle) => (
            SimEventKind::Arrived {
                npc: id,
                at: npc.position(),
            },
            format!("{} arrived at {}", npc.name, npc.position()),
        ),
        (from, to) => (
            SimEventKind::StateChanged {
                npc: id,
                from: from.label().to_string(),
                to: to.label().to_string(),
            },
            format!("{} is now {}", npc.name, to.label()),
        ),
    };
    debug!(%id, from = transition.from.label(), to = transition.to.label(), "npc state changed");
    events.push(SimEvent::new(tick, kind, description));
}
