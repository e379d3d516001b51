//! Tick-based NPC population simulation for Genesis.
//!
//! A [`Simulation`] owns one [`World`] (run/pause/step time machine) and an
//! ordered population of [`Agent`]s. Each frame the world clock ticks once and
//! every agent advances its own behavior state machine. Randomness is threaded
//! through an explicit seeded RNG so runs can be replayed.

/// NPC behavior state machine and attributes.
pub mod agent;
/// Configuration types for worlds and simulation runs.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Randomized initial population generation.
pub mod population;
/// Planar positions and NPC identifiers.
pub mod position;
/// Top-level simulation orchestrator.
pub mod simulation;
/// Serializable read-only views of a running simulation.
pub mod snapshot;
/// World clock and run-state machine.
pub mod world;

/// Re-exports of agent types.
pub use agent::{Agent, AgentState, Transition};
/// Re-exports of [`config::SimConfig`] and [`config::WorldConfig`].
pub use config::{SimConfig, WorldConfig};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`population::Occupation`].
pub use population::Occupation;
/// Re-exports of [`position::NpcId`] and [`position::Position`].
pub use position::{NpcId, Position};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-exports of snapshot types.
pub use snapshot::{SimSnapshot, StateCounts};
/// Re-exports of [`world::RunState`] and [`world::World`].
pub use world::{RunState, World};
