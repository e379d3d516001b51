use crate::position::{NpcId, Position};

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the validating entry points of the simulation.
///
/// The per-frame operations never fail; these only come from config
/// validation, config loading, and the checked population helpers.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A world or simulation configuration value is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An NPC with the same id is already part of the simulation.
    #[error("duplicate npc id: {0}")]
    DuplicateNpc(NpcId),

    /// An NPC was placed outside the world bounds.
    #[error("npc {id} at {position} is outside the world bounds")]
    OutOfBounds {
        /// The offending NPC.
        id: NpcId,
        /// Where it was placed.
        position: Position,
    },

    /// No NPC with this id exists in the simulation.
    #[error("npc not found: {0}")]
    NpcNotFound(NpcId),

    /// A config file could not be parsed.
    #[error("config parse error: {0}")]
    Config(String),

    /// A config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
