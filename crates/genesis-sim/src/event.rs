use crate::position::{NpcId, Position};
use crate::world::RunState;

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEventKind {
    // Behavior
    /// An NPC switched behavior state.
    StateChanged {
        /// The NPC that changed state.
        npc: NpcId,
        /// The previous state label.
        from: String,
        /// The new state label.
        to: String,
    },
    /// An NPC picked a destination and started walking.
    Departed {
        /// The NPC that set off.
        npc: NpcId,
        /// Where it is headed.
        target: Position,
    },
    /// An NPC reached its destination.
    Arrived {
        /// The NPC that arrived.
        npc: NpcId,
        /// Where it stopped.
        at: Position,
    },

    // Population
    /// An NPC joined the simulation.
    NpcAdded {
        /// The NPC that joined.
        npc: NpcId,
    },
    /// An NPC was removed from the simulation.
    NpcRemoved {
        /// The NPC that left.
        npc: NpcId,
    },

    // World
    /// The world clock changed run state.
    RunStateChanged {
        /// The previous run state.
        from: RunState,
        /// The new run state.
        to: RunState,
    },
}

impl SimEventKind {
    /// Check whether a given NPC is involved in this event.
    pub fn involves(&self, id: NpcId) -> bool {
        match self {
            Self::StateChanged { npc, .. }
            | Self::Departed { npc, .. }
            | Self::Arrived { npc, .. }
            | Self::NpcAdded { npc }
            | Self::NpcRemoved { npc } => *npc == id,
            Self::RunStateChanged { .. } => false,
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The world tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the given NPC.
    pub fn events_for_npc(&self, id: NpcId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
