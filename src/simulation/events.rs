//! Events produced while a tick is processed.
//!
//! The arena records what happened during a tick in an [`EventQueue`] and
//! hands the events to the caller in the order they occurred, so renderers
//! and trainers can react without inspecting the arena state.

use serde::{Deserialize, Serialize};

/// Boundary through which an agent left the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exit {
    /// The lower edge reached the ground line.
    Ground,
    /// The agent rose above the top of the field.
    Ceiling,
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    /// An agent hit a barrier and was removed.
    Collided {
        /// Id of the agent.
        agent: usize,
        /// Position of the obstacle at the moment of impact.
        obstacle_x: f32,
    },
    /// An obstacle was passed for the first time.
    ObstaclePassed {
        /// Position of the obstacle when it was passed.
        obstacle_x: f32,
    },
    /// A new obstacle entered the field.
    ObstacleSpawned {
        /// Gap top of the new obstacle.
        gap_top: i32,
    },
    /// An obstacle scrolled off the field and was dropped.
    ObstacleDespawned,
    /// An agent left the field and was removed.
    LeftField {
        /// Id of the agent.
        agent: usize,
        /// Boundary that was crossed.
        exit: Exit,
    },
}

/// Queue collecting the events of one tick.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<ArenaEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: ArenaEvent) {
        log::debug!("{event:?}");
        self.events.push(event);
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, ArenaEvent> {
        self.events.drain(..)
    }

    /// Whether the queue holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
