//! Parallel agent, pilot and fitness collections.
//!
//! Index `i` of each collection always refers to the same agent. Removal is
//! only possible through [`Roster::retire`], which compacts all three in a
//! single pass.

use super::agent::Agent;

/// The active agents of a generation together with their pilots and
/// fitness handles.
#[derive(Debug, Clone)]
pub struct Roster<P, F> {
    pub(crate) agents: Vec<Agent>,
    pub(crate) pilots: Vec<P>,
    pub(crate) fitness: Vec<F>,
}

impl<P, F> Default for Roster<P, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, F> Roster<P, F> {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            pilots: Vec::new(),
            fitness: Vec::new(),
        }
    }

    /// Creates an empty roster with room for `capacity` agents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            agents: Vec::with_capacity(capacity),
            pilots: Vec::with_capacity(capacity),
            fitness: Vec::with_capacity(capacity),
        }
    }

    /// Adds an agent at the end of the roster.
    pub fn enlist(&mut self, agent: Agent, pilot: P, fitness: F) {
        self.agents.push(agent);
        self.pilots.push(pilot);
        self.fitness.push(fitness);
    }

    /// Number of active agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent is active.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Active agents in insertion order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Pilots, index-aligned with [`Roster::agents`].
    pub fn pilots(&self) -> &[P] {
        &self.pilots
    }

    /// Fitness handles, index-aligned with [`Roster::agents`].
    pub fn fitness(&self) -> &[F] {
        &self.fitness
    }

    /// Removes every entry whose index is marked, keeping the others in
    /// order, and returns the removed entries in index order.
    ///
    /// Indices past `marked` are kept.
    pub fn retire(&mut self, marked: &[bool]) -> Vec<(Agent, P, F)> {
        if !marked.iter().any(|&m| m) {
            return Vec::new();
        }

        let agents = std::mem::take(&mut self.agents);
        let pilots = std::mem::take(&mut self.pilots);
        let fitness = std::mem::take(&mut self.fitness);

        let mut retired = Vec::new();
        for (index, ((agent, pilot), fitness)) in
            agents.into_iter().zip(pilots).zip(fitness).enumerate()
        {
            if marked.get(index).copied().unwrap_or(false) {
                retired.push((agent, pilot, fitness));
            } else {
                self.enlist(agent, pilot, fitness);
            }
        }
        retired
    }

    /// Empties the roster, returning every entry in order.
    pub fn drain(&mut self) -> Vec<(Agent, P, F)> {
        let agents = std::mem::take(&mut self.agents);
        let pilots = std::mem::take(&mut self.pilots);
        let fitness = std::mem::take(&mut self.fitness);
        agents
            .into_iter()
            .zip(pilots)
            .zip(fitness)
            .map(|((agent, pilot), fitness)| (agent, pilot, fitness))
            .collect()
    }
}
