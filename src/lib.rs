//! # Flappy Evo - Neuro-evolution flappy bird core
//!
//! A headless flappy-bird simulation in which a whole generation of agents
//! flies through one shared obstacle field. Each agent is steered by a
//! pluggable [`Pilot`](simulation::pilot::Pilot) and rewarded through a
//! [`Fitness`](simulation::pilot::Fitness) handle, which makes the arena
//! usable from any genetic algorithm.
//!
//! ## Features
//!
//! - Tick-based physics with gravity, jump impulse and terminal velocity
//! - Pixel-exact collision against precomputed occupancy masks
//! - Seeded, reproducible obstacle gaps
//! - Optional rayon-backed pilot decisions with deterministic results
//! - Built-in MLP brains and a generational trainer
//!
//! ## Core Modules
//!
//! - [`simulation::arena`] - Tick engine owning one generation
//! - [`simulation::agent`] - Agent physics
//! - [`simulation::obstacle`] - Barrier pairs with a passable gap
//! - [`simulation::mask`] - Occupancy masks and overlap tests
//! - [`simulation::brain`] - Neural network pilots
//! - [`simulation::evolution`] - Population evaluation and breeding

/// Simulation core and trainer.
pub mod simulation {
    /// Agent physics and state.
    pub mod agent;
    /// Tick engine for one generation.
    pub mod arena;
    /// Neural network pilots.
    pub mod brain;
    /// Error types.
    pub mod error;
    /// Events reported by each tick.
    pub mod events;
    /// Generational training of brains.
    pub mod evolution;
    /// Sources of obstacle gap heights.
    pub mod gaps;
    /// Scrolling ground strip.
    pub mod ground;
    /// Occupancy masks for pixel-exact collision.
    pub mod mask;
    /// Per-tick movement of field entities.
    ///
    /// The [`motion::Advance`] trait is implemented by everything that moves
    /// on its own each tick (agents, obstacles, the ground).
    pub mod motion;
    /// Barrier pairs with a passable gap.
    pub mod obstacle;
    /// Simulation parameters.
    pub mod params;
    /// Decision and fitness capabilities.
    pub mod pilot;
    /// Index-aligned agent, pilot and fitness collections.
    pub mod roster;
}

/// Logger initialisation.
pub mod logging;
