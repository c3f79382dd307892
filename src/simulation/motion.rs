//! Trait for entities that move by a fixed rule once per tick.
//!
//! Agents, obstacles and the ground all advance in discrete steps; the
//! arena drives each of them through this trait.

/// An entity with per-tick motion.
pub trait Advance {
    /// Moves the entity by one tick.
    fn advance(&mut self);
}
