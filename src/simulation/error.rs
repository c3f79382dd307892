//! Error types for configuration, arena construction and stepping.

use thiserror::Error;

/// Boxed error returned by a failing pilot.
pub type PilotFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while loading or validating [`Params`](super::params::Params).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value violates a precondition (e.g. non-positive gap size).
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    /// The configuration file could not be read or written.
    #[error("failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`Params`](super::params::Params).
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the [`Arena`](super::arena::Arena).
#[derive(Debug, Error)]
pub enum ArenaError {
    /// A generation needs at least one agent.
    #[error("arena requires at least one agent")]
    EmptyRoster,
    /// The parameters handed to the arena are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A pilot failed while deciding; the tick was aborted.
    #[error("pilot of agent {agent} failed: {source}")]
    Pilot {
        /// Id of the agent whose pilot failed.
        agent: usize,
        /// Error reported by the pilot.
        #[source]
        source: PilotFailure,
    },
}

/// Errors raised by [`Brain`](super::brain::Brain) when used as a pilot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrainError {
    /// The first layer does not accept the observation vector.
    #[error("observation has {expected} values but the brain takes {actual} inputs")]
    InputSize {
        /// Width of the observation vector.
        expected: usize,
        /// Input width of the first layer.
        actual: usize,
    },
    /// The brain has no layers at all.
    #[error("brain has no layers")]
    Empty,
}
