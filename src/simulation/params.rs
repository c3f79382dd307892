use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::gaps::DEFAULT_SEED;
use super::mask::BIRD_WIDTH;

/// How pilot decisions are evaluated within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecisionMode {
    /// Decide agent by agent, in insertion order.
    #[default]
    Sequential,
    /// Decide on rayon workers, then apply jumps in insertion order.
    Parallel,
}

/// Simulation parameters that control the arena.
///
/// Physics constants (gravity, jump impulse, sprite sizes) live on
/// [`Agent`](super::agent::Agent) and [`Obstacle`](super::obstacle::Obstacle);
/// these are the layout, scoring and run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Horizontal spawn position shared by every agent.
    pub spawn_x: f32,
    /// Vertical spawn position shared by every agent.
    pub spawn_y: f32,
    /// Vertical size of the passable gap between barriers.
    pub gap_size: i32,
    /// Lowest gap top height (inclusive).
    pub min_gap_height: i32,
    /// Highest gap top height (exclusive).
    pub max_gap_height: i32,
    /// Horizontal position where new obstacles appear.
    pub obstacle_spawn_x: f32,
    /// Ground line; agents whose lower edge reaches it are culled.
    pub ground_y: f32,
    /// Field width; agents must fit inside it horizontally.
    pub field_width: f32,
    /// Field height; the ground line must lie inside it.
    pub field_height: f32,
    /// Fitness granted to every agent for each tick alive.
    pub survival_bonus: f32,
    /// Fitness granted to every survivor when an obstacle is cleared.
    pub pass_bonus: f32,
    /// Fitness removed from an agent that hits a barrier.
    pub collision_penalty: f32,
    /// Pilot output above which the agent jumps.
    pub jump_threshold: f32,
    /// Seed of the obstacle gap generator.
    pub seed: u64,
    /// Sequential or rayon-backed decisions.
    pub decision_mode: DecisionMode,
    /// Trainer settings.
    pub evolution: EvolutionParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            spawn_x: 230.0,
            spawn_y: 350.0,
            gap_size: 200,
            min_gap_height: 50,
            max_gap_height: 450,
            obstacle_spawn_x: 600.0,
            ground_y: 730.0,
            field_width: 500.0,
            field_height: 800.0,
            survival_bonus: 0.1,
            pass_bonus: 5.0,
            collision_penalty: 1.0,
            jump_threshold: 0.5,
            seed: DEFAULT_SEED,
            decision_mode: DecisionMode::Sequential,
            evolution: EvolutionParams::default(),
        }
    }
}

impl Params {
    /// Rejects parameter sets the arena cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gap_size <= 0 {
            return Err(ConfigError::Invalid("gap_size must be positive"));
        }
        if self.min_gap_height >= self.max_gap_height {
            return Err(ConfigError::Invalid(
                "min_gap_height must be below max_gap_height",
            ));
        }
        if self.spawn_y.is_nan() || self.spawn_y < 0.0 || self.spawn_y >= self.ground_y {
            return Err(ConfigError::Invalid(
                "spawn_y must lie between the ceiling and the ground",
            ));
        }
        if self.spawn_x.is_nan()
            || self.spawn_x < 0.0
            || self.spawn_x + BIRD_WIDTH as f32 > self.field_width
        {
            return Err(ConfigError::Invalid(
                "agents must spawn inside field_width",
            ));
        }
        if !self.ground_y.is_finite() || self.ground_y > self.field_height {
            return Err(ConfigError::Invalid("ground_y must lie inside the field"));
        }
        if !self.obstacle_spawn_x.is_finite() || self.obstacle_spawn_x <= self.spawn_x {
            return Err(ConfigError::Invalid(
                "obstacle_spawn_x must lie ahead of spawn_x",
            ));
        }
        self.evolution.validate()
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}

/// Parameters of the built-in neuro-evolution trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Agents per generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: u32,
    /// Hidden layer width of each brain (inputs = 3, outputs = 1).
    pub hidden_size: usize,
    /// Uniform range of initial weights.
    pub init_scale: f32,
    /// Genomes copied unchanged into the next generation.
    pub elite_count: usize,
    /// Ticks after which a generation is stopped even if agents remain.
    pub tick_cap: Option<u64>,
    /// Best fitness at which training stops early.
    pub fitness_threshold: Option<f32>,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            hidden_size: 6,
            init_scale: 1.0,
            elite_count: 2,
            tick_cap: Some(20_000),
            fitness_threshold: Some(100.0),
        }
    }
}

impl EvolutionParams {
    /// Rejects trainer settings that cannot produce a generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be positive"));
        }
        if self.hidden_size == 0 {
            return Err(ConfigError::Invalid("hidden_size must be positive"));
        }
        if self.init_scale.is_nan() || self.init_scale <= 0.0 {
            return Err(ConfigError::Invalid("init_scale must be positive"));
        }
        if self.elite_count > self.population_size {
            return Err(ConfigError::Invalid(
                "elite_count cannot exceed population_size",
            ));
        }
        if self.tick_cap == Some(0) {
            return Err(ConfigError::Invalid("tick_cap must be positive"));
        }
        Ok(())
    }
}
