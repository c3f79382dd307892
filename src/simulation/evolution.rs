//! Generational neuro-evolution of brains.
//!
//! Every generation the whole population flies through one arena. Fitness
//! collected there ranks the genomes; the next population keeps the elites
//! and fills the rest with crossovers of top genomes and mutated clones.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Fate, RunContext, TickStatus};
use super::brain::Brain;
use super::error::{ArenaError, ConfigError};
use super::gaps::GapSampler;
use super::params::{EvolutionParams, Params};
use super::pilot::Observation;

/// A brain together with the fitness it earned in its last generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Position in the population; doubles as the agent id in the arena.
    pub id: usize,
    /// The network.
    pub brain: Brain,
    /// Fitness of the last evaluation.
    pub fitness: f32,
}

/// Statistics of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation number, starting at 1.
    pub generation: u32,
    /// Wall-clock start of the evaluation.
    pub started_at: DateTime<Utc>,
    /// Ticks simulated.
    pub ticks: u64,
    /// Obstacles cleared.
    pub score: u32,
    /// Highest fitness in the generation.
    pub best_fitness: f32,
    /// Mean fitness of the generation.
    pub mean_fitness: f32,
    /// Agents removed by a barrier.
    pub collided: usize,
    /// Agents removed for leaving the field.
    pub left_field: usize,
    /// Agents still flying when the generation ended.
    pub survived: usize,
}

/// Owns the population and runs evaluation and breeding.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    params: EvolutionParams,
    population: Vec<Genome>,
    generation: u32,
    best: Option<Genome>,
}

impl EvolutionEngine {
    /// Creates a random population shaped `[3, hidden_size, 1]`.
    pub fn new(params: &EvolutionParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let layer_sizes = [Observation::SIZE, params.hidden_size, 1];
        let population = (0..params.population_size)
            .map(|id| Genome {
                id,
                brain: Brain::new(&layer_sizes, params.init_scale),
                fitness: 0.0,
            })
            .collect();

        Ok(Self {
            params: params.clone(),
            population,
            generation: 0,
            best: None,
        })
    }

    /// Current population, ordered by id.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Number of generations evaluated so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Fittest genome seen in any generation.
    pub fn best(&self) -> Option<&Genome> {
        self.best.as_ref()
    }

    /// Flies the current population through a fresh arena and records each
    /// genome's fitness.
    ///
    /// The generation ends when every agent is gone or the tick cap is
    /// reached.
    pub fn evaluate(
        &mut self,
        sim_params: &Params,
        gaps: Box<dyn GapSampler + Send>,
    ) -> Result<GenerationReport, ArenaError> {
        let started_at = Utc::now();
        let crew = self
            .population
            .iter()
            .map(|genome| (genome.brain.clone(), 0.0_f32));
        let mut arena = Arena::new(sim_params, crew, gaps)?;

        self.generation += 1;
        let mut ctx = RunContext::new(self.generation);
        loop {
            if self.params.tick_cap.is_some_and(|cap| ctx.tick >= cap) {
                log::warn!(
                    "generation {} stopped at tick {} with {} agents alive",
                    self.generation,
                    ctx.tick,
                    arena.alive()
                );
                break;
            }
            if arena.step(&mut ctx)?.status == TickStatus::Extinct {
                break;
            }
        }

        let score = arena.score();
        let (mut collided, mut left_field, mut survived) = (0, 0, 0);
        for outcome in arena.finish() {
            match outcome.fate {
                Fate::Collided { .. } => collided += 1,
                Fate::LeftField { .. } => left_field += 1,
                Fate::Survived => survived += 1,
            }
            if let Some(genome) = self.population.get_mut(outcome.id) {
                genome.fitness = outcome.fitness;
            }
        }

        let fittest = self
            .population
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness));
        let best_fitness = fittest.map_or(0.0, |genome| genome.fitness);
        if let Some(fittest) = fittest {
            if self.best.as_ref().is_none_or(|best| fittest.fitness > best.fitness) {
                self.best = Some(fittest.clone());
            }
        }
        let mean_fitness = self.population.iter().map(|genome| genome.fitness).sum::<f32>()
            / self.population.len().max(1) as f32;

        let report = GenerationReport {
            generation: self.generation,
            started_at,
            ticks: ctx.tick,
            score,
            best_fitness,
            mean_fitness,
            collided,
            left_field,
            survived,
        };
        log::info!(
            "generation {}: score {}, best {:.2}, mean {:.2}, {} ticks",
            report.generation,
            report.score,
            report.best_fitness,
            report.mean_fitness,
            report.ticks
        );
        Ok(report)
    }

    /// Replaces the population with the next generation.
    ///
    /// Elites are carried over unchanged. Every other child is, with equal
    /// chance, a weighted crossover of two genomes from the top 15% or a
    /// mutated clone of a genome from the top 10%.
    pub fn breed(&mut self) {
        let mut ranked = std::mem::take(&mut self.population);
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let size = self.params.population_size;
        let mut rng = rand::rng();
        let mut next: Vec<Brain> = ranked
            .iter()
            .take(self.params.elite_count)
            .map(|genome| genome.brain.clone())
            .collect();

        if !ranked.is_empty() {
            let crossover_pool = ((ranked.len() as f32 * 0.15).max(2.0) as usize).min(ranked.len());
            let clone_pool = (ranked.len() / 10).max(1);

            while next.len() < size {
                if rng.random_bool(0.5) {
                    let first = rng.random_range(0..crossover_pool);
                    let mut second = rng.random_range(0..crossover_pool);
                    while second == first && crossover_pool > 1 {
                        second = rng.random_range(0..crossover_pool);
                    }
                    let weight = rng.random::<f32>();
                    next.push(Brain::crossover_weighted(
                        &ranked[first].brain,
                        &ranked[second].brain,
                        weight,
                    ));
                } else {
                    let parent = &ranked[rng.random_range(0..clone_pool)];
                    let mut brain = parent.brain.clone();
                    brain.mutate(sample_mutation_scale(&mut rng));
                    next.push(brain);
                }
            }
        }

        self.population = next
            .into_iter()
            .enumerate()
            .map(|(id, brain)| Genome {
                id,
                brain,
                fitness: 0.0,
            })
            .collect();
    }

    /// Whether the best fitness seen reached the configured threshold.
    pub fn is_solved(&self) -> bool {
        match (self.params.fitness_threshold, &self.best) {
            (Some(threshold), Some(best)) => best.fitness >= threshold,
            _ => false,
        }
    }
}

/// Log-uniform mutation scale in `[0.002, 0.2)`.
fn sample_mutation_scale(rng: &mut impl Rng) -> f32 {
    let log_min = 0.002_f32.ln();
    let log_max = 0.2_f32.ln();
    rng.random_range(log_min..log_max).exp()
}
