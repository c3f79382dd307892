//! Simulation step engine.
//!
//! The arena owns one generation: the roster of agents with their pilots and
//! fitness handles, the obstacle field, the ground and the score. Each call
//! to [`Arena::step`] processes exactly one tick in a fixed order:
//!
//! 1. pick the reference obstacle the agents look at,
//! 2. move every agent, reward it for surviving and let its pilot decide,
//! 3. resolve collisions and passes, scroll and expire obstacles,
//! 4. score a cleared obstacle and spawn the next one,
//! 5. cull agents that left the field,
//! 6. scroll the ground.
//!
//! The order is fixed so that a given gap sequence always yields the same
//! scores and fitness.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::error::ArenaError;
use super::events::{ArenaEvent, EventQueue, Exit};
use super::gaps::{GapSampler, SeededGaps};
use super::ground::Ground;
use super::motion::Advance;
use super::obstacle::Obstacle;
use super::params::{DecisionMode, Params};
use super::pilot::{Fitness, Observation, Pilot};
use super::roster::Roster;

/// Generation and tick counters, owned by the caller and passed into every
/// step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    /// Generation being simulated.
    pub generation: u32,
    /// Ticks processed so far in this generation.
    pub tick: u64,
}

impl RunContext {
    /// Context for the first tick of `generation`.
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            tick: 0,
        }
    }
}

/// Whether the generation can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStatus {
    /// At least one agent is still active.
    Running,
    /// No agent is left; the generation is over.
    Extinct,
}

/// Summary of one processed tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick index after the step.
    pub tick: u64,
    /// Whether agents remain.
    pub status: TickStatus,
    /// Events in the order they happened.
    pub events: Vec<ArenaEvent>,
    /// Active agents after the step.
    pub alive: usize,
    /// Obstacles cleared so far.
    pub score: u32,
}

/// How an agent's run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fate {
    /// Hit a barrier on `tick`.
    Collided {
        /// Tick of the impact.
        tick: u64,
    },
    /// Left the field on `tick`.
    LeftField {
        /// Tick of the exit.
        tick: u64,
        /// Boundary that was crossed.
        exit: Exit,
    },
    /// Still active when the arena was finished.
    Survived,
}

/// An agent's pilot and fitness handle returned to the caller.
#[derive(Debug, Clone)]
pub struct Outcome<P, F> {
    /// Id of the agent.
    pub id: usize,
    /// The agent's pilot.
    pub pilot: P,
    /// The agent's fitness handle with every delta applied.
    pub fitness: F,
    /// How the run ended.
    pub fate: Fate,
}

/// One generation of agents flying through a shared obstacle field.
#[derive(Debug)]
pub struct Arena<P, F> {
    params: Params,
    roster: Roster<P, F>,
    obstacles: Vec<Obstacle>,
    ground: Ground,
    score: u32,
    gaps: Box<dyn GapSampler + Send>,
    outcomes: Vec<Outcome<P, F>>,
}

impl<P: Pilot + Send, F: Fitness> Arena<P, F> {
    /// Creates an arena with one agent per `(pilot, fitness)` pair.
    ///
    /// Agents get ids in iteration order and all start at the spawn point.
    /// Rejects invalid parameters and an empty crew.
    pub fn new(
        params: &Params,
        crew: impl IntoIterator<Item = (P, F)>,
        mut gaps: Box<dyn GapSampler + Send>,
    ) -> Result<Self, ArenaError> {
        params.validate()?;

        let crew = crew.into_iter();
        let mut roster = Roster::with_capacity(crew.size_hint().0);
        for (id, (pilot, fitness)) in crew.enumerate() {
            roster.enlist(
                Agent::new(id, params.spawn_x, params.spawn_y),
                pilot,
                fitness,
            );
        }
        if roster.is_empty() {
            return Err(ArenaError::EmptyRoster);
        }

        let first = Obstacle::new(
            params.obstacle_spawn_x,
            params.gap_size,
            params.min_gap_height..params.max_gap_height,
            gaps.as_mut(),
        );

        Ok(Self {
            params: params.clone(),
            roster,
            obstacles: vec![first],
            ground: Ground::new(params.ground_y),
            score: 0,
            gaps,
            outcomes: Vec::new(),
        })
    }

    /// Creates an arena whose gaps come from `params.seed`.
    pub fn seeded(
        params: &Params,
        crew: impl IntoIterator<Item = (P, F)>,
    ) -> Result<Self, ArenaError> {
        Self::new(params, crew, Box::new(SeededGaps::new(params.seed)))
    }

    /// Processes one tick.
    ///
    /// Returns [`TickStatus::Extinct`] without touching any state when no
    /// agent is left. A failing pilot aborts the tick and its error is
    /// returned; the arena should not be stepped again afterwards.
    pub fn step(&mut self, ctx: &mut RunContext) -> Result<TickReport, ArenaError> {
        if self.roster.is_empty() {
            return Ok(self.report(ctx.tick, Vec::new()));
        }
        ctx.tick += 1;

        let mut events = EventQueue::new();

        let reference = self.obstacles[self.reference_index()].clone();
        match self.params.decision_mode {
            DecisionMode::Sequential => self.fly_sequential(&reference)?,
            DecisionMode::Parallel => self.fly_parallel(&reference)?,
        }

        let passed = self.resolve_obstacles(ctx.tick, &mut events);

        if passed {
            self.score += 1;
            for fitness in &mut self.roster.fitness {
                fitness.adjust(self.params.pass_bonus);
            }
            self.spawn_obstacle(&mut events);
        }
        if self.obstacles.is_empty() {
            self.spawn_obstacle(&mut events);
        }

        self.cull(ctx.tick, &mut events);

        self.ground.advance();

        Ok(self.report(ctx.tick, events.drain().collect()))
    }

    /// Index of the obstacle agents steer by: the second one once the lead
    /// agent is past the first one's trailing edge.
    fn reference_index(&self) -> usize {
        match (self.roster.agents.first(), self.obstacles.first()) {
            (Some(lead), Some(first)) if self.obstacles.len() > 1 && first.is_behind(lead.x) => 1,
            _ => 0,
        }
    }

    fn fly_sequential(&mut self, reference: &Obstacle) -> Result<(), ArenaError> {
        let bonus = self.params.survival_bonus;
        let threshold = self.params.jump_threshold;
        let roster = &mut self.roster;

        for ((agent, pilot), fitness) in roster
            .agents
            .iter_mut()
            .zip(roster.pilots.iter_mut())
            .zip(roster.fitness.iter_mut())
        {
            agent.advance();
            fitness.adjust(bonus);

            let output = pilot
                .decide(&Observation::of(agent, reference))
                .map_err(|source| ArenaError::Pilot {
                    agent: agent.id,
                    source: Box::new(source),
                })?;
            if output > threshold {
                agent.jump();
            }
        }
        Ok(())
    }

    fn fly_parallel(&mut self, reference: &Obstacle) -> Result<(), ArenaError> {
        let bonus = self.params.survival_bonus;
        let threshold = self.params.jump_threshold;
        let roster = &mut self.roster;

        for (agent, fitness) in roster.agents.iter_mut().zip(roster.fitness.iter_mut()) {
            agent.advance();
            fitness.adjust(bonus);
        }

        let observations: Vec<Observation> = roster
            .agents
            .iter()
            .map(|agent| Observation::of(agent, reference))
            .collect();

        // collect keeps insertion order, so jumps are applied exactly as in
        // sequential mode
        let decisions: Vec<Result<f32, P::Error>> = roster
            .pilots
            .par_iter_mut()
            .zip(observations.par_iter())
            .map(|(pilot, observation)| pilot.decide(observation))
            .collect();

        for (agent, decision) in roster.agents.iter_mut().zip(decisions) {
            let output = decision.map_err(|source| ArenaError::Pilot {
                agent: agent.id,
                source: Box::new(source),
            })?;
            if output > threshold {
                agent.jump();
            }
        }
        Ok(())
    }

    /// Collision and pass detection over every obstacle, oldest first.
    ///
    /// Removals are marked during the scan and applied afterwards; an agent
    /// marked by one obstacle is skipped by the later ones. Returns
    /// whether an obstacle was passed this tick.
    fn resolve_obstacles(&mut self, tick: u64, events: &mut EventQueue) -> bool {
        let penalty = self.params.collision_penalty;
        let mut doomed = vec![false; self.roster.len()];
        let mut expired = vec![false; self.obstacles.len()];
        let mut passed = false;

        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            for (slot, agent) in self.roster.agents.iter().enumerate() {
                if doomed[slot] {
                    continue;
                }

                if obstacle.collides_with(agent) {
                    self.roster.fitness[slot].adjust(-penalty);
                    doomed[slot] = true;
                    events.push(ArenaEvent::Collided {
                        agent: agent.id,
                        obstacle_x: obstacle.x,
                    });
                }

                // an agent hit by this obstacle can still pass it
                if !obstacle.passed && obstacle.x < agent.x {
                    obstacle.passed = true;
                    passed = true;
                    events.push(ArenaEvent::ObstaclePassed {
                        obstacle_x: obstacle.x,
                    });
                }
            }

            if obstacle.is_off_field() {
                expired[index] = true;
            }
            obstacle.advance();
        }

        for (agent, pilot, fitness) in self.roster.retire(&doomed) {
            self.outcomes.push(Outcome {
                id: agent.id,
                pilot,
                fitness,
                fate: Fate::Collided { tick },
            });
        }

        let mut index = 0;
        self.obstacles.retain(|_| {
            let keep = !expired[index];
            index += 1;
            keep
        });
        for _ in expired.iter().filter(|&&gone| gone) {
            events.push(ArenaEvent::ObstacleDespawned);
        }

        passed
    }

    fn spawn_obstacle(&mut self, events: &mut EventQueue) {
        let obstacle = Obstacle::new(
            self.params.obstacle_spawn_x,
            self.params.gap_size,
            self.params.min_gap_height..self.params.max_gap_height,
            self.gaps.as_mut(),
        );
        events.push(ArenaEvent::ObstacleSpawned {
            gap_top: obstacle.gap_top,
        });
        self.obstacles.push(obstacle);
    }

    /// Removes agents that touched the ground or rose above the field.
    /// Leaving the field carries no fitness penalty.
    fn cull(&mut self, tick: u64, events: &mut EventQueue) {
        let ground = self.params.ground_y;
        let exits: Vec<Option<Exit>> = self
            .roster
            .agents
            .iter()
            .map(|agent| {
                if agent.bottom() >= ground {
                    Some(Exit::Ground)
                } else if agent.y < 0.0 {
                    Some(Exit::Ceiling)
                } else {
                    None
                }
            })
            .collect();
        let marked: Vec<bool> = exits.iter().map(Option::is_some).collect();

        let retired = self.roster.retire(&marked);
        for ((agent, pilot, fitness), exit) in retired.into_iter().zip(exits.into_iter().flatten())
        {
            events.push(ArenaEvent::LeftField {
                agent: agent.id,
                exit,
            });
            self.outcomes.push(Outcome {
                id: agent.id,
                pilot,
                fitness,
                fate: Fate::LeftField { tick, exit },
            });
        }
    }
}

impl<P, F> Arena<P, F> {
    fn report(&self, tick: u64, events: Vec<ArenaEvent>) -> TickReport {
        TickReport {
            tick,
            status: if self.roster.is_empty() {
                TickStatus::Extinct
            } else {
                TickStatus::Running
            },
            events,
            alive: self.roster.len(),
            score: self.score,
        }
    }

    /// Parameters the arena was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Active agents in insertion order.
    pub fn agents(&self) -> &[Agent] {
        self.roster.agents()
    }

    /// Pilots of the active agents.
    pub fn pilots(&self) -> &[P] {
        self.roster.pilots()
    }

    /// Fitness handles of the active agents.
    pub fn fitness(&self) -> &[F] {
        self.roster.fitness()
    }

    /// Obstacles, leading obstacle first.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The scrolling ground.
    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    /// Obstacles cleared so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of active agents.
    pub fn alive(&self) -> usize {
        self.roster.len()
    }

    /// Whether every agent has been eliminated.
    pub fn is_extinct(&self) -> bool {
        self.roster.is_empty()
    }

    /// Agents eliminated so far, in elimination order.
    pub fn outcomes(&self) -> &[Outcome<P, F>] {
        &self.outcomes
    }

    /// Ends the generation and returns every agent's outcome ordered by id.
    /// Agents still active are reported as [`Fate::Survived`].
    pub fn finish(mut self) -> Vec<Outcome<P, F>> {
        let mut outcomes = self.outcomes;
        outcomes.extend(
            self.roster
                .drain()
                .into_iter()
                .map(|(agent, pilot, fitness)| Outcome {
                    id: agent.id,
                    pilot,
                    fitness,
                    fate: Fate::Survived,
                }),
        );
        outcomes.sort_by_key(|outcome| outcome.id);
        outcomes
    }
}
