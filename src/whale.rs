//! Whale optimization engine.
//!
//! [`WhaleOptimizer`] owns a population inside a constraint box and evolves
//! it one generation at a time through [`WhaleOptimizer::advance`]. Every
//! stochastic step draws from the random number generator the caller passes
//! in, so a seeded generator reproduces a run exactly.

use crate::core::history::{population_diversity, BestHistory, GenerationBest, RunReport};
use crate::core::{Bounds, BoundsError, Population, Scalar, Solution};
use crate::ops::movement::{self, Movement};
use crate::ops::objective::{Objective, ObjectiveError};
use crate::ops::ranking::{self, Direction, RankedSolution};
use log::{debug, info, trace, warn};
use rand::Rng;
use thiserror::Error;

const DEFAULT_POPULATION_SIZE: usize = 50;
const DEFAULT_GENERATIONS: usize = 30;
const DEFAULT_INITIAL_A: Scalar = 2.0;
const DEFAULT_SPIRAL_CONSTANT: Scalar = 0.5;

/// Errors produced by [`WhaleOptimizer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WhaleError {
    /// The configured population size was zero.
    #[error("population size must be greater than zero (received {0})")]
    InvalidPopulationSize(usize),
    /// A control parameter was NaN, infinite, or (for `a_step`) negative.
    #[error("parameter `{name}` is out of range (received {value})")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Offending value.
        value: Scalar,
    },
    /// The objective consumes a different number of coordinates than the
    /// constraint list describes.
    #[error("objective takes {objective} coordinates but {constraints} constraints were given")]
    ArityMismatch {
        /// Arity reported by the objective.
        objective: usize,
        /// Number of constraint pairs.
        constraints: usize,
    },
    /// The constraint box is malformed.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    /// The objective failed or returned the wrong number of values.
    #[error(transparent)]
    Objective(#[from] ObjectiveError),
    /// The objective returned NaN or an infinity.
    #[error("objective returned non-finite fitness {value} for member {index}")]
    NonFiniteFitness {
        /// Position of the member in the population.
        index: usize,
        /// Value returned by the objective.
        value: Scalar,
    },
    /// A report was requested before any generation was ranked.
    #[error("no generation has been ranked yet")]
    EmptyHistory,
}

impl WhaleError {
    /// Returns `true` for errors raised while validating the configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidPopulationSize(_)
                | Self::InvalidParameter { .. }
                | Self::ArityMismatch { .. }
                | Self::Bounds(_)
        )
    }
}

/// Plain settings for a [`WhaleOptimizer`].
///
/// All fields are public; start from the default and reassign what you need:
/// ```
/// let mut settings = woa::WhaleSettings::default();
/// settings.population_size = 20;
/// settings.maximize = true;
/// assert_eq!(settings.a_step(), 2.0 / 30.0);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct WhaleSettings {
    /// Number of solutions per generation.
    pub population_size: usize,
    /// Number of generations a call to [`WhaleOptimizer::run_configured`]
    /// advances; also sets the default decay step.
    pub generations: usize,
    /// Starting value of the `a` coefficient.
    pub initial_a: Scalar,
    /// Amount subtracted from `a` after every generation. Defaults to
    /// `initial_a / generations` when unset.
    pub a_step: Option<Scalar>,
    /// Spiral shape constant `b`.
    pub spiral_constant: Scalar,
    /// Whether higher fitness is better.
    pub maximize: bool,
    /// Abort a generation when the objective returns NaN or an infinity.
    /// When disabled such values are ranked instead, NaN always last.
    pub reject_non_finite: bool,
}

impl Default for WhaleSettings {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            initial_a: DEFAULT_INITIAL_A,
            a_step: None,
            spiral_constant: DEFAULT_SPIRAL_CONSTANT,
            maximize: false,
            reject_non_finite: true,
        }
    }
}

impl WhaleSettings {
    /// Returns the effective per-generation decay of `a`.
    #[must_use]
    pub fn a_step(&self) -> Scalar {
        #[allow(clippy::cast_precision_loss)]
        let planned = self.generations as Scalar;
        self.a_step.unwrap_or(self.initial_a / planned)
    }

    /// Returns the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::from_maximize(self.maximize)
    }

    /// Checks the settings on their own, without bounds or objective.
    ///
    /// # Errors
    /// Returns [`WhaleError::InvalidPopulationSize`] for an empty population
    /// and [`WhaleError::InvalidParameter`] for any non-finite coefficient
    /// or a negative `a_step`.
    pub fn validate(&self) -> Result<(), WhaleError> {
        if self.population_size == 0 {
            return Err(WhaleError::InvalidPopulationSize(self.population_size));
        }
        let parameters = [
            ("initial_a", self.initial_a),
            ("a_step", self.a_step()),
            ("spiral_constant", self.spiral_constant),
        ];
        for (name, value) in parameters {
            if !value.is_finite() {
                return Err(WhaleError::InvalidParameter { name, value });
            }
        }
        // a must never grow between generations
        let a_step = self.a_step();
        if a_step < 0.0 {
            return Err(WhaleError::InvalidParameter {
                name: "a_step",
                value: a_step,
            });
        }
        Ok(())
    }
}

/// Per-generation outcome returned by [`WhaleOptimizer::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    /// Index of the generation that just completed.
    pub generation: usize,
    /// Fitness of the member carried over as best.
    pub best_fitness: Scalar,
    /// Value of `a` the movements were computed with.
    pub a: Scalar,
    /// Members moved by encircling.
    pub encircled: usize,
    /// Members moved by random search.
    pub searched: usize,
    /// Members moved by spiral attack.
    pub attacked: usize,
}

impl GenerationSummary {
    fn record(&mut self, movement: Movement) {
        match movement {
            Movement::Encircle => self.encircled += 1,
            Movement::Search => self.searched += 1,
            Movement::Attack => self.attacked += 1,
        }
    }

    /// Number of members that moved this generation.
    #[must_use]
    pub fn moved(&self) -> usize {
        self.encircled + self.searched + self.attacked
    }
}

/// Builder returned by [`WhaleOptimizer::builder`].
pub struct WhaleOptimizerBuilder<O> {
    objective: O,
    constraints: Vec<(Scalar, Scalar)>,
    settings: WhaleSettings,
}

impl<O> WhaleOptimizerBuilder<O>
where
    O: Objective,
{
    /// Replaces every setting at once.
    #[must_use]
    pub fn settings(mut self, settings: WhaleSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Configures the number of solutions per generation.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.settings.population_size = size;
        self
    }

    /// Configures the planned number of generations.
    #[must_use]
    pub fn generations(mut self, generations: usize) -> Self {
        self.settings.generations = generations;
        self
    }

    /// Configures the starting value of `a`.
    #[must_use]
    pub fn initial_a(mut self, a: Scalar) -> Self {
        self.settings.initial_a = a;
        self
    }

    /// Configures an explicit decay step for `a`.
    #[must_use]
    pub fn a_step(mut self, step: Scalar) -> Self {
        self.settings.a_step = Some(step);
        self
    }

    /// Configures the spiral constant `b`.
    #[must_use]
    pub fn spiral_constant(mut self, b: Scalar) -> Self {
        self.settings.spiral_constant = b;
        self
    }

    /// Selects maximization (`true`) or minimization (`false`).
    #[must_use]
    pub fn maximize(mut self, maximize: bool) -> Self {
        self.settings.maximize = maximize;
        self
    }

    /// Chooses whether non-finite fitness aborts a generation.
    #[must_use]
    pub fn reject_non_finite(mut self, reject: bool) -> Self {
        self.settings.reject_non_finite = reject;
        self
    }

    /// Validates the configuration and draws the initial population.
    ///
    /// # Errors
    /// Returns a configuration [`WhaleError`] when the settings, the
    /// constraint list, or the objective arity are invalid.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<WhaleOptimizer<O>, WhaleError> {
        WhaleOptimizer::new(self.objective, &self.constraints, self.settings, rng)
    }
}

/// Whale optimization engine over an [`Objective`].
///
/// # Examples
/// ```
/// use woa::ops::objective_2d;
/// use woa::WhaleOptimizer;
/// use rand::SeedableRng;
///
/// let sphere = objective_2d(|xs: &[f64], ys: &[f64]| {
///     xs.iter().zip(ys).map(|(x, y)| x * x + y * y).collect()
/// });
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let mut optimizer = WhaleOptimizer::builder(sphere, &[(-2.0, 2.0), (-2.0, 2.0)])
///     .population_size(20)
///     .generations(30)
///     .build(&mut rng)
///     .unwrap();
/// for _ in 0..30 {
///     optimizer.advance(&mut rng).unwrap();
/// }
/// let best = optimizer.best().unwrap();
/// assert_eq!(optimizer.history().len(), 30);
/// assert!(best.fitness >= 0.0);
/// ```
pub struct WhaleOptimizer<O> {
    objective: O,
    bounds: Bounds,
    population: Population,
    initial_a: Scalar,
    a_step: Scalar,
    spiral_constant: Scalar,
    direction: Direction,
    reject_non_finite: bool,
    planned_generations: usize,
    generation: usize,
    history: BestHistory,
}

impl<O> WhaleOptimizer<O>
where
    O: Objective,
{
    /// Creates a builder seeded with [`WhaleSettings::default`].
    #[must_use]
    pub fn builder(objective: O, constraints: &[(Scalar, Scalar)]) -> WhaleOptimizerBuilder<O> {
        WhaleOptimizerBuilder {
            objective,
            constraints: constraints.to_vec(),
            settings: WhaleSettings::default(),
        }
    }

    /// Validates the configuration and draws `population_size` uniform
    /// samples inside `constraints`.
    ///
    /// # Errors
    /// Returns a configuration [`WhaleError`] when the population size is
    /// zero, a coefficient is not finite, a constraint is malformed, or the
    /// objective arity differs from the number of constraints.
    pub fn new<R: Rng + ?Sized>(
        objective: O,
        constraints: &[(Scalar, Scalar)],
        settings: WhaleSettings,
        rng: &mut R,
    ) -> Result<Self, WhaleError> {
        settings.validate()?;
        let bounds = Bounds::new(constraints)?;
        if objective.arity() != bounds.dimensions() {
            return Err(WhaleError::ArityMismatch {
                objective: objective.arity(),
                constraints: bounds.dimensions(),
            });
        }
        let population = Population::random(&bounds, settings.population_size, rng);
        info!(
            "whale optimizer ready: {} solutions in {} dimensions, a = {}, a_step = {}, b = {}, {:?}",
            settings.population_size,
            bounds.dimensions(),
            settings.initial_a,
            settings.a_step(),
            settings.spiral_constant,
            settings.direction(),
        );
        Ok(Self {
            objective,
            bounds,
            population,
            initial_a: settings.initial_a,
            a_step: settings.a_step(),
            spiral_constant: settings.spiral_constant,
            direction: settings.direction(),
            reject_non_finite: settings.reject_non_finite,
            planned_generations: settings.generations,
            generation: 0,
            history: BestHistory::new(),
        })
    }

    /// Returns the current population.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Returns the current solutions.
    #[must_use]
    pub fn solutions(&self) -> &[Solution] {
        self.population.solutions()
    }

    /// Returns the constraint box.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Returns the objective.
    #[must_use]
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Returns the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the current value of `a`, `initial_a - generation * a_step`.
    ///
    /// The value keeps decreasing past zero if more generations are run
    /// than were planned.
    #[must_use]
    pub fn a(&self) -> Scalar {
        #[allow(clippy::cast_precision_loss)]
        let elapsed = self.generation as Scalar;
        self.initial_a - elapsed * self.a_step
    }

    /// Returns the per-generation decay of `a`.
    #[must_use]
    pub fn a_step(&self) -> Scalar {
        self.a_step
    }

    /// Returns the spiral constant `b`.
    #[must_use]
    pub fn spiral_constant(&self) -> Scalar {
        self.spiral_constant
    }

    /// Returns the number of completed generations.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the per-generation best history.
    #[must_use]
    pub fn history(&self) -> &BestHistory {
        &self.history
    }

    /// Returns the best entry across the whole history.
    #[must_use]
    pub fn best(&self) -> Option<&GenerationBest> {
        self.history.best(self.direction)
    }

    /// Evaluates the objective over the current population.
    ///
    /// # Errors
    /// Returns [`WhaleError::Objective`] when the objective fails or returns
    /// the wrong number of values, and [`WhaleError::NonFiniteFitness`] for
    /// NaN or infinite values when non-finite fitness is rejected.
    pub fn evaluate(&self) -> Result<Vec<Scalar>, WhaleError> {
        let columns = self.population.columns(self.bounds.dimensions());
        let views: Vec<&[Scalar]> = columns.iter().map(Vec::as_slice).collect();
        let fitness = self.objective.evaluate(&views)?;
        if fitness.len() != self.population.len() {
            return Err(ObjectiveError::LengthMismatch {
                expected: self.population.len(),
                found: fitness.len(),
            }
            .into());
        }
        if let Some((index, &value)) = fitness
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            if self.reject_non_finite {
                return Err(WhaleError::NonFiniteFitness { index, value });
            }
            warn!(
                "generation {}: member {} has non-finite fitness {}",
                self.generation, index, value
            );
        }
        Ok(fitness)
    }

    /// Ranks the population best-first and records the top entry in the
    /// history.
    ///
    /// Members with equal fitness keep their population order and NaN always
    /// ranks last. Nothing is recorded when evaluation fails.
    ///
    /// # Errors
    /// Propagates any [`WhaleError`] from [`Self::evaluate`].
    pub fn rank(&mut self) -> Result<Vec<RankedSolution>, WhaleError> {
        let fitness = self.evaluate()?;
        let ranked = ranking::rank(&self.population, &fitness, self.direction);
        let top = &ranked[0];
        self.history.push(GenerationBest::new(
            self.generation,
            top.fitness,
            top.solution.clone(),
        ));
        Ok(ranked)
    }

    /// Advances the population by one generation.
    ///
    /// The best member is carried over unchanged; every other member moves
    /// by encircling, random search, or spiral attack and is clamped back into
    /// the constraint box. Finally `a` decays by `a_step`.
    ///
    /// # Errors
    /// Propagates evaluation failures from [`Self::rank`]. On error the
    /// population, history, and `a` are left as they were.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<GenerationSummary, WhaleError> {
        let ranked = self.rank()?;
        let a = self.a();
        let best = ranked[0].solution.clone();
        let mut summary = GenerationSummary {
            generation: self.generation,
            best_fitness: ranked[0].fitness,
            a,
            encircled: 0,
            searched: 0,
            attacked: 0,
        };

        let previous = self.population.solutions();
        let mut next = Vec::with_capacity(previous.len());
        next.push(best.clone());
        for (position, entry) in ranked.iter().enumerate().skip(1) {
            let (movement, moved) = movement::step(
                &entry.solution,
                &best,
                previous,
                a,
                self.spiral_constant,
                rng,
            );
            trace!(
                "generation {}: rank {} -> {:?}",
                self.generation,
                position,
                movement
            );
            summary.record(movement);
            next.push(Solution::new(moved).clamped(&self.bounds));
        }

        self.population = Population::new(next);
        self.generation += 1;
        debug!(
            "generation {} done: best = {}, a = {}, encircle/search/attack = {}/{}/{}",
            summary.generation,
            summary.best_fitness,
            a,
            summary.encircled,
            summary.searched,
            summary.attacked,
        );
        Ok(summary)
    }

    /// Advances `generations` times and reports the result.
    ///
    /// # Errors
    /// Propagates the first failing generation, or
    /// [`WhaleError::EmptyHistory`] when `generations` is zero and nothing
    /// was ranked before.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        generations: usize,
        rng: &mut R,
    ) -> Result<RunReport, WhaleError> {
        for _ in 0..generations {
            self.advance(rng)?;
        }
        let report = self.report()?;
        info!(
            "finished after {} generations: best fitness {} at {:?}",
            report.generations,
            report.best.fitness,
            report.best.solution.coords(),
        );
        Ok(report)
    }

    /// Advances the number of generations given by
    /// [`WhaleSettings::generations`].
    ///
    /// # Errors
    /// Same as [`Self::run`].
    pub fn run_configured<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<RunReport, WhaleError> {
        self.run(self.planned_generations, rng)
    }

    /// Summarizes the run so far.
    ///
    /// # Errors
    /// Returns [`WhaleError::EmptyHistory`] before the first ranking.
    pub fn report(&self) -> Result<RunReport, WhaleError> {
        let best = self.best().cloned().ok_or(WhaleError::EmptyHistory)?;
        Ok(RunReport {
            best,
            history: self.history.clone(),
            generations: self.generation,
            final_a: self.a(),
            final_population: self.population.clone(),
            diversity: population_diversity(&self.population),
        })
    }
}
