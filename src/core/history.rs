//! Per-generation best-solution bookkeeping and run reports.
//!
//! Every ranking pass appends exactly one [`GenerationBest`] to the
//! [`BestHistory`]. The history only grows; once a run is over it can be
//! searched for the overall winner or handed out for diagnostics.

use crate::core::{Population, Scalar, Solution};
use crate::ops::ranking::Direction;

/// Top-ranked member of one generation.
///
/// # Examples
/// ```
/// use woa::{GenerationBest, Solution};
/// let entry = GenerationBest::new(0, 1.5, Solution::new(vec![0.0, 1.0]));
/// assert_eq!(entry.fitness, 1.5);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationBest {
    /// Zero-based index of the ranking pass that produced the entry.
    pub generation: usize,
    /// Fitness of [`Self::solution`].
    pub fitness: Scalar,
    /// The best point of that generation.
    pub solution: Solution,
}

impl GenerationBest {
    /// Creates a new history entry.
    #[must_use]
    pub fn new(generation: usize, fitness: Scalar, solution: Solution) -> Self {
        Self {
            generation,
            fitness,
            solution,
        }
    }
}

/// Append-only sequence of per-generation best solutions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestHistory {
    entries: Vec<GenerationBest>,
}

impl BestHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: GenerationBest) {
        self.entries.push(entry);
    }

    /// Returns the number of recorded generations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Indicates whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the recorded entries in generation order.
    #[must_use]
    pub fn entries(&self) -> &[GenerationBest] {
        &self.entries
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&GenerationBest> {
        self.entries.last()
    }

    /// Returns the fitness of every entry in generation order.
    #[must_use]
    pub fn fitness_series(&self) -> Vec<Scalar> {
        self.entries.iter().map(|entry| entry.fitness).collect()
    }

    /// Returns the best entry of the whole history.
    ///
    /// NaN fitness never wins and the earliest entry wins ties.
    ///
    /// # Examples
    /// ```
    /// use woa::{BestHistory, Direction};
    /// let history = BestHistory::new();
    /// assert!(history.best(Direction::Minimize).is_none());
    /// ```
    #[must_use]
    pub fn best(&self, direction: Direction) -> Option<&GenerationBest> {
        self.entries.iter().reduce(|best, candidate| {
            if direction.is_better(candidate.fitness, best.fitness) {
                candidate
            } else {
                best
            }
        })
    }
}

/// Summary of a completed optimization run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Best entry across the whole history.
    pub best: GenerationBest,
    /// Per-generation best entries.
    pub history: BestHistory,
    /// Number of generations advanced so far.
    pub generations: usize,
    /// Value of the `a` coefficient after the last generation.
    pub final_a: Scalar,
    /// Population left after the last generation.
    pub final_population: Population,
    /// Root-mean-square spread of the final population around its centroid.
    pub diversity: Scalar,
}

/// Root-mean-square distance of every coordinate from the population mean,
/// averaged over dimensions.
pub(crate) fn population_diversity(population: &Population) -> Scalar {
    let size = population.len();
    let Some(first) = population.get(0) else {
        return 0.0;
    };
    let dimensions = first.len();
    if dimensions == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let population_size = size as Scalar;
    let mut means = vec![0.0; dimensions];
    for solution in population.iter() {
        for (mean, value) in means.iter_mut().zip(solution.iter()) {
            *mean += *value;
        }
    }
    for mean in &mut means {
        *mean /= population_size;
    }
    let mut total_variance = 0.0;
    for solution in population.iter() {
        for (mean, value) in means.iter().zip(solution.iter()) {
            let diff = value - mean;
            total_variance += (diff * diff) / population_size;
        }
    }
    #[allow(clippy::cast_precision_loss)]
    {
        (total_variance / dimensions as Scalar).sqrt()
    }
}
