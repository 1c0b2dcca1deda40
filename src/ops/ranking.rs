//! Fitness ordering and population ranking.

use crate::core::{Population, Scalar, Solution};
use std::cmp::Ordering;

/// Optimization direction.
///
/// Comparisons made through a `Direction` always treat NaN as the worst
/// possible fitness, whatever the direction.
///
/// # Examples
/// ```
/// use woa::Direction;
/// assert!(Direction::Minimize.is_better(1.0, 2.0));
/// assert!(Direction::Maximize.is_better(2.0, 1.0));
/// assert!(Direction::Maximize.is_better(-1.0, f64::NAN));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Direction {
    /// Maps a `maximize` flag onto a direction.
    #[must_use]
    pub fn from_maximize(maximize: bool) -> Self {
        if maximize {
            Self::Maximize
        } else {
            Self::Minimize
        }
    }

    /// Orders two fitness values so that the better one compares as `Less`.
    #[must_use]
    pub fn compare(self, lhs: Scalar, rhs: Scalar) -> Ordering {
        match (lhs.is_nan(), rhs.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal);
                match self {
                    Self::Minimize => ordering,
                    Self::Maximize => ordering.reverse(),
                }
            }
        }
    }

    /// Returns `true` when `candidate` is strictly better than `incumbent`.
    #[must_use]
    pub fn is_better(self, candidate: Scalar, incumbent: Scalar) -> bool {
        self.compare(candidate, incumbent) == Ordering::Less
    }

    /// Returns `true` when `candidate` is at least as good as `incumbent`.
    #[must_use]
    pub fn is_at_least_as_good(self, candidate: Scalar, incumbent: Scalar) -> bool {
        self.compare(candidate, incumbent) != Ordering::Greater
    }
}

/// A population member paired with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSolution {
    /// Objective value of [`Self::solution`].
    pub fitness: Scalar,
    /// The member itself.
    pub solution: Solution,
}

/// Pairs every member with its fitness and sorts best-first.
///
/// The sort is stable, so members with equal fitness keep their population
/// order.
///
/// # Panics
/// Panics when `fitness` and `population` differ in length.
#[must_use]
pub fn rank(
    population: &Population,
    fitness: &[Scalar],
    direction: Direction,
) -> Vec<RankedSolution> {
    assert_eq!(
        population.len(),
        fitness.len(),
        "one fitness value is required per member"
    );
    let mut ranked: Vec<RankedSolution> = population
        .iter()
        .zip(fitness.iter())
        .map(|(solution, &fitness)| RankedSolution {
            fitness,
            solution: solution.clone(),
        })
        .collect();
    ranked.sort_by(|lhs, rhs| direction.compare(lhs.fitness, rhs.fitness));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn population(n: usize) -> Population {
        Population::new((0..n).map(|i| Solution::new(vec![i as Scalar])).collect())
    }

    fn order(ranked: &[RankedSolution]) -> Vec<Scalar> {
        ranked.iter().map(|entry| entry.solution.coords()[0]).collect()
    }

    #[test]
    fn minimize_puts_smallest_first() {
        let ranked = rank(&population(4), &[3.0, -1.0, 2.0, 0.5], Direction::Minimize);
        assert_eq!(order(&ranked), vec![1.0, 3.0, 2.0, 0.0]);
        assert_eq!(ranked[0].fitness, -1.0);
    }

    #[test]
    fn maximize_puts_largest_first() {
        let ranked = rank(&population(3), &[3.0, -1.0, 7.0], Direction::Maximize);
        assert_eq!(order(&ranked), vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn ties_keep_population_order() {
        let ranked = rank(&population(4), &[1.0, 0.0, 1.0, 0.0], Direction::Minimize);
        assert_eq!(order(&ranked), vec![1.0, 3.0, 0.0, 2.0]);
        let ranked = rank(&population(4), &[1.0, 0.0, 1.0, 0.0], Direction::Maximize);
        assert_eq!(order(&ranked), vec![0.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn nan_is_always_last() {
        let fitness = [f64::NAN, 5.0, f64::NAN, -5.0];
        for direction in [Direction::Minimize, Direction::Maximize] {
            let ranked = rank(&population(4), &fitness, direction);
            assert!(!ranked[0].fitness.is_nan());
            assert!(!ranked[1].fitness.is_nan());
            assert!(ranked[2].fitness.is_nan());
            assert!(ranked[3].fitness.is_nan());
        }
    }

    #[test]
    fn infinities_follow_direction() {
        let fitness = [f64::INFINITY, 0.0, f64::NEG_INFINITY];
        let ranked = rank(&population(3), &fitness, Direction::Minimize);
        assert_eq!(ranked[0].fitness, f64::NEG_INFINITY);
        let ranked = rank(&population(3), &fitness, Direction::Maximize);
        assert_eq!(ranked[0].fitness, f64::INFINITY);
    }

    #[test]
    fn at_least_as_good_accepts_equal() {
        assert!(Direction::Minimize.is_at_least_as_good(1.0, 1.0));
        assert!(!Direction::Minimize.is_better(1.0, 1.0));
        assert!(!Direction::Maximize.is_at_least_as_good(f64::NAN, 0.0));
    }
}
