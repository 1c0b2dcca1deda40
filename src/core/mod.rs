//! Core search-space primitives.
//!
//! A [`Solution`] is one candidate point, a [`Population`] is the fixed-size
//! set of points the optimizer evolves, and [`Bounds`] is the constraint box
//! every point is drawn from and clamped back into.

pub mod history;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use thiserror::Error;

/// Scalar type used for coordinates and fitness values.
pub type Scalar = f64;

/// A candidate point in the search space.
///
/// # Examples
/// ```
/// use woa::Solution;
/// let solution = Solution::new(vec![0.5, -1.0]);
/// assert_eq!(solution.len(), 2);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    coords: Vec<Scalar>,
}

impl Solution {
    /// Creates a solution from raw coordinates.
    #[must_use]
    pub fn new(coords: Vec<Scalar>) -> Self {
        Self { coords }
    }

    /// Returns the dimensionality of the point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Indicates whether the point has zero coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns the coordinates as a slice.
    ///
    /// # Examples
    /// ```
    /// use woa::Solution;
    /// let solution = Solution::new(vec![0.25, 0.5]);
    /// assert_eq!(solution.coords(), &[0.25, 0.5]);
    /// ```
    #[must_use]
    pub fn coords(&self) -> &[Scalar] {
        &self.coords
    }

    /// Returns an iterator over the coordinates.
    pub fn iter(&self) -> impl Iterator<Item = &Scalar> {
        self.coords.iter()
    }

    /// Consumes the solution and returns the coordinate vector.
    #[must_use]
    pub fn into_coords(self) -> Vec<Scalar> {
        self.coords
    }

    /// Returns a copy of this point with every coordinate clamped into `bounds`.
    ///
    /// # Examples
    /// ```
    /// use woa::{Bounds, Solution};
    /// let bounds = Bounds::symmetric(2.0, 2).unwrap();
    /// let clipped = Solution::new(vec![3.0, -0.5]).clamped(&bounds);
    /// assert_eq!(clipped.coords(), &[2.0, -0.5]);
    /// ```
    #[must_use]
    pub fn clamped(mut self, bounds: &Bounds) -> Self {
        bounds.clamp(&mut self.coords);
        self
    }
}

impl From<Vec<Scalar>> for Solution {
    fn from(coords: Vec<Scalar>) -> Self {
        Self::new(coords)
    }
}

/// Error returned when a constraint box is malformed.
///
/// # Examples
/// ```
/// use woa::{Bounds, BoundsError};
/// let err = Bounds::new(&[(2.0, -2.0)]).unwrap_err();
/// assert!(matches!(err, BoundsError::InvalidRange { dimension: 0, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// No dimensions were supplied.
    #[error("constraint list is empty")]
    Empty,
    /// A dimension has its lower bound above its upper bound.
    #[error("invalid bounds for dimension {dimension} (lower: {lower}, upper: {upper})")]
    InvalidRange {
        /// Index of the offending dimension.
        dimension: usize,
        /// Lower bound supplied for the dimension.
        lower: Scalar,
        /// Upper bound supplied for the dimension.
        upper: Scalar,
    },
    /// A dimension has a NaN or infinite bound.
    #[error("non-finite bounds for dimension {dimension} (lower: {lower}, upper: {upper})")]
    NonFinite {
        /// Index of the offending dimension.
        dimension: usize,
        /// Lower bound supplied for the dimension.
        lower: Scalar,
        /// Upper bound supplied for the dimension.
        upper: Scalar,
    },
    /// A dimension is so wide that `upper - lower` overflows.
    #[error("bounds for dimension {dimension} are too wide (lower: {lower}, upper: {upper})")]
    TooWide {
        /// Index of the offending dimension.
        dimension: usize,
        /// Lower bound supplied for the dimension.
        lower: Scalar,
        /// Upper bound supplied for the dimension.
        upper: Scalar,
    },
}

/// Axis-aligned constraint box, one `[low, high]` interval per dimension.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<Scalar>,
    upper: Vec<Scalar>,
}

impl Bounds {
    /// Builds a constraint box from `(low, high)` pairs.
    ///
    /// # Examples
    /// ```
    /// use woa::Bounds;
    /// let bounds = Bounds::new(&[(-2.0, 2.0), (0.0, 1.0)]).unwrap();
    /// assert_eq!(bounds.dimensions(), 2);
    /// assert_eq!(bounds.interval(1), (0.0, 1.0));
    /// ```
    ///
    /// # Errors
    /// Returns [`BoundsError`] when the list is empty, when any bound is not
    /// finite, when any lower bound exceeds its upper bound, or when an
    /// interval's width overflows.
    pub fn new(pairs: &[(Scalar, Scalar)]) -> Result<Self, BoundsError> {
        if pairs.is_empty() {
            return Err(BoundsError::Empty);
        }
        for (dimension, &(lower, upper)) in pairs.iter().enumerate() {
            if !(lower.is_finite() && upper.is_finite()) {
                return Err(BoundsError::NonFinite {
                    dimension,
                    lower,
                    upper,
                });
            }
            if lower > upper {
                return Err(BoundsError::InvalidRange {
                    dimension,
                    lower,
                    upper,
                });
            }
            if !(upper - lower).is_finite() {
                return Err(BoundsError::TooWide {
                    dimension,
                    lower,
                    upper,
                });
            }
        }
        Ok(Self {
            lower: pairs.iter().map(|&(lower, _)| lower).collect(),
            upper: pairs.iter().map(|&(_, upper)| upper).collect(),
        })
    }

    /// Builds the box `[-limit, limit]` repeated over `dimensions` axes.
    ///
    /// # Errors
    /// Returns [`BoundsError`] when `dimensions` is zero, when `limit` is
    /// negative or not finite, or when `2 * limit` overflows.
    pub fn symmetric(limit: Scalar, dimensions: usize) -> Result<Self, BoundsError> {
        Self::new(&vec![(-limit, limit); dimensions])
    }

    /// Returns the number of constrained dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.lower.len()
    }

    /// Returns the lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[Scalar] {
        &self.lower
    }

    /// Returns the upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[Scalar] {
        &self.upper
    }

    /// Returns the `(low, high)` interval of one dimension.
    ///
    /// # Panics
    /// Panics when `dimension` is out of range.
    #[must_use]
    pub fn interval(&self, dimension: usize) -> (Scalar, Scalar) {
        (self.lower[dimension], self.upper[dimension])
    }

    /// Returns `true` when every coordinate of `point` is inside the box.
    #[must_use]
    pub fn contains(&self, point: &[Scalar]) -> bool {
        point.len() == self.dimensions()
            && point
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(value, (lower, upper))| lower <= value && value <= upper)
    }

    /// Clamps every coordinate of `point` into its interval.
    pub fn clamp(&self, point: &mut [Scalar]) {
        for (value, (&lower, &upper)) in point
            .iter_mut()
            .zip(self.lower.iter().zip(self.upper.iter()))
        {
            *value = value.clamp(lower, upper);
        }
    }

    /// Draws one uniform sample for every dimension.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Solution {
        let coords = self
            .lower
            .iter()
            .zip(self.upper.iter())
            .map(|(&lower, &upper)| Uniform::new_inclusive(lower, upper).sample(rng))
            .collect();
        Solution::new(coords)
    }
}

/// Fixed-size collection of [`Solution`] values evolved by the optimizer.
///
/// # Examples
/// ```
/// use woa::{Bounds, Population};
/// use rand::SeedableRng;
///
/// let bounds = Bounds::symmetric(1.0, 2).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let population = Population::random(&bounds, 8, &mut rng);
/// assert_eq!(population.len(), 8);
/// assert!(population.iter().all(|s| bounds.contains(s.coords())));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    solutions: Vec<Solution>,
}

impl Population {
    /// Wraps an existing set of solutions.
    #[must_use]
    pub fn new(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }

    /// Draws `size` points uniformly inside `bounds`.
    ///
    /// Sampling runs dimension by dimension: all `size` values of the first
    /// coordinate are drawn before any value of the second.
    pub fn random<R: Rng + ?Sized>(bounds: &Bounds, size: usize, rng: &mut R) -> Self {
        let mut columns = Vec::with_capacity(bounds.dimensions());
        for (&lower, &upper) in bounds.lower().iter().zip(bounds.upper().iter()) {
            let sampler = Uniform::new_inclusive(lower, upper);
            columns.push((0..size).map(|_| sampler.sample(rng)).collect::<Vec<_>>());
        }
        let solutions = (0..size)
            .map(|row| Solution::new(columns.iter().map(|column| column[row]).collect()))
            .collect();
        Self { solutions }
    }

    /// Returns the number of solutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Indicates whether the population is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Returns the solutions.
    #[must_use]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Returns the solution at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    /// Returns an iterator over the solutions.
    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter()
    }

    /// Gathers one coordinate of every member into a column.
    ///
    /// # Examples
    /// ```
    /// use woa::{Population, Solution};
    /// let population = Population::new(vec![
    ///     Solution::new(vec![1.0, 2.0]),
    ///     Solution::new(vec![3.0, 4.0]),
    /// ]);
    /// assert_eq!(population.column(1), vec![2.0, 4.0]);
    /// ```
    #[must_use]
    pub fn column(&self, dimension: usize) -> Vec<Scalar> {
        self.solutions
            .iter()
            .map(|solution| solution.coords()[dimension])
            .collect()
    }

    /// Gathers every coordinate column, in dimension order.
    #[must_use]
    pub fn columns(&self, dimensions: usize) -> Vec<Vec<Scalar>> {
        (0..dimensions).map(|dim| self.column(dim)).collect()
    }

    /// Consumes the population and returns its solutions.
    #[must_use]
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}
