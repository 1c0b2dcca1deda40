//! Objective function abstractions.
//!
//! Objectives are evaluated over a whole population at once: the optimizer
//! passes one column per dimension (all first coordinates, all second
//! coordinates, ...) and expects one fitness value per member back.

use crate::core::Scalar;
use std::sync::Arc;
use thiserror::Error;

/// Convenience alias used by objective implementations.
pub type ObjectiveResult<T> = Result<T, ObjectiveError>;

/// Errors produced while evaluating an objective.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectiveError {
    /// The number of coordinate columns does not match the objective arity.
    #[error("objective expects {expected} coordinate columns but received {found}")]
    ArityMismatch {
        /// Arity reported by the objective.
        expected: usize,
        /// Number of columns supplied.
        found: usize,
    },
    /// A column, or the returned fitness vector, has the wrong length.
    #[error("expected {expected} values but found {found}")]
    LengthMismatch {
        /// Number of population members.
        expected: usize,
        /// Length actually observed.
        found: usize,
    },
    /// Domain-specific failure reported by the objective.
    #[error("objective evaluation failed: {0}")]
    Failed(String),
}

/// Scalar objective evaluated over a population of points.
///
/// # Examples
/// ```
/// use woa::ops::{Objective, ObjectiveResult};
///
/// struct Sphere;
///
/// impl Objective for Sphere {
///     fn arity(&self) -> usize { 2 }
///     fn evaluate(&self, columns: &[&[f64]]) -> ObjectiveResult<Vec<f64>> {
///         Ok(columns[0].iter().zip(columns[1]).map(|(x, y)| x * x + y * y).collect())
///     }
/// }
///
/// assert_eq!(Sphere.evaluate_point(&[3.0, 4.0]).unwrap(), 25.0);
/// ```
pub trait Objective {
    /// Returns the number of coordinates the objective consumes.
    fn arity(&self) -> usize;

    /// Evaluates every member at once, one slice per coordinate.
    ///
    /// # Errors
    /// Implementations may return [`ObjectiveError`] to describe domain issues.
    fn evaluate(&self, columns: &[&[Scalar]]) -> ObjectiveResult<Vec<Scalar>>;

    /// Evaluates a single point.
    ///
    /// # Errors
    /// Propagates any [`ObjectiveError`] reported by [`Objective::evaluate`].
    fn evaluate_point(&self, point: &[Scalar]) -> ObjectiveResult<Scalar> {
        let columns: Vec<&[Scalar]> = point.iter().map(std::slice::from_ref).collect();
        let fitness = self.evaluate(&columns)?;
        match fitness.as_slice() {
            [value] => Ok(*value),
            other => Err(ObjectiveError::LengthMismatch {
                expected: 1,
                found: other.len(),
            }),
        }
    }
}

impl<T: Objective + ?Sized> Objective for &T {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, columns: &[&[Scalar]]) -> ObjectiveResult<Vec<Scalar>> {
        (**self).evaluate(columns)
    }
}

impl<T: Objective + ?Sized> Objective for Box<T> {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, columns: &[&[Scalar]]) -> ObjectiveResult<Vec<Scalar>> {
        (**self).evaluate(columns)
    }
}

impl<T: Objective + ?Sized> Objective for Arc<T> {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, columns: &[&[Scalar]]) -> ObjectiveResult<Vec<Scalar>> {
        (**self).evaluate(columns)
    }
}

/// Checks that `columns` holds `arity` slices of equal length and returns
/// that length.
///
/// # Errors
/// Returns [`ObjectiveError::ArityMismatch`] or
/// [`ObjectiveError::LengthMismatch`] when the shape is wrong.
pub fn column_len(columns: &[&[Scalar]], arity: usize) -> ObjectiveResult<usize> {
    if columns.len() != arity {
        return Err(ObjectiveError::ArityMismatch {
            expected: arity,
            found: columns.len(),
        });
    }
    let len = columns.first().map_or(0, |column| column.len());
    if let Some(column) = columns.iter().find(|column| column.len() != len) {
        return Err(ObjectiveError::LengthMismatch {
            expected: len,
            found: column.len(),
        });
    }
    Ok(len)
}

/// Two-coordinate vectorized objective built from a closure.
///
/// Created through [`objective_2d`].
#[derive(Clone)]
pub struct TwoCoordinate<F> {
    function: F,
}

/// Wraps a `(xs, ys) -> fitness` closure as an [`Objective`] of arity 2.
///
/// # Examples
/// ```
/// use woa::ops::{objective_2d, Objective};
///
/// let sphere = objective_2d(|xs: &[f64], ys: &[f64]| {
///     xs.iter().zip(ys).map(|(x, y)| x * x + y * y).collect()
/// });
/// let xs = [1.0, 0.0];
/// let ys = [1.0, 2.0];
/// let fitness = sphere.evaluate(&[&xs[..], &ys[..]]).unwrap();
/// assert_eq!(fitness, vec![2.0, 4.0]);
/// ```
pub fn objective_2d<F>(function: F) -> TwoCoordinate<F>
where
    F: Fn(&[Scalar], &[Scalar]) -> Vec<Scalar>,
{
    TwoCoordinate { function }
}

impl<F> Objective for TwoCoordinate<F>
where
    F: Fn(&[Scalar], &[Scalar]) -> Vec<Scalar>,
{
    fn arity(&self) -> usize {
        2
    }

    fn evaluate(&self, columns: &[&[Scalar]]) -> ObjectiveResult<Vec<Scalar>> {
        column_len(columns, 2)?;
        Ok((self.function)(columns[0], columns[1]))
    }
}

/// Objective of any arity built from a per-point closure.
///
/// # Examples
/// ```
/// use woa::ops::{Objective, Pointwise};
///
/// let sum = Pointwise::new(3, |point: &[f64]| point.iter().sum::<f64>());
/// assert_eq!(sum.evaluate_point(&[1.0, 2.0, 3.0]).unwrap(), 6.0);
/// ```
#[derive(Clone)]
pub struct Pointwise<F> {
    arity: usize,
    function: F,
}

impl<F> Pointwise<F>
where
    F: Fn(&[Scalar]) -> Scalar,
{
    /// Creates an objective that evaluates `function` on each member.
    #[must_use]
    pub fn new(arity: usize, function: F) -> Self {
        Self { arity, function }
    }
}

impl<F> Objective for Pointwise<F>
where
    F: Fn(&[Scalar]) -> Scalar,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn evaluate(&self, columns: &[&[Scalar]]) -> ObjectiveResult<Vec<Scalar>> {
        let len = column_len(columns, self.arity)?;
        let mut point = vec![0.0; self.arity];
        let mut fitness = Vec::with_capacity(len);
        for row in 0..len {
            for (coord, column) in point.iter_mut().zip(columns) {
                *coord = column[row];
            }
            fitness.push((self.function)(&point));
        }
        Ok(fitness)
    }
}
