#![warn(missing_docs)]

//! Whale optimization algorithm (WOA) for bounded continuous domains.
//!
//! A [`WhaleOptimizer`] keeps a fixed-size population inside a constraint
//! box. Every call to [`WhaleOptimizer::advance`] ranks the population,
//! carries the best member over unchanged, and moves every other member by
//! one of three rules: encircling the best, searching toward a random
//! member, or a spiral attack around the best. The exploration coefficient
//! `a` decays linearly from generation to generation.
//!
//! ```
//! use woa::ops::objective_2d;
//! use woa::WhaleOptimizer;
//! use rand::SeedableRng;
//!
//! let sphere = objective_2d(|xs: &[f64], ys: &[f64]| {
//!     xs.iter().zip(ys).map(|(x, y)| x * x + y * y).collect()
//! });
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let mut optimizer = WhaleOptimizer::builder(sphere, &[(-2.0, 2.0), (-2.0, 2.0)])
//!     .population_size(20)
//!     .generations(30)
//!     .build(&mut rng)
//!     .unwrap();
//! let report = optimizer.run_configured(&mut rng).unwrap();
//! assert_eq!(report.history.len(), 30);
//! ```

pub mod core;
pub mod ops;
pub mod whale;

pub use crate::core::history::{BestHistory, GenerationBest, RunReport};
pub use crate::core::{Bounds, BoundsError, Population, Scalar, Solution};
pub use crate::ops::{Direction, Movement, Objective, ObjectiveError, RankedSolution};
pub use crate::whale::{
    GenerationSummary, WhaleError, WhaleOptimizer, WhaleOptimizerBuilder, WhaleSettings,
};
