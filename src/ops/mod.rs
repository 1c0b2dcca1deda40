//! Objective abstractions and the operators applied each generation.
//!
//! The optimizer itself only sequences these pieces: [`objective`] describes
//! how fitness is computed, [`ranking`] orders the population, and
//! [`movement`] holds the three whale update rules.

pub mod movement;
pub mod objective;
pub mod ranking;

pub use movement::Movement;
pub use objective::{objective_2d, Objective, ObjectiveError, ObjectiveResult, Pointwise};
pub use ranking::{Direction, RankedSolution};
