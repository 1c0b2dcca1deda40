//! Whale movement rules.
//!
//! Every non-best member moves by exactly one of three rules per generation:
//!
//! * **encircle**: `best - A * D` with `D = ||C ⊙ best - s||`,
//! * **search**: `rand - A * D` with `D = ||C ⊙ rand - s||`,
//! * **attack**: `D * exp(b * L) * cos(2πL) + best` with `D = ||best - s||`.
//!
//! `D` is a scalar in all three rules. It is broadcast over the coordinate
//! vector explicitly through [`offset`] and [`spiral`] rather than relying on
//! any implicit shape promotion.

use crate::core::{Scalar, Solution};
use rand::Rng;
use std::f64::consts::PI;

/// Probability threshold above which a member takes the encircle/search
/// branch instead of the spiral attack.
pub const BRANCH_THRESHOLD: Scalar = 0.5;

/// `||A||` below this value selects encircling, otherwise random search.
pub const ENCIRCLE_RADIUS: Scalar = 1.0;

/// Movement rule applied to one member.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Pulled toward the current best along coefficient `A`.
    Encircle,
    /// Pulled toward a randomly chosen member of the previous population.
    Search,
    /// Follows a logarithmic spiral around the current best.
    Attack,
}

/// Draws the coefficient vector `A = 2·a·r − a`, `r ~ U[0, 1)^d`.
///
/// # Examples
/// ```
/// use woa::ops::movement::coefficient_a;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let a = coefficient_a(2.0, 3, &mut rng);
/// assert!(a.iter().all(|value| (-2.0..2.0).contains(value)));
/// ```
pub fn coefficient_a<R: Rng + ?Sized>(a: Scalar, dimensions: usize, rng: &mut R) -> Vec<Scalar> {
    (0..dimensions)
        .map(|_| 2.0 * a * rng.gen::<Scalar>() - a)
        .collect()
}

/// Draws the coefficient vector `C = 2·r`, `r ~ U[0, 1)^d`.
pub fn coefficient_c<R: Rng + ?Sized>(dimensions: usize, rng: &mut R) -> Vec<Scalar> {
    (0..dimensions).map(|_| 2.0 * rng.gen::<Scalar>()).collect()
}

/// Euclidean norm.
#[must_use]
pub fn norm(values: &[Scalar]) -> Scalar {
    values.iter().map(|value| value * value).sum::<Scalar>().sqrt()
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(lhs: &[Scalar], rhs: &[Scalar]) -> Scalar {
    lhs.iter()
        .zip(rhs.iter())
        .map(|(l, r)| (l - r) * (l - r))
        .sum::<Scalar>()
        .sqrt()
}

/// Scalar distance `||C ⊙ target − s||`.
#[must_use]
pub fn weighted_distance(c: &[Scalar], target: &[Scalar], s: &[Scalar]) -> Scalar {
    c.iter()
        .zip(target.iter())
        .zip(s.iter())
        .map(|((c, t), s)| {
            let diff = c * t - s;
            diff * diff
        })
        .sum::<Scalar>()
        .sqrt()
}

/// Computes `origin − coefficient · d` with the scalar `d` applied to every
/// coordinate.
#[must_use]
pub fn offset(origin: &[Scalar], coefficient: &[Scalar], d: Scalar) -> Vec<Scalar> {
    origin
        .iter()
        .zip(coefficient.iter())
        .map(|(o, k)| o - k * d)
        .collect()
}

/// Computes `d · exp(b·l) · cos(2πl) + best` with the same scalar factor on
/// every coordinate.
#[must_use]
pub fn spiral(best: &[Scalar], d: Scalar, b: Scalar, l: Scalar) -> Vec<Scalar> {
    let factor = d * (b * l).exp() * (2.0 * PI * l).cos();
    best.iter().map(|coord| factor + coord).collect()
}

/// Encircling move around `best`. Draws a fresh `C`.
pub fn encircle<R: Rng + ?Sized>(
    s: &[Scalar],
    best: &[Scalar],
    a: &[Scalar],
    rng: &mut R,
) -> Vec<Scalar> {
    let c = coefficient_c(s.len(), rng);
    let d = weighted_distance(&c, best, s);
    offset(best, a, d)
}

/// Random-search move toward `partner`. Draws a fresh `C`.
pub fn search<R: Rng + ?Sized>(
    s: &[Scalar],
    partner: &[Scalar],
    a: &[Scalar],
    rng: &mut R,
) -> Vec<Scalar> {
    let c = coefficient_c(s.len(), rng);
    let d = weighted_distance(&c, partner, s);
    offset(partner, a, d)
}

/// Spiral attack around `best`. Draws one `L ~ U[-1, 1)` shared by all
/// coordinates.
pub fn attack<R: Rng + ?Sized>(
    s: &[Scalar],
    best: &[Scalar],
    b: Scalar,
    rng: &mut R,
) -> Vec<Scalar> {
    let d = distance(best, s);
    let l = rng.gen_range(-1.0..1.0);
    spiral(best, d, b, l)
}

/// Moves one member and reports which rule was applied.
///
/// `previous` is the population as it stood before this generation's
/// updates; the search partner is drawn uniformly from it. The returned
/// point is not clamped.
///
/// # Panics
/// Panics when `previous` is empty.
pub fn step<R: Rng + ?Sized>(
    s: &Solution,
    best: &Solution,
    previous: &[Solution],
    a: Scalar,
    b: Scalar,
    rng: &mut R,
) -> (Movement, Vec<Scalar>) {
    if rng.gen::<Scalar>() > BRANCH_THRESHOLD {
        let coefficient = coefficient_a(a, s.len(), rng);
        if norm(&coefficient) < ENCIRCLE_RADIUS {
            let moved = encircle(s.coords(), best.coords(), &coefficient, rng);
            (Movement::Encircle, moved)
        } else {
            let partner = &previous[rng.gen_range(0..previous.len())];
            let moved = search(s.coords(), partner.coords(), &coefficient, rng);
            (Movement::Search, moved)
        }
    } else {
        (Movement::Attack, attack(s.coords(), best.coords(), b, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn norm_and_distance() {
        assert_eq!(norm(&[3.0, 4.0]), 5.0);
        assert_eq!(distance(&[1.0, 1.0], &[4.0, 5.0]), 5.0);
        assert_eq!(weighted_distance(&[2.0, 2.0], &[1.0, 1.0], &[2.0, 2.0]), 0.0);
    }

    #[test]
    fn offset_broadcasts_scalar_distance() {
        assert_eq!(offset(&[1.0, 2.0], &[0.5, -1.0], 2.0), vec![0.0, 4.0]);
    }

    #[test]
    fn spiral_applies_one_factor_to_every_coordinate() {
        // l = 0 gives factor d
        assert_eq!(spiral(&[1.0, -1.0], 2.0, 0.5, 0.0), vec![3.0, 1.0]);
        // l = 0.25 puts cos(2πl) at zero
        let moved = spiral(&[1.0, -1.0], 2.0, 0.5, 0.25);
        assert!((moved[0] - 1.0).abs() < 1e-12);
        assert!((moved[1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn coefficient_a_spans_minus_a_to_a() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let a = coefficient_a(1.5, 2, &mut rng);
            assert!(a.iter().all(|value| (-1.5..1.5).contains(value)));
        }
        assert_eq!(coefficient_a(0.0, 2, &mut rng), vec![0.0, 0.0]);
    }

    #[test]
    fn coefficient_c_spans_zero_to_two() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            let c = coefficient_c(3, &mut rng);
            assert!(c.iter().all(|value| (0.0..2.0).contains(value)));
        }
    }

    #[test]
    fn member_on_best_attacks_in_place() {
        let best = Solution::new(vec![0.3, -0.7]);
        let mut rng = StdRng::seed_from_u64(9);
        let moved = attack(best.coords(), best.coords(), 0.5, &mut rng);
        assert_eq!(moved, best.coords().to_vec());
    }

    #[test]
    fn zero_a_encircles_onto_best() {
        let best = Solution::new(vec![1.0, 1.0]);
        let s = Solution::new(vec![-1.0, 0.5]);
        let previous = vec![best.clone(), s.clone()];
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let (movement, moved) = step(&s, &best, &previous, 0.0, 0.5, &mut rng);
            match movement {
                Movement::Encircle => assert_eq!(moved, best.coords().to_vec()),
                Movement::Attack => assert_eq!(moved.len(), 2),
                Movement::Search => panic!("||A|| is zero so search is unreachable"),
            }
        }
    }

    #[test]
    fn large_a_never_encircles() {
        let best = Solution::new(vec![0.0, 0.0]);
        let s = Solution::new(vec![1.0, 1.0]);
        let previous = vec![best.clone(), s.clone()];
        let mut rng = StdRng::seed_from_u64(4);
        let mut searched = 0;
        for _ in 0..200 {
            let (movement, _) = step(&s, &best, &previous, 1000.0, 0.5, &mut rng);
            assert_ne!(movement, Movement::Encircle);
            if movement == Movement::Search {
                searched += 1;
            }
        }
        assert!(searched > 0);
    }

    #[test]
    fn search_partner_comes_from_previous_population() {
        let best = Solution::new(vec![0.0, 0.0]);
        let s = Solution::new(vec![0.5, 0.5]);
        let previous = vec![
            Solution::new(vec![10.0, 10.0]),
            Solution::new(vec![-10.0, 5.0]),
            Solution::new(vec![3.0, -7.0]),
        ];
        let mut rng = StdRng::seed_from_u64(31);
        let mut searched = 0;
        for _ in 0..300 {
            let mut replay = rng.clone();
            let (movement, moved) = step(&s, &best, &previous, 2.0, 0.5, &mut rng);
            if movement != Movement::Search {
                continue;
            }
            searched += 1;
            assert!(replay.gen::<Scalar>() > BRANCH_THRESHOLD);
            let coefficient = coefficient_a(2.0, 2, &mut replay);
            let partner = &previous[replay.gen_range(0..previous.len())];
            let expected = search(s.coords(), partner.coords(), &coefficient, &mut replay);
            assert_eq!(moved, expected);
        }
        assert!(searched > 0);
    }

    #[test]
    fn same_seed_same_move() {
        let best = Solution::new(vec![0.0, 0.0]);
        let s = Solution::new(vec![1.0, -1.0]);
        let previous = vec![best.clone(), s.clone()];
        let first = step(&s, &best, &previous, 1.2, 0.5, &mut StdRng::seed_from_u64(77));
        let second = step(&s, &best, &previous, 1.2, 0.5, &mut StdRng::seed_from_u64(77));
        assert_eq!(first, second);
    }
}
