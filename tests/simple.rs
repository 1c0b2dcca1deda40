use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::{E, PI};
use woa::ops::objective_2d;
use woa::{WhaleOptimizer, WhaleSettings};

fn goldstein(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let a = 1.0
                + (x + y + 1.0).powi(2)
                    * (19.0 - 14.0 * x + 3.0 * x * x - 14.0 * y + 6.0 * x * y + 3.0 * y * y);
            let b = 30.0
                + (2.0 * x - 3.0 * y).powi(2)
                    * (18.0 - 32.0 * x + 12.0 * x * x + 48.0 * y - 36.0 * x * y + 27.0 * y * y);
            a * b
        })
        .collect()
}

fn ackley(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| {
            -20.0 * (-0.2 * (0.5 * (x * x + y * y)).sqrt()).exp()
                - (0.5 * ((2.0 * PI * x).cos() + (2.0 * PI * y).cos())).exp()
                + E
                + 20.0
        })
        .collect()
}

#[test]
fn simple() {
    // Instantiate and define settings
    let settings = WhaleSettings::default();

    // Create optimizer and solve
    let mut rng = StdRng::seed_from_u64(1);
    let mut opt = WhaleOptimizer::new(
        objective_2d(goldstein),
        &[(-2.0, 2.0), (-2.0, 2.0)],
        settings,
        &mut rng,
    )
    .unwrap();
    let report = opt.run_configured(&mut rng).unwrap();

    assert_eq!(report.generations, 30);
    assert_eq!(report.final_population.len(), 50);
    // global minimum is 3 at (0, -1)
    assert!(report.best.fitness < 3.5, "{}", report.best.fitness);
}

#[test]
fn medium() {
    // Instantiate and define settings
    let mut settings = WhaleSettings::default();
    settings.population_size = 10;
    settings.generations = 100;

    // Create optimizer and solve
    let mut rng = StdRng::seed_from_u64(2);
    let mut opt = WhaleOptimizer::new(
        objective_2d(ackley),
        &[(-5.0, 5.0), (-5.0, 5.0)],
        settings,
        &mut rng,
    )
    .unwrap();
    let report = opt.run_configured(&mut rng).unwrap();

    assert_eq!(report.history.len(), 100);
    assert!(report.best.fitness.is_finite());
    assert!(report.best.fitness <= report.history.entries()[0].fitness);
}
