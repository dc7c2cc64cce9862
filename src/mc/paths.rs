// src/mc/paths.rs
//! Path generation under risk-neutral GBM
//!
//! Dense paths are stored as an `(n, m + 1)` row-major [`Array2`] where row `i`
//! is one trajectory and column `0` holds the spot. [`PathStream`] yields the
//! same rows lazily for callers that only need terminal statistics.
//!
//! Seeded generation draws row `i` from `StdRng::seed_from_u64(seed + i)`, so
//! sequential and parallel runs produce bit-identical matrices.

use crate::error::{validation::*, ValidationResult};
use crate::models::gbm::{Gbm, GbmStepper};
use crate::rng::{self, RngFactory};
use ndarray::{Array1, Array2, ArrayViewMut1, Axis};
use rand::Rng;
use rayon::prelude::*;
use tracing::trace;

/// Time grid shared by every path of one simulation
#[derive(Clone, Copy, Debug)]
pub struct PathGrid {
    pub s0: f64,
    pub num_steps: usize,
    stepper: GbmStepper,
}

impl PathGrid {
    pub fn new(gbm: &Gbm, maturity: f64, num_steps: usize) -> ValidationResult<Self> {
        validate_steps(num_steps)?;
        let dt = maturity / num_steps as f64;
        Ok(PathGrid {
            s0: gbm.s0,
            num_steps,
            stepper: gbm.stepper(dt),
        })
    }

    /// Write one trajectory into `row`, which must hold `num_steps + 1` cells
    pub fn fill_row<R: Rng + ?Sized>(&self, mut row: ArrayViewMut1<f64>, rng: &mut R) {
        let mut current_s = self.s0;
        row[0] = current_s;
        for j in 1..=self.num_steps {
            let z = rng::get_normal_draw(rng);
            current_s = self.stepper.step(current_s, z);
            row[j] = current_s;
        }
    }

    /// Walk one trajectory and keep only `S_T`
    pub fn terminal<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut current_s = self.s0;
        for _ in 0..self.num_steps {
            let z = rng::get_normal_draw(rng);
            current_s = self.stepper.step(current_s, z);
        }
        current_s
    }
}

/// Dense `(num_simulations, num_steps + 1)` matrix drawn from one generator
pub fn dense_paths<R: Rng + ?Sized>(
    grid: &PathGrid,
    num_simulations: usize,
    rng: &mut R,
) -> ValidationResult<Array2<f64>> {
    validate_path_matrix(num_simulations, grid.num_steps)?;
    trace!(num_simulations, num_steps = grid.num_steps, "allocating path matrix");

    let mut paths = Array2::<f64>::zeros((num_simulations, grid.num_steps + 1));
    for row in paths.rows_mut() {
        grid.fill_row(row, rng);
    }
    Ok(paths)
}

/// Dense matrix with one independent generator per row
pub fn dense_paths_seeded(
    grid: &PathGrid,
    num_simulations: usize,
    seed: u64,
    parallel: bool,
) -> ValidationResult<Array2<f64>> {
    validate_path_matrix(num_simulations, grid.num_steps)?;
    trace!(num_simulations, num_steps = grid.num_steps, seed, parallel, "allocating seeded path matrix");

    let factory = RngFactory::new(seed);
    let mut paths = Array2::<f64>::zeros((num_simulations, grid.num_steps + 1));
    if parallel {
        paths
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, row)| {
                let mut rng = factory.create_std_rng(i as u64);
                grid.fill_row(row, &mut rng);
            });
    } else {
        for (i, row) in paths.axis_iter_mut(Axis(0)).enumerate() {
            let mut rng = factory.create_std_rng(i as u64);
            grid.fill_row(row, &mut rng);
        }
    }
    Ok(paths)
}

/// Terminal prices only, one generator per row; matches the last column of
/// [`dense_paths_seeded`] for the same seed
pub fn terminal_prices_seeded(
    grid: &PathGrid,
    num_simulations: usize,
    seed: u64,
    parallel: bool,
) -> ValidationResult<Array1<f64>> {
    validate_simulations(num_simulations)?;

    let factory = RngFactory::new(seed);
    let simulate = |i: usize| {
        let mut rng = factory.create_std_rng(i as u64);
        grid.terminal(&mut rng)
    };
    let terminals: Vec<f64> = if parallel {
        (0..num_simulations).into_par_iter().map(simulate).collect()
    } else {
        (0..num_simulations).map(simulate).collect()
    };
    Ok(Array1::from(terminals))
}

/// Lazy row-by-row path producer
///
/// Each call to `next` simulates one fresh trajectory of `num_steps + 1`
/// prices. Restart by building a new stream from a reseeded generator.
pub struct PathStream<R> {
    grid: PathGrid,
    remaining: usize,
    rng: R,
}

impl<R: Rng> PathStream<R> {
    pub fn new(grid: PathGrid, num_simulations: usize, rng: R) -> ValidationResult<Self> {
        validate_simulations(num_simulations)?;
        Ok(PathStream {
            grid,
            remaining: num_simulations,
            rng,
        })
    }

    /// Consume the stream keeping only terminal prices, without per-row allocation
    pub fn terminal_prices(mut self) -> Array1<f64> {
        let grid = self.grid;
        let rng = &mut self.rng;
        Array1::from_shape_fn(self.remaining, |_| grid.terminal(&mut *rng))
    }
}

impl<R: Rng> Iterator for PathStream<R> {
    type Item = Array1<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let mut row = Array1::zeros(self.grid.num_steps + 1);
        self.grid.fill_row(row.view_mut(), &mut self.rng);
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for PathStream<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(num_steps: usize) -> PathGrid {
        PathGrid::new(&Gbm::new(100.0, 0.05, 0.2), 1.0, num_steps).unwrap()
    }

    #[test]
    fn test_dense_shape_and_spot_column() {
        let mut rng = rng::seed_rng_from_u64(7);
        let paths = dense_paths(&grid(12), 25, &mut rng).unwrap();
        assert_eq!(paths.dim(), (25, 13));
        assert!(paths.column(0).iter().all(|&s| s == 100.0));
        assert!(paths.iter().all(|&s| s > 0.0 && s.is_finite()));
    }

    #[test]
    fn test_seeded_parallel_matches_sequential() {
        let g = grid(8);
        let par = dense_paths_seeded(&g, 64, 99, true).unwrap();
        let seq = dense_paths_seeded(&g, 64, 99, false).unwrap();
        assert_eq!(par, seq);

        let terminals = terminal_prices_seeded(&g, 64, 99, true).unwrap();
        assert_eq!(terminals, par.column(8).to_owned());
    }

    #[test]
    fn test_stream_matches_dense_for_same_generator() {
        let g = grid(5);
        let dense = dense_paths(&g, 10, &mut rng::seed_rng_from_u64(3)).unwrap();
        let stream = PathStream::new(g, 10, rng::seed_rng_from_u64(3)).unwrap();
        assert_eq!(stream.len(), 10);
        for (row, streamed) in dense.rows().into_iter().zip(stream) {
            assert_eq!(row.to_owned(), streamed);
        }

        let terminals = PathStream::new(g, 10, rng::seed_rng_from_u64(3))
            .unwrap()
            .terminal_prices();
        assert_eq!(terminals, dense.column(5).to_owned());
    }

    #[test]
    fn test_rejects_zero_sizes() {
        assert!(PathGrid::new(&Gbm::new(100.0, 0.05, 0.2), 1.0, 0).is_err());
        assert!(dense_paths(&grid(4), 0, &mut rng::seed_rng_from_u64(1)).is_err());
        assert!(PathStream::new(grid(4), 0, rng::seed_rng_from_u64(1)).is_err());
    }
}
