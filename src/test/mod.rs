//! Shared fixtures and brute-force oracles for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::r#type::{sq_dist, IndexableNum};
use crate::Rect;


/// The six-point example set used throughout the tests.
pub(crate) fn scenario_points() -> Vec<[i32; 2]> {
    vec![[7, 2], [5, 4], [9, 6], [4, 7], [8, 1], [2, 3]]
}

/// `n` points with `dim` coordinates uniformly distributed in `[0, extent)`.
pub(crate) fn random_points(seed: u64, n: usize, dim: usize, extent: f64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(0.0..extent)).collect())
        .collect()
}

/// `n` points with small integer coordinates, so that many share values on every axis.
pub(crate) fn clustered_points(seed: u64, n: usize, dim: usize) -> Vec<Vec<i32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(0..8)).collect())
        .collect()
}

/// Ids of the points contained in the rectangle, by linear scan.
pub(crate) fn brute_force_range<N: IndexableNum>(points: &[Vec<N>], rect: &Rect<N>) -> Vec<u32> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| rect.contains_coords(p))
        .map(|(id, _)| id as u32)
        .collect()
}

/// The smallest squared distance from `query` to any point, by linear scan.
pub(crate) fn brute_force_nearest_sq_dist<N: IndexableNum>(points: &[Vec<N>], query: &[N]) -> f64 {
    points
        .iter()
        .map(|p| sq_dist(p, query))
        .fold(f64::INFINITY, f64::min)
}

pub(crate) fn sorted(mut ids: Vec<u32>) -> Vec<u32> {
    ids.sort_unstable();
    ids
}
