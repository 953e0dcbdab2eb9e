//! Genome operators for the genetic algorithm.
//!
//! A genome is a flat `Vec<f64>` of network parameters (see
//! [`pongevo_evaluator::network`] for the layout). Genes are unbounded real numbers;
//! no operator here changes a genome's length.
//!
//! # Operations
//!
//! - **Initialization**: [`random`] draws genes uniformly from `[-1, 1)`
//! - **Crossover**: [`single_point_crossover`] splices two parents at one cut point
//! - **Mutation**: [`mutate`] adds Gaussian noise to a random subset of genes

use rand::Rng;
use rand_distr::StandardNormal;

/// Creates a genome by applying a function to each gene index.
///
/// # Examples
///
/// ```
/// use pongevo_training::genome;
///
/// let genes = genome::from_fn(|i| i as f64 * 0.5, 4);
/// assert_eq!(genes, vec![0.0, 0.5, 1.0, 1.5]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f64>
where
    F: FnMut(usize) -> f64,
{
    let mut genes = Vec::with_capacity(len);
    for i in 0..len {
        genes.push(f(i));
    }
    genes
}

/// Generates a genome of `len` genes drawn independently from `[-1, 1)`.
pub fn random<R>(rng: &mut R, len: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(-1.0..1.0), len)
}

/// Single-point crossover.
///
/// Draws a cut point `p` uniformly from `[0, len)`. The child takes genes `[0, p)` from
/// `p1` and genes `[p, len)` from `p2`. A cut at 0 copies `p2` entirely.
///
/// # Panics
///
/// Panics if the parents have different lengths or are empty.
pub fn single_point_crossover<R>(p1: &[f64], p2: &[f64], rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    let cut = rng.random_range(0..p1.len());
    splice_at(p1, p2, cut)
}

fn splice_at(p1: &[f64], p2: &[f64], cut: usize) -> Vec<f64> {
    let mut child = Vec::with_capacity(p1.len());
    child.extend_from_slice(&p1[..cut]);
    child.extend_from_slice(&p2[cut..]);
    child
}

/// Applies Gaussian mutation in place.
///
/// Each gene independently, with probability `rate`, receives additive noise drawn
/// from `N(0, std_dev²)`. Genes are not clamped afterwards.
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn mutate<R>(genome: &mut [f64], rate: f64, std_dev: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in genome {
        if rng.random_bool(rate) {
            let noise: f64 = rng.sample(StandardNormal);
            *gene += noise * std_dev;
        }
    }
}
