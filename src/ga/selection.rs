//! Parent selection over chromosome distances.
//!
//! All strategies minimize: a shorter tour is more likely to be picked.
//! Each function returns the index of one selected chromosome.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Chromosome;
use rand::Rng;

const EPSILON: f64 = 1e-10;

/// Tournament selection: best of `k` uniform picks (with replacement).
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    assert!(!population.is_empty(), "cannot select from empty population");
    let n = population.len();

    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].distance() < population[best].distance() {
            best = idx;
        }
    }
    best
}

/// Roulette wheel on inverted distances.
///
/// Weight of each chromosome is `max_distance - distance + ε`, so the
/// longest tour keeps a small non-zero chance.
///
/// # Panics
/// Panics if `population` is empty.
pub fn roulette<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    assert!(!population.is_empty(), "cannot select from empty population");
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let max = population
        .iter()
        .map(Chromosome::distance)
        .fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = population
        .iter()
        .map(|c| (max - c.distance() + EPSILON).max(EPSILON))
        .collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    n - 1
}

/// Linear rank selection: the best of `n` gets weight `n`, the worst 1.
///
/// # Panics
/// Panics if `population` is empty.
pub fn rank<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    assert!(!population.is_empty(), "cannot select from empty population");
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| population[a].distance().total_cmp(&population[b].distance()));

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (position, &idx) in order.iter().enumerate() {
        cumulative += (n - position) as f64;
        if cumulative > threshold {
            return idx;
        }
    }
    order[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(distances: &[f64]) -> Vec<Chromosome> {
        distances
            .iter()
            .map(|&d| Chromosome::new(vec![0, 1, 2], d))
            .collect()
    }

    fn counts(
        pop: &[Chromosome],
        select: impl Fn(&[Chromosome], &mut StdRng) -> usize,
    ) -> Vec<u32> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..10_000 {
            counts[select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_shortest() {
        let pop = population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(&pop, |p, r| tournament(p, 4, r));
        assert!(c[2] > 6000, "expected shortest to dominate, got {c:?}");
    }

    #[test]
    fn test_tournament_size_one_is_uniform() {
        let pop = population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(&pop, |p, r| tournament(p, 1, r));
        for &v in &c {
            assert!(v > 1500, "expected uniform, got {c:?}");
        }
    }

    #[test]
    fn test_roulette_favors_shortest() {
        let pop = population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(&pop, |p, r| roulette(p, r));
        assert!(c[2] > c[0], "shortest should win more often: {c:?}");
        assert!(c[2] > c[3], "shortest should win more often: {c:?}");
    }

    #[test]
    fn test_rank_favors_shortest() {
        let pop = population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(&pop, |p, r| rank(p, r));
        // Expected shares are 4/10, 3/10, 2/10, 1/10 by rank.
        assert!(c[2] > 3500, "got {c:?}");
        assert!(c[0] < 1500, "got {c:?}");
    }

    #[test]
    fn test_equal_distances_roughly_uniform() {
        let pop = population(&[5.0, 5.0, 5.0, 5.0]);
        let c = counts(&pop, |p, r| roulette(p, r));
        for &v in &c {
            assert!(v > 1500, "expected roughly uniform, got {c:?}");
        }
    }

    #[test]
    fn test_single_chromosome() {
        let pop = population(&[3.0]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
        assert_eq!(roulette(&pop, &mut rng), 0);
        assert_eq!(rank(&pop, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = StdRng::seed_from_u64(42);
        roulette(&[], &mut rng);
    }
}
