//! Ant Colony System tour construction.

use super::config::AcsConfig;
use crate::ga::TourSeeder;
use crate::graph::{Graph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const MIN_DISTANCE: f64 = 1e-12;

/// A closed tour built by one ant in the last iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Ant {
    /// Closed route (start node repeated at the end).
    pub route: Vec<NodeId>,

    /// Length of the closed route.
    pub distance: f64,
}

/// Ant Colony System over a [`Graph`].
///
/// After [`solve`](TourSeeder::solve), every ant holds the tour it built in
/// the final iteration.
pub struct AntColony<'g, G: Graph + ?Sized> {
    graph: &'g G,
    config: AcsConfig,
    rng: StdRng,
    pheromone: Vec<Vec<f64>>,
    tau0: f64,
    ants: Vec<Ant>,
    best: Option<Ant>,
}

impl<'g, G: Graph + ?Sized> AntColony<'g, G> {
    /// Creates a colony over `graph`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`AcsConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(graph: &'g G, config: AcsConfig) -> Self {
        config.validate().expect("invalid AcsConfig");
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            graph,
            config,
            rng,
            pheromone: Vec::new(),
            tau0: 0.0,
            ants: Vec::new(),
            best: None,
        }
    }

    /// Ants of the last iteration.
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Best tour found over all iterations.
    pub fn best(&self) -> Option<&Ant> {
        self.best.as_ref()
    }

    fn visibility(&self, from: NodeId, to: NodeId) -> f64 {
        1.0 / self.graph.distance(from, to).max(MIN_DISTANCE)
    }

    fn attractiveness(&self, from: NodeId, to: NodeId) -> f64 {
        self.pheromone[from][to].powf(self.config.alpha)
            * self.visibility(from, to).powf(self.config.beta)
    }

    fn local_update(&mut self, from: NodeId, to: NodeId) {
        let xi = self.config.xi;
        let tau = &mut self.pheromone[from][to];
        *tau = (1.0 - xi) * *tau + xi * self.tau0;
    }

    fn global_update(&mut self) {
        let Some(best) = self.best.as_ref() else {
            return;
        };
        let rho = self.config.rho;
        let deposit = rho / best.distance.max(MIN_DISTANCE);
        for w in best.route.windows(2) {
            let tau = &mut self.pheromone[w[0]][w[1]];
            *tau = (1.0 - rho) * *tau + deposit;
        }
    }

    fn next_node(&mut self, current: NodeId, visited: &[bool]) -> NodeId {
        let candidates: Vec<(NodeId, f64)> = (0..visited.len())
            .filter(|&j| !visited[j])
            .map(|j| (j, self.attractiveness(current, j)))
            .collect();

        if self.rng.random::<f64>() < self.config.q0 {
            return candidates
                .iter()
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|&(j, _)| j)
                .expect("at least one unvisited node");
        }

        let total: f64 = candidates.iter().map(|&(_, w)| w).sum();
        if !total.is_finite() || total <= 0.0 {
            return candidates[self.rng.random_range(0..candidates.len())].0;
        }
        let threshold = self.rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for &(j, w) in &candidates {
            cumulative += w;
            if cumulative > threshold {
                return j;
            }
        }
        candidates[candidates.len() - 1].0
    }

    fn construct(&mut self, start: NodeId) -> Ant {
        let n = self.graph.size();
        let mut visited = vec![false; n];
        let mut route = Vec::with_capacity(n + 1);
        visited[start] = true;
        route.push(start);

        let mut current = start;
        for _ in 1..n {
            let next = self.next_node(current, &visited);
            self.local_update(current, next);
            visited[next] = true;
            route.push(next);
            current = next;
        }
        self.local_update(current, start);
        route.push(start);

        let distance = self.graph.route_distance(&route);
        Ant { route, distance }
    }

    fn nearest_neighbour_length(&self) -> f64 {
        let n = self.graph.size();
        let mut visited = vec![false; n];
        let mut current = 0;
        let mut length = 0.0;
        visited[0] = true;
        for _ in 1..n {
            let next = (0..n)
                .filter(|&j| !visited[j])
                .min_by(|&a, &b| {
                    self.graph
                        .distance(current, a)
                        .total_cmp(&self.graph.distance(current, b))
                })
                .expect("at least one unvisited node");
            length += self.graph.distance(current, next);
            visited[next] = true;
            current = next;
        }
        length + self.graph.distance(current, 0)
    }
}

impl<G: Graph + ?Sized> TourSeeder for AntColony<'_, G> {
    fn solve(&mut self) {
        let n = self.graph.size();
        self.ants.clear();
        self.best = None;
        if n == 0 {
            return;
        }

        let nn = self.nearest_neighbour_length();
        self.tau0 = if nn > 0.0 { 1.0 / (n as f64 * nn) } else { 1.0 };
        self.pheromone = vec![vec![self.tau0; n]; n];

        for iteration in 0..self.config.iterations {
            let ants: Vec<Ant> = (0..self.config.ants)
                .map(|_| {
                    let start = self.rng.random_range(0..n);
                    self.construct(start)
                })
                .collect();

            let iteration_best = ants
                .iter()
                .min_by(|a, b| a.distance.total_cmp(&b.distance));
            if let Some(iteration_best) = iteration_best {
                let improves = self
                    .best
                    .as_ref()
                    .map_or(true, |best| iteration_best.distance < best.distance);
                if improves {
                    self.best = Some(iteration_best.clone());
                }
            }
            self.ants = ants;
            self.global_update();

            debug!(
                iteration,
                best = self.best.as_ref().map(|b| b.distance),
                "ant colony iteration"
            );
        }
    }

    fn tours(&self) -> Vec<Vec<NodeId>> {
        self.ants.iter().map(|ant| ant.route.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MatrixGraph;

    fn is_closed_tour(route: &[NodeId], n: usize) -> bool {
        if route.len() != n + 1 || route.first() != route.last() {
            return false;
        }
        let mut seen = vec![false; n];
        route[..n]
            .iter()
            .all(|&v| v < n && !std::mem::replace(&mut seen[v], true))
    }

    fn circle(n: usize) -> MatrixGraph {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                (angle.cos(), angle.sin())
            })
            .collect();
        MatrixGraph::from_points(&points)
    }

    #[test]
    fn test_tours_are_closed_permutations() {
        let graph = circle(8);
        let mut colony = AntColony::new(
            &graph,
            AcsConfig::default()
                .with_ants(6)
                .with_iterations(5)
                .with_seed(1)
        );
        colony.solve();

        let tours = colony.tours();
        assert_eq!(tours.len(), 6);
        for tour in &tours {
            assert!(is_closed_tour(tour, 8), "invalid tour {tour:?}");
        }
    }

    #[test]
    fn test_finds_square_perimeter() {
        let graph = MatrixGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let mut colony = AntColony::new(
            &graph,
            AcsConfig::default()
                .with_ants(4)
                .with_iterations(20)
                .with_seed(3)
        );
        colony.solve();

        let best = colony.best().unwrap();
        assert!((best.distance - 4.0).abs() < 1e-9, "got {}", best.distance);
    }

    #[test]
    fn test_circle_is_near_optimal() {
        let n = 12;
        let graph = circle(n);
        let optimum = 2.0 * n as f64 * (std::f64::consts::PI / n as f64).sin();
        let mut colony = AntColony::new(
            &graph,
            AcsConfig::default()
                .with_ants(10)
                .with_iterations(50)
                .with_seed(11)
        );
        colony.solve();

        let best = colony.best().unwrap().distance;
        assert!(best <= optimum * 1.1, "best {best} vs optimum {optimum}");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let graph = circle(9);
        let config = AcsConfig::default().with_ants(5).with_iterations(10).with_seed(42);
        let mut a = AntColony::new(&graph, config.clone());
        let mut b = AntColony::new(&graph, config);
        a.solve();
        b.solve();
        assert_eq!(a.tours(), b.tours());
    }

    #[test]
    fn test_single_node() {
        let graph = MatrixGraph::from_points(&[(0.0, 0.0)]);
        let mut colony = AntColony::new(
            &graph,
            AcsConfig::default()
                .with_ants(2)
                .with_iterations(1)
                .with_seed(0)
        );
        colony.solve();
        assert_eq!(colony.tours(), vec![vec![0, 0], vec![0, 0]]);
    }

    #[test]
    #[should_panic(expected = "invalid AcsConfig")]
    fn test_invalid_config_panics() {
        let graph = circle(4);
        AntColony::new(&graph, AcsConfig::default().with_ants(0));
    }
}
