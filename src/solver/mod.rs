//! Base solver lifecycle shared by TSP solvers.
//!
//! [`TspSolver`] brackets a run (`start_solving` / `end_solving`), polls the
//! caller's [`Termination`] once per iteration, reports progress through
//! `tracing`, and keeps the best tour recorded so far.

mod termination;

pub use termination::{from_fn, AnyOf, FromFn, MaxIterations, MaxTime, RunStats, Termination};

use crate::graph::{Graph, NodeId};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A route in both storage forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Open route: every node exactly once.
    pub route: Vec<NodeId>,

    /// Closed cycle: the open route with its first node appended.
    pub cycle: Vec<NodeId>,
}

/// Best-known tour of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Open route.
    pub route: Vec<NodeId>,

    /// Length of the closed cycle.
    pub distance: f64,
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    /// Display name of the method that produced the run.
    pub method: String,

    /// Method parameters in display order.
    pub parameters: Vec<(String, String)>,

    /// Best tour found, if the run got far enough to build one.
    pub best: Option<Tour>,

    /// Completed loop iterations.
    pub iterations: usize,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Lifecycle and best-solution bookkeeping for a single run.
pub struct TspSolver<'g, G: Graph + ?Sized> {
    graph: &'g G,
    termination: Box<dyn Termination + 'g>,
    iterations: usize,
    started: Option<Instant>,
    elapsed: Duration,
    best: Option<Tour>,
}

impl<'g, G: Graph + ?Sized> TspSolver<'g, G> {
    /// Creates a solver over `graph` that stops when `termination` is met.
    pub fn new(graph: &'g G, termination: impl Termination + 'g) -> Self {
        Self {
            graph,
            termination: Box::new(termination),
            iterations: 0,
            started: None,
            elapsed: Duration::ZERO,
            best: None,
        }
    }

    /// The graph being solved.
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Resets counters and starts the clock.
    pub fn start_solving(&mut self) {
        self.iterations = 0;
        self.elapsed = Duration::ZERO;
        self.best = None;
        self.started = Some(Instant::now());
        info!(nodes = self.graph.size(), "solving started");
    }

    /// Stops the clock.
    pub fn end_solving(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = started.elapsed();
        }
        info!(
            iterations = self.iterations,
            elapsed_ms = self.elapsed.as_millis() as u64,
            best = self.best.as_ref().map(|t| t.distance),
            "solving finished"
        );
    }

    /// Current run statistics.
    pub fn stats(&self) -> RunStats {
        RunStats {
            iterations: self.iterations,
            elapsed: self
                .started
                .map(|started| started.elapsed())
                .unwrap_or(self.elapsed),
        }
    }

    /// Polls the termination criterion.
    pub fn conditions_met(&mut self) -> bool {
        let stats = self.stats();
        self.termination.is_met(&stats)
    }

    /// Counts one iteration and logs progress.
    pub fn update_progress(&mut self) {
        self.iterations += 1;
        let stats = self.stats();
        debug!(
            iteration = stats.iterations,
            progress = self.termination.estimate(&stats),
            best = self.best.as_ref().map(|t| t.distance),
            "progress"
        );
    }

    /// Builds the open and closed forms of a route.
    pub fn nodes_to_solution(&self, route: &[NodeId]) -> Solution {
        let mut cycle = Vec::with_capacity(route.len() + 1);
        cycle.extend_from_slice(route);
        if let Some(&first) = route.first() {
            cycle.push(first);
        }
        Solution {
            route: route.to_vec(),
            cycle,
        }
    }

    /// Records a solution, keeping it if it beats the best so far.
    ///
    /// Ties keep the earlier solution.
    pub fn set_solution(&mut self, solution: &Solution, distance: f64) {
        let improves = self
            .best
            .as_ref()
            .map_or(true, |best| distance < best.distance);
        if improves {
            self.best = Some(Tour {
                route: solution.route.clone(),
                distance,
            });
        }
    }

    /// Best tour recorded in the current run.
    pub fn best(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    /// Summarizes the run for external reporting.
    pub fn report(&self, method: &str, parameters: Vec<(String, String)>) -> SolveReport {
        let stats = self.stats();
        SolveReport {
            method: method.to_owned(),
            parameters,
            best: self.best.clone(),
            iterations: stats.iterations,
            elapsed: stats.elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MatrixGraph;

    fn square() -> MatrixGraph {
        MatrixGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_nodes_to_solution_closes_route() {
        let graph = square();
        let solver = TspSolver::new(&graph, MaxIterations(1));
        let solution = solver.nodes_to_solution(&[2, 0, 3, 1]);
        assert_eq!(solution.route, vec![2, 0, 3, 1]);
        assert_eq!(solution.cycle, vec![2, 0, 3, 1, 2]);
    }

    #[test]
    fn test_nodes_to_solution_empty() {
        let graph = square();
        let solver = TspSolver::new(&graph, MaxIterations(1));
        let solution = solver.nodes_to_solution(&[]);
        assert!(solution.route.is_empty());
        assert!(solution.cycle.is_empty());
    }

    #[test]
    fn test_set_solution_keeps_best() {
        let graph = square();
        let mut solver = TspSolver::new(&graph, MaxIterations(1));
        solver.start_solving();

        let a = solver.nodes_to_solution(&[0, 2, 1, 3]);
        solver.set_solution(&a, 4.8);
        let b = solver.nodes_to_solution(&[0, 1, 2, 3]);
        solver.set_solution(&b, 4.0);
        let c = solver.nodes_to_solution(&[3, 2, 1, 0]);
        solver.set_solution(&c, 4.0);

        let best = solver.best().unwrap();
        assert_eq!(best.route, vec![0, 1, 2, 3]);
        assert_eq!(best.distance, 4.0);
    }

    #[test]
    fn test_lifecycle_counts_iterations() {
        let graph = square();
        let mut solver = TspSolver::new(&graph, MaxIterations(3));
        solver.start_solving();

        let mut loops = 0;
        while !solver.conditions_met() {
            solver.update_progress();
            loops += 1;
        }
        solver.end_solving();

        assert_eq!(loops, 3);
        assert_eq!(solver.stats().iterations, 3);
    }

    #[test]
    fn test_start_resets_state() {
        let graph = square();
        let mut solver = TspSolver::new(&graph, MaxIterations(2));
        solver.start_solving();
        solver.update_progress();
        let s = solver.nodes_to_solution(&[0, 1, 2, 3]);
        solver.set_solution(&s, 4.0);
        solver.end_solving();

        solver.start_solving();
        assert_eq!(solver.stats().iterations, 0);
        assert!(solver.best().is_none());
    }

    #[test]
    fn test_report() {
        let graph = square();
        let mut solver = TspSolver::new(&graph, MaxIterations(1));
        solver.start_solving();
        solver.update_progress();
        let s = solver.nodes_to_solution(&[0, 1, 2, 3]);
        solver.set_solution(&s, 4.0);
        solver.end_solving();

        let report = solver.report("Test", vec![("k".into(), "v".into())]);
        assert_eq!(report.method, "Test");
        assert_eq!(report.parameters, vec![("k".to_owned(), "v".to_owned())]);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.best.unwrap().distance, 4.0);
    }
}
