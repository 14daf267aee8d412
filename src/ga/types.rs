//! Core types shared by the genetic engine and its operators.

use crate::graph::NodeId;
use thiserror::Error;

/// A candidate tour: an open permutation of all nodes plus its cycle length.
///
/// Chromosomes are immutable. Operators produce new routes which the codec
/// turns into new chromosomes.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    route: Vec<NodeId>,
    distance: f64,
}

impl Chromosome {
    pub(crate) fn new(route: Vec<NodeId>, distance: f64) -> Self {
        Self { route, distance }
    }

    /// Open route (the start node is not repeated).
    pub fn route(&self) -> &[NodeId] {
        &self.route
    }

    /// Length of the closed cycle. Lower is better.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

/// One generation of chromosomes.
pub type Population = Vec<Chromosome>;

/// Lifecycle of a [`Genetic`](super::Genetic) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No population yet.
    Uninitialized,
    /// Building generation zero.
    Populating,
    /// Producing successive generations.
    Evolving,
    /// The termination criterion was met.
    Terminated,
}

/// Fatal configuration problems detected when building the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required parameter is absent.
    #[error("genetic parameter `{0}` is required")]
    MissingParameter(&'static str),

    /// A parameter holds a value of the wrong kind.
    #[error("genetic parameter `{key}` must be {expected}")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },

    /// The chromosome count is below two or odd.
    #[error("chromosome count must be an even number of at least 2, got {0}")]
    InvalidChromosomeCount(i64),

    /// A crossover or mutation parameter is negative or NaN.
    #[error("genetic parameter `{key}` must be non-negative, got {value}")]
    NegativeRate { key: &'static str, value: f64 },

    /// A method identifier does not name a known strategy.
    #[error("unknown {kind} method `{name}`")]
    UnknownMethod { kind: &'static str, name: String },
}

/// External heuristic that seeds the initial population with complete tours.
pub trait TourSeeder {
    /// Runs the heuristic to completion.
    fn solve(&mut self);

    /// Closed tours (first node repeated at the end), one per agent.
    fn tours(&self) -> Vec<Vec<NodeId>>;
}
