//! Genetic algorithm for the travelling salesman problem.
//!
//! Chromosomes are open permutations of the graph's nodes, priced as closed
//! cycles. The engine keeps a fixed, even population size and evolves it
//! generation by generation with elitist replacement.
//!
//! # Key Types
//!
//! - [`GeneticArgs`]: Keyed parameter set (`cr`, `mr`, `chr`, method identifiers)
//! - [`Genetic`]: Validates the parameters and runs the generational loop
//! - [`Chromosome`]: Immutable route and distance pair
//! - [`TourSeeder`]: Constructive heuristic used to seed generation zero
//!
//! # Strategies
//!
//! | Family | Identifiers |
//! |--------|-------------|
//! | initial population | `random`, `ant-colony` |
//! | selection | `roulette`, `rank`, `tournament` |
//! | crossover | `ordinal-1p`, `ox`, `pmx` |
//! | mutation | `swap`, `reverse`, `insert` |
//!
//! # Submodules
//!
//! - [`operators`]: Permutation crossover and mutation operators
//! - [`selection`]: Parent selection over a population
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod codec;
mod config;
mod methods;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use codec::{close, encode, open};
pub use config::{ArgValue, GeneticArgs};
pub use methods::{
    CrossoverMethod, InitialPopulation, Methods, MutationMethod, Operators, ResolvedOperators,
    SelectionMethod, TOURNAMENT_SIZE,
};
pub use runner::Genetic;
pub use types::{Chromosome, ConfigError, EngineState, Population, TourSeeder};
