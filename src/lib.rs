//! Genetic algorithm solver for the travelling salesman problem.
//!
//! - **Graph**: Distance matrices with optional node labels, built from
//!   explicit matrices or planar points.
//! - **Solver**: Run lifecycle, termination criteria, and best-tour tracking
//!   shared by every solver.
//! - **Genetic Algorithm (GA)**: Population-based tour optimization with
//!   pluggable selection, crossover, and mutation strategies.
//! - **Ant Colony System (ACS)**: Constructive heuristic used to seed the
//!   GA's initial population.
//!
//! # Example
//!
//! ```
//! use tsp_genetic::ga::{
//!     CrossoverMethod, Genetic, GeneticArgs, InitialPopulation, MutationMethod, SelectionMethod,
//! };
//! use tsp_genetic::graph::MatrixGraph;
//! use tsp_genetic::solver::MaxIterations;
//!
//! let graph = MatrixGraph::from_points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0), (0.0, 4.0)]);
//! let args = GeneticArgs::new()
//!     .with_chr(8)
//!     .with_cr(0.2)
//!     .with_mr(0.6)
//!     .with_method_initial_population(InitialPopulation::AntColony)
//!     .with_method_select(SelectionMethod::Tournament)
//!     .with_method_cross(CrossoverMethod::Pmx)
//!     .with_method_mutate(MutationMethod::Swap);
//!
//! let mut genetic = Genetic::seeded(&graph, args, MaxIterations(20), 7)?;
//! let report = genetic.solve();
//! assert_eq!(report.best.map(|t| t.distance), Some(14.0));
//! # Ok::<(), tsp_genetic::ga::ConfigError>(())
//! ```

pub mod acs;
pub mod ga;
pub mod graph;
pub mod solver;
