//! Ant Colony System (ACS).
//!
//! A constructive heuristic where artificial ants build tours guided by
//! pheromone trails and edge visibility. In this crate it seeds the genetic
//! engine's initial population through [`TourSeeder`](crate::ga::TourSeeder).
//!
//! # References
//!
//! - Dorigo & Gambardella (1997), "Ant Colony System: A Cooperative Learning
//!   Approach to the Traveling Salesman Problem"

mod colony;
mod config;

pub use colony::{Ant, AntColony};
pub use config::AcsConfig;
