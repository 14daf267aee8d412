//! Conversion between raw node orderings and stored chromosomes.

use super::types::Chromosome;
use crate::graph::{Graph, NodeId};
use crate::solver::TspSolver;

/// Closes an open route by repeating its first node.
pub fn close(route: &[NodeId]) -> Vec<NodeId> {
    let mut closed = route.to_vec();
    if let Some(&first) = route.first() {
        closed.push(first);
    }
    closed
}

/// Strips the closing node of a closed tour.
///
/// A tour whose last node differs from its first is returned as-is.
pub fn open(closed: &[NodeId]) -> Vec<NodeId> {
    match closed {
        [first, .., last] if first == last => closed[..closed.len() - 1].to_vec(),
        _ => closed.to_vec(),
    }
}

/// Prices an open route and records it with the solver.
///
/// Every operator output goes through here, so each chromosome carries a
/// distance computed from its own route.
pub fn encode<G: Graph + ?Sized>(solver: &mut TspSolver<'_, G>, route: &[NodeId]) -> Chromosome {
    let solution = solver.nodes_to_solution(route);
    let distance = solver.graph().route_distance(&solution.cycle);
    solver.set_solution(&solution, distance);
    Chromosome::new(solution.route, distance)
}
