//! Permutation crossover and mutation operators for tours.
//!
//! Routes are slices of dense node ids `0..n`. Every operator returns a
//! permutation of the nodes it was given.
//!
//! # Crossover Operators
//!
//! - [`ordinal_one_point_crossover`]: one-point crossover on the ordinal
//!   encoding (Grefenstette et al., 1985)
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves positions
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two distinct positions
//! - [`insert_mutation`]: remove a node and reinsert it elsewhere
//! - [`invert_mutation`]: reverse a random segment (2-opt move)

use crate::graph::NodeId;
use rand::Rng;

// ============================================================================
// Ordinal encoding
// ============================================================================

/// Encodes a route as ordinal positions in a shrinking reference list.
///
/// The reference list starts as the sorted node set. Gene `i` is the index
/// of `route[i]` among the nodes not yet consumed, so gene `i` always lies
/// in `0..n - i`. Any vector with that property decodes to a valid
/// permutation.
pub fn to_ordinal(route: &[NodeId]) -> Vec<usize> {
    let mut reference: Vec<NodeId> = route.to_vec();
    reference.sort_unstable();
    route
        .iter()
        .map(|node| {
            let pos = reference
                .binary_search(node)
                .expect("route must not repeat nodes");
            reference.remove(pos);
            pos
        })
        .collect()
}

/// Decodes an ordinal vector against the sorted `nodes`.
pub fn from_ordinal(ordinal: &[usize], nodes: &[NodeId]) -> Vec<NodeId> {
    let mut reference: Vec<NodeId> = nodes.to_vec();
    reference.sort_unstable();
    ordinal.iter().map(|&pos| reference.remove(pos)).collect()
}

// ============================================================================
// Crossover operators
// ============================================================================

/// One-point crossover in ordinal representation.
///
/// Both parents are ordinal-encoded, tails after a random cut in `1..n` are
/// exchanged, and the results are decoded. Swapping tails never breaks the
/// `gene[i] < n - i` bound, so children are always permutations.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn ordinal_one_point_crossover<R: Rng>(
    parent1: &[NodeId],
    parent2: &[NodeId],
    rng: &mut R,
) -> (Vec<NodeId>, Vec<NodeId>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let mut o1 = to_ordinal(parent1);
    let mut o2 = to_ordinal(parent2);
    let cut = rng.random_range(1..n);
    o1[cut..].swap_with_slice(&mut o2[cut..]);

    (from_ordinal(&o1, parent1), from_ordinal(&o2, parent1))
}

/// Order Crossover (OX).
///
/// 1. Select a random segment `[start, end]`
/// 2. Copy the segment from one parent to the child at the same positions
/// 3. Fill the rest from the other parent in its order, starting after the
///    segment and wrapping around, skipping nodes already placed
///
/// # Panics
/// Panics if parents have different lengths.
pub fn order_crossover<R: Rng>(
    parent1: &[NodeId],
    parent2: &[NodeId],
    rng: &mut R,
) -> (Vec<NodeId>, Vec<NodeId>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = random_segment(n, rng);
    (
        ox_build_child(parent1, parent2, start, end),
        ox_build_child(parent2, parent1, start, end),
    )
}

fn ox_build_child(template: &[NodeId], donor: &[NodeId], start: usize, end: usize) -> Vec<NodeId> {
    let n = template.len();
    let mut child = vec![NodeId::MAX; n];
    let mut placed = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let node = donor[(end + 1 + offset) % n];
        if !placed[node] {
            child[pos] = node;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Partially Mapped Crossover (PMX).
///
/// 1. Copy a random segment from one parent
/// 2. Place the other parent's segment nodes through the mapping chain
/// 3. Fill the remaining positions from the other parent
///
/// # Panics
/// Panics if parents have different lengths.
pub fn pmx_crossover<R: Rng>(
    parent1: &[NodeId],
    parent2: &[NodeId],
    rng: &mut R,
) -> (Vec<NodeId>, Vec<NodeId>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = random_segment(n, rng);
    (
        pmx_build_child(parent1, parent2, start, end),
        pmx_build_child(parent2, parent1, start, end),
    )
}

fn pmx_build_child(template: &[NodeId], donor: &[NodeId], start: usize, end: usize) -> Vec<NodeId> {
    let n = template.len();
    let mut child = vec![NodeId::MAX; n];
    let mut placed = vec![false; n];
    let mut donor_pos = vec![0usize; n];
    for (i, &node) in donor.iter().enumerate() {
        donor_pos[node] = i;
    }

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    for i in start..=end {
        let node = donor[i];
        if placed[node] {
            continue;
        }
        let mut pos = i;
        loop {
            let target = donor_pos[template[pos]];
            if target < start || target > end {
                child[target] = node;
                placed[node] = true;
                break;
            }
            pos = target;
        }
    }

    for i in 0..n {
        if child[i] == NodeId::MAX {
            child[i] = donor[i];
        }
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swaps two distinct random positions.
pub fn swap_mutation<R: Rng>(route: &mut [NodeId], rng: &mut R) {
    let n = route.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    route.swap(i, j);
}

/// Removes a node and reinserts it at a random position.
pub fn insert_mutation<R: Rng>(route: &mut Vec<NodeId>, rng: &mut R) {
    let n = route.len();
    if n < 2 {
        return;
    }
    let from = rng.random_range(0..n);
    let node = route.remove(from);
    let to = rng.random_range(0..n);
    route.insert(to, node);
}

/// Reverses a random segment (2-opt move).
pub fn invert_mutation<R: Rng>(route: &mut [NodeId], rng: &mut R) {
    let n = route.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    route[start..=end].reverse();
}

/// Random segment `[start, end]` within `0..n`, `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
