//! Strategy identifiers and their dispatch.
//!
//! Each method family is a closed enum with a stable textual identifier.
//! Identifiers stored in [`GeneticArgs`] are parsed once, when the engine is
//! built; an unknown name is a [`ConfigError`], never a runtime fallback.

use super::config::{self, GeneticArgs};
use super::operators;
use super::selection;
use super::types::{Chromosome, ConfigError};
use crate::graph::NodeId;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

macro_rules! method_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $id:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[cfg_attr(feature = "serde", serde(rename = $id))]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable textual identifier.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok($name::$variant),)+
                    _ => Err(ConfigError::UnknownMethod {
                        kind: $kind,
                        name: s.to_owned(),
                    }),
                }
            }
        }
    };
}

method_enum! {
    /// How generation zero is produced.
    InitialPopulation, "initial population" {
        /// Independent random permutations.
        Random => "random",
        /// Complete tours from an ant colony, padded with random ones.
        AntColony => "ant-colony",
    }
}

method_enum! {
    /// Parent selection strategy.
    SelectionMethod, "selection" {
        /// Fitness-proportionate selection on inverted distances.
        Roulette => "roulette",
        /// Linear rank-based selection.
        Rank => "rank",
        /// Best of three random picks.
        Tournament => "tournament",
    }
}

method_enum! {
    /// Recombination of two parent routes.
    CrossoverMethod, "crossover" {
        /// One-point crossover in ordinal representation.
        Ordinal1p => "ordinal-1p",
        /// Order crossover (OX).
        Ox => "ox",
        /// Partially mapped crossover (PMX).
        Pmx => "pmx",
    }
}

method_enum! {
    /// Perturbation of a single route.
    MutationMethod, "mutation" {
        /// Exchange two distinct positions.
        Swap => "swap",
        /// Reverse a random segment.
        Reverse => "reverse",
        /// Move one node to another position.
        Insert => "insert",
    }
}

/// Contestants per tournament for [`SelectionMethod::Tournament`].
pub const TOURNAMENT_SIZE: usize = 3;

/// Genetic operators applied by the engine.
///
/// Implementations must not modify their inputs and must return
/// permutations of the nodes they were given. A panic inside an operator
/// aborts the run.
pub trait Operators {
    /// Chooses two parents from the population.
    fn select<'p, R: Rng>(
        &self,
        population: &'p [Chromosome],
        rng: &mut R,
    ) -> (&'p Chromosome, &'p Chromosome);

    /// Recombines two parent routes into two child routes.
    fn crossover<R: Rng>(
        &self,
        a: &[NodeId],
        b: &[NodeId],
        rng: &mut R,
    ) -> (Vec<NodeId>, Vec<NodeId>);

    /// Perturbs a route.
    fn mutate<R: Rng>(&self, route: &[NodeId], rng: &mut R) -> Vec<NodeId>;
}

/// Operators bound to configured method identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOperators {
    pub selection: SelectionMethod,
    pub crossover: CrossoverMethod,
    pub mutation: MutationMethod,
}

impl Operators for ResolvedOperators {
    fn select<'p, R: Rng>(
        &self,
        population: &'p [Chromosome],
        rng: &mut R,
    ) -> (&'p Chromosome, &'p Chromosome) {
        let pick = |rng: &mut R| match self.selection {
            SelectionMethod::Roulette => selection::roulette(population, rng),
            SelectionMethod::Rank => selection::rank(population, rng),
            SelectionMethod::Tournament => {
                selection::tournament(population, TOURNAMENT_SIZE, rng)
            }
        };
        let a = pick(rng);
        let b = pick(rng);
        (&population[a], &population[b])
    }

    fn crossover<R: Rng>(
        &self,
        a: &[NodeId],
        b: &[NodeId],
        rng: &mut R,
    ) -> (Vec<NodeId>, Vec<NodeId>) {
        match self.crossover {
            CrossoverMethod::Ordinal1p => operators::ordinal_one_point_crossover(a, b, rng),
            CrossoverMethod::Ox => operators::order_crossover(a, b, rng),
            CrossoverMethod::Pmx => operators::pmx_crossover(a, b, rng),
        }
    }

    fn mutate<R: Rng>(&self, route: &[NodeId], rng: &mut R) -> Vec<NodeId> {
        let mut child = route.to_vec();
        match self.mutation {
            MutationMethod::Swap => operators::swap_mutation(&mut child, rng),
            MutationMethod::Reverse => operators::invert_mutation(&mut child, rng),
            MutationMethod::Insert => operators::insert_mutation(&mut child, rng),
        }
        child
    }
}

/// Strategy identifiers parsed from a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Methods {
    pub initial_population: InitialPopulation,
    pub operators: ResolvedOperators,
}

impl Methods {
    /// Resolves all four method identifiers.
    pub fn resolve(args: &GeneticArgs) -> Result<Self, ConfigError> {
        Ok(Self {
            initial_population: parse(args, config::KEY_INITIAL_POPULATION)?,
            operators: ResolvedOperators {
                selection: parse(args, config::KEY_SELECT)?,
                crossover: parse(args, config::KEY_CROSS)?,
                mutation: parse(args, config::KEY_MUTATE)?,
            },
        })
    }
}

fn parse<T: FromStr<Err = ConfigError>>(
    args: &GeneticArgs,
    key: &'static str,
) -> Result<T, ConfigError> {
    let value = args.get(key).ok_or(ConfigError::MissingParameter(key))?;
    let name = value.as_str().ok_or(ConfigError::InvalidType {
        key,
        expected: "a method identifier",
    })?;
    name.parse()
}
