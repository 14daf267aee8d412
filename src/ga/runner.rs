//! Generational loop of the genetic TSP solver.
//!
//! [`Genetic`] drives the run: bootstrap → (select → crossover → mutate)
//! until the population is full → elitist replacement → repeat, until the
//! caller's termination criterion is met.

use super::codec::{self, encode};
use super::config::{self, GeneticArgs};
use super::methods::{InitialPopulation, Methods, Operators, ResolvedOperators};
use super::types::{Chromosome, ConfigError, EngineState, Population, TourSeeder};
use crate::acs::{AcsConfig, AntColony};
use crate::graph::Graph;
use crate::solver::{SolveReport, Termination, Tour, TspSolver};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

const METHOD_NAME: &str = "Genetic";

type Observer<'g> = Box<dyn FnMut(usize, &[Chromosome]) + 'g>;

/// Genetic algorithm solver for the TSP.
///
/// # Operator gating
///
/// For each pair of selected parents a uniform draw `u ∈ [0, 1)` is taken.
/// Crossover is applied when `u >= cr`. Only when crossover was applied, a
/// second draw `v` is taken and both children are mutated when `v >= mr`.
/// A larger `cr` or `mr` therefore makes the operator fire *less* often.
///
/// # Usage
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use tsp_genetic::ga::{
///     CrossoverMethod, Genetic, GeneticArgs, InitialPopulation, MutationMethod, SelectionMethod,
/// };
/// use tsp_genetic::graph::MatrixGraph;
/// use tsp_genetic::solver::MaxIterations;
///
/// let graph = MatrixGraph::from_points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0), (1.0, 2.0)]);
/// let args = GeneticArgs::new()
///     .with_chr(10)
///     .with_cr(0.1)
///     .with_mr(0.5)
///     .with_method_initial_population(InitialPopulation::Random)
///     .with_method_select(SelectionMethod::Rank)
///     .with_method_cross(CrossoverMethod::Ox)
///     .with_method_mutate(MutationMethod::Reverse);
///
/// let mut genetic = Genetic::new(&graph, args, MaxIterations(30), StdRng::seed_from_u64(42))?;
/// let report = genetic.solve();
/// assert!(report.best.is_some());
/// # Ok::<(), tsp_genetic::ga::ConfigError>(())
/// ```
pub struct Genetic<'g, G: Graph + ?Sized, R: Rng = StdRng, O: Operators = ResolvedOperators> {
    solver: TspSolver<'g, G>,
    args: GeneticArgs,
    chromosomes: usize,
    cr: f64,
    mr: f64,
    initial_population: InitialPopulation,
    operators: O,
    seeder: Option<Box<dyn TourSeeder + 'g>>,
    observer: Option<Observer<'g>>,
    rng: R,
    population: Option<Population>,
    generation: usize,
    state: EngineState,
}

impl<'g, G: Graph + ?Sized + 'g, R: Rng> Genetic<'g, G, R, ResolvedOperators> {
    /// Validates `args` and builds the solver.
    ///
    /// Fails without building anything if the chromosome count is absent,
    /// below two or odd, if `cr` or `mr` is absent or negative, or if any
    /// of the four method identifiers is absent or unknown.
    pub fn new(
        graph: &'g G,
        args: GeneticArgs,
        termination: impl Termination + 'g,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let params = Params::validate(&args)?;
        Ok(Self {
            solver: TspSolver::new(graph, termination),
            args,
            chromosomes: params.chromosomes,
            cr: params.cr,
            mr: params.mr,
            initial_population: params.methods.initial_population,
            operators: params.methods.operators,
            seeder: None,
            observer: None,
            rng,
            population: None,
            generation: 0,
            state: EngineState::Uninitialized,
        })
    }
}

impl<'g, G: Graph + ?Sized + 'g> Genetic<'g, G, StdRng, ResolvedOperators> {
    /// Builds the solver with a [`StdRng`] seeded from `seed`.
    pub fn seeded(
        graph: &'g G,
        args: GeneticArgs,
        termination: impl Termination + 'g,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(graph, args, termination, StdRng::seed_from_u64(seed))
    }
}

impl<'g, G: Graph + ?Sized + 'g, R: Rng, O: Operators> Genetic<'g, G, R, O> {
    /// Replaces the configured operators.
    ///
    /// The method identifiers in the configuration are still validated.
    pub fn with_operators<P: Operators>(self, operators: P) -> Genetic<'g, G, R, P> {
        Genetic {
            solver: self.solver,
            args: self.args,
            chromosomes: self.chromosomes,
            cr: self.cr,
            mr: self.mr,
            initial_population: self.initial_population,
            operators,
            seeder: self.seeder,
            observer: self.observer,
            rng: self.rng,
            population: self.population,
            generation: self.generation,
            state: self.state,
        }
    }

    /// Sets the heuristic used by [`InitialPopulation::AntColony`].
    ///
    /// Without one, an [`AntColony`] with one ant per chromosome is built
    /// on first use.
    pub fn with_seeder(mut self, seeder: impl TourSeeder + 'g) -> Self {
        self.seeder = Some(Box::new(seeder));
        self
    }

    /// Registers a callback invoked with every generation, including the
    /// initial one (generation 0).
    pub fn with_observer(mut self, observer: impl FnMut(usize, &[Chromosome]) + 'g) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// The configuration this solver was built from.
    pub fn args(&self) -> &GeneticArgs {
        &self.args
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current population, once generation zero exists.
    pub fn population(&self) -> Option<&[Chromosome]> {
        self.population.as_deref()
    }

    /// Index of the current generation (0 is the initial population).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best tour recorded so far.
    pub fn best(&self) -> Option<&Tour> {
        self.solver.best()
    }

    /// Runs the generational loop until the termination criterion is met.
    ///
    /// # Panics
    /// Propagates any panic raised by an operator or seeder.
    pub fn solve(&mut self) -> SolveReport {
        self.solver.start_solving();
        self.population = None;
        self.generation = 0;
        self.state = EngineState::Uninitialized;

        while !self.solver.conditions_met() {
            self.solver.update_progress();

            let population = match self.population.take() {
                None => {
                    self.state = EngineState::Populating;
                    let initial = self.initial_population();
                    self.state = EngineState::Evolving;
                    initial
                }
                Some(previous) => {
                    self.generation += 1;
                    self.next_generation(previous)
                }
            };

            debug!(
                generation = self.generation,
                best = population
                    .iter()
                    .map(Chromosome::distance)
                    .fold(f64::INFINITY, f64::min),
                "generation complete"
            );
            if let Some(observer) = self.observer.as_mut() {
                observer(self.generation, &population);
            }
            self.population = Some(population);
        }

        self.solver.end_solving();
        self.state = EngineState::Terminated;
        self.solver
            .report(METHOD_NAME, self.args.display_parameters())
    }

    fn initial_population(&mut self) -> Population {
        let mut population = match self.initial_population {
            InitialPopulation::Random => Vec::with_capacity(self.chromosomes),
            InitialPopulation::AntColony => self.seeded_population(),
        };
        while population.len() < self.chromosomes {
            population.push(self.random_chromosome());
        }
        population
    }

    fn random_chromosome(&mut self) -> Chromosome {
        let mut route = self.solver.graph().nodes();
        route.shuffle(&mut self.rng);
        encode(&mut self.solver, &route)
    }

    fn seeded_population(&mut self) -> Population {
        let mut seeder = match self.seeder.take() {
            Some(seeder) => seeder,
            None => {
                let config = AcsConfig::default()
                    .with_ants(self.chromosomes)
                    .with_seed(self.rng.random());
                Box::new(AntColony::new(self.solver.graph(), config)) as Box<dyn TourSeeder + 'g>
            }
        };
        seeder.solve();
        let tours = seeder.tours();
        self.seeder = Some(seeder);

        debug!(tours = tours.len(), needed = self.chromosomes, "seeding population");
        tours
            .iter()
            .take(self.chromosomes)
            .map(|tour| encode(&mut self.solver, &codec::open(tour)))
            .collect()
    }

    fn next_generation(&mut self, previous: Population) -> Population {
        let mut next = Vec::with_capacity(self.chromosomes);
        while next.len() < self.chromosomes {
            let (a, b) = self.offspring(&previous);
            next.push(a);
            next.push(b);
        }
        replace_worst_with_elite(&previous, &mut next);
        next
    }

    fn offspring(&mut self, population: &[Chromosome]) -> (Chromosome, Chromosome) {
        let (a, b) = self.operators.select(population, &mut self.rng);

        if !self.gate(self.cr) {
            trace!("crossover skipped");
            return (a.clone(), b.clone());
        }
        let (ra, rb) = self.operators.crossover(a.route(), b.route(), &mut self.rng);
        let mut a = encode(&mut self.solver, &ra);
        let mut b = encode(&mut self.solver, &rb);

        if self.gate(self.mr) {
            trace!("crossover and mutation applied");
            let ma = self.operators.mutate(a.route(), &mut self.rng);
            let mb = self.operators.mutate(b.route(), &mut self.rng);
            a = encode(&mut self.solver, &ma);
            b = encode(&mut self.solver, &mb);
        } else {
            trace!("crossover applied");
        }
        (a, b)
    }

    /// Draws `u ∈ [0, 1)` and passes when `u >= threshold`.
    fn gate(&mut self, threshold: f64) -> bool {
        self.rng.random::<f64>() >= threshold
    }
}

/// Overwrites the longest tour of `next` with the shortest of `previous`.
fn replace_worst_with_elite(previous: &[Chromosome], next: &mut [Chromosome]) {
    let elite = previous
        .iter()
        .min_by(|a, b| a.distance().total_cmp(&b.distance()));
    let worst = next
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.distance().total_cmp(&b.distance()))
        .map(|(i, _)| i);
    if let (Some(elite), Some(worst)) = (elite, worst) {
        next[worst] = elite.clone();
    }
}

/// Parameters extracted from a validated configuration.
struct Params {
    chromosomes: usize,
    cr: f64,
    mr: f64,
    methods: Methods,
}

impl Params {
    fn validate(args: &GeneticArgs) -> Result<Self, ConfigError> {
        let chromosomes = args
            .get(config::KEY_CHR)
            .ok_or(ConfigError::MissingParameter(config::KEY_CHR))?
            .as_i64()
            .ok_or(ConfigError::InvalidType {
                key: config::KEY_CHR,
                expected: "an integer",
            })?;
        if chromosomes < 2 || chromosomes % 2 != 0 {
            return Err(ConfigError::InvalidChromosomeCount(chromosomes));
        }
        let chromosomes = usize::try_from(chromosomes)
            .map_err(|_| ConfigError::InvalidChromosomeCount(chromosomes))?;

        Ok(Self {
            chromosomes,
            cr: rate(args, config::KEY_CR)?,
            mr: rate(args, config::KEY_MR)?,
            methods: Methods::resolve(args)?,
        })
    }
}

fn rate(args: &GeneticArgs, key: &'static str) -> Result<f64, ConfigError> {
    let value = args
        .get(key)
        .ok_or(ConfigError::MissingParameter(key))?
        .as_f64()
        .ok_or(ConfigError::InvalidType {
            key,
            expected: "a number",
        })?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NegativeRate { key, value })
    }
}

// ============================================================================
// Tests
// ============================================================================
