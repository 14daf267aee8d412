//! ACS configuration.

/// Configuration for the Ant Colony System.
///
/// # Parameters
///
/// - `alpha`, `beta`: weights of pheromone and visibility (`1/distance`)
/// - `rho`: global evaporation rate, applied to the best tour's edges
/// - `xi`: local evaporation rate, applied to every traversed edge
/// - `q0`: probability of exploiting the best edge instead of sampling
///
/// # References
///
/// Dorigo & Gambardella (1997), "Ant Colony System: A Cooperative Learning
/// Approach to the Traveling Salesman Problem"
///
/// # Examples
///
/// ```
/// use tsp_genetic::acs::AcsConfig;
///
/// let config = AcsConfig::default()
///     .with_ants(20)
///     .with_iterations(50)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcsConfig {
    /// Number of ants (one closed tour each per iteration).
    pub ants: usize,

    /// Number of construction iterations.
    pub iterations: usize,

    /// Pheromone exponent.
    pub alpha: f64,

    /// Visibility exponent. Dorigo & Gambardella use 2.0.
    pub beta: f64,

    /// Global evaporation rate, in (0, 1].
    pub rho: f64,

    /// Local evaporation rate, in (0, 1].
    pub xi: f64,

    /// Exploitation probability, in [0, 1].
    pub q0: f64,

    /// Random seed. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for AcsConfig {
    fn default() -> Self {
        Self {
            ants: 10,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.1,
            xi: 0.1,
            q0: 0.9,
            seed: None,
        }
    }
}

impl AcsConfig {
    /// Sets the number of ants.
    pub fn with_ants(mut self, ants: usize) -> Self {
        self.ants = ants;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the pheromone and visibility exponents.
    pub fn with_weights(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the global evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the local evaporation rate.
    pub fn with_xi(mut self, xi: f64) -> Self {
        self.xi = xi;
        self
    }

    /// Sets the exploitation probability.
    pub fn with_q0(mut self, q0: f64) -> Self {
        self.q0 = q0.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.ants == 0 {
            return Err("ants must be at least 1".into());
        }
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        if !(self.alpha >= 0.0 && self.beta >= 0.0) {
            return Err("alpha and beta must be non-negative".into());
        }
        if !(self.rho > 0.0 && self.rho <= 1.0) {
            return Err("rho must be in (0, 1]".into());
        }
        if !(self.xi > 0.0 && self.xi <= 1.0) {
            return Err("xi must be in (0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.q0) {
            return Err("q0 must be in [0, 1]".into());
        }
        Ok(())
    }
}
