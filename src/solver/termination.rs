//! Termination criteria polled once per solver iteration.

use std::time::Duration;

/// Run statistics visible to termination criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    /// Number of completed progress updates (one per loop iteration).
    pub iterations: usize,

    /// Wall-clock time since the run started.
    pub elapsed: Duration,
}

/// Decides when a run should stop.
pub trait Termination {
    /// Returns true once the run should stop.
    fn is_met(&mut self, stats: &RunStats) -> bool;

    /// Relative progress towards termination, in `[0, 1]`.
    ///
    /// Used only for progress reporting.
    fn estimate(&self, _stats: &RunStats) -> f64 {
        0.0
    }
}

/// Stops after a fixed number of iterations.
#[derive(Debug, Clone, Copy)]
pub struct MaxIterations(pub usize);

impl Termination for MaxIterations {
    fn is_met(&mut self, stats: &RunStats) -> bool {
        stats.iterations >= self.0
    }

    fn estimate(&self, stats: &RunStats) -> f64 {
        if self.0 == 0 {
            return 1.0;
        }
        (stats.iterations as f64 / self.0 as f64).min(1.0)
    }
}

/// Stops once the elapsed time reaches the limit.
#[derive(Debug, Clone, Copy)]
pub struct MaxTime(pub Duration);

impl Termination for MaxTime {
    fn is_met(&mut self, stats: &RunStats) -> bool {
        stats.elapsed >= self.0
    }

    fn estimate(&self, stats: &RunStats) -> f64 {
        if self.0.is_zero() {
            return 1.0;
        }
        (stats.elapsed.as_secs_f64() / self.0.as_secs_f64()).min(1.0)
    }
}

/// Stops as soon as any member criterion is met.
///
/// Every member is polled on each call so stateful criteria stay in sync.
pub struct AnyOf<'a> {
    criteria: Vec<Box<dyn Termination + 'a>>,
}

impl<'a> AnyOf<'a> {
    pub fn new(criteria: Vec<Box<dyn Termination + 'a>>) -> Self {
        Self { criteria }
    }
}

impl Termination for AnyOf<'_> {
    fn is_met(&mut self, stats: &RunStats) -> bool {
        self.criteria
            .iter_mut()
            .fold(false, |met, criterion| criterion.is_met(stats) || met)
    }

    fn estimate(&self, stats: &RunStats) -> f64 {
        self.criteria
            .iter()
            .map(|c| c.estimate(stats))
            .fold(0.0, f64::max)
    }
}

/// Termination backed by a closure.
pub struct FromFn<F>(F);

/// Wraps a predicate over [`RunStats`] as a [`Termination`].
///
/// ```
/// use tsp_genetic::solver::{from_fn, RunStats, Termination};
///
/// let mut calls = 0;
/// let mut stop = from_fn(move |_: &RunStats| {
///     calls += 1;
///     calls > 2
/// });
/// let stats = RunStats::default();
/// assert!(!stop.is_met(&stats));
/// assert!(!stop.is_met(&stats));
/// assert!(stop.is_met(&stats));
/// ```
pub fn from_fn<F>(predicate: F) -> FromFn<F>
where
    F: FnMut(&RunStats) -> bool,
{
    FromFn(predicate)
}

impl<F> Termination for FromFn<F>
where
    F: FnMut(&RunStats) -> bool,
{
    fn is_met(&mut self, stats: &RunStats) -> bool {
        (self.0)(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(iterations: usize, millis: u64) -> RunStats {
        RunStats {
            iterations,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_max_iterations() {
        let mut t = MaxIterations(3);
        assert!(!t.is_met(&stats(2, 0)));
        assert!(t.is_met(&stats(3, 0)));
        assert!((t.estimate(&stats(1, 0)) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(t.estimate(&stats(10, 0)), 1.0);
    }

    #[test]
    fn test_max_time() {
        let mut t = MaxTime(Duration::from_millis(100));
        assert!(!t.is_met(&stats(0, 99)));
        assert!(t.is_met(&stats(0, 100)));
        assert!((t.estimate(&stats(0, 50)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_any_of() {
        let mut t = AnyOf::new(vec![
            Box::new(MaxIterations(10)),
            Box::new(MaxTime(Duration::from_secs(1))),
        ]);
        assert!(!t.is_met(&stats(5, 10)));
        assert!(t.is_met(&stats(10, 10)));
        assert!(t.is_met(&stats(0, 1000)));
        assert!((t.estimate(&stats(5, 900)) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_any_of_polls_every_member() {
        let mut calls = 0;
        {
            let mut t = AnyOf::new(vec![
                Box::new(MaxIterations(0)),
                Box::new(from_fn(|_: &RunStats| {
                    calls += 1;
                    false
                })),
            ]);
            assert!(t.is_met(&stats(0, 0)));
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_empty_any_of_never_met() {
        let mut t = AnyOf::new(vec![]);
        assert!(!t.is_met(&stats(1000, 1000)));
        assert_eq!(t.estimate(&stats(1000, 1000)), 0.0);
    }
}
