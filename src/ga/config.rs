//! Genetic solver configuration.
//!
//! [`GeneticArgs`] is an open key/value bag. The engine reads only the
//! recognized keys listed below; anything else is carried along untouched.
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `cr` | crossover threshold |
//! | `mr` | mutation threshold |
//! | `chr` | chromosome count (even, at least 2) |
//! | `method_initial_population` | [`InitialPopulation`] identifier |
//! | `method_select` | [`SelectionMethod`] identifier |
//! | `method_cross` | [`CrossoverMethod`] identifier |
//! | `method_mutate` | [`MutationMethod`] identifier |

use super::methods::{CrossoverMethod, InitialPopulation, MutationMethod, SelectionMethod};
use std::collections::BTreeMap;
use std::fmt;

pub(crate) const KEY_CR: &str = "cr";
pub(crate) const KEY_MR: &str = "mr";
pub(crate) const KEY_CHR: &str = "chr";
pub(crate) const KEY_INITIAL_POPULATION: &str = "method_initial_population";
pub(crate) const KEY_SELECT: &str = "method_select";
pub(crate) const KEY_CROSS: &str = "method_cross";
pub(crate) const KEY_MUTATE: &str = "method_mutate";

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ArgValue {
    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Int(v) => Some(*v as f64),
            ArgValue::Float(v) => Some(*v),
            ArgValue::Text(_) => None,
        }
    }

    /// Integer view; floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(v) => write!(f, "{v}"),
            ArgValue::Float(v) => write!(f, "{v}"),
            ArgValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v.into())
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Text(v.to_owned())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Text(v)
    }
}

/// Parameters for the [`Genetic`](super::Genetic) solver.
///
/// Starts empty: every recognized parameter must be set before the engine
/// accepts the configuration.
///
/// # Builder Pattern
///
/// ```
/// use tsp_genetic::ga::{
///     CrossoverMethod, GeneticArgs, InitialPopulation, MutationMethod, SelectionMethod,
/// };
///
/// let args = GeneticArgs::new()
///     .with_chr(20)
///     .with_cr(0.2)
///     .with_mr(0.8)
///     .with_method_initial_population(InitialPopulation::Random)
///     .with_method_select(SelectionMethod::Rank)
///     .with_method_cross(CrossoverMethod::Ox)
///     .with_method_mutate(MutationMethod::Reverse);
///
/// // Copies are independent.
/// let mut tuned = GeneticArgs::from_args(&args);
/// tuned.set_chr(40);
/// assert_eq!(args.chr(), Some(20));
/// assert_eq!(tuned.chr(), Some(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GeneticArgs {
    args: BTreeMap<String, ArgValue>,
}

impl GeneticArgs {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every entry of an existing configuration.
    pub fn from_args(other: &GeneticArgs) -> Self {
        other.clone()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.args.get(key)
    }

    /// Stores a value under `key`, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        self.args.insert(key.into(), value.into());
    }

    /// Removes the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        self.args.remove(key)
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Crossover threshold.
    pub fn cr(&self) -> Option<f64> {
        self.get(KEY_CR).and_then(ArgValue::as_f64)
    }

    pub fn set_cr(&mut self, value: f64) {
        self.set(KEY_CR, value);
    }

    /// Mutation threshold.
    pub fn mr(&self) -> Option<f64> {
        self.get(KEY_MR).and_then(ArgValue::as_f64)
    }

    pub fn set_mr(&mut self, value: f64) {
        self.set(KEY_MR, value);
    }

    /// Chromosome count.
    pub fn chr(&self) -> Option<i64> {
        self.get(KEY_CHR).and_then(ArgValue::as_i64)
    }

    pub fn set_chr(&mut self, value: i64) {
        self.set(KEY_CHR, value);
    }

    pub fn method_initial_population(&self) -> Option<&str> {
        self.get(KEY_INITIAL_POPULATION).and_then(ArgValue::as_str)
    }

    pub fn set_method_initial_population(&mut self, method: InitialPopulation) {
        self.set(KEY_INITIAL_POPULATION, method.as_str());
    }

    pub fn method_select(&self) -> Option<&str> {
        self.get(KEY_SELECT).and_then(ArgValue::as_str)
    }

    pub fn set_method_select(&mut self, method: SelectionMethod) {
        self.set(KEY_SELECT, method.as_str());
    }

    pub fn method_cross(&self) -> Option<&str> {
        self.get(KEY_CROSS).and_then(ArgValue::as_str)
    }

    pub fn set_method_cross(&mut self, method: CrossoverMethod) {
        self.set(KEY_CROSS, method.as_str());
    }

    pub fn method_mutate(&self) -> Option<&str> {
        self.get(KEY_MUTATE).and_then(ArgValue::as_str)
    }

    pub fn set_method_mutate(&mut self, method: MutationMethod) {
        self.set(KEY_MUTATE, method.as_str());
    }

    /// Sets the crossover threshold.
    pub fn with_cr(mut self, value: f64) -> Self {
        self.set_cr(value);
        self
    }

    /// Sets the mutation threshold.
    pub fn with_mr(mut self, value: f64) -> Self {
        self.set_mr(value);
        self
    }

    /// Sets the chromosome count.
    pub fn with_chr(mut self, value: i64) -> Self {
        self.set_chr(value);
        self
    }

    /// Sets the initial population method.
    pub fn with_method_initial_population(mut self, method: InitialPopulation) -> Self {
        self.set_method_initial_population(method);
        self
    }

    /// Sets the selection method.
    pub fn with_method_select(mut self, method: SelectionMethod) -> Self {
        self.set_method_select(method);
        self
    }

    /// Sets the crossover method.
    pub fn with_method_cross(mut self, method: CrossoverMethod) -> Self {
        self.set_method_cross(method);
        self
    }

    /// Sets the mutation method.
    pub fn with_method_mutate(mut self, method: MutationMethod) -> Self {
        self.set_method_mutate(method);
        self
    }

    /// Recognized parameters in a fixed display order, skipping absent ones.
    pub fn display_parameters(&self) -> Vec<(String, String)> {
        [
            KEY_CR,
            KEY_MR,
            KEY_CHR,
            KEY_INITIAL_POPULATION,
            KEY_SELECT,
            KEY_CROSS,
            KEY_MUTATE,
        ]
        .into_iter()
        .filter_map(|key| self.get(key).map(|v| (key.to_owned(), v.to_string())))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let args = GeneticArgs::default();
        assert!(args.cr().is_none());
        assert!(args.mr().is_none());
        assert!(args.chr().is_none());
        assert!(args.method_select().is_none());
        assert_eq!(args.iter().count(), 0);
    }

    #[test]
    fn test_typed_accessors() {
        let args = GeneticArgs::new()
            .with_cr(0.3)
            .with_mr(0.7)
            .with_chr(10)
            .with_method_initial_population(InitialPopulation::AntColony)
            .with_method_select(SelectionMethod::Roulette)
            .with_method_cross(CrossoverMethod::Ordinal1p)
            .with_method_mutate(MutationMethod::Swap);

        assert!((args.cr().unwrap() - 0.3).abs() < 1e-12);
        assert!((args.mr().unwrap() - 0.7).abs() < 1e-12);
        assert_eq!(args.chr(), Some(10));
        assert_eq!(args.method_initial_population(), Some("ant-colony"));
        assert_eq!(args.method_select(), Some("roulette"));
        assert_eq!(args.method_cross(), Some("ordinal-1p"));
        assert_eq!(args.method_mutate(), Some("swap"));
    }

    #[test]
    fn test_integer_rates_widen() {
        let mut args = GeneticArgs::new();
        args.set("cr", 0);
        args.set("mr", 1);
        assert_eq!(args.cr(), Some(0.0));
        assert_eq!(args.mr(), Some(1.0));
    }

    #[test]
    fn test_float_chromosome_count_is_not_an_integer() {
        let mut args = GeneticArgs::new();
        args.set("chr", 4.0);
        assert_eq!(args.chr(), None);
        assert_eq!(args.get("chr"), Some(&ArgValue::Float(4.0)));
    }

    #[test]
    fn test_unrecognized_keys_preserved() {
        let mut args = GeneticArgs::new().with_chr(4);
        args.set("note", "baseline");
        let copy = GeneticArgs::from_args(&args);
        assert_eq!(copy.get("note"), Some(&ArgValue::Text("baseline".into())));
        assert_eq!(copy.chr(), Some(4));
    }

    #[test]
    fn test_copy_does_not_share_state() {
        let original = GeneticArgs::new().with_cr(0.1);
        let mut copy = GeneticArgs::from_args(&original);
        copy.set_cr(0.9);
        copy.set("extra", 1);

        assert_eq!(original.cr(), Some(0.1));
        assert!(original.get("extra").is_none());
        assert_eq!(copy.cr(), Some(0.9));
    }

    #[test]
    fn test_set_overrides_and_remove() {
        let mut args = GeneticArgs::new().with_chr(4);
        args.set_chr(6);
        assert_eq!(args.chr(), Some(6));
        assert_eq!(args.remove("chr"), Some(ArgValue::Int(6)));
        assert!(args.chr().is_none());
    }

    #[test]
    fn test_display_parameters_order() {
        let mut args = GeneticArgs::new()
            .with_method_mutate(MutationMethod::Insert)
            .with_chr(8)
            .with_cr(0.5);
        args.set("ignored", "x");

        let params = args.display_parameters();
        assert_eq!(
            params,
            vec![
                ("cr".to_owned(), "0.5".to_owned()),
                ("chr".to_owned(), "8".to_owned()),
                ("method_mutate".to_owned(), "insert".to_owned()),
            ]
        );
    }
}
