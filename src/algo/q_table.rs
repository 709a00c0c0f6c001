use std::collections::{hash_map, HashMap};

use crate::{
    env::StateKey,
    util::{argmax, max_value},
};

/// A sparse action-value table mapping each visited state to one value per action
///
/// States that have never been written read as the all-zero vector. [`get`](QTable::get) makes
/// that explicit by inserting the zero vector on first access; [`peek`](QTable::peek) reads
/// without inserting. There is no removal: the table only grows over a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable<S: StateKey> {
    values: HashMap<S, Vec<f64>>,
    num_actions: usize,
}

impl<S: StateKey> QTable<S> {
    /// Create an empty table for an action space of size `num_actions`
    pub fn new(num_actions: usize) -> Self {
        Self {
            values: HashMap::new(),
            num_actions,
        }
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Number of states stored in the table
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load-or-default: the action values of `state`, storing a zero vector first if absent
    pub fn get(&mut self, state: S) -> &[f64] {
        self.entry(state)
    }

    /// The stored action values of `state`, if it has been accessed before
    pub fn peek(&self, state: &S) -> Option<&[f64]> {
        self.values.get(state).map(Vec::as_slice)
    }

    /// Value of a single state-action pair, zero if the state is unseen
    pub fn value(&self, state: &S, action: usize) -> f64 {
        self.peek(state).map_or(0.0, |v| v[action])
    }

    /// Overwrite the value of a single state-action pair
    ///
    /// **Panics** if `action` is not in `0..num_actions`
    pub fn set(&mut self, state: S, action: usize, value: f64) {
        self.entry(state)[action] = value;
    }

    /// The greedy action in `state`, ties going to the lowest index
    pub fn greedy_action(&self, state: &S) -> usize {
        self.peek(state).map_or(0, argmax)
    }

    /// The greedy action for every stored state
    pub fn greedy_policy(&self) -> HashMap<S, usize> {
        self.values.iter().map(|(&s, v)| (s, argmax(v))).collect()
    }

    /// V(s) = max<sub>a</sub> Q(s, a) for every stored state
    pub fn state_values(&self) -> HashMap<S, f64> {
        self.values.iter().map(|(&s, v)| (s, max_value(v))).collect()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, S, Vec<f64>> {
        self.values.iter()
    }

    fn entry(&mut self, state: S) -> &mut Vec<f64> {
        let num_actions = self.num_actions;
        self.values
            .entry(state)
            .or_insert_with(|| vec![0.0; num_actions])
    }
}

impl<'a, S: StateKey> IntoIterator for &'a QTable<S> {
    type Item = (&'a S, &'a Vec<f64>);
    type IntoIter = hash_map::Iter<'a, S, Vec<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
