use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

use crate::{algo::QTable, env::StateKey, util::argmax, Error, Result};

/// Epsilon greedy policy over a borrowed [`QTable`]
///
/// The policy holds no values of its own: every call to [`distribution`](Self::distribution) reads
/// the table as it is at that moment, so it always reflects the latest updates. Reading never
/// inserts into the table.
#[derive(Debug, Clone, Copy)]
pub struct EpsilonGreedy<'q, S: StateKey> {
    table: &'q QTable<S>,
    epsilon: f64,
}

impl<'q, S: StateKey> EpsilonGreedy<'q, S> {
    /// View `table` as an epsilon greedy policy
    ///
    /// `epsilon` is clamped into `[0,1]`.
    pub fn new(table: &'q QTable<S>, epsilon: f64) -> Self {
        Self {
            table,
            epsilon: epsilon.clamp(0.0, 1.0),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Probability of each action in `state`
    ///
    /// Every action gets `epsilon / A`; the greedy action (lowest index among equal maxima)
    /// additionally gets `1 - epsilon`.
    pub fn distribution(&self, state: &S) -> Vec<f64> {
        let num_actions = self.table.num_actions();
        let mut probs = vec![self.epsilon / num_actions as f64; num_actions];
        if num_actions > 0 {
            let best = self.table.peek(state).map_or(0, argmax);
            probs[best] += 1.0 - self.epsilon;
        }
        probs
    }

    /// Draw an action for `state` from [`distribution`](Self::distribution)
    pub fn sample<R: Rng + ?Sized>(&self, state: &S, rng: &mut R) -> Result<usize> {
        sample_action(&self.distribution(state), rng)
    }
}

/// Draw an index from `distribution`, treating its entries as weights
///
/// Entries with zero weight are never selected.
pub fn sample_action<R: Rng + ?Sized>(distribution: &[f64], rng: &mut R) -> Result<usize> {
    let dist = WeightedIndex::new(distribution)
        .map_err(|e| Error::InvalidDistribution(e.to_string()))?;
    Ok(dist.sample(rng))
}
