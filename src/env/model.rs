use log::warn;

use crate::{Error, Result};

use super::{Environment, Transition};

/// One possible result of taking an action in a state of a [`TabularModel`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub probability: f64,
    pub next_state: usize,
    pub reward: f64,
    pub done: bool,
}

impl Outcome {
    /// An outcome that always happens
    pub fn certain(next_state: usize, reward: f64, done: bool) -> Self {
        Self {
            probability: 1.0,
            next_state,
            reward,
            done,
        }
    }
}

/// An MDP over states `0..n` given as an explicit, enumerated transition model
/// `P[state][action] = [outcome, ...]`
///
/// As an [`Environment`], the model always yields the **first** listed outcome of each
/// state-action pair. This is exact for deterministic models. For models that list several
/// outcomes the remaining ones are ignored, which silently removes their stochasticity; a warning
/// is logged the first time this happens.
#[derive(Debug, Clone)]
pub struct TabularModel {
    outcomes: Vec<Vec<Vec<Outcome>>>,
    initial_state: usize,
    num_actions: usize,
    warned: bool,
}

impl TabularModel {
    /// Build a model from `outcomes[state][action]`
    ///
    /// Every state must have the same, non-zero number of actions, every entry must list at least
    /// one outcome, probabilities must sum to 1, and every referenced state must exist.
    pub fn new(outcomes: Vec<Vec<Vec<Outcome>>>, initial_state: usize) -> Result<Self> {
        let num_states = outcomes.len();
        if initial_state >= num_states {
            return Err(Error::InvalidModel(format!(
                "initial state {} out of range for {} states",
                initial_state, num_states
            )));
        }

        let num_actions = outcomes[0].len();
        if num_actions == 0 {
            return Err(Error::EmptyActionSpace);
        }

        for (s, actions) in outcomes.iter().enumerate() {
            if actions.len() != num_actions {
                return Err(Error::InvalidModel(format!(
                    "state {} has {} actions, expected {}",
                    s,
                    actions.len(),
                    num_actions
                )));
            }
            for (a, entry) in actions.iter().enumerate() {
                if entry.is_empty() {
                    return Err(Error::InvalidModel(format!(
                        "no outcomes for state {} action {}",
                        s, a
                    )));
                }
                if let Some(o) = entry.iter().find(|o| o.next_state >= num_states) {
                    return Err(Error::InvalidModel(format!(
                        "state {} action {} leads to unknown state {}",
                        s, a, o.next_state
                    )));
                }
                let total: f64 = entry.iter().map(|o| o.probability).sum();
                if entry.iter().any(|o| o.probability < 0.0) || (total - 1.0).abs() > 1e-6 {
                    return Err(Error::InvalidModel(format!(
                        "outcome probabilities for state {} action {} sum to {}",
                        s, a, total
                    )));
                }
            }
        }

        Ok(Self {
            outcomes,
            initial_state,
            num_actions,
            warned: false,
        })
    }

    /// Build a deterministic model from a function `(state, action) -> transition`
    pub fn from_fn<F>(
        num_states: usize,
        num_actions: usize,
        initial_state: usize,
        mut f: F,
    ) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Transition<usize>,
    {
        let outcomes = (0..num_states)
            .map(|s| {
                (0..num_actions)
                    .map(|a| {
                        let t = f(s, a);
                        vec![Outcome::certain(t.next_state, t.reward, t.done)]
                    })
                    .collect()
            })
            .collect();
        Self::new(outcomes, initial_state)
    }

    pub fn num_states(&self) -> usize {
        self.outcomes.len()
    }

    /// All listed outcomes of taking `action` in `state`
    pub fn outcomes(&self, state: usize, action: usize) -> &[Outcome] {
        &self.outcomes[state][action]
    }

    /// Whether every state-action pair has exactly one outcome
    pub fn is_deterministic(&self) -> bool {
        self.outcomes
            .iter()
            .flatten()
            .all(|entry| entry.len() == 1)
    }
}

impl Environment for TabularModel {
    type State = usize;

    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn reset(&mut self) -> Self::State {
        self.initial_state
    }

    fn transition(&mut self, state: Self::State, action: usize) -> Transition<Self::State> {
        let entry = &self.outcomes[state][action];
        if entry.len() > 1 && !self.warned {
            warn!(
                "state {} action {} lists {} outcomes; using only the first",
                state,
                action,
                entry.len()
            );
            self.warned = true;
        }
        let first = entry[0];
        Transition {
            next_state: first.next_state,
            reward: first.reward,
            done: first.done,
        }
    }
}
