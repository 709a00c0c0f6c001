use std::{fmt::Debug, hash::Hash};

mod model;

pub use model::{Outcome, TabularModel};

/// A trait for state types that can be used as keys in a [`QTable`](crate::algo::QTable)
pub trait StateKey: Copy + Eq + Hash + Debug {}

impl<T> StateKey for T where T: Copy + Eq + Hash + Debug {}

/// The result of applying an action to a state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<S> {
    /// The state the environment moves to
    pub next_state: S,
    /// The immediate reward for taking the action
    pub reward: f64,
    /// Whether `next_state` ends the episode
    pub done: bool,
}

/// Represents a discrete, finite Markov decision process with a known transition model
///
/// Actions are indices in `0..num_actions()`. Termination is entirely the environment's
/// responsibility: an episode only ends when a transition reports `done`.
pub trait Environment {
    /// An opaque identifier for a state of the environment
    type State: StateKey;

    /// The fixed size of the action space
    ///
    /// Read once per training run. Must not be zero.
    fn num_actions(&self) -> usize;

    /// Begin a new episode
    ///
    /// **Returns** the initial state
    fn reset(&mut self) -> Self::State;

    /// Look up the outcome of taking `action` in `state`
    ///
    /// **Panics** (implementation defined) if `action` is out of range
    fn transition(&mut self, state: Self::State, action: usize) -> Transition<Self::State>;
}
