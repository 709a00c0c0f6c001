//! Tabular temporal-difference control: off-policy Q-learning and on-policy SARSA over a
//! discrete, finite MDP with a known transition model.

/// Q-learning, SARSA and the action-value table they learn
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Exploration policies
pub mod exploration;

/// Per-episode training statistics
pub mod stats;

mod error;
mod util;

pub use algo::{q_learning, sarsa, QLearning, QTable, Sarsa, TdConfig, TdControl, Training};
pub use error::{Error, Result};
