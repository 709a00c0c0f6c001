mod epsilon_greedy;

pub use epsilon_greedy::{sample_action, EpsilonGreedy};
