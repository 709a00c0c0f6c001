use crate::{
    check_interval,
    decay::{self, Decay},
    env::StateKey,
    stats::EpisodeStats,
    Error, Result,
};

use super::QTable;

/// Hyperparameters shared by the temporal-difference control algorithms
#[derive(Debug, Clone, PartialEq)]
pub struct TdConfig<D: Decay = decay::Constant> {
    /// Gamma, the weight of future rewards relative to immediate ones
    ///
    /// **Default**: `1.0`
    pub discount_factor: f64,
    /// The TD learning rate, in `(0,1]`
    ///
    /// **Default**: `0.5`
    pub alpha: f64,
    /// Exploration rate schedule, evaluated at the episode index
    ///
    /// **Default**: A [`Constant`](decay::Constant) decay strategy with a value of `0.1`
    pub epsilon: D,
    /// Maximum number of steps per episode
    ///
    /// `None` lets an episode run until the environment reports termination, however long that
    /// takes. `Some(n)` truncates episodes after `n` steps.
    ///
    /// **Default**: `None`
    pub max_steps: Option<usize>,
}

impl Default for TdConfig<decay::Constant> {
    fn default() -> Self {
        Self {
            discount_factor: 1.0,
            alpha: 0.5,
            epsilon: decay::Constant::new(0.1),
            max_steps: None,
        }
    }
}

impl TdConfig<decay::Constant> {
    /// Configuration with a fixed exploration rate
    pub fn new(discount_factor: f64, alpha: f64, epsilon: f64) -> Self {
        Self {
            discount_factor,
            alpha,
            epsilon: decay::Constant::new(epsilon),
            max_steps: None,
        }
    }
}

impl<D: Decay> TdConfig<D> {
    /// Replace the exploration schedule
    pub fn with_epsilon<D2: Decay>(self, epsilon: D2) -> TdConfig<D2> {
        TdConfig {
            discount_factor: self.discount_factor,
            alpha: self.alpha,
            epsilon,
            max_steps: self.max_steps,
        }
    }

    /// Truncate episodes after `max_steps` steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Check every hyperparameter against its valid interval
    pub fn validate(&self) -> Result<()> {
        check_interval!("discount_factor", self.discount_factor, 0.0, 1.0);
        check_interval!("alpha", self.alpha, 0.0, 1.0);
        if self.alpha == 0.0 {
            return Err(Error::InvalidParameter {
                name: "alpha",
                value: self.alpha,
                min: f64::MIN_POSITIVE,
                max: 1.0,
            });
        }
        self.epsilon.validate_unit()?;
        if self.max_steps == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_steps",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

/// The result of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct Training<S: StateKey> {
    /// The learned action-value table
    pub q: QTable<S>,
    /// Return and length of every episode
    pub stats: EpisodeStats,
}

impl<S: StateKey> Training<S> {
    /// **Returns** `(q, rewards, lengths)`
    pub fn into_parts(self) -> (QTable<S>, Vec<f64>, Vec<usize>) {
        let (rewards, lengths) = self.stats.into_parts();
        (self.q, rewards, lengths)
    }
}
