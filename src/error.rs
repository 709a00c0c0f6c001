use thiserror::Error;

/// Errors reported before or while training
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid value for `{name}`: {value} (must be in the interval [{min}, {max}])")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("`num_episodes` must be positive")]
    NoEpisodes,

    #[error("environment has an empty action space")]
    EmptyActionSpace,

    #[error("invalid decay schedule: `start - end` ({start} - {end}) must have the same sign as `rate` ({rate})")]
    InvalidDecay { rate: f64, start: f64, end: f64 },

    #[error("cannot sample from distribution: {0}")]
    InvalidDistribution(String),

    #[error("invalid transition model: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
