use log::{debug, info, trace, warn};
use rand::{thread_rng, Rng};

use crate::{
    decay::Decay,
    env::{Environment, StateKey},
    stats::EpisodeStats,
    Error, Result,
};

mod config;
mod q_learning;
mod q_table;
mod sarsa;

pub use config::{TdConfig, Training};
pub use q_learning::QLearning;
pub use q_table::QTable;
pub use sarsa::Sarsa;

/// A tabular temporal-difference control algorithm
///
/// Implementors provide the per-episode loop; the provided [`train`](TdControl::train) handles
/// validation, allocation of the table and statistics, the exploration schedule and logging.
pub trait TdControl {
    /// Exploration schedule type
    type Schedule: Decay;

    /// Name used in log output
    const NAME: &'static str;

    fn config(&self) -> &TdConfig<Self::Schedule>;

    /// Run episode `episode` to termination (or truncation), updating `q` after every step
    /// and recording each step in `stats`
    fn run_episode<E, R>(
        &self,
        q: &mut QTable<E::State>,
        env: &mut E,
        episode: usize,
        epsilon: f64,
        stats: &mut EpisodeStats,
        rng: &mut R,
    ) -> Result<()>
    where
        E: Environment,
        R: Rng + ?Sized;

    /// Train a fresh action-value table over `num_episodes` episodes
    ///
    /// All preconditions are checked before the first episode runs.
    fn train<E, R>(
        &self,
        env: &mut E,
        num_episodes: usize,
        rng: &mut R,
    ) -> Result<Training<E::State>>
    where
        E: Environment,
        R: Rng + ?Sized,
    {
        let config = self.config();
        config.validate()?;
        if num_episodes == 0 {
            return Err(Error::NoEpisodes);
        }
        let num_actions = env.num_actions();
        if num_actions == 0 {
            return Err(Error::EmptyActionSpace);
        }

        let epsilons = epsilon_schedule(&config.epsilon, num_episodes)?;

        info!(
            "{}: training for {} episodes (gamma={}, alpha={}, epsilon={}, actions={})",
            Self::NAME,
            num_episodes,
            config.discount_factor,
            config.alpha,
            epsilons[0],
            num_actions
        );

        let mut q = QTable::new(num_actions);
        let mut stats = EpisodeStats::new(num_episodes);
        for (episode, &epsilon) in epsilons.iter().enumerate() {
            self.run_episode(&mut q, env, episode, epsilon, &mut stats, rng)?;
            debug!(
                "{}: episode {} return={} length={} epsilon={}",
                Self::NAME,
                episode,
                stats.rewards[episode],
                stats.lengths[episode],
                epsilon
            );
        }

        info!(
            "{}: done, mean return {:.3}, mean length {:.1}, {} states visited",
            Self::NAME,
            stats.mean_reward(),
            stats.mean_length(),
            q.len()
        );

        Ok(Training { q, stats })
    }
}

/// Exploration rate of every episode, clamped into `[0,1]`
///
/// Fails if the schedule yields a non-finite value for any episode, so a bad schedule is caught
/// before training starts.
fn epsilon_schedule<D: Decay>(schedule: &D, num_episodes: usize) -> Result<Vec<f64>> {
    (0..num_episodes)
        .map(|episode| {
            let epsilon = schedule.evaluate(episode as f64);
            if epsilon.is_finite() {
                Ok(epsilon.clamp(0.0, 1.0))
            } else {
                Err(Error::InvalidParameter {
                    name: "epsilon",
                    value: epsilon,
                    min: 0.0,
                    max: 1.0,
                })
            }
        })
        .collect()
}

/// Move Q(state, action) toward `target` by a step of size `alpha`
fn td_update<S: StateKey>(q: &mut QTable<S>, state: S, action: usize, target: f64, alpha: f64) {
    let current = q.get(state)[action];
    let td_error = target - current;
    trace!(
        "Q({:?}, {}) = {} target={} td_error={}",
        state,
        action,
        current,
        target,
        td_error
    );
    q.set(state, action, current + alpha * td_error);
}

/// Whether an episode that has taken `steps` steps must stop short of termination
fn truncated(max_steps: Option<usize>, steps: usize, episode: usize) -> bool {
    match max_steps {
        Some(max) if steps >= max => {
            warn!(
                "episode {} truncated after {} steps without reaching a terminal state",
                episode, steps
            );
            true
        }
        _ => false,
    }
}

/// Off-policy TD control with a fixed exploration rate
///
/// Uses `rand::thread_rng()`. See [`QLearning`] for decaying exploration, step limits and seeded
/// random number generators.
pub fn q_learning<E: Environment>(
    env: &mut E,
    num_episodes: usize,
    discount_factor: f64,
    alpha: f64,
    epsilon: f64,
) -> Result<Training<E::State>> {
    QLearning::new(TdConfig::new(discount_factor, alpha, epsilon)).train(
        env,
        num_episodes,
        &mut thread_rng(),
    )
}

/// On-policy TD control with a fixed exploration rate
///
/// Uses `rand::thread_rng()`. See [`Sarsa`] for decaying exploration, step limits and seeded
/// random number generators.
pub fn sarsa<E: Environment>(
    env: &mut E,
    num_episodes: usize,
    discount_factor: f64,
    alpha: f64,
    epsilon: f64,
) -> Result<Training<E::State>> {
    Sarsa::new(TdConfig::new(discount_factor, alpha, epsilon)).train(
        env,
        num_episodes,
        &mut thread_rng(),
    )
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        decay,
        env::{
            tests::{Chain, OneStep},
            Transition,
        },
    };

    /// Passes validation but breaks down after `after` episodes
    struct Broken {
        after: f64,
    }

    impl Decay for Broken {
        fn evaluate(&self, t: f64) -> f64 {
            if t < self.after {
                0.1
            } else {
                f64::NAN
            }
        }

        fn validate_unit(&self) -> Result<()> {
            Ok(())
        }
    }

    /// Counts episodes started
    struct Resets {
        count: usize,
    }

    impl Environment for Resets {
        type State = ();

        fn num_actions(&self) -> usize {
            2
        }

        fn reset(&mut self) -> Self::State {
            self.count += 1;
        }

        fn transition(&mut self, _state: Self::State, _action: usize) -> Transition<Self::State> {
            Transition {
                next_state: (),
                reward: 1.0,
                done: true,
            }
        }
    }

    #[test]
    fn td_update_functional() {
        let mut q = QTable::new(2);
        td_update(&mut q, 3u8, 1, 4.0, 0.5);
        assert_eq!(q.get(3), [0.0, 2.0]);
        td_update(&mut q, 3u8, 1, 4.0, 0.5);
        assert_eq!(q.get(3), [0.0, 3.0]);
        td_update(&mut q, 3u8, 0, -1.0, 1.0);
        assert_eq!(q.get(3), [-1.0, 3.0], "alpha of 1 replaces the value");
    }

    #[test]
    fn truncated_functional() {
        assert!(!truncated(None, usize::MAX, 0));
        assert!(!truncated(Some(3), 2, 0));
        assert!(truncated(Some(3), 3, 0));
    }

    #[test]
    fn entry_points_single_step() {
        let mut env = OneStep {
            reward: 2.5,
            actions: 3,
        };
        for training in [
            q_learning(&mut env, 1, 1.0, 0.5, 0.1).unwrap(),
            sarsa(&mut env, 1, 1.0, 0.5, 0.1).unwrap(),
        ] {
            let (q, rewards, lengths) = training.into_parts();
            assert_eq!(rewards, [2.5]);
            assert_eq!(lengths, [1]);
            let row = q.peek(&0).unwrap();
            assert_eq!(row.iter().filter(|&&v| v == 1.25).count(), 1);
        }
    }

    #[test]
    fn preconditions_checked_first() {
        let mut env = Chain { len: 4 };
        assert_eq!(
            q_learning(&mut env, 0, 1.0, 0.5, 0.1).unwrap_err(),
            Error::NoEpisodes
        );
        assert_eq!(
            sarsa(&mut env, 0, 1.0, 0.5, 0.1).unwrap_err(),
            Error::NoEpisodes
        );
        assert!(matches!(
            sarsa(&mut env, 10, 1.0, 0.5, 2.0),
            Err(Error::InvalidParameter {
                name: "epsilon",
                ..
            })
        ));
        assert!(matches!(
            q_learning(&mut env, 10, 1.0, 0.0, 0.1),
            Err(Error::InvalidParameter { name: "alpha", .. })
        ));

        let mut empty = OneStep {
            reward: 1.0,
            actions: 0,
        };
        assert_eq!(
            q_learning(&mut empty, 1, 1.0, 0.5, 0.1).unwrap_err(),
            Error::EmptyActionSpace
        );
        assert_eq!(
            sarsa(&mut empty, 1, 1.0, 0.5, 0.1).unwrap_err(),
            Error::EmptyActionSpace
        );
    }

    #[test]
    fn epsilon_schedule_functional() {
        let schedule = decay::Linear::new(-0.5, 0.0, 1.0).unwrap();
        assert_eq!(epsilon_schedule(&schedule, 4).unwrap(), [0.0, 0.5, 1.0, 1.0]);
        assert!(matches!(
            epsilon_schedule(&Broken { after: 2.0 }, 3),
            Err(Error::InvalidParameter { name: "epsilon", .. })
        ));
    }

    #[test]
    fn non_finite_epsilon_fails_before_training() {
        let mut env = Resets { count: 0 };
        let mut rng = StdRng::seed_from_u64(0);
        let config = TdConfig::default().with_epsilon(Broken { after: 799.0 });

        let result = QLearning::new(config).train(&mut env, 800, &mut rng);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "epsilon", .. })
        ));
        let config = TdConfig::default().with_epsilon(Broken { after: 799.0 });
        assert!(Sarsa::new(config).train(&mut env, 800, &mut rng).is_err());
        assert_eq!(env.count, 0, "no episode started");

        let config = TdConfig::default().with_epsilon(Broken { after: 800.0 });
        let training = QLearning::new(config).train(&mut env, 800, &mut rng).unwrap();
        assert_eq!(env.count, 800);
        assert_eq!(training.stats.len(), 800);
    }

    #[test]
    fn trains_with_every_schedule() {
        let len = 5;
        let inverse_time = TdConfig::default()
            .with_epsilon(decay::InverseTime::new(0.05, 0.5, 0.01).unwrap());
        let step = TdConfig::default()
            .with_epsilon(decay::Step::new(0.5, 0.4, 0.01, 50.0).unwrap());
        let linear = TdConfig::default()
            .with_epsilon(decay::Linear::new(0.002, 0.5, 0.01).unwrap());
        let exponential = TdConfig::default()
            .with_epsilon(decay::Exponential::new(0.02, 0.5, 0.01).unwrap());

        let mut rng = StdRng::seed_from_u64(31);
        let trainings = [
            QLearning::new(inverse_time.clone()).train(&mut Chain { len }, 400, &mut rng),
            Sarsa::new(inverse_time).train(&mut Chain { len }, 400, &mut rng),
            QLearning::new(step.clone()).train(&mut Chain { len }, 400, &mut rng),
            Sarsa::new(step).train(&mut Chain { len }, 400, &mut rng),
            QLearning::new(linear).train(&mut Chain { len }, 400, &mut rng),
            Sarsa::new(exponential).train(&mut Chain { len }, 400, &mut rng),
        ];

        for training in trainings {
            let training = training.unwrap();
            assert_eq!(training.stats.len(), 400);
            for s in 0..len - 1 {
                assert_eq!(training.q.greedy_action(&s), 1, "moves right in state {}", s);
            }
        }
    }
}
