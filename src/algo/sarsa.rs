use rand::Rng;

use crate::{
    decay::{self, Decay},
    env::{Environment, Transition},
    exploration::EpsilonGreedy,
    stats::EpisodeStats,
    Result,
};

use super::{td_update, truncated, QTable, TdConfig, TdControl};

/// SARSA: on-policy temporal-difference control
///
/// Each update bootstraps from the value of the action the epsilon greedy policy actually
/// selects next, which then becomes the action taken:
///
/// Q(s, a) ← Q(s, a) + α(r + γ Q(s', a') - Q(s, a))
#[derive(Debug, Clone)]
pub struct Sarsa<D: Decay = decay::Constant> {
    config: TdConfig<D>,
}

impl Default for Sarsa<decay::Constant> {
    fn default() -> Self {
        Self::new(TdConfig::default())
    }
}

impl<D: Decay> Sarsa<D> {
    pub fn new(config: TdConfig<D>) -> Self {
        Self { config }
    }
}

impl<D: Decay> TdControl for Sarsa<D> {
    type Schedule = D;

    const NAME: &'static str = "sarsa";

    fn config(&self) -> &TdConfig<D> {
        &self.config
    }

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
        R: Rng + ?Sized,
    {
        let TdConfig {
            discount_factor,
            alpha,
            max_steps,
            ..
        } = self.config;

        let mut state = env.reset();
        let mut action = EpsilonGreedy::new(q, epsilon).sample(&state, rng)?;
        loop {
            let Transition {
                next_state,
                reward,
                done,
            } = env.transition(state, action);
            stats.record_step(episode, reward);

            let next_action = EpsilonGreedy::new(q, epsilon).sample(&next_state, rng)?;
            let target = reward + discount_factor * q.get(next_state)[next_action];
            td_update(q, state, action, target, alpha);
            (state, action) = (next_state, next_action);

            if done || truncated(max_steps, stats.lengths[episode], episode) {
                break;
            }
        }

        Ok(())
    }
}
