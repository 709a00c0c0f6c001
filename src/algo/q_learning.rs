use rand::Rng;

use crate::{
    decay::{self, Decay},
    env::{Environment, Transition},
    exploration::EpsilonGreedy,
    stats::EpisodeStats,
    util::max_value,
    Result,
};

use super::{td_update, truncated, QTable, TdConfig, TdControl};

/// Q-learning: off-policy temporal-difference control
///
/// Actions are drawn from an epsilon greedy policy over the table, but each update bootstraps
/// from the best action value at the next state, whatever the policy goes on to do:
///
/// Q(s, a) ← Q(s, a) + α(r + γ max<sub>a'</sub> Q(s', a') - Q(s, a))
#[derive(Debug, Clone)]
pub struct QLearning<D: Decay = decay::Constant> {
    config: TdConfig<D>,
}

impl Default for QLearning<decay::Constant> {
    fn default() -> Self {
        Self::new(TdConfig::default())
    }
}

impl<D: Decay> QLearning<D> {
    pub fn new(config: TdConfig<D>) -> Self {
        Self { config }
    }
}

impl<D: Decay> TdControl for QLearning<D> {
    type Schedule = D;

    const NAME: &'static str = "q-learning";

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
        loop {
            let action = EpsilonGreedy::new(q, epsilon).sample(&state, rng)?;
            let Transition {
                next_state,
                reward,
                done,
            } = env.transition(state, action);
            stats.record_step(episode, reward);

            let target = reward + discount_factor * max_value(q.get(next_state));
            td_update(q, state, action, target, alpha);
            state = next_state;

            if done || truncated(max_steps, stats.lengths[episode], episode) {
                break;
            }
        }

        Ok(())
    }
}
