/// Per-episode statistics of a training run
///
/// Both sequences are allocated at full length before training starts and each entry is written
/// only while its episode runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeStats {
    /// Sum of immediate rewards in each episode
    pub(crate) rewards: Vec<f64>,
    /// Number of steps taken in each episode
    pub(crate) lengths: Vec<usize>,
}

impl EpisodeStats {
    /// Zeroed statistics for `num_episodes` episodes
    pub fn new(num_episodes: usize) -> Self {
        Self {
            rewards: vec![0.0; num_episodes],
            lengths: vec![0; num_episodes],
        }
    }

    /// Record one step of `episode` that yielded `reward`
    ///
    /// **Panics** if `episode` is out of range
    pub fn record_step(&mut self, episode: usize, reward: f64) {
        self.rewards[episode] += reward;
        self.lengths[episode] += 1;
    }

    /// Number of episodes
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Sum of immediate rewards in each episode
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Number of steps taken in each episode
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Mean episode return, or `0.0` if there are no episodes
    pub fn mean_reward(&self) -> f64 {
        mean(&self.rewards)
    }

    /// Mean episode length, or `0.0` if there are no episodes
    pub fn mean_length(&self) -> f64 {
        if self.lengths.is_empty() {
            return 0.0;
        }
        self.lengths.iter().sum::<usize>() as f64 / self.lengths.len() as f64
    }

    /// Trailing moving average of the episode returns
    ///
    /// Entry `i` averages episodes `i + 1 - window ..= i`, or `0 ..= i` while fewer than `window`
    /// episodes are available. A `window` of zero is treated as one.
    pub fn moving_average(&self, window: usize) -> Vec<f64> {
        let window = window.max(1);
        let mut sum = 0.0;
        self.rewards
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                sum += r;
                if i >= window {
                    sum -= self.rewards[i - window];
                }
                sum / (i + 1).min(window) as f64
            })
            .collect()
    }

    /// **Returns** `(rewards, lengths)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<usize>) {
        (self.rewards, self.lengths)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preallocated() {
        let stats = EpisodeStats::new(5);
        assert_eq!(stats.len(), 5);
        assert_eq!(stats.rewards, vec![0.0; 5]);
        assert_eq!(stats.lengths, vec![0; 5]);
        assert!(EpisodeStats::new(0).is_empty());
    }

    #[test]
    fn record_step_accumulates() {
        let mut stats = EpisodeStats::new(2);
        stats.record_step(0, -1.0);
        stats.record_step(0, -1.0);
        stats.record_step(1, 5.0);

        assert_eq!(stats.rewards, [-2.0, 5.0]);
        assert_eq!(stats.lengths, [2, 1]);
        assert_eq!(stats.mean_reward(), 1.5);
        assert_eq!(stats.mean_length(), 1.5);
        assert_eq!(stats.len(), 2, "never resized");
        assert_eq!(stats.rewards(), [-2.0, 5.0]);
        assert_eq!(stats.lengths(), [2, 1]);
    }

    #[test]
    fn moving_average_functional() {
        let stats = EpisodeStats {
            rewards: vec![1.0, 3.0, 5.0, 7.0],
            lengths: vec![1; 4],
        };
        assert_eq!(stats.moving_average(2), [1.0, 2.0, 4.0, 6.0]);
        assert_eq!(stats.moving_average(0), stats.rewards);
        assert_eq!(stats.moving_average(10), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn empty_means() {
        let stats = EpisodeStats::default();
        assert_eq!(stats.mean_reward(), 0.0);
        assert_eq!(stats.mean_length(), 0.0);
        assert!(stats.moving_average(3).is_empty());
    }

    #[test]
    fn into_parts_functional() {
        let mut stats = EpisodeStats::new(1);
        stats.record_step(0, 2.5);
        assert_eq!(stats.into_parts(), (vec![2.5], vec![1]));
    }
}
