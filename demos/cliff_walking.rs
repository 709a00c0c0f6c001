use std::{error::Error, fs, path::Path};

use rand::{rngs::StdRng, SeedableRng};
use td_control::{
    env::{TabularModel, Transition},
    QLearning, Sarsa, TdConfig, TdControl,
};

const NUM_EPISODES: usize = 500;
const ROWS: usize = 4;
const COLS: usize = 12;
const START: usize = (ROWS - 1) * COLS;
const GOAL: usize = ROWS * COLS - 1;

/// The 4x12 cliff walk as an explicit transition model
///
/// Actions: 0 up, 1 right, 2 down, 3 left
fn cliff_walking() -> Result<TabularModel, td_control::Error> {
    TabularModel::from_fn(ROWS * COLS, 4, START, |s, a| {
        let (row, col) = (s / COLS, s % COLS);
        let (row, col) = match a {
            0 => (row.saturating_sub(1), col),
            1 => (row, (col + 1).min(COLS - 1)),
            2 => ((row + 1).min(ROWS - 1), col),
            _ => (row, col.saturating_sub(1)),
        };
        let next = row * COLS + col;
        if row == ROWS - 1 && col > 0 && col < COLS - 1 {
            Transition {
                next_state: START,
                reward: -100.0,
                done: false,
            }
        } else {
            Transition {
                next_state: next,
                reward: -1.0,
                done: next == GOAL,
            }
        }
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/out");
    fs::create_dir_all(path)?;

    let config = TdConfig::default();
    let mut env = cliff_walking()?;

    let mut rng = StdRng::seed_from_u64(0);
    let q_learning = QLearning::new(config.clone()).train(&mut env, NUM_EPISODES, &mut rng)?;
    let mut rng = StdRng::seed_from_u64(0);
    let sarsa = Sarsa::new(config).train(&mut env, NUM_EPISODES, &mut rng)?;

    let mut wtr = csv::Writer::from_path(path.join("cliff_walking.csv"))?;
    wtr.write_record([
        "episode",
        "q_learning_reward",
        "sarsa_reward",
        "q_learning_steps",
        "sarsa_steps",
    ])?;
    for i in 0..NUM_EPISODES {
        wtr.write_record(&[
            i.to_string(),
            q_learning.stats.rewards()[i].to_string(),
            sarsa.stats.rewards()[i].to_string(),
            q_learning.stats.lengths()[i].to_string(),
            sarsa.stats.lengths()[i].to_string(),
        ])?;
    }
    wtr.flush()?;

    for (name, training) in [("q-learning", &q_learning), ("sarsa", &sarsa)] {
        let smoothed = training.stats.moving_average(50);
        println!(
            "{:<10} mean return {:>8.2}, last 50 episodes {:>8.2}, V(start) {:>8.2}",
            name,
            training.stats.mean_reward(),
            smoothed.last().copied().unwrap_or_default(),
            training.q.state_values().get(&START).copied().unwrap_or_default(),
        );
    }

    Ok(())
}
