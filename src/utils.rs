use std::collections::BTreeMap;

// ---------- Tune-ables ---------- //
pub const NUM_FEATURES: usize = 3;  // bias, nearest enemy, focus fire
pub const GAMMA: f64 = 0.9;  // Discount on the bootstrapped next value
pub const LEARNING_RATE: f64 = 0.0001;
pub const EPSILON: f64 = 0.02;  // Chance of a random target during exploration episodes
pub const DEFAULT_SEED: u64 = 12345678;
pub const WEIGHTS_PATH: &str = "agent_weights/weights.txt";

// ---------- Reward shaping ---------- //
pub const KILL_REWARD: Reward = 100.0;  // Given in full to every unit attacking the victim
pub const DEATH_PENALTY: Reward = -100.0;
pub const ACTION_COST: Reward = -0.1;  // Charged when an order is (re)issued

// ---------- Basic types (renamed for pretty) ---------- //
pub type UnitId = i32;
pub type PlayerId = u32;
pub type Turn = u32;
pub type Reward = f64;
pub type Features = Vec<f64>;  // Indexed by feature, slot 0 is the bias
pub type Weights = Vec<f64>;  // Same indexing as Features

/// Orders for this tick, keyed by the unit receiving them
pub type Commands = BTreeMap<UnitId, Command>;

/// The only order the agent gives
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Command {
    Attack { unit: UnitId, target: UnitId },
}

impl Command {
    #[inline] pub fn attack(unit: UnitId, target: UnitId) -> Command {
        Command::Attack { unit, target }
    }
}

/// Mean of a sample, 0 when there is nothing to average
pub fn mean(samples: &[Reward]) -> Reward {
    if samples.is_empty() { return 0.0; }
    samples.iter().sum::<Reward>() / samples.len() as Reward
}

/// Chebyshev distance between two grid positions
#[inline]
pub fn chebyshev(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}
