use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::battle::StateView;
use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::features::feature_vector;
use crate::q_function::q_value;
use crate::skirmish::Skirmish;
use crate::utils::*;

// ---------- Learner ---------- //
/// The linear Q-function together with the randomness and step sizes used to act on and train it
#[derive(Debug, Clone)]
pub struct Learner {
    pub weights: Weights,
    pub epsilon: f64,
    pub gamma: f64,
    pub learning_rate: f64,
    rng: StdRng,
}

impl Learner {
    /// Use stored weights if there are any, otherwise bias 1 and the rest uniform in [-1, 1)
    pub fn new(config: &AgentConfig, stored: Option<Weights>) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let weights = match stored {
            Some(w) if w.len() != NUM_FEATURES => {
                return Err(AgentError::WeightCount { expected: NUM_FEATURES, found: w.len() });
            }
            Some(w) => w,
            None => {
                let mut w = vec![1.0; NUM_FEATURES];
                for x in w.iter_mut().skip(1) {
                    *x = rng.random::<f64>() * 2.0 - 1.0;
                }
                w
            }
        };
        Ok(Self {
            weights,
            epsilon: config.epsilon,
            gamma: config.gamma,
            learning_rate: config.learning_rate,
            rng,
        })
    }

    pub fn set_weights(&mut self, weights: Weights) -> Result<()> {
        if weights.len() != NUM_FEATURES {
            return Err(AgentError::WeightCount { expected: NUM_FEATURES, found: weights.len() });
        }
        self.weights = weights;
        Ok(())
    }

    /// Q-value of sending `attacker` after `defender` in the current state
    pub fn q<S: StateView>(&self, skirmish: &Skirmish, state: &S, attacker: UnitId, defender: UnitId) -> Reward {
        q_value(&self.weights, &feature_vector(state, &skirmish.roster, &skirmish.targets, attacker, defender))
    }

    /// Highest-Q live enemy for the attacker, first enumerated on ties
    pub fn best_target<S: StateView>(&self, skirmish: &Skirmish, state: &S, attacker: UnitId) -> Option<UnitId> {
        let mut best: Option<(UnitId, Reward)> = None;
        for &enemy in skirmish.roster.enemies() {
            let q = self.q(skirmish, state, attacker, enemy);
            if best.map_or(true, |(_, bq)| q > bq) {
                best = Some((enemy, q));
            }
        }
        best.map(|(e, _)| e)
    }

    /// Epsilon-greedy target choice.
    /// `select_best` only probes for the greedy target; otherwise the choice is recorded
    /// in the target index and its features are kept for the next weight update.
    pub fn select<S: StateView>(&mut self, skirmish: &mut Skirmish, state: &S, attacker: UnitId,
                                select_best: bool, exploring: bool) -> Option<UnitId> {
        let n = skirmish.roster.enemies().len();
        let choice = if n == 0 {
            None
        } else if select_best || !exploring || self.rng.random::<f64>() >= self.epsilon {
            self.best_target(skirmish, state, attacker)
        } else {
            let idx = self.rng.random_range(0..n);
            let pick = skirmish.roster.enemies().iter().nth(idx).copied();
            debug!("Unit {} explores, picks {:?}", attacker, pick);
            pick
        };
        if select_best {
            return choice;
        }

        match choice {
            Some(target) => {
                // features are those the choice was scored on, before this unit joins its target
                skirmish.targets.release(attacker);
                let features = feature_vector(state, &skirmish.roster, &skirmish.targets, attacker, target);
                debug!("Unit {} -> {} with features {:?}", attacker, target, features);
                skirmish.snapshot(attacker, features);
                skirmish.targets.assign(attacker, target);
            }
            None => { skirmish.targets.release(attacker); }
        }
        choice
    }
}
