//! # Weight Updates
//!
//! Semi-gradient TD(0) on the linear Q-function. Each update consumes the snapshot taken
//! when a unit picked its action and the reward it gathered since then, bootstrapping off
//! the greedy value of its next choice. The bias weight is left alone so the function keeps
//! its offset.

use log::debug;
use crate::battle::StateView;
use crate::features::feature_vector;
use crate::policy::Learner;
use crate::q_function::q_value;
use crate::skirmish::Skirmish;
use crate::utils::*;

/// One gradient step: L = -(r - q + gamma * q_next), w[i] -= alpha * L * phi[i] for i >= 1
pub fn td_step(weights: &mut [f64], phi: &[f64], reward: Reward, q_next: Reward, gamma: f64, alpha: f64) {
    let q = q_value(weights, phi);
    let loss = -(reward - q + gamma * q_next);
    for i in 1..weights.len() {
        weights[i] -= alpha * loss * phi[i];
    }
}

impl Learner {
    /// Learn from the unit's finished action. Returns the reward that was consumed,
    /// or None when the unit had no action outstanding.
    pub fn update_weights<S: StateView>(&mut self, skirmish: &mut Skirmish, state: &S, unit: UnitId) -> Option<Reward> {
        let (phi, reward) = skirmish.take_outstanding(unit)?;
        skirmish.record_sample(reward);
        let alive = skirmish.roster.is_friendly(unit);
        let q_next = if alive {
            match self.select(skirmish, state, unit, true, true) {
                Some(target) => q_value(&self.weights, &feature_vector(state, &skirmish.roster, &skirmish.targets, unit, target)),
                None => 0.0,
            }
        } else {
            0.0
        };
        let (gamma, alpha) = (self.gamma, self.learning_rate);
        td_step(&mut self.weights, &phi, reward, q_next, gamma, alpha);
        debug!("Unit {} r={:.2} q_next={:.3} -> weights {:?}", unit, reward, q_next, self.weights);
        if !alive {
            skirmish.forget(unit);
        }
        Some(reward)
    }
}
