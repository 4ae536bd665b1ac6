use std::collections::BTreeMap;
use crate::roster::Roster;
use crate::targets::TargetIndex;
use crate::utils::*;

// ---------- Skirmish ---------- //
/// Everything the agent tracks for one episode. Built at the first tick, dropped at the last.
#[derive(Debug, Clone)]
pub struct Skirmish {
    pub player: PlayerId,
    pub enemy_player: PlayerId,
    pub roster: Roster,
    pub targets: TargetIndex,
    /// Features of the (state, action) each unit is currently carrying out
    previous_features: BTreeMap<UnitId, Features>,
    /// Reward each unit has collected since its current order was given
    cumulative_reward: BTreeMap<UnitId, Reward>,
    /// Every reward that was consumed this episode (by an update or by bookkeeping)
    samples: Vec<Reward>,
}

impl Skirmish {
    pub fn new(player: PlayerId, enemy_player: PlayerId, roster: Roster) -> Self {
        Self {
            player,
            enemy_player,
            roster,
            targets: TargetIndex::new(),
            previous_features: BTreeMap::new(),
            cumulative_reward: BTreeMap::new(),
            samples: vec![],
        }
    }

    /// Remember what the world looked like when the unit picked its action
    pub fn snapshot(&mut self, unit: UnitId, features: Features) {
        self.previous_features.insert(unit, features);
    }
    /// A fresh order starts its reward off with the cost of giving it
    pub fn charge_new_order(&mut self, unit: UnitId) {
        self.cumulative_reward.insert(unit, ACTION_COST);
    }
    /// Credit (or debit) a unit with an outstanding order, others are ignored
    pub fn add_reward(&mut self, unit: UnitId, r: Reward) {
        if let Some(total) = self.cumulative_reward.get_mut(&unit) {
            *total += r;
        }
    }

    pub fn reward(&self, unit: UnitId) -> Option<Reward> { self.cumulative_reward.get(&unit).copied() }
    pub fn previous_features(&self, unit: UnitId) -> Option<&Features> { self.previous_features.get(&unit) }

    /// Hand over the unit's snapshot and reward, leaving it with no outstanding action
    pub fn take_outstanding(&mut self, unit: UnitId) -> Option<(Features, Reward)> {
        let features = self.previous_features.remove(&unit);
        let reward = self.cumulative_reward.remove(&unit);
        match (features, reward) {
            (Some(f), r) => Some((f, r.unwrap_or(0.0))),
            (None, _) => None,
        }
    }

    /// Drop all traces of a unit that is gone for good
    pub fn forget(&mut self, unit: UnitId) {
        self.previous_features.remove(&unit);
        self.cumulative_reward.remove(&unit);
        self.targets.release(unit);
    }

    pub fn record_sample(&mut self, r: Reward) { self.samples.push(r); }
    pub fn samples(&self) -> &[Reward] { &self.samples }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewards_only_accrue_on_outstanding_orders() {
        let mut skirmish = Skirmish::new(0, 1, Roster::from_ids(vec![1, 2], vec![10]));
        skirmish.charge_new_order(1);
        skirmish.add_reward(1, 5.0);
        skirmish.add_reward(2, 5.0);
        assert!((skirmish.reward(1).unwrap() - 4.9).abs() < 1e-12);
        assert_eq!(skirmish.reward(2), None);
    }

    #[test]
    fn test_take_outstanding_clears_unit() {
        let mut skirmish = Skirmish::new(0, 1, Roster::from_ids(vec![1], vec![10]));
        skirmish.snapshot(1, vec![1.0, 1.0, -1.0]);
        skirmish.charge_new_order(1);
        let (f, r) = skirmish.take_outstanding(1).unwrap();
        assert_eq!(f, vec![1.0, 1.0, -1.0]);
        assert_eq!(r, ACTION_COST);
        assert!(skirmish.take_outstanding(1).is_none());
        assert!(skirmish.previous_features(1).is_none());
    }

    #[test]
    fn test_forget_releases_target() {
        let mut skirmish = Skirmish::new(0, 1, Roster::from_ids(vec![1], vec![10]));
        skirmish.targets.assign(1, 10);
        skirmish.snapshot(1, vec![1.0, 1.0, 1.0]);
        skirmish.forget(1);
        assert!(skirmish.targets.attackers_of(10).is_empty());
        assert!(skirmish.previous_features(1).is_none());
    }
}
