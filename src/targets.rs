use std::collections::{BTreeMap, BTreeSet};
use crate::utils::*;

// ---------- Target Index ---------- //
/// Who is attacking whom, indexed both ways.
/// Each attacker has at most one target, and a target with no attackers has no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetIndex {
    target_of: BTreeMap<UnitId, UnitId>,
    attackers: BTreeMap<UnitId, BTreeSet<UnitId>>,
}

impl TargetIndex {
    pub fn new() -> Self { Self::default() }

    /// Point an attacker at a new target, dropping whatever it was on before
    pub fn assign(&mut self, attacker: UnitId, target: UnitId) {
        self.release(attacker);
        self.target_of.insert(attacker, target);
        self.attackers.entry(target).or_default().insert(attacker);
    }

    /// Take an attacker out of the index, returning its old target
    pub fn release(&mut self, attacker: UnitId) -> Option<UnitId> {
        let target = self.target_of.remove(&attacker)?;
        if let Some(set) = self.attackers.get_mut(&target) {
            set.remove(&attacker);
            if set.is_empty() {
                self.attackers.remove(&target);
            }
        }
        Some(target)
    }

    /// Forget a target entirely (it died), returning who was on it
    pub fn clear_target(&mut self, target: UnitId) -> BTreeSet<UnitId> {
        let attackers = self.attackers.remove(&target).unwrap_or_default();
        for a in attackers.iter() {
            self.target_of.remove(a);
        }
        attackers
    }

    #[inline]
    pub fn target_of(&self, attacker: UnitId) -> Option<UnitId> {
        self.target_of.get(&attacker).copied()
    }

    pub fn attackers_of(&self, target: UnitId) -> Vec<UnitId> {
        self.attackers.get(&target).map(|s| s.iter().copied().collect()).unwrap_or_default()
    }

    pub fn is_attacking(&self, attacker: UnitId, target: UnitId) -> bool {
        self.target_of(attacker) == Some(target)
    }

    /// The target with the most attackers, first (lowest id) on ties
    pub fn most_attacked(&self) -> Option<UnitId> {
        let mut best: Option<(UnitId, usize)> = None;
        for (target, set) in self.attackers.iter() {
            if best.map_or(true, |(_, n)| set.len() > n) {
                best = Some((*target, set.len()));
            }
        }
        best.map(|(t, _)| t)
    }

    pub fn is_empty(&self) -> bool { self.target_of.is_empty() }
}
