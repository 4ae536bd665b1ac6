use std::collections::BTreeSet;
use log::warn;
use crate::battle::StateView;
use crate::utils::*;

// ---------- Roster ---------- //
/// Who is still fighting on each side. Filled once per episode, only shrinks after that.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    friendly: BTreeSet<UnitId>,
    enemy: BTreeSet<UnitId>,
}

impl Roster {
    /// Take every unit of the given template from both sides of the board
    pub fn muster<S: StateView>(state: &S, player: PlayerId, enemy_player: PlayerId, template: &str) -> Self {
        let pick = |owner: PlayerId| -> BTreeSet<UnitId> {
            state.unit_ids(owner).into_iter().filter(|&id| {
                match state.unit(id) {
                    Some(u) if u.template.eq_ignore_ascii_case(template) => true,
                    Some(u) => { warn!("Unknown unit type: {}", u.template.to_lowercase()); false }
                    None => false,
                }
            }).collect()
        };
        Self { friendly: pick(player), enemy: pick(enemy_player) }
    }

    pub fn from_ids<I: IntoIterator<Item=UnitId>, J: IntoIterator<Item=UnitId>>(friendly: I, enemy: J) -> Self {
        Self { friendly: friendly.into_iter().collect(), enemy: enemy.into_iter().collect() }
    }

    #[inline] pub fn friendly(&self) -> &BTreeSet<UnitId> { &self.friendly }
    #[inline] pub fn enemies(&self) -> &BTreeSet<UnitId> { &self.enemy }
    #[inline] pub fn is_friendly(&self, id: UnitId) -> bool { self.friendly.contains(&id) }
    #[inline] pub fn is_enemy(&self, id: UnitId) -> bool { self.enemy.contains(&id) }

    /// Returns whether the unit was still on the roster
    pub fn remove_friendly(&mut self, id: UnitId) -> bool { self.friendly.remove(&id) }
    pub fn remove_enemy(&mut self, id: UnitId) -> bool { self.enemy.remove(&id) }

    /// Everything counts as a win except being wiped out by a surviving enemy
    pub fn is_win(&self) -> bool {
        !(self.friendly.is_empty() && !self.enemy.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattleLog;

    #[test]
    fn test_muster_filters_template() {
        let mut log = BattleLog::new();
        log.footman(1, 0, (0, 0)).footman(2, 0, (0, 1))
            .spawn(3, 0, (0, 2), 100, "Archer")
            .footman(10, 1, (5, 5)).spawn(11, 1, (5, 6), 160, "FOOTMAN");
        let roster = Roster::muster(&log, 0, 1, "footman");
        assert_eq!(roster.friendly().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(roster.enemies().iter().copied().collect::<Vec<_>>(), vec![10, 11]);
    }

    #[test]
    fn test_win_rules() {
        assert!(Roster::from_ids(vec![1], vec![2]).is_win());
        assert!(Roster::from_ids(vec![1], vec![]).is_win());
        assert!(Roster::from_ids(vec![], vec![]).is_win());
        assert!(!Roster::from_ids(vec![], vec![2]).is_win());
    }

    #[test]
    fn test_removal_reports_membership() {
        let mut roster = Roster::from_ids(vec![1, 2], vec![5]);
        assert!(roster.remove_friendly(1));
        assert!(!roster.remove_friendly(1));
        assert!(roster.remove_enemy(5));
        assert!(roster.enemies().is_empty());
    }
}
