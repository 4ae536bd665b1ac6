//! # Reward Attribution
//!
//! Reads what happened on the previous turn and turns it into per-unit rewards:
//! - a friendly death costs the unit 100
//! - killing an enemy pays 100 to every unit that was on it
//! - damage taken is subtracted, damage dealt is paid to everyone on the victim
//! - a reissued order costs 0.1
//!
//! Units whose action just ended are handed to the learner (or only scored, when evaluating)
//! and those still alive are reported back as needing a new target.

use std::collections::{BTreeMap, BTreeSet};
use log::debug;
use crate::battle::{HistoryView, StateView};
use crate::policy::Learner;
use crate::skirmish::Skirmish;
use crate::utils::*;

/// How a friendly unit was treated by the enemy on the last turn
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Engagement { Untouched, AttackedByTarget, NotAttackedByTarget }

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settlement {
    /// Live units that need a new target this tick
    pub needs_action: BTreeSet<UnitId>,
    /// Orders that were simply repeated
    pub reissued: Commands,
    /// Every unit whose action concluded, dead ones included
    pub had_event: BTreeSet<UnitId>,
}

pub fn settle_tick<S: StateView, H: HistoryView>(learner: &mut Learner, skirmish: &mut Skirmish,
                                                 state: &S, history: &H, exploring: bool) -> Settlement {
    let mut out = Settlement::default();
    let turn = state.turn_number();
    if turn == 0 {
        return out;
    }
    let last = turn - 1;
    let me = skirmish.player;
    let mut my_dead = BTreeSet::new();
    let mut dead_enemies = BTreeSet::new();

    // Deaths
    for death in history.death_logs(last) {
        if death.controller == me {
            skirmish.roster.remove_friendly(death.unit);
            skirmish.add_reward(death.unit, DEATH_PENALTY);
            my_dead.insert(death.unit);
            out.had_event.insert(death.unit);
        } else if death.controller == skirmish.enemy_player {
            skirmish.roster.remove_enemy(death.unit);
            for unit in skirmish.targets.attackers_of(death.unit) {
                skirmish.add_reward(unit, KILL_REWARD);
                out.needs_action.insert(unit);
                out.had_event.insert(unit);
            }
            dead_enemies.insert(death.unit);
        }
    }

    // Damage
    let mut engagement: BTreeMap<UnitId, Engagement> = skirmish.roster.friendly().iter()
        .map(|&u| (u, Engagement::Untouched))
        .collect();
    for hit in history.damage_logs(last) {
        let d = hit.damage as Reward;
        if hit.defender_controller == me {
            skirmish.add_reward(hit.defender, -d);
            let by_target = skirmish.targets.is_attacking(hit.defender, hit.attacker);
            if let Some(e) = engagement.get_mut(&hit.defender) {
                if by_target {
                    *e = Engagement::AttackedByTarget;
                } else if *e == Engagement::Untouched {
                    *e = Engagement::NotAttackedByTarget;
                }
            }
        } else {
            for unit in skirmish.targets.attackers_of(hit.defender) {
                skirmish.add_reward(unit, d);
            }
        }
    }

    // Orders that finished or failed
    for (unit, feedback) in history.command_feedback(me, last) {
        if !feedback.concluded() {
            continue;
        }
        if !skirmish.roster.is_friendly(unit) {
            out.had_event.insert(unit);
            continue;
        }
        match skirmish.targets.target_of(unit) {
            Some(target) if dead_enemies.contains(&target) => {
                out.needs_action.insert(unit);
                out.had_event.insert(unit);
            }
            Some(target) if skirmish.roster.is_enemy(target) => {
                out.reissued.insert(unit, Command::attack(unit, target));
                skirmish.add_reward(unit, ACTION_COST);
            }
            _ => {}
        }
    }

    // Units left alone by the enemy they are chasing give up on it
    for (unit, e) in engagement {
        if e == Engagement::NotAttackedByTarget {
            out.needs_action.insert(unit);
            out.had_event.insert(unit);
        }
    }

    for &unit in out.had_event.iter() {
        if exploring {
            learner.update_weights(skirmish, state, unit);
        } else if let Some((_, r)) = skirmish.take_outstanding(unit) {
            skirmish.record_sample(r);
        }
        if my_dead.contains(&unit) {
            skirmish.forget(unit);
        }
    }
    for unit in my_dead.iter() {
        out.needs_action.remove(unit);
    }
    for enemy in dead_enemies {
        skirmish.targets.clear_target(enemy);
    }
    debug!("Turn {}: {} units need orders, {} reissued", turn, out.needs_action.len(), out.reissued.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{ActionFeedback, BattleLog};
    use crate::config::AgentConfig;
    use crate::roster::Roster;

    /// Friendlies 1, 2, 3 against enemies 10, 11; 1 and 2 are on 10, 3 is on 11
    fn engaged() -> (BattleLog, Skirmish, Learner) {
        let mut log = BattleLog::new();
        log.footman(1, 0, (0, 0)).footman(2, 0, (0, 1)).footman(3, 0, (0, 2))
            .footman(10, 1, (1, 0)).footman(11, 1, (1, 2));
        let roster = Roster::muster(&log, 0, 1, "footman");
        let mut skirmish = Skirmish::new(0, 1, roster);
        for (unit, target) in [(1, 10), (2, 10), (3, 11)] {
            skirmish.targets.assign(unit, target);
            skirmish.snapshot(unit, vec![1.0, 1.0, 1.0]);
            skirmish.charge_new_order(unit);
        }
        let learner = Learner::new(&AgentConfig::default(), Some(vec![1.0, 0.5, -0.3])).unwrap();
        (log, skirmish, learner)
    }

    fn close(a: Reward, b: Reward) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn test_first_tick_has_nothing_to_settle() {
        let (log, mut skirmish, mut learner) = engaged();
        let out = settle_tick(&mut learner, &mut skirmish, &log, &log, true);
        assert_eq!(out, Settlement::default());
    }

    #[test]
    fn test_kill_pays_every_attacker_and_clears_target() {
        let (mut log, mut skirmish, mut learner) = engaged();
        log.hit((0, 1), (1, 10), 7).kill(1, 10).next_turn();
        let out = settle_tick(&mut learner, &mut skirmish, &log, &log, false);

        assert_eq!(out.needs_action.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(skirmish.targets.attackers_of(10).is_empty());
        assert_eq!(skirmish.targets.target_of(1), None);
        assert_eq!(skirmish.targets.target_of(3), Some(11));
        // killing blow damage is shared too: -0.1 + 100 + 7
        assert_eq!(skirmish.samples().len(), 2);
        assert!(skirmish.samples().iter().all(|&r| close(r, 106.9)));
        assert!(!skirmish.roster.is_enemy(10));
    }

    #[test]
    fn test_third_party_death_pays_nobody() {
        let (mut log, mut skirmish, mut learner) = engaged();
        log.kill(2, 10).next_turn();
        let out = settle_tick(&mut learner, &mut skirmish, &log, &log, false);

        assert!(out.needs_action.is_empty());
        assert!(out.had_event.is_empty());
        assert!(skirmish.roster.is_enemy(10));
        assert_eq!(skirmish.targets.attackers_of(10), vec![1, 2]);
        assert_eq!(skirmish.reward(1), Some(ACTION_COST));
    }

    #[test]
    fn test_death_and_kill_compound_in_one_tick() {
        let (mut log, mut skirmish, mut learner) = engaged();
        log.kill(0, 1).kill(1, 10).next_turn();
        let out = settle_tick(&mut learner, &mut skirmish, &log, &log, false);

        // unit 1 pays for dying and is still paid for the kill
        assert!(close(skirmish.samples()[0], -0.1 - 100.0 + 100.0));
        assert!(close(skirmish.samples()[1], 99.9));
        assert_eq!(out.needs_action.iter().copied().collect::<Vec<_>>(), vec![2]);
        assert!(out.had_event.contains(&1));
        assert!(!skirmish.roster.is_friendly(1));
        assert!(skirmish.reward(1).is_none());
    }

    #[test]
    fn test_damage_taken_and_dealt() {
        let (mut log, mut skirmish, mut learner) = engaged();
        log.hit((1, 11), (0, 3), 9)   // 3 is hit by its own target
            .hit((0, 3), (1, 11), 4)
            .next_turn();
        let out = settle_tick(&mut learner, &mut skirmish, &log, &log, false);
        assert!(out.needs_action.is_empty());
        assert!(close(skirmish.reward(3).unwrap(), -0.1 - 9.0 + 4.0));
        assert!(close(skirmish.reward(1).unwrap(), -0.1));
    }

    #[test]
    fn test_hit_by_someone_else_forces_retarget() {
        let (mut log, mut skirmish, mut learner) = engaged();
        log.hit((1, 11), (0, 1), 5)   // 1 chases 10 but 11 is hitting it
            .hit((1, 10), (0, 3), 2)  // 3 is hit by a stranger first...
            .hit((1, 11), (0, 3), 2)  // ...and then by its own target
            .next_turn();
        let out = settle_tick(&mut learner, &mut skirmish, &log, &log, false);
        assert_eq!(out.needs_action.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(skirmish.samples().len(), 1);
        assert!(close(skirmish.samples()[0], -5.1));
    }

    #[test]
    fn test_feedback_reissues_or_frees() {
        let (mut log, mut skirmish, mut learner) = engaged();
        log.kill(1, 11)
            .report(0, 1, ActionFeedback::Completed)
            .report(0, 2, ActionFeedback::Incomplete)
            .report(0, 3, ActionFeedback::Failed)
            .next_turn();
        let out = settle_tick(&mut learner, &mut skirmish, &log, &log, false);

        assert_eq!(out.reissued.get(&1), Some(&Command::attack(1, 10)));
        assert!(close(skirmish.reward(1).unwrap(), -0.2));
        assert!(!out.reissued.contains_key(&2));
        assert!(out.needs_action.contains(&3));
        assert!(!out.needs_action.contains(&1));
    }

    #[test]
    fn test_only_exploration_moves_weights() {
        let (mut log, mut skirmish, mut learner) = engaged();
        log.kill(1, 10).next_turn();
        settle_tick(&mut learner, &mut skirmish, &log, &log, false);
        assert_eq!(learner.weights, vec![1.0, 0.5, -0.3]);

        let (mut log, mut skirmish, mut learner) = engaged();
        log.kill(1, 10).next_turn();
        settle_tick(&mut learner, &mut skirmish, &log, &log, true);
        assert_eq!(learner.weights[0], 1.0);
        assert!(learner.weights[1] > 0.5);
        assert_eq!(skirmish.samples().len(), 2);
    }
}
