//! # Battle Views
//!
//! What the agent gets to see of the simulation: a view of the current state and
//! a view of what happened on earlier turns. The simulation itself lives elsewhere;
//! `BattleLog` is an in-memory record implementing both views so recorded or
//! scripted ticks can drive the agent.

use std::collections::BTreeMap;
use crate::utils::*;

// ---------- State ---------- //
#[derive(Debug, Clone, PartialEq)]
pub struct UnitView {
    pub id: UnitId,
    pub owner: PlayerId,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub template: String,
}

impl UnitView {
    #[inline] pub fn position(&self) -> (i32, i32) { (self.x, self.y) }
    #[inline] pub fn is_alive(&self) -> bool { self.hp > 0 }
}

pub trait StateView {
    fn turn_number(&self) -> Turn;
    /// None once the unit is gone from the map
    fn unit(&self, id: UnitId) -> Option<&UnitView>;
    /// Every unit the player currently controls, ascending
    fn unit_ids(&self, player: PlayerId) -> Vec<UnitId>;
}

// ---------- History ---------- //
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeathLog {
    pub controller: PlayerId,
    pub unit: UnitId,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DamageLog {
    pub attacker_controller: PlayerId,
    pub attacker: UnitId,
    pub defender_controller: PlayerId,
    pub defender: UnitId,
    pub damage: i32,
}

/// How a unit's standing order fared on a turn
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ActionFeedback { Completed, Failed, Incomplete }

impl ActionFeedback {
    /// The order is over, one way or another
    #[inline] pub fn concluded(self) -> bool {
        matches!(self, ActionFeedback::Completed | ActionFeedback::Failed)
    }
}

pub trait HistoryView {
    fn death_logs(&self, turn: Turn) -> Vec<DeathLog>;
    fn damage_logs(&self, turn: Turn) -> Vec<DamageLog>;
    fn command_feedback(&self, player: PlayerId, turn: Turn) -> BTreeMap<UnitId, ActionFeedback>;
}

// ---------- In-memory record ---------- //
/// Current board plus everything logged on each turn
#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    turn: Turn,
    units: BTreeMap<UnitId, UnitView>,
    deaths: BTreeMap<Turn, Vec<DeathLog>>,
    damage: BTreeMap<Turn, Vec<DamageLog>>,
    feedback: BTreeMap<(PlayerId, Turn), BTreeMap<UnitId, ActionFeedback>>,
}

impl BattleLog {
    pub fn new() -> Self { Self::default() }

    pub fn spawn(&mut self, id: UnitId, owner: PlayerId, position: (i32, i32), hp: i32, template: &str) -> &mut Self {
        self.units.insert(id, UnitView { id, owner, x: position.0, y: position.1, hp, template: template.to_string() });
        self
    }
    /// Spawn a footman (the unit type the agent commands by default)
    pub fn footman(&mut self, id: UnitId, owner: PlayerId, position: (i32, i32)) -> &mut Self {
        self.spawn(id, owner, position, 160, "Footman")
    }
    pub fn move_unit(&mut self, id: UnitId, position: (i32, i32)) -> &mut Self {
        if let Some(u) = self.units.get_mut(&id) {
            u.x = position.0;
            u.y = position.1;
        }
        self
    }
    /// Log damage on the current turn and take it off the defender's health
    pub fn hit(&mut self, attacker: (PlayerId, UnitId), defender: (PlayerId, UnitId), damage: i32) -> &mut Self {
        self.damage.entry(self.turn).or_default().push(DamageLog {
            attacker_controller: attacker.0,
            attacker: attacker.1,
            defender_controller: defender.0,
            defender: defender.1,
            damage,
        });
        if let Some(u) = self.units.get_mut(&defender.1) {
            u.hp = (u.hp - damage).max(0);
        }
        self
    }
    /// Log a death on the current turn and take the unit off the board
    pub fn kill(&mut self, controller: PlayerId, unit: UnitId) -> &mut Self {
        self.deaths.entry(self.turn).or_default().push(DeathLog { controller, unit });
        self.units.remove(&unit);
        self
    }
    pub fn report(&mut self, player: PlayerId, unit: UnitId, outcome: ActionFeedback) -> &mut Self {
        self.feedback.entry((player, self.turn)).or_default().insert(unit, outcome);
        self
    }
    /// Close the current turn, events logged from here on belong to the next one
    pub fn next_turn(&mut self) -> &mut Self {
        self.turn += 1;
        self
    }
}

impl StateView for BattleLog {
    fn turn_number(&self) -> Turn { self.turn }
    fn unit(&self, id: UnitId) -> Option<&UnitView> { self.units.get(&id) }
    fn unit_ids(&self, player: PlayerId) -> Vec<UnitId> {
        self.units.values().filter(|u| u.owner == player).map(|u| u.id).collect()
    }
}

impl HistoryView for BattleLog {
    fn death_logs(&self, turn: Turn) -> Vec<DeathLog> {
        self.deaths.get(&turn).cloned().unwrap_or_default()
    }
    fn damage_logs(&self, turn: Turn) -> Vec<DamageLog> {
        self.damage.get(&turn).cloned().unwrap_or_default()
    }
    fn command_feedback(&self, player: PlayerId, turn: Turn) -> BTreeMap<UnitId, ActionFeedback> {
        self.feedback.get(&(player, turn)).cloned().unwrap_or_default()
    }
}
