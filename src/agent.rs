//! # Squad Agent
//!
//! The agent the simulation talks to. It is called once at the start of an episode,
//! once per tick after that, and once when the episode is over:
//! - **initial_step**: work out the phase, muster both sides, hand out first targets
//! - **middle_step**: settle last turn's rewards, learn, retarget idle units
//! - **terminal_step**: count the win, close the episode, save the weights

use log::{info, warn};
use crate::battle::{HistoryView, StateView};
use crate::config::AgentConfig;
use crate::error::Result;
use crate::policy::Learner;
use crate::rewards::settle_tick;
use crate::roster::Roster;
use crate::schedule::{Checkpoint, Phase, Schedule};
use crate::skirmish::Skirmish;
use crate::utils::*;
use crate::weights::WeightFile;

/// How an episode ended
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeOutcome {
    pub episode: usize,
    pub phase: Phase,
    pub won: bool,
    pub checkpoint: Option<Checkpoint>,
}

pub struct RLAgent {
    config: AgentConfig,
    learner: Learner,
    schedule: Schedule,
    store: WeightFile,
    skirmish: Option<Skirmish>,
}

impl RLAgent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let store = WeightFile::new(&config.weights_path);
        let stored = if config.load_weights { store.load()? } else { None };
        if stored.is_none() {
            info!("Starting from random weights (seed {})", config.seed);
        }
        let learner = Learner::new(&config, stored)?;
        info!("Running {} episodes.", config.episodes);
        Ok(Self { config, learner, schedule: Schedule::new(), store, skirmish: None })
    }

    pub fn config(&self) -> &AgentConfig { &self.config }
    pub fn weights(&self) -> &[f64] { &self.learner.weights }
    pub fn learner_mut(&mut self) -> &mut Learner { &mut self.learner }
    pub fn schedule(&self) -> &Schedule { &self.schedule }
    /// The episode in progress, if any
    pub fn skirmish(&self) -> Option<&Skirmish> { self.skirmish.as_ref() }
    pub fn phase(&self) -> Phase { self.schedule.phase() }
    /// All the configured episodes have been started
    pub fn finished(&self) -> bool { self.schedule.episode() >= self.config.episodes }

    pub fn initial_step<S: StateView, H: HistoryView>(&mut self, state: &S, history: &H) -> Commands {
        if self.finished() {
            warn!("Episode {} is past the {} configured", self.schedule.episode(), self.config.episodes);
        }
        let phase = self.schedule.phase();
        info!("Episode {} starts ({:?})", self.schedule.episode(), phase);
        let roster = Roster::muster(state, self.config.player, self.config.enemy_player, &self.config.unit_template);
        self.skirmish = Some(Skirmish::new(self.config.player, self.config.enemy_player, roster));
        self.middle_step(state, history)
    }

    pub fn middle_step<S: StateView, H: HistoryView>(&mut self, state: &S, history: &H) -> Commands {
        let exploring = self.schedule.phase().is_exploring();
        let skirmish = match self.skirmish.as_mut() {
            Some(s) => s,
            None => {
                warn!("Tick {} arrived outside of an episode", state.turn_number());
                return Commands::new();
            }
        };
        let (mut commands, idle) = if state.turn_number() == 0 {
            (Commands::new(), skirmish.roster.friendly().clone())
        } else {
            let settled = settle_tick(&mut self.learner, skirmish, state, history, exploring);
            (settled.reissued, settled.needs_action)
        };
        for unit in idle {
            if let Some(target) = self.learner.select(skirmish, state, unit, false, exploring) {
                commands.insert(unit, Command::attack(unit, target));
                skirmish.charge_new_order(unit);
            }
        }
        commands
    }

    pub fn terminal_step<S: StateView, H: HistoryView>(&mut self, state: &S, history: &H) -> Result<EpisodeOutcome> {
        let episode = self.schedule.episode();
        let phase = self.schedule.phase();
        let mut skirmish = match self.skirmish.take() {
            Some(s) => s,
            None => {
                warn!("Episode {} ended without starting", episode);
                Skirmish::new(self.config.player, self.config.enemy_player, Roster::default())
            }
        };
        if state.turn_number() > 0 {
            for death in history.death_logs(state.turn_number() - 1) {
                if death.controller == skirmish.player {
                    skirmish.roster.remove_friendly(death.unit);
                } else if death.controller == skirmish.enemy_player {
                    skirmish.roster.remove_enemy(death.unit);
                }
            }
        }
        let won = skirmish.roster.is_win();
        info!("Episode {} over: {} ({} of ours left, {} of theirs)", episode,
              if won { "won" } else { "lost" }, skirmish.roster.friendly().len(), skirmish.roster.enemies().len());

        let checkpoint = self.schedule.finish_episode(won, skirmish.samples());
        match &checkpoint {
            Some(Checkpoint::Flush { report, wins }) => {
                println!("{}", report);
                println!("We won {} out of 5.", wins);
            }
            Some(Checkpoint::ExplorationDone { wins }) => println!("We won {} out of 10.", wins),
            None => {}
        }
        if self.config.save_weights {
            self.store.save(&self.learner.weights)?;
            info!("Saved weights {:?} to {}", self.learner.weights, self.store.path().display());
        }
        Ok(EpisodeOutcome { episode, phase, won, checkpoint })
    }
}
