//! # Agent Configuration
//!
//! Construction-time knobs for the agent. Everything has a default so a config
//! file only needs to name what it changes.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::{AgentError, Result};
use crate::utils::*;

/// Configuration for a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// How many episodes the run is meant to last
    pub episodes: usize,
    /// Start from the weights on disk instead of random ones
    pub load_weights: bool,
    /// Where weights are read from and written to
    pub weights_path: PathBuf,
    /// Write the weights back after every episode
    pub save_weights: bool,
    pub seed: u64,
    pub epsilon: f64,
    pub gamma: f64,
    pub learning_rate: f64,
    /// Controller number of our squad
    pub player: PlayerId,
    pub enemy_player: PlayerId,
    /// Template name of the units we command (matched case-insensitively)
    pub unit_template: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            load_weights: false,
            weights_path: PathBuf::from(WEIGHTS_PATH),
            save_weights: true,
            seed: DEFAULT_SEED,
            epsilon: EPSILON,
            gamma: GAMMA,
            learning_rate: LEARNING_RATE,
            player: 0,
            enemy_player: 1,
            unit_template: "footman".to_string(),
        }
    }
}

impl AgentConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AgentError::Io { path: path.to_path_buf(), source })?;
        let config: AgentConfig = serde_json::from_str(&content).map_err(|e| AgentError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(AgentError::Config(format!("epsilon {} is not a probability", self.epsilon)));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(AgentError::Config(format!("gamma {} must lie in [0, 1]", self.gamma)));
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(AgentError::Config(format!("learning rate {} must be positive", self.learning_rate)));
        }
        if self.player == self.enemy_player {
            return Err(AgentError::Config(format!("player and enemy share controller {}", self.player)));
        }
        Ok(())
    }
}
