#![allow(non_snake_case)]
#![allow(clippy::type_complexity)]

pub mod utils;
pub mod error;
pub mod config;
pub mod battle;
pub mod roster;
pub mod targets;
pub mod features;
pub mod q_function;
pub mod policy;
pub mod td;
pub mod skirmish;
pub mod rewards;
pub mod schedule;
pub mod weights;
pub mod agent;

pub use agent::{EpisodeOutcome, RLAgent};
pub use config::AgentConfig;
pub use error::AgentError;
