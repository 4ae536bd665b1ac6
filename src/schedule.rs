//! # Episode Schedule
//!
//! Episodes run in cycles of 15: five evaluation episodes with the policy frozen,
//! then ten exploration episodes that train it. The fifth evaluation episode closes
//! the block and reports the average reward over it.

use std::fmt::{Display, Formatter};
use crate::utils::*;

pub const BLOCK_LEN: usize = 5;
pub const CYCLE_LEN: usize = 3 * BLOCK_LEN;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase { Exploring, EvaluatingMidBlock, EvaluatingFlush }

impl Phase {
    pub fn for_episode(e: usize) -> Phase {
        let block = (e / BLOCK_LEN) % 3;
        if block != 0 {
            Phase::Exploring
        } else if e % CYCLE_LEN == BLOCK_LEN - 1 {
            Phase::EvaluatingFlush
        } else {
            Phase::EvaluatingMidBlock
        }
    }
    #[inline] pub fn is_exploring(self) -> bool { self == Phase::Exploring }
}

/// Running table of evaluation averages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressReport {
    pub averages: Vec<Reward>,
}

impl Display for ProgressReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let gap = "-------------     ".len();
        writeln!(f)?;
        writeln!(f, "Games Played      Average Cumulative Reward")?;
        writeln!(f, "-------------     -------------------------")?;
        for (i, avg) in self.averages.iter().enumerate() {
            writeln!(f, "{:<width$}{:.2}", 10 * i, avg, width = gap)?;
        }
        writeln!(f)
    }
}

/// What closing an episode produced, if anything worth reporting
#[derive(Debug, Clone, PartialEq)]
pub enum Checkpoint {
    /// An evaluation block just ended
    Flush { report: ProgressReport, wins: usize },
    /// The exploration half of the cycle just ended
    ExplorationDone { wins: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    episode: usize,
    block_scores: Vec<Reward>,
    report: ProgressReport,
    wins: usize,
}

impl Schedule {
    pub fn new() -> Self { Self::default() }

    /// Index of the episode being played (or about to be)
    #[inline] pub fn episode(&self) -> usize { self.episode }
    #[inline] pub fn phase(&self) -> Phase { Phase::for_episode(self.episode) }
    #[inline] pub fn wins(&self) -> usize { self.wins }
    pub fn report(&self) -> &ProgressReport { &self.report }

    /// Close the current episode with its reward samples and move on to the next
    pub fn finish_episode(&mut self, won: bool, samples: &[Reward]) -> Option<Checkpoint> {
        if won {
            self.wins += 1;
        }
        let checkpoint = match self.phase() {
            Phase::EvaluatingMidBlock => {
                self.block_scores.push(mean(samples));
                None
            }
            Phase::EvaluatingFlush => {
                self.block_scores.push(mean(samples));
                self.report.averages.push(mean(&self.block_scores));
                self.block_scores.clear();
                let wins = std::mem::take(&mut self.wins);
                Some(Checkpoint::Flush { report: self.report.clone(), wins })
            }
            Phase::Exploring if self.episode % CYCLE_LEN == CYCLE_LEN - 1 => {
                let wins = std::mem::take(&mut self.wins);
                Some(Checkpoint::ExplorationDone { wins })
            }
            Phase::Exploring => None,
        };
        self.episode += 1;
        checkpoint
    }
}
