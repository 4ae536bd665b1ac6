use std::fs;
use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::error::{AgentError, Result};
use crate::utils::*;

// ---------- Weight file ---------- //
/// Plain-text weights, one value per line in feature order
#[derive(Debug, Clone)]
pub struct WeightFile {
    path: PathBuf,
}

impl WeightFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// `Ok(None)` when there is no file yet. A single bad line fails the whole load.
    pub fn load(&self) -> Result<Option<Weights>> {
        if !self.path.exists() {
            warn!("Failed to load weights. {} does not exist", self.path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        let weights = content.lines().enumerate()
            .map(|(i, line)| line.trim().parse::<f64>().map_err(|_| AgentError::MalformedWeight {
                line: i + 1,
                text: line.to_string(),
            }))
            .collect::<Result<Weights>>()?;
        info!("Loaded {} weights from {}", weights.len(), self.path.display());
        Ok(Some(weights))
    }

    /// Replace whatever is on disk with these weights
    pub fn save(&self, weights: &[f64]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| self.io(source))?;
        }
        let text: String = weights.iter().map(|w| format!("{:.6}\n", w)).collect();
        fs::write(&self.path, text).map_err(|source| self.io(source))
    }

    fn io(&self, source: std::io::Error) -> AgentError {
        AgentError::Io { path: self.path.clone(), source }
    }
}
