use crate::error::{AgentError, Result};
use crate::utils::*;

/// Dot product, refusing vectors of different length
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(AgentError::DimensionMismatch { weights: a.len(), features: b.len() });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Linear Q-value of a feature vector.
/// Weights and features always share a length, so a mismatch is a bug and panics.
#[inline]
pub fn q_value(weights: &[f64], features: &[f64]) -> Reward {
    match dot(weights, features) {
        Ok(q) => q,
        Err(e) => panic!("{}", e),
    }
}
