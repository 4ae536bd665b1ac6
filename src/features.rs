//! # Features
//!
//! Each (attacker, defender) pair is summarized by three numbers:
//! - a constant bias
//! - +1 if the defender is the attacker's closest enemy, -1 otherwise
//! - +1 if the defender is the enemy our squad is already piling onto, -1 otherwise
//!
//! Pairs involving a missing or dead unit get the zero vector, bias included.

use crate::battle::StateView;
use crate::roster::Roster;
use crate::targets::TargetIndex;
use crate::utils::*;

#[inline]
fn indicator(b: bool) -> f64 {
    if b { 1.0 } else { -1.0 }
}

pub fn feature_vector<S: StateView>(state: &S, roster: &Roster, targets: &TargetIndex,
                                    attacker: UnitId, defender: UnitId) -> Features {
    let (at, df) = match (state.unit(attacker), state.unit(defender)) {
        (Some(at), Some(df)) if at.is_alive() && df.is_alive() => (at, df),
        _ => return vec![0.0; NUM_FEATURES],
    };
    let nearest = nearest_enemy(state, roster, at.position());
    vec![
        1.0,
        indicator(nearest == Some(df.id)),
        indicator(targets.most_attacked() == Some(df.id)),
    ]
}

/// Closest live enemy by Chebyshev distance, first in roster order on ties
pub fn nearest_enemy<S: StateView>(state: &S, roster: &Roster, from: (i32, i32)) -> Option<UnitId> {
    let mut best: Option<(UnitId, i32)> = None;
    for &id in roster.enemies() {
        let unit = match state.unit(id) {
            Some(u) if u.is_alive() => u,
            _ => continue,
        };
        let d = chebyshev(from, unit.position());
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((id, d));
        }
    }
    best.map(|(id, _)| id)
}
