//! Influence to weight normalization.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SitingError};

/// Fewest decimal places that keep rounded weights meaningful
pub const MIN_DECIMALS: u32 = 4;

/// Most decimal places an `f64` weight can carry faithfully
pub const MAX_DECIMALS: u32 = 12;

/// Largest distance from 1 the rounded weights may sum to before the
/// remainder is absorbed regardless of the rounding mode
pub const DRIFT_TOLERANCE: f64 = 0.0005;

/// What to do with the rounding remainder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round each weight independently; the sum may drift from 1 by up to
    /// `DRIFT_TOLERANCE`, past which the remainder is absorbed
    #[default]
    Round,
    /// Round, then fold the remainder into the heaviest weight so the sum is
    /// exactly 1 at the configured precision
    AbsorbRemainder,
}

fn default_decimals() -> u32 {
    4
}

/// Weight rounding policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRounding {
    /// Decimal places kept on each weight
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    #[serde(default, rename = "rounding")]
    pub mode: RoundingMode,
}

impl Default for WeightRounding {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            mode: RoundingMode::Round,
        }
    }
}

impl WeightRounding {
    pub fn absorbing(decimals: u32) -> Self {
        Self {
            decimals,
            mode: RoundingMode::AbsorbRemainder,
        }
    }

    /// Reject precisions outside `MIN_DECIMALS..=MAX_DECIMALS`
    pub fn validate(&self) -> Result<()> {
        if (MIN_DECIMALS..=MAX_DECIMALS).contains(&self.decimals) {
            Ok(())
        } else {
            Err(SitingError::InvalidConfig(format!(
                "weights.decimals must be between {} and {}, got {}",
                MIN_DECIMALS, MAX_DECIMALS, self.decimals
            )))
        }
    }

    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimals.min(MAX_DECIMALS) as i32);
        (value * factor).round() / factor
    }
}

/// Normalize influences into weights.
///
/// Weights are `influence / total`. When every influence is zero each entry
/// gets `1 / n`. Empty in, empty out. Influences are expected to be clamped
/// to `[0, 100]` already.
///
/// In `Round` mode the remainder is still absorbed once the rounded sum
/// drifts past `DRIFT_TOLERANCE`, which happens with many entries or a
/// coarse precision.
pub fn compute_weights(influences: &[f64], rounding: WeightRounding) -> Vec<f64> {
    if influences.is_empty() {
        return Vec::new();
    }

    let total: f64 = influences.iter().sum();
    let mut weights: Vec<f64> = if total == 0.0 {
        let equal = 1.0 / influences.len() as f64;
        vec![rounding.round(equal); influences.len()]
    } else {
        influences
            .iter()
            .map(|influence| rounding.round(influence / total))
            .collect()
    };

    let drift = (weights.iter().sum::<f64>() - 1.0).abs();
    if rounding.mode == RoundingMode::AbsorbRemainder || drift > DRIFT_TOLERANCE {
        absorb_remainder(&mut weights, rounding);
    }

    weights
}

/// Pair each key with its influence and normalized weight
pub fn normalize<K: AsRef<str>>(
    entries: &[(K, f64)],
    rounding: WeightRounding,
) -> Vec<(String, f64, f64)> {
    let influences: Vec<f64> = entries.iter().map(|(_, influence)| *influence).collect();
    let weights = compute_weights(&influences, rounding);

    entries
        .iter()
        .zip(weights)
        .map(|((key, influence), weight)| (key.as_ref().to_string(), *influence, weight))
        .collect()
}

// Ties go to the later entry.
fn absorb_remainder(weights: &mut [f64], rounding: WeightRounding) {
    let Some(heaviest) = weights
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, &w)| match best {
            Some((_, b)) if w < b => best,
            _ => Some((i, w)),
        })
        .map(|(i, _)| i)
    else {
        return;
    };

    let others: f64 = weights
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != heaviest)
        .map(|(_, w)| w)
        .sum();
    weights[heaviest] = rounding.round((1.0 - others).max(0.0));
}
