//! Summary statistics over a series of scores

use serde::{Deserialize, Serialize};

/// Values with their average, minimum and maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub values: Vec<f64>,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    /// `None` for an empty series
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }

        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            average: sum / values.len() as f64,
            min,
            max,
            values,
        })
    }
}

/// Fraction of `true` entries; 0 for an empty slice
pub fn rate(flags: impl IntoIterator<Item = bool>) -> f64 {
    let (hits, total) = flags
        .into_iter()
        .fold((0usize, 0usize), |(h, t), flag| (h + usize::from(flag), t + 1));
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
