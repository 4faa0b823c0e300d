/// Proportion normalization module
/// Turns historical sales weights into shares that sum to one

use crate::parse::sanitize;

/// Normalize weights into proportions
/// Falls back to a uniform split when there is no sales history at all
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let cleaned: Vec<f64> = weights.iter().map(|w| sanitize(*w)).collect();
    let total: f64 = cleaned.iter().sum();

    if total > 0.0 {
        cleaned.iter().map(|w| w / total).collect()
    } else {
        let equal = 1.0 / cleaned.len() as f64;
        vec![equal; cleaned.len()]
    }
}
