/// Splits a total order between a primary and a secondary variant

use crate::parse::sanitize;

/// Whole units that can actually be ordered from a requested total
pub fn order_units(total_order: f64) -> u64 {
    sanitize(total_order).floor() as u64
}

/// Primary variant's share limited to 0..1; an unreadable share counts as 0
pub fn clamp_share(primary_share: f64) -> f64 {
    if primary_share.is_finite() {
        primary_share.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Split the order by the primary variant's share
/// Returns (primary, secondary); the two always add up to the whole units of the total
pub fn split_order(total_order: f64, primary_share: f64) -> (u64, u64) {
    let units = order_units(total_order);
    let primary = ((units as f64) * clamp_share(primary_share)).round() as u64;
    let primary = primary.min(units);
    (primary, units - primary)
}
