/// Order allocation module
/// Target-stock leveling with largest-remainder rounding so that the
/// integer orders always add up to the requested total

use crate::models::Category;
use crate::parse::sanitize;
use crate::proportion::normalize;

/// Fractional part of a scaled share, remembered with its category index
struct Remainder {
    index: usize,
    fraction: f64,
}

/// Allocate `total_order` units across categories
///
/// Each category's target stock is its proportion of the combined
/// (available + order) stock. Only the shortfall below that target is
/// entitled to units; the shortfalls set the shape of the distribution and
/// are stretched to hit the order total exactly. Leftover units after
/// flooring go to the largest fractional parts, earlier categories first
/// on ties.
///
/// Only the first `min(proportions.len(), available.len())` categories are
/// considered.
pub fn allocate(proportions: &[f64], available: &[f64], total_order: f64) -> Vec<u64> {
    let n = proportions.len().min(available.len());
    let stock: Vec<f64> = available[..n].iter().map(|a| sanitize(*a)).collect();
    let order = sanitize(total_order);

    let available_total: f64 = stock.iter().sum();
    let target_total = available_total + order;

    let deficits: Vec<f64> = proportions[..n]
        .iter()
        .zip(&stock)
        .map(|(p, a)| (sanitize(*p) * target_total - a).max(0.0))
        .collect();
    let deficit_sum: f64 = deficits.iter().sum();

    // Exact integer the orders must add up to, capped at what a u64 can hold
    let units = order.round().min(u64::MAX as f64);
    if deficit_sum <= 0.0 || units <= 0.0 {
        return vec![0; n];
    }

    let scale = units / deficit_sum;
    let raw: Vec<f64> = deficits.iter().map(|d| d * scale).collect();
    let mut orders: Vec<u64> = raw.iter().map(|r| r.floor() as u64).collect();

    let floored = orders.iter().fold(0u64, |acc, o| acc.saturating_add(*o));
    let mut remainder = (units as u64).saturating_sub(floored);

    let mut remainders: Vec<Remainder> = raw
        .iter()
        .enumerate()
        .map(|(index, r)| Remainder {
            index,
            fraction: r - r.floor(),
        })
        .collect();
    // Stable sort keeps the original order among equal fractions
    remainders.sort_by(|a, b| b.fraction.total_cmp(&a.fraction));

    for entry in &remainders {
        if remainder == 0 {
            break;
        }
        orders[entry.index] = orders[entry.index].saturating_add(1);
        remainder -= 1;
    }

    orders
}

/// Allocate an order across categories using their sales history as weights
pub fn allocate_categories(categories: &[Category], total_order: f64) -> Vec<u64> {
    let weights: Vec<f64> = categories.iter().map(|c| c.weight).collect();
    let available: Vec<f64> = categories.iter().map(|c| c.available).collect();
    allocate(&normalize(&weights), &available, total_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn category(label: &str, weight: f64, available: f64) -> Category {
        Category {
            label: label.to_string(),
            weight,
            available,
        }
    }

    #[test]
    fn test_equal_split() {
        let proportions = normalize(&[1.0, 1.0]);
        assert_eq!(allocate(&proportions, &[0.0, 0.0], 10.0), vec![5, 5]);
    }

    #[test]
    fn test_deficit_shape() {
        let categories = vec![category("A", 4.0, 4.0), category("B", 47.0, 47.0)];
        let orders = allocate_categories(&categories, 100.0);
        assert_eq!(orders, vec![8, 92]);
    }

    #[test]
    fn test_overstocked_category_gets_nothing() {
        let categories = vec![
            category("S", 10.0, 500.0),
            category("M", 10.0, 0.0),
            category("L", 10.0, 0.0),
        ];
        let orders = allocate_categories(&categories, 30.0);
        assert_eq!(orders[0], 0);
        assert_eq!(orders.iter().sum::<u64>(), 30);
        assert_eq!(orders, vec![0, 15, 15]);
    }

    #[test]
    fn test_remainder_goes_to_lowest_index_on_ties() {
        let proportions = normalize(&[1.0, 1.0, 1.0]);
        assert_eq!(allocate(&proportions, &[0.0, 0.0, 0.0], 10.0), vec![4, 3, 3]);
        assert_eq!(allocate(&proportions, &[0.0, 0.0, 0.0], 11.0), vec![4, 4, 3]);
    }

    #[test]
    fn test_zero_order_returns_zeros() {
        let proportions = normalize(&[2.0, 5.0, 1.0]);
        assert_eq!(allocate(&proportions, &[1.0, 0.0, 3.0], 0.0), vec![0, 0, 0]);
    }

    #[test]
    fn test_negative_order_returns_zeros() {
        let proportions = normalize(&[2.0, 5.0]);
        assert_eq!(allocate(&proportions, &[0.0, 0.0], -25.0), vec![0, 0]);
    }

    #[test]
    fn test_no_categories() {
        assert!(allocate(&[], &[], 50.0).is_empty());
        assert!(allocate_categories(&[], 50.0).is_empty());
    }

    #[test]
    fn test_order_larger_than_deficits_is_fully_distributed() {
        // Stock already matches the sales mix, so the order follows the mix too
        let categories = vec![category("S", 1.0, 10.0), category("M", 3.0, 30.0)];
        let orders = allocate_categories(&categories, 1000.0);
        assert_eq!(orders, vec![250, 750]);
    }

    #[test]
    fn test_fractional_total_rounds_to_nearest_unit() {
        let proportions = normalize(&[1.0, 1.0]);
        assert_eq!(allocate(&proportions, &[0.0, 0.0], 9.6).iter().sum::<u64>(), 10);
        assert_eq!(allocate(&proportions, &[0.0, 0.0], 0.4), vec![0, 0]);
    }

    #[test]
    fn test_invalid_stock_counts_as_zero() {
        assert_eq!(allocate(&[0.5, 0.5], &[f64::NAN, -3.0], 10.0), vec![5, 5]);
        assert_eq!(allocate(&[0.5, 0.5], &[f64::INFINITY, 0.0], 10.0), vec![5, 5]);
        assert_eq!(allocate(&[f64::NAN, 1.0], &[0.0, 0.0], 4.0), vec![0, 4]);
    }

    #[test]
    fn test_non_finite_order_returns_zeros() {
        assert_eq!(allocate(&[0.5, 0.5], &[0.0, 0.0], f64::NAN), vec![0, 0]);
        assert_eq!(allocate(&[0.5, 0.5], &[0.0, 0.0], f64::INFINITY), vec![0, 0]);
        assert_eq!(allocate(&[0.5, 0.5], &[0.0, 0.0], f64::NEG_INFINITY), vec![0, 0]);
    }

    #[test]
    fn test_huge_order_does_not_overflow() {
        let orders = allocate(&[0.5, 0.5], &[0.0, 0.0], 3.0e19);
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0], orders[1]);
        assert!(orders[0] >= 1u64 << 62);

        let orders = allocate(&[0.25, 0.25, 0.5], &[1.0, 0.0, 2.0], f64::MAX);
        assert_eq!(orders.len(), 3);
    }

    #[test]
    fn test_mismatched_lengths_use_common_prefix() {
        let orders = allocate(&[0.5, 0.5, 0.0], &[0.0, 0.0], 6.0);
        assert_eq!(orders, vec![3, 3]);
    }

    #[test]
    fn test_same_inputs_same_output() {
        let categories = vec![
            category("XS", 12.0, 18.0),
            category("S", 31.0, 37.0),
            category("M", 62.0, 31.0),
            category("L", 53.0, 11.0),
        ];
        let first = allocate_categories(&categories, 480.0);
        let second = allocate_categories(&categories, 480.0);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn orders_sum_to_total(
            rows in prop::collection::vec((0.0f64..500.0, 0.0f64..500.0), 1..30),
            total in 1u32..5_000,
        ) {
            let weights: Vec<f64> = rows.iter().map(|r| r.0).collect();
            let available: Vec<f64> = rows.iter().map(|r| r.1).collect();
            let orders = allocate(&normalize(&weights), &available, f64::from(total));
            prop_assert_eq!(orders.len(), rows.len());
            prop_assert_eq!(orders.iter().sum::<u64>(), u64::from(total));
        }

        #[test]
        fn zero_order_is_identity(
            rows in prop::collection::vec((0.0f64..500.0, 0.0f64..500.0), 0..30),
        ) {
            let weights: Vec<f64> = rows.iter().map(|r| r.0).collect();
            let available: Vec<f64> = rows.iter().map(|r| r.1).collect();
            let orders = allocate(&normalize(&weights), &available, 0.0);
            prop_assert!(orders.iter().all(|o| *o == 0));
        }
    }
}
