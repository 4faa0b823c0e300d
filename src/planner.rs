/// Order planning for a whole scenario
/// Splits the order between variants, then allocates each variant across its sizes

use tracing::debug;

use crate::allocation::allocate;
use crate::models::{AllocationRow, Scenario, ScenarioReport, Variant, VariantReport};
use crate::proportion::normalize;
use crate::split::{clamp_share, order_units, split_order};

/// Allocate one variant's share of the order across its sizes
pub fn plan_variant(variant: &Variant, order_quantity: u64) -> VariantReport {
    let categories = variant.categories();
    let weights: Vec<f64> = categories.iter().map(|c| c.weight).collect();
    let available: Vec<f64> = categories.iter().map(|c| c.available).collect();

    let proportions = normalize(&weights);
    let orders = allocate(&proportions, &available, order_quantity as f64);

    let rows: Vec<AllocationRow> = categories
        .into_iter()
        .zip(proportions)
        .zip(orders)
        .map(|((category, proportion), order)| AllocationRow {
            size: category.label,
            sales: category.weight,
            proportion,
            available: category.available,
            order,
        })
        .collect();

    let report = VariantReport {
        name: variant.name.clone(),
        order_quantity,
        rows,
    };
    debug!(
        variant = %report.name,
        order_quantity,
        allocated = report.total_ordered(),
        sizes = report.rows.len(),
        "variant allocated"
    );
    report
}

/// Plan a full scenario
pub fn plan(scenario: &Scenario) -> ScenarioReport {
    let total_order = order_units(scenario.total_order);

    let variants = match &scenario.secondary {
        Some(secondary) => {
            let (primary_qty, secondary_qty) =
                split_order(scenario.total_order, scenario.primary_share);
            vec![
                plan_variant(&scenario.primary, primary_qty),
                plan_variant(secondary, secondary_qty),
            ]
        }
        None => vec![plan_variant(&scenario.primary, total_order)],
    };

    let primary_share = if scenario.is_dual() {
        clamp_share(scenario.primary_share)
    } else {
        1.0
    };

    ScenarioReport {
        total_order,
        dual: scenario.is_dual(),
        primary_share,
        variants,
    }
}
