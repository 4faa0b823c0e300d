/// Randomized integrity runs for the allocator
/// Perturbs sales histories and order totals and checks that every unit is placed

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::{debug, warn};

use crate::error::AllocatorError;
use crate::models::{IntegrityStats, RawValue, Scenario, Variant, VariantReport};
use crate::planner::plan;
use crate::split::order_units;

/// Draw a sales figure around the recorded one, never below zero
fn sample_sales<R: Rng>(rng: &mut R, sales: f64, noise: f64) -> Result<f64, AllocatorError> {
    let std_dev = noise * sales.max(1.0);
    let normal = Normal::new(sales, std_dev)?;
    Ok(rng.sample(normal).max(0.0))
}

fn perturb_variant<R: Rng>(
    rng: &mut R,
    variant: &Variant,
    noise: f64,
) -> Result<Variant, AllocatorError> {
    let mut perturbed = variant.clone();
    for size in &mut perturbed.sizes {
        let sales = sample_sales(rng, size.sales.quantity(), noise)?;
        size.sales = RawValue::Number(sales);
    }
    Ok(perturbed)
}

/// Units a variant should have received: its whole share, unless it has no sizes
fn expected_units(report: &VariantReport) -> u64 {
    if report.rows.is_empty() {
        0
    } else {
        report.order_quantity
    }
}

/// Run the allocator over `runs` randomized variations of a scenario
///
/// Each run draws new sales figures from a normal distribution centred on the
/// recorded ones (standard deviation `noise` times the figure) and a random
/// order total between zero and twice the scenario's total. Passing a seed
/// makes the runs reproducible.
pub fn run_integrity_simulation(
    scenario: &Scenario,
    runs: usize,
    noise: f64,
    seed: Option<u64>,
) -> Result<IntegrityStats, AllocatorError> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(AllocatorError::InvalidNoise(noise));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let max_total = order_units(scenario.total_order).saturating_mul(2);

    let mut stats = IntegrityStats {
        runs,
        passed: 0,
        failed: 0,
        max_sum_error: 0,
        units_allocated: 0,
    };

    for run in 0..runs {
        let trial = Scenario {
            total_order: rng.gen_range(0..=max_total) as f64,
            primary_share: scenario.primary_share,
            primary: perturb_variant(&mut rng, &scenario.primary, noise)?,
            secondary: scenario
                .secondary
                .as_ref()
                .map(|v| perturb_variant(&mut rng, v, noise))
                .transpose()?,
        };

        let report = plan(&trial);
        let sum_error: u64 = report
            .variants
            .iter()
            .map(|v| v.total_ordered().abs_diff(expected_units(v)))
            .sum();

        stats.units_allocated += report.total_allocated();
        stats.max_sum_error = stats.max_sum_error.max(sum_error);
        if sum_error == 0 {
            stats.passed += 1;
        } else {
            stats.failed += 1;
            warn!(run, total = report.total_order, sum_error, "allocation missed its total");
        }
    }

    debug!(
        runs = stats.runs,
        passed = stats.passed,
        failed = stats.failed,
        "integrity simulation finished"
    );
    Ok(stats)
}
