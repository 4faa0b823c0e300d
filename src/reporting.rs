/// Console report for planned orders
/// Prints per-variant size tables, the order summary and integrity run results

use crate::models::{IntegrityStats, ScenarioReport, VariantReport};

/// Format a share as a percentage, e.g. 0.4 -> "40.0%"
pub fn to_percent(x: f64, digits: usize) -> String {
    let n = if x.is_finite() { x } else { 0.0 };
    format!("{:.*}%", digits, n * 100.0)
}

/// Display the scenario header
pub fn display_header(report: &ScenarioReport) {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                      SIZE ORDER ALLOCATOR                        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝\n");

    println!("Mode: {}", report.mode_label());
    println!("Total order: {} pcs", report.total_order);
    if report.dual && report.variants.len() == 2 {
        println!(
            "  {} share: {} ({} pcs), {} share: {} ({} pcs)",
            report.variants[0].name,
            to_percent(report.primary_share, 1),
            report.variants[0].order_quantity,
            report.variants[1].name,
            to_percent(1.0 - report.primary_share, 1),
            report.variants[1].order_quantity,
        );
    }
    println!();
}

/// Display one variant's size table
pub fn display_variant(variant: &VariantReport) {
    println!("=== {} ===", variant.name);
    println!(
        "  Order target: {} pcs | Available: {} pcs | Proportion sum: {}",
        variant.order_quantity,
        variant.total_available(),
        to_percent(variant.total_proportion(), 1)
    );
    println!(
        "  {:<8} {:>10} {:>12} {:>10} {:>8}",
        "Size", "Sales", "Proportion", "Available", "Order"
    );
    for row in &variant.rows {
        println!(
            "  {:<8} {:>10} {:>12} {:>10} {:>8}",
            row.size,
            row.sales,
            to_percent(row.proportion, 2),
            row.available,
            row.order
        );
    }
    println!(
        "  {:<8} {:>10} {:>12} {:>10} {:>8}\n",
        "TOTAL",
        variant.total_sales(),
        to_percent(variant.total_proportion(), 1),
        variant.total_available(),
        variant.total_ordered()
    );
}

/// Display the summary block with the integrity check
pub fn display_summary(report: &ScenarioReport) {
    println!("Summary:");
    println!("  Total order:     {} pcs", report.total_order);
    let per_variant: Vec<String> = report
        .variants
        .iter()
        .map(|v| format!("{} {}", v.name, v.total_ordered()))
        .collect();
    println!("  Orders:          {} pcs", per_variant.join(" / "));
    println!(
        "  Integrity check: {} / {} {}",
        report.total_allocated(),
        report.total_order,
        if report.is_consistent() { "OK" } else { "MISMATCH" }
    );
}

/// Display the full report for a planned scenario
pub fn display_report(report: &ScenarioReport) {
    display_header(report);
    for variant in &report.variants {
        display_variant(variant);
    }
    display_summary(report);
}

/// Display integrity simulation results
pub fn display_integrity(stats: &IntegrityStats) {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    ALLOCATION INTEGRITY RUNS                     ║");
    println!("╚══════════════════════════════════════════════════════════════════╝\n");

    println!("  Runs:             {}", stats.runs);
    println!("  Passed:           {}", stats.passed);
    println!("  Failed:           {}", stats.failed);
    println!("  Max sum error:    {} pcs", stats.max_sum_error);
    println!("  Units allocated:  {}", stats.units_allocated);
}
