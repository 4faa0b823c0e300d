use serde::{Deserialize, Serialize};

use crate::parse::{parse_quantity, sanitize};

/// A raw figure as entered: either already a number or free text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric value, clamped to a finite non-negative quantity
    pub fn quantity(&self) -> f64 {
        match self {
            RawValue::Number(n) => sanitize(*n),
            RawValue::Text(s) => parse_quantity(s),
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Text(String::new())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// One allocation unit (e.g. a garment size), already parsed
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub label: String,
    pub weight: f64,    // Historical sales
    pub available: f64, // Current stock
}

/// A size row as entered, with sales and stock kept raw
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    pub size: String,
    #[serde(default)]
    pub sales: RawValue,
    #[serde(default)]
    pub available: RawValue,
}

impl RawCategory {
    pub fn new(size: &str, sales: &str, available: &str) -> Self {
        RawCategory {
            size: size.to_string(),
            sales: sales.into(),
            available: available.into(),
        }
    }

    /// Parse the raw figures into a category
    pub fn parse(&self) -> Category {
        Category {
            label: self.size.clone(),
            weight: self.sales.quantity(),
            available: self.available.quantity(),
        }
    }
}

/// A product variant with its own size table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    #[serde(default)]
    pub sizes: Vec<RawCategory>,
}

impl Variant {
    pub fn categories(&self) -> Vec<Category> {
        self.sizes.iter().map(RawCategory::parse).collect()
    }
}

/// Everything needed to plan one order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub total_order: f64,
    /// Share of the order going to the primary variant (0..1)
    #[serde(default = "default_primary_share")]
    pub primary_share: f64,
    pub primary: Variant,
    /// Absent in single-product mode
    #[serde(default)]
    pub secondary: Option<Variant>,
}

fn default_primary_share() -> f64 {
    1.0
}

impl Scenario {
    pub fn is_dual(&self) -> bool {
        self.secondary.is_some()
    }
}

/// Computed row of a variant's size table
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationRow {
    pub size: String,
    pub sales: f64,
    pub proportion: f64,
    pub available: f64,
    pub order: u64,
}

/// Allocation result for one variant
#[derive(Clone, Debug, PartialEq)]
pub struct VariantReport {
    pub name: String,
    pub order_quantity: u64,
    pub rows: Vec<AllocationRow>,
}

impl VariantReport {
    pub fn total_sales(&self) -> f64 {
        self.rows.iter().map(|r| r.sales).sum()
    }

    pub fn total_proportion(&self) -> f64 {
        self.rows.iter().map(|r| r.proportion).sum()
    }

    pub fn total_available(&self) -> f64 {
        self.rows.iter().map(|r| r.available).sum()
    }

    pub fn total_ordered(&self) -> u64 {
        self.rows.iter().map(|r| r.order).sum()
    }
}

/// Complete result of planning a scenario
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioReport {
    pub total_order: u64,
    pub dual: bool,
    pub primary_share: f64,
    pub variants: Vec<VariantReport>,
}

impl ScenarioReport {
    pub fn total_allocated(&self) -> u64 {
        self.variants.iter().map(VariantReport::total_ordered).sum()
    }

    /// True when every ordered unit is accounted for
    pub fn is_consistent(&self) -> bool {
        self.total_allocated() == self.total_order
    }

    pub fn mode_label(&self) -> &'static str {
        if self.dual {
            "Two variants"
        } else {
            "Single product"
        }
    }
}

/// Summary of a randomized integrity run
#[derive(Debug, Clone)]
pub struct IntegrityStats {
    pub runs: usize,
    pub passed: usize,
    pub failed: usize,
    pub max_sum_error: u64,
    pub units_allocated: u64,
}
