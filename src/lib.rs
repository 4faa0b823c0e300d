pub mod allocation;
pub mod config;
pub mod error;
pub mod models;
pub mod monte_carlo;
pub mod parse;
pub mod planner;
pub mod proportion;
pub mod reporting;
pub mod split;

pub use allocation::{allocate, allocate_categories};
pub use config::{load_scenario, resolve_scenario, Overrides};
pub use error::AllocatorError;
pub use models::{Category, RawCategory, RawValue, Scenario, ScenarioReport, Variant};
pub use monte_carlo::run_integrity_simulation;
pub use parse::{parse_number, parse_quantity};
pub use planner::plan;
pub use proportion::normalize;
pub use split::split_order;
