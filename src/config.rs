/// Scenario configuration: built-in defaults, JSON scenario files and overrides

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::AllocatorError;
use crate::models::{RawCategory, Scenario, Variant};

const DEFAULT_TOTAL_ORDER: f64 = 800.0;
const DEFAULT_PRIMARY_SHARE: f64 = 0.4;

/// Boat neck sizes: sales history (units) and current stock
fn default_boat_neck() -> Variant {
    Variant {
        name: "Boat neck".to_string(),
        sizes: vec![
            RawCategory::new("XS", "4", "4"),
            RawCategory::new("S", "47", "47"),
            RawCategory::new("M", "22", "22"),
            RawCategory::new("L", "38", "38"),
            RawCategory::new("XL", "3", "3"),
            RawCategory::new("XXL", "2", "2"),
        ],
    }
}

fn default_v_neck() -> Variant {
    Variant {
        name: "V-neck".to_string(),
        sizes: vec![
            RawCategory::new("XS", "12", "18"),
            RawCategory::new("S", "31", "37"),
            RawCategory::new("M", "62", "31"),
            RawCategory::new("L", "53", "11"),
            RawCategory::new("XL", "23", "7"),
            RawCategory::new("XXL", "26", "0"),
        ],
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            total_order: DEFAULT_TOTAL_ORDER,
            primary_share: DEFAULT_PRIMARY_SHARE,
            primary: default_boat_neck(),
            secondary: Some(default_v_neck()),
        }
    }
}

/// Command-line adjustments applied on top of a loaded scenario
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub total_order: Option<f64>,
    pub primary_share: Option<f64>,
    pub single: bool,
}

impl Overrides {
    pub fn apply(&self, scenario: &mut Scenario) {
        if let Some(total) = self.total_order {
            scenario.total_order = total;
        }
        if let Some(share) = self.primary_share {
            scenario.primary_share = share;
        }
        if self.single && scenario.secondary.take().is_some() {
            debug!("secondary variant dropped for single-product mode");
        }
    }
}

/// Read a scenario from a JSON file
pub fn load_scenario(path: &Path) -> Result<Scenario, AllocatorError> {
    let text = fs::read_to_string(path).map_err(|source| AllocatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenario: Scenario =
        serde_json::from_str(&text).map_err(|source| AllocatorError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        sizes = scenario.primary.sizes.len(),
        dual = scenario.is_dual(),
        "loaded scenario"
    );
    Ok(scenario)
}

/// Load the scenario file if one was given, otherwise fall back to the defaults,
/// then apply overrides
pub fn resolve_scenario(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<Scenario, AllocatorError> {
    let mut scenario = match path {
        Some(path) => load_scenario(path)?,
        None => {
            debug!("no scenario file given, using built-in defaults");
            Scenario::default()
        }
    };
    overrides.apply(&mut scenario);
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "size-order-allocator-{}-{}.json",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        assert_eq!(scenario.total_order, 800.0);
        assert_eq!(scenario.primary_share, 0.4);
        assert_eq!(scenario.primary.sizes.len(), 6);
        assert!(scenario.is_dual());
    }

    #[test]
    fn test_overrides() {
        let mut scenario = Scenario::default();
        let overrides = Overrides {
            total_order: Some(120.0),
            primary_share: Some(0.75),
            single: true,
        };
        overrides.apply(&mut scenario);
        assert_eq!(scenario.total_order, 120.0);
        assert_eq!(scenario.primary_share, 0.75);
        assert!(!scenario.is_dual());
    }

    #[test]
    fn test_load_scenario_file() {
        let path = temp_file(
            "load",
            r#"{
                "total_order": 50,
                "primary": {
                    "name": "Tee",
                    "sizes": [
                        {"size": "S", "sales": "10", "available": 2},
                        {"size": "M", "sales": 30, "available": "0"}
                    ]
                }
            }"#,
        );
        let scenario = load_scenario(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(scenario.total_order, 50.0);
        assert_eq!(scenario.primary_share, 1.0);
        assert_eq!(scenario.primary.name, "Tee");
        assert_eq!(scenario.primary.categories()[1].weight, 30.0);
        assert!(scenario.secondary.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("size-order-allocator-does-not-exist.json");
        let err = load_scenario(&path).unwrap_err();
        assert!(matches!(err, AllocatorError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let path = temp_file("malformed", "{ \"total_order\": ");
        let err = load_scenario(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, AllocatorError::Json { .. }));
    }

    #[test]
    fn test_bundled_scenario_plans_cleanly() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/tee_single.json");
        let scenario = load_scenario(&path).unwrap();
        assert!(!scenario.is_dual());
        assert_eq!(scenario.primary.categories()[4].weight, 28.5);

        let report = crate::planner::plan(&scenario);
        assert_eq!(report.total_order, 250);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let scenario = resolve_scenario(None, &Overrides::default()).unwrap();
        assert_eq!(scenario, Scenario::default());
    }
}
