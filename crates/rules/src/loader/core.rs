//! File and string entry points for catalogue documents.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::schema::AlertCatalogRule;
use crate::validation::validate_catalog;

use super::error::Result;

/// Parse and validate a catalogue document.
pub fn parse_catalog(yaml: &str) -> Result<AlertCatalogRule> {
    let rule: AlertCatalogRule = serde_yaml::from_str(yaml)?;
    validate_catalog(&rule)?;
    Ok(rule)
}

/// Read, parse and validate a catalogue file.
pub fn load_catalog(path: &Path) -> Result<AlertCatalogRule> {
    let yaml = fs::read_to_string(path)?;
    let rule = parse_catalog(&yaml)?;
    info!(
        catalog_id = %rule.metadata.id,
        enabled = rule.metadata.enabled,
        path = %path.display(),
        "loaded alert catalogue"
    );
    Ok(rule)
}

/// Load `path` when given, otherwise fall back to the built-in catalogue.
pub fn load_catalog_or_builtin(path: Option<&Path>) -> Result<AlertCatalogRule> {
    match path {
        Some(p) => load_catalog(p),
        None => {
            info!("no alert catalogue configured, using built-in thresholds");
            Ok(AlertCatalogRule::builtin())
        }
    }
}
