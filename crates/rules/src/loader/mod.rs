//! Alert catalogue loading.
//!
//! Reads an `AlertCatalog` YAML document from disk or a string and validates
//! it before the engine builds rules from it.

mod core;
mod error;


pub use self::core::{load_catalog, load_catalog_or_builtin, parse_catalog};
pub use self::error::{Result, RuleError};
