//! YAML schema types for alert catalogue documents.
//!
//! An `AlertCatalog` document carries the thresholds and windows for the
//! standard rule list. Every spec section is optional and falls back to the
//! clinical defaults.

mod catalog;
mod metadata;

pub use catalog::*;
pub use metadata::*;

#[cfg(test)]
mod tests;
