//! Concurrency-safe, per-patient record storage.
//!
//! - [`PatientStore`] holds one patient's records, de-duplicated on
//!   `(timestamp, case-folded type)`, behind a single lock.
//! - [`PatientRegistry`] maps patient ids to stores, creating each store
//!   exactly once on first write.
//!
//! Neither type ever returns an error: duplicates are ignored and empty
//! ranges yield empty vectors.

pub mod registry;
pub mod store;

pub use registry::PatientRegistry;
pub use store::PatientStore;
