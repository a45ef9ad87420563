//! Measurement ingestion.
//!
//! Parses `patientID,timestamp,label,value` lines and writes them into a
//! [`PatientRegistry`](vitals_storage::PatientRegistry) from streams, files
//! or whole directories.

pub mod reader;
pub mod wire;

pub use reader::{input_files, read_dir, read_file, read_stream, IngestError, IngestSummary};
pub use wire::{parse_line, Measurement, WireError};
