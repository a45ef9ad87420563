//! Alert delivery for the rule engine.
//!
//! This crate provides:
//! - `AlertSink` trait, the synchronous callback the engine delivers to
//! - Log, collecting, and channel sink implementations
//! - `Dispatcher` that fans one alert out to several sinks
//! - Plain-text detail formatting with priority and repeat decoration

pub mod channel;
pub mod collect;
pub mod dispatcher;
pub mod log;
pub mod templating;
pub mod traits;

pub use channel::ChannelSink;
pub use collect::CollectingSink;
pub use dispatcher::Dispatcher;
pub use log::LogSink;
pub use templating::{format_details, AlertDecoration, Priority};
pub use traits::AlertSink;
