pub mod alert;
pub mod config;
pub mod error;
pub mod record;
pub mod vital;

pub use alert::Alert;
pub use config::Config;
pub use error::*;
pub use record::*;
pub use vital::VitalSign;
