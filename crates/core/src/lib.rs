pub mod config;
pub mod types;

pub use config::RunConfig;
pub use types::{DiscType, MediaType, ReportLevel};
