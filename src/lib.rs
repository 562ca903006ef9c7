pub mod clock;
pub mod config;
pub mod error;
pub mod extract;
pub mod infra;
pub mod load;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod ports;
pub mod transform;
pub mod types;
pub mod validate;

pub use config::EtlConfig;
pub use error::{EtlError, Result};
pub use pipeline::EtlPipeline;
