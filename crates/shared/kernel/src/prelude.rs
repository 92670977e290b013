//! Ergonomic re-exports for downstream crates.

pub use crate::config::{ConfigError, load_config};
pub use chub_domain::config::ApiConfig;

#[cfg(feature = "server")]
pub use crate::server::{ApiError, ApiState, ApiStateBuilder, ErrorBody};
