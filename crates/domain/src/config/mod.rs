//! Configuration for Ferrous Resolve
//!
//! - `root`: main configuration, file loading and CLI overrides
//! - `resolver`: iterative resolution settings
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use resolver::ResolverSettings;
pub use root::{CliOverrides, Config};
