pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, NormalizeConfig, DEFAULT_FILE_SUFFIX};
pub use paths::{container_base_path, PathManager};
