pub mod config;
pub mod logger;

pub use config::{AuthorConfig, LoggingConfig, SiteConfig};
pub use logger::{init_logger, init_from_config};
