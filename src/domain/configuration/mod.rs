pub mod conduit_config;
pub mod loader;

pub use conduit_config::{ConduitConfig, ConduitConfigFile};
pub use loader::{HOST_ENV, TOKEN_ENV, load_config, parse_config_content, resolve_config};
