mod error;
mod loader;
mod types;


pub use error::ConfigError;
pub use loader::{load_config, load_config_or_default};
pub use types::*;
