use crate::conf::error::ConfigError;
use crate::conf::types::AdapterConfig;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Read, parse, apply environment overrides, and validate a config file.
pub fn load_config(path: &Path) -> Result<AdapterConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let mut cfg: AdapterConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

    cfg.apply_env();
    cfg.validate()?;
    Ok(cfg)
}

/// Like [`load_config`], but a missing file means "all defaults".
pub fn load_config_or_default(path: Option<&Path>) -> Result<AdapterConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut cfg = AdapterConfig::default();
            cfg.apply_env();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}

impl FromStr for AdapterConfig {
    type Err = ConfigError;

    /// Parse an in-memory document. No environment overrides are applied.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::parse("<string>", e))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
