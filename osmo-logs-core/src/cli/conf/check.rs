use crate::conf::{ConfigError, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ endpoint {}", cfg.endpoint.base_url);
            println!(
                "✔ stream keeps {} entries, flushing every {}ms",
                cfg.stream.max_entries, cfg.stream.flush_interval_ms
            );
            println!(
                "✔ histogram targets {} buckets of at least {}s",
                cfg.histogram.target_buckets, cfg.histogram.min_interval_secs
            );
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError) {
    eprintln!("error: {err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Pass the path of an existing TOML file, or omit --config to run with defaults.",
        ),

        ConfigError::InvalidBaseUrl { .. } => Some(
            "The endpoint must be an absolute http or https URL.\n\
             \n\
             Example:\n\
             \n\
             [endpoint]\n\
             base_url = \"https://osmo.example.com\"",
        ),

        ConfigError::InvalidMaxEntries | ConfigError::InvalidFlushInterval => Some(
            "Stream limits must be positive.\n\
             \n\
             Example:\n\
             \n\
             [stream]\n\
             max_entries       = 100000\n\
             flush_interval_ms = 16",
        ),

        ConfigError::InvalidTargetBuckets | ConfigError::InvalidMinInterval => Some(
            "Histogram settings must be positive.\n\
             \n\
             Example:\n\
             \n\
             [histogram]\n\
             target_buckets    = 50\n\
             min_interval_secs = 60",
        ),

        _ => None,
    }
}
