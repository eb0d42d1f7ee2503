use crate::conf::load_config_or_default;
use std::path::PathBuf;

pub fn dump(path: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let cfg = load_config_or_default(path.as_deref())?;

    let out = if json {
        serde_json::to_string_pretty(&cfg)?
    } else {
        toml::to_string_pretty(&cfg)?
    };
    println!("{out}");
    Ok(())
}
