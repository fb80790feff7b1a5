//! Session configuration loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use bastion_core::config::SimConfig;

/// Load and validate a `SimConfig`. Without a path the defaults are used.
///
/// Missing fields in the file fall back to their defaults.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = SimConfig::from_json_str(&text)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(config)
}
