use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to defaults when `init_config`
/// was never called (library use, tests).
pub fn get_config() -> Arc<StaticConfig> {
    match CONFIG.get() {
        Some(config) => config.load_full(),
        None => Arc::new(StaticConfig::default()),
    }
}

/// The global configuration, if it has been initialized
pub fn try_get_config() -> Option<Arc<StaticConfig>> {
    CONFIG.get().map(|c| c.load_full())
}

/// Initialize the global configuration
///
/// Loads `path` (or `shorty.toml` when it exists) plus `SHORTY__*`
/// environment overrides. A second call replaces the stored value.
pub fn init_config(path: Option<&str>) -> Result<Arc<StaticConfig>> {
    let loaded = Arc::new(StaticConfig::load_from(path)?);
    match CONFIG.get() {
        Some(existing) => existing.store(loaded.clone()),
        None => {
            let _ = CONFIG.set(ArcSwap::new(loaded.clone()));
        }
    }
    Ok(get_config())
}
