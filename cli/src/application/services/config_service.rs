//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::IevoConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<IevoConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &IevoConfig) -> Result<()> {
    store.save(config)
}

/// Validate `key = value`, apply it to the stored configuration and save.
///
/// Nothing is written when validation fails.
pub fn set_config(store: &impl ConfigStore, key: &str, value: &str) -> Result<IevoConfig> {
    let mut config = load_config(store)?;
    config.set(key, value)?;
    save_config(store, &config)?;
    Ok(config)
}
