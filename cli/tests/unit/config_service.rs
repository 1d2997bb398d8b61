//! Unit tests for the configuration service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use ievo_cli::application::services::config_service::{load_config, set_config};
use ievo_cli::domain::config::IevoConfig;
use ievo_cli::domain::error::ConfigError;

use crate::mocks::{BrokenConfigStore, MemConfigStore};

#[test]
fn test_load_without_stored_config_gives_defaults() {
    let store = MemConfigStore::default();
    assert_eq!(load_config(&store).expect("load"), IevoConfig::default());
}

#[test]
fn test_set_min_chars_persists() {
    let store = MemConfigStore::default();
    let cfg = set_config(&store, "content.min_chars", "120").expect("set");
    assert_eq!(cfg.content.min_chars, 120);
    assert_eq!(load_config(&store).expect("load").content.min_chars, 120);
    assert_eq!(*store.saves.lock().unwrap(), 1);
}

#[test]
fn test_set_keeps_other_settings() {
    let store = MemConfigStore::default();
    set_config(&store, "schema.path", "/opt/agent.schema.json").expect("set path");
    set_config(&store, "content.min_chars", "10").expect("set chars");
    let cfg = load_config(&store).expect("load");
    assert_eq!(cfg.schema.path.as_deref(), Some("/opt/agent.schema.json"));
    assert_eq!(cfg.content.min_chars, 10);
}

#[test]
fn test_set_unknown_key_writes_nothing() {
    let store = MemConfigStore::default();
    let err = set_config(&store, "color", "always").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));
    assert_eq!(*store.saves.lock().unwrap(), 0);
}

#[test]
fn test_set_invalid_value_writes_nothing() {
    let store = MemConfigStore::default();
    let err = set_config(&store, "content.min_chars", "0").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { .. })
    ));
    assert_eq!(*store.saves.lock().unwrap(), 0);
}

#[test]
fn test_broken_store_propagates() {
    let err = set_config(&BrokenConfigStore, "content.min_chars", "10").unwrap_err();
    assert!(err.to_string().contains("cannot parse"));
}
