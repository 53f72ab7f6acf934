//! API key resolution priority (Database → ENV → TOML)

use lakbay_common::config::TomlConfig;
use lakbay_common::{KeyValueStore, MemoryStore};
use lakbay_server::config::{
    resolve_gemini_api_key, resolve_unsplash_access_key, GEMINI_API_KEY_ENV,
    SETTING_UNSPLASH_ACCESS_KEY, UNSPLASH_ACCESS_KEY_ENV,
};
use serial_test::serial;

fn toml_with_keys(unsplash: Option<&str>, gemini: Option<&str>) -> TomlConfig {
    TomlConfig {
        unsplash_access_key: unsplash.map(str::to_string),
        gemini_api_key: gemini.map(str::to_string),
        ..TomlConfig::default()
    }
}

#[tokio::test]
#[serial]
async fn test_database_key_wins() {
    std::env::set_var(UNSPLASH_ACCESS_KEY_ENV, "env-key");
    let store = MemoryStore::new();
    store.set(SETTING_UNSPLASH_ACCESS_KEY, "db-key").await.unwrap();

    let key = resolve_unsplash_access_key(&store, &toml_with_keys(Some("toml-key"), None))
        .await
        .unwrap();

    assert_eq!(key.as_deref(), Some("db-key"));
    std::env::remove_var(UNSPLASH_ACCESS_KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_environment_beats_toml() {
    std::env::set_var(UNSPLASH_ACCESS_KEY_ENV, "  env-key  ");
    let store = MemoryStore::new();

    let key = resolve_unsplash_access_key(&store, &toml_with_keys(Some("toml-key"), None))
        .await
        .unwrap();

    assert_eq!(key.as_deref(), Some("env-key"));
    std::env::remove_var(UNSPLASH_ACCESS_KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_blank_values_fall_through_to_toml() {
    std::env::set_var(GEMINI_API_KEY_ENV, "   ");
    let store = MemoryStore::new();
    store.set("gemini_api_key", "").await.unwrap();

    let key = resolve_gemini_api_key(&store, &toml_with_keys(None, Some("toml-key")))
        .await
        .unwrap();

    assert_eq!(key.as_deref(), Some("toml-key"));
    std::env::remove_var(GEMINI_API_KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_missing_everywhere_disables_provider() {
    std::env::remove_var(GEMINI_API_KEY_ENV);
    let store = MemoryStore::new();

    let key = resolve_gemini_api_key(&store, &TomlConfig::default())
        .await
        .unwrap();

    assert_eq!(key, None);
}
