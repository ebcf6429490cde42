//! Configuration loading and validation tests

use memo_domain::Error;
use memo_infrastructure::config::loader::validate_app_config;
use memo_infrastructure::config::{
    AppConfig, BackendKind, CacheConfig, ConfigBuilder, ConfigLoader, ServerConfig,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    assert!(validate_app_config(&config).is_ok());

    assert!(config.cache.enabled);
    assert_eq!(config.cache.provider, BackendKind::Redis);
    assert_eq!(config.cache.redis_url, "redis://127.0.0.1:6379");
    assert_eq!(config.cache.default_ttl(), Duration::from_secs(300));
}

#[test]
fn test_load_from_toml_file() {
    let file = write_config(
        r#"
[server]
port = 9090

[cache]
provider = "moka"
default_ttl_secs = 60
namespace = "reports"
moka_max_entries = 500

[logging]
level = "debug"
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "127.0.0.1", "unset keys keep defaults");
    assert_eq!(config.cache.provider, BackendKind::Moka);
    assert_eq!(config.cache.default_ttl(), Duration::from_secs(60));
    assert_eq!(config.cache.namespace, "reports");
    assert_eq!(config.cache.moka_max_entries, 500);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();

    assert_eq!(config.cache.provider, BackendKind::Redis);
}

#[test]
fn test_resolved_config_file_reports_explicit_path() {
    let file = write_config("[server]\nport = 9091\n");
    let loader = ConfigLoader::new().with_config_path(file.path());
    assert_eq!(
        loader.resolved_config_file(),
        Some((file.path().to_path_buf(), true))
    );

    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.toml");
    let loader = ConfigLoader::new().with_config_path(&absent);
    assert_eq!(loader.resolved_config_file(), Some((absent, false)));
}

#[test]
fn test_malformed_toml_is_a_configuration_error() {
    let file = write_config("[cache\nprovider = ");

    let result = ConfigLoader::new().with_config_path(file.path()).load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_unknown_provider_is_rejected() {
    let file = write_config("[cache]\nprovider = \"memcached\"\n");

    let result = ConfigLoader::new().with_config_path(file.path()).load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_invalid_values_fail_validation() {
    let file = write_config("[cache]\ndefault_ttl_secs = 0\n");
    let result = ConfigLoader::new().with_config_path(file.path()).load();
    assert!(matches!(result, Err(Error::Configuration { .. })));

    let file = write_config("[cache]\nnamespace = \"a:b\"\n");
    let result = ConfigLoader::new().with_config_path(file.path()).load();
    assert!(matches!(result, Err(Error::Configuration { .. })));

    let file = write_config("[logging]\nlevel = \"loud\"\n");
    let result = ConfigLoader::new().with_config_path(file.path()).load();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_disabled_cache_skips_backend_checks() {
    let cache = CacheConfig {
        enabled: false,
        default_ttl_secs: 0,
        redis_url: String::new(),
        ..Default::default()
    };

    let config = ConfigBuilder::new().with_cache(cache).build().unwrap();

    assert_eq!(config.cache.effective_provider(), BackendKind::Null);
}

#[test]
fn test_builder_validates() {
    let result = ConfigBuilder::new()
        .with_server(ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 0,
        })
        .build();
    assert!(result.is_err());

    let result = ConfigBuilder::new()
        .with_cache(CacheConfig {
            provider: BackendKind::Redis,
            redis_url: "  ".to_string(),
            ..Default::default()
        })
        .build();
    assert!(result.is_err());

    let result = ConfigBuilder::new()
        .with_cache(CacheConfig {
            provider: BackendKind::Moka,
            moka_max_entries: 0,
            ..Default::default()
        })
        .build();
    assert!(result.is_err());
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memo.toml");
    let loader = ConfigLoader::new().with_config_path(&path);

    let mut config = AppConfig::default();
    config.cache.provider = BackendKind::Null;
    config.cache.namespace = "saved".to_string();
    config.server.port = 7070;
    loader.save_to_file(&config, &path).unwrap();

    let reloaded = loader.load().unwrap();
    assert_eq!(reloaded.cache.provider, BackendKind::Null);
    assert_eq!(reloaded.cache.namespace, "saved");
    assert_eq!(reloaded.server.port, 7070);
    assert_eq!(loader.config_path(), Some(path.as_path()));
}
