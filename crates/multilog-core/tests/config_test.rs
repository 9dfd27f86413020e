//! Tests for the multilog configuration system.

use std::sync::Mutex;
use std::time::Duration;

use multilog_core::config::MultilogConfig;
use multilog_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

#[test]
fn defaults_when_no_project_file() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let dir = tempdir();
    let config = MultilogConfig::load(dir.path()).unwrap();
    assert_eq!(config, MultilogConfig::default());
    assert_eq!(config.replica.max_attempts, 8);
    assert_eq!(config.stream.channel_capacity, 256);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn project_file_overrides_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let dir = tempdir();
    std::fs::write(
        dir.path().join("multilog.toml"),
        "[replica]\nmax_attempts = 3\n\n[stream]\nchannel_capacity = 16\n",
    )
    .unwrap();

    let config = MultilogConfig::load(dir.path()).unwrap();
    assert_eq!(config.replica.max_attempts, 3);
    assert_eq!(config.replica.initial_backoff_ms, 10);
    assert_eq!(config.stream.channel_capacity, 16);
}

#[test]
fn env_overrides_project_file() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let dir = tempdir();
    std::fs::write(dir.path().join("multilog.toml"), "[replica]\nmax_attempts = 3\n").unwrap();

    std::env::set_var("MULTILOG_REPLICA_MAX_ATTEMPTS", "5");
    std::env::set_var("MULTILOG_LOG_LEVEL", "DEBUG");
    let config = MultilogConfig::load(dir.path());
    std::env::remove_var("MULTILOG_REPLICA_MAX_ATTEMPTS");
    std::env::remove_var("MULTILOG_LOG_LEVEL");

    let config = config.unwrap();
    assert_eq!(config.replica.max_attempts, 5);
    assert_eq!(config.observability.log_level, "debug");
}

#[test]
fn invalid_toml_is_parse_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let dir = tempdir();
    std::fs::write(dir.path().join("multilog.toml"), "[replica\nmax_attempts = ").unwrap();
    let err = MultilogConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_zero_attempts() {
    let config = MultilogConfig::from_toml("[replica]\nmax_attempts = 0\n").unwrap();
    let err = MultilogConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "replica.max_attempts"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn validation_rejects_inverted_backoff_bounds() {
    let config =
        MultilogConfig::from_toml("[replica]\ninitial_backoff_ms = 500\nmax_backoff_ms = 100\n")
            .unwrap();
    assert!(MultilogConfig::validate(&config).is_err());
}

#[test]
fn validation_rejects_unknown_log_level() {
    let config = MultilogConfig::from_toml("[observability]\nlog_level = \"loud\"\n").unwrap();
    assert!(MultilogConfig::validate(&config).is_err());
}

#[test]
fn toml_round_trip() {
    let mut config = MultilogConfig::default();
    config.replica.max_backoff_ms = 250;
    config.observability.json = true;
    let text = config.to_toml().unwrap();
    assert_eq!(MultilogConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn backoff_is_exponential_and_capped() {
    let config = MultilogConfig::from_toml(
        "[replica]\ninitial_backoff_ms = 5\nmax_backoff_ms = 30\n",
    )
    .unwrap();
    let backoffs: Vec<Duration> = (0..5).map(|n| config.replica.backoff(n)).collect();
    assert_eq!(
        backoffs,
        [5, 10, 20, 30, 30].map(Duration::from_millis).to_vec()
    );
}
