use serial_test::serial;
use temp_env::with_vars;

use super::*;

fn cleanup_all_twin_env_vars() {
    for (key, _) in std::env::vars() {
        if key.starts_with("TWIN__") {
            std::env::remove_var(&key);
        }
    }
}

#[test]
#[serial]
fn default_config_should_initialize_with_hardcoded_values() {
    let config = TelemetryConfig::default();

    assert_eq!(config.catalog.sensors.len(), 24);
    assert_eq!(config.catalog.sensors[0].key, "sensor_1");
    assert_eq!(config.catalog.sensors[0].group_name, "Stator 1");
    assert_eq!(config.catalog.channels.len(), 1);
    assert_eq!(config.catalog.channels[0].key, "temperature");
    assert_eq!(config.store.window_capacity, 20);
    assert_eq!(config.scheduler.tick_interval_ms, 1000);
    assert_eq!(config.notification.time_signal_interval_ms, 1000);
    assert!(config.log_dir.is_none());
}

#[test]
#[serial]
fn load_should_merge_environment_overrides() {
    cleanup_all_twin_env_vars();
    with_vars(
        vec![
            ("TWIN__STORE__WINDOW_CAPACITY", Some("5")),
            ("TWIN__SCHEDULER__TICK_INTERVAL_MS", Some("250")),
        ],
        || {
            let config = TelemetryConfig::load(None).unwrap();

            assert_eq!(config.store.window_capacity, 5);
            assert_eq!(config.scheduler.tick_interval_ms, 250);
        },
    );
}

#[test]
#[serial]
fn load_should_merge_file_settings() {
    cleanup_all_twin_env_vars();
    // Create temporary directory and configuration file
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("telemetry.toml");

    // Dynamically generate TOML configuration content
    std::fs::write(
        &config_path,
        r#"
        [store]
        window_capacity = 7 # Override default value

        [notification]
        time_signal_interval_ms = 2000
        "#,
    )
    .unwrap();

    let empty_vars: Vec<(&str, Option<&str>)> = vec![];
    with_vars(empty_vars, || {
        let config = TelemetryConfig::load(config_path.to_str()).unwrap();

        assert_eq!(config.store.window_capacity, 7);
        assert_eq!(config.notification.time_signal_interval_ms, 2000);
        // Untouched sections keep their defaults
        assert_eq!(config.catalog.sensors.len(), 24);
    });
}

#[test]
#[serial]
fn load_should_fail_for_missing_file() {
    cleanup_all_twin_env_vars();
    assert!(TelemetryConfig::load(Some("/nonexistent/telemetry.toml")).is_err());
}

#[test]
fn validation_should_reject_zero_window_capacity() {
    let mut config = TelemetryConfig::default();
    config.store.window_capacity = 0;

    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_zero_tick_interval() {
    let mut config = TelemetryConfig::default();
    config.scheduler.tick_interval_ms = 0;

    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_zero_time_signal_interval() {
    let mut config = TelemetryConfig::default();
    config.notification.time_signal_interval_ms = 0;

    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_negative_synthetic_spread() {
    let mut config = TelemetryConfig::default();
    config.scheduler.synthetic.spread = -1.0;

    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_empty_sensor_set() {
    let mut config = TelemetryConfig::default();
    config.catalog.sensors.clear();

    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_empty_channel_set() {
    let mut config = TelemetryConfig::default();
    config.catalog.channels.clear();

    assert!(config.validate().is_err());
}
