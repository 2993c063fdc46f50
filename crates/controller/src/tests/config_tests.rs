use super::{load_settings_with, Settings};

use shared::domain::AlgorithmId;
use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> (PathBuf, PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("sortvis_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("sortvis.toml");
    fs::write(&path, contents).expect("write config");
    (temp_root, path)
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_are_valid() {
    let settings = Settings::default();
    settings.validate().expect("defaults validate");
    assert_eq!(settings.array_size, 50);
    assert_eq!(settings.interval_ms, 100);
    assert_eq!(settings.algorithm, AlgorithmId::Bubble);
}

#[test]
fn file_values_override_defaults() {
    let (temp_root, path) = temp_config(
        r#"
array_size = 12
interval_ms = 5
algorithm = "heap"
seed = 99
"#,
    );

    let settings = load_settings_with(Some(&path), no_env).expect("settings");
    assert_eq!(settings.array_size, 12);
    assert_eq!(settings.interval_ms, 5);
    assert_eq!(settings.algorithm, AlgorithmId::Heap);
    assert_eq!(settings.seed, Some(99));
    assert_eq!(settings.value_low, 10);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn environment_overrides_file() {
    let (temp_root, path) = temp_config("array_size = 12\n");
    let env: HashMap<&str, &str> = HashMap::from([
        ("APP__ARRAY_SIZE", "30"),
        ("APP__ALGORITHM", "merge"),
        ("APP__VALUE_HIGH", "500"),
    ]);

    let settings =
        load_settings_with(Some(&path), |key| env.get(key).map(|v| v.to_string())).expect("settings");
    assert_eq!(settings.array_size, 30);
    assert_eq!(settings.algorithm, AlgorithmId::Merge);
    assert_eq!(settings.value_high, 500);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn malformed_environment_value_is_reported() {
    let err = load_settings_with(Some(&PathBuf::from("/nonexistent/sortvis.toml")), no_env)
        .expect_err("missing explicit file");
    assert!(err.to_string().contains("failed to read config file"));

    let err = load_settings_with(None, |key| {
        (key == "APP__INTERVAL_MS").then(|| "fast".to_string())
    })
    .expect_err("bad interval");
    assert!(err.to_string().contains("APP__INTERVAL_MS"));
}

#[test]
fn out_of_bounds_size_fails_validation() {
    let (temp_root, path) = temp_config("array_size = 500\n");
    let err = load_settings_with(Some(&path), no_env).expect_err("too large");
    assert!(err.to_string().contains("array size 500"));
    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn inverted_value_range_fails_validation() {
    let settings = Settings {
        value_low: 100,
        value_high: 10,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}
