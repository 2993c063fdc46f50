use std::{fs, path::Path, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use shared::{
    domain::{AlgorithmId, ValueRange},
    error::ControlError,
};

pub const DEFAULT_CONFIG_FILE: &str = "sortvis.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub array_size: usize,
    pub min_array_size: usize,
    pub max_array_size: usize,
    pub value_low: u32,
    pub value_high: u32,
    pub interval_ms: u64,
    pub algorithm: AlgorithmId,
    pub seed: Option<u64>,
    pub event_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            array_size: 50,
            min_array_size: 2,
            max_array_size: 200,
            value_low: 10,
            value_high: 359,
            interval_ms: 100,
            algorithm: AlgorithmId::Bubble,
            seed: None,
            event_capacity: 256,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    array_size: Option<usize>,
    min_array_size: Option<usize>,
    max_array_size: Option<usize>,
    value_low: Option<u32>,
    value_high: Option<u32>,
    interval_ms: Option<u64>,
    algorithm: Option<AlgorithmId>,
    seed: Option<u64>,
    event_capacity: Option<usize>,
}

impl Settings {
    pub fn value_range(&self) -> Result<ValueRange, ControlError> {
        ValueRange::new(self.value_low, self.value_high)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn check_size(&self, requested: usize) -> Result<(), ControlError> {
        if (self.min_array_size..=self.max_array_size).contains(&requested) {
            Ok(())
        } else {
            Err(ControlError::InvalidSize {
                requested,
                min: self.min_array_size,
                max: self.max_array_size,
            })
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_array_size == 0 || self.min_array_size > self.max_array_size {
            return Err(anyhow!(
                "invalid array size bounds {}..={}",
                self.min_array_size,
                self.max_array_size
            ));
        }
        self.check_size(self.array_size)?;
        self.value_range()?;
        if self.event_capacity == 0 {
            return Err(anyhow!("event_capacity must be positive"));
        }
        Ok(())
    }

    fn apply_file(&mut self, file: FileSettings) {
        let FileSettings {
            array_size,
            min_array_size,
            max_array_size,
            value_low,
            value_high,
            interval_ms,
            algorithm,
            seed,
            event_capacity,
        } = file;

        if let Some(v) = array_size {
            self.array_size = v;
        }
        if let Some(v) = min_array_size {
            self.min_array_size = v;
        }
        if let Some(v) = max_array_size {
            self.max_array_size = v;
        }
        if let Some(v) = value_low {
            self.value_low = v;
        }
        if let Some(v) = value_high {
            self.value_high = v;
        }
        if let Some(v) = interval_ms {
            self.interval_ms = v;
        }
        if let Some(v) = algorithm {
            self.algorithm = v;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(v) = event_capacity {
            self.event_capacity = v;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(v) = parse_env(&lookup, "APP__ARRAY_SIZE")? {
            self.array_size = v;
        }
        if let Some(v) = parse_env(&lookup, "APP__VALUE_LOW")? {
            self.value_low = v;
        }
        if let Some(v) = parse_env(&lookup, "APP__VALUE_HIGH")? {
            self.value_high = v;
        }
        if let Some(v) = parse_env(&lookup, "APP__INTERVAL_MS")? {
            self.interval_ms = v;
        }
        if let Some(v) = lookup("APP__ALGORITHM") {
            self.algorithm = v.parse()?;
        }
        if let Some(v) = parse_env(&lookup, "APP__SEED")? {
            self.seed = Some(v);
        }
        Ok(())
    }
}

fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value '{raw}' for {key}"))
        })
        .transpose()
}

/// Defaults, then the TOML file (if present), then `APP__*` environment overrides.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<FileSettings>(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            settings.apply_file(file_cfg);
        }
        Err(err) if required || err.kind() != std::io::ErrorKind::NotFound => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    settings.apply_env(lookup)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
