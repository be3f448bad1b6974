//! Layered configuration loading

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use super::schema::Config;
use super::validate::validate_config;

const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "VACAY__";

/// Legacy deployment variable names mapped onto config paths
const ENV_ALIASES: [(&str, &str); 5] = [
    ("AZURE_API_KEY", "provider.api_key"),
    ("AZURE_ENDPOINT", "provider.endpoint"),
    ("AZURE_DEPLOYMENT_NAME", "provider.deployment"),
    ("AZURE_API_VERSION", "provider.api_version"),
    ("PACKAGE_ID", "booking.package_id"),
];

/// Configuration loader
///
/// Layers, later wins: built-in defaults, `config.json` in the config
/// directory, the alias variables above, then `VACAY__SECTION__KEY` paths.
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Loader rooted at `~/.vacay`
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .map(|home| home.join(".vacay"))
            .unwrap_or_else(|| PathBuf::from(".vacay"));
        Self { config_dir }
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            config_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Merge every layer, then deserialize and validate
    pub fn load(&self) -> crate::Result<Config> {
        let mut layered = serde_json::to_value(Config::default())?;

        if let Some(file) = self.read_file()? {
            merge_into(&mut layered, file);
        }
        for (path, value) in env_overrides(&layered) {
            merge_into(&mut layered, nested(&path, value));
        }

        let config: Config = serde_json::from_value(layered)?;
        validate_config(&config)?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> crate::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::write(self.config_path(), serde_json::to_string_pretty(config)?)?;
        Ok(())
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    fn read_file(&self) -> crate::Result<Option<Value>> {
        let path = self.config_path();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively merge objects; anything else in `overlay` replaces `base`
fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// `["a", "b"], v` becomes `{"a": {"b": v}}`
fn nested(path: &[String], leaf: Value) -> Value {
    path.iter().rev().fold(leaf, |inner, key| {
        let mut map = Map::new();
        map.insert(key.clone(), inner);
        Value::Object(map)
    })
}

/// Collect alias overrides, then `VACAY__` path overrides, in apply order
fn env_overrides(current: &Value) -> Vec<(Vec<String>, Value)> {
    let mut overrides: Vec<(Vec<String>, Value)> = ENV_ALIASES
        .iter()
        .filter_map(|(var, target)| {
            let raw = std::env::var(var).ok()?;
            let path = target.split('.').map(str::to_string).collect();
            Some((path, Value::String(raw)))
        })
        .collect();

    let mut path_vars: Vec<(String, String)> = std::env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX))
        .collect();
    path_vars.sort();

    for (key, raw) in path_vars {
        let path: Vec<String> = key[ENV_PREFIX.len()..]
            .split("__")
            .filter(|segment| !segment.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();
        if path.is_empty() {
            continue;
        }
        // Keys that default to a string keep their raw text even when it looks numeric.
        let value = if lookup(current, &path).is_some_and(Value::is_string) {
            Value::String(raw)
        } else {
            env_literal(&raw)
        };
        overrides.push((path, value));
    }
    overrides
}

fn lookup<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(key))
}

/// Interpret an environment value as a bool, number, JSON container or string
fn env_literal(raw: &str) -> Value {
    if let Ok(flag) = raw.to_ascii_lowercase().parse::<bool>() {
        return Value::Bool(flag);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Some(float) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        return Value::Number(float);
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(container @ (Value::Object(_) | Value::Array(_))) => container,
        _ => Value::String(raw.to_string()),
    }
}
