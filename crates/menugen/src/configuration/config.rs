#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;
use toml_edit::Item;

use crate::domain::models::{FetchStrategy, DEFAULT_PLACEHOLDER};

static CONFIG: Lazy<DashMap<ConfigKey, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    BackendUrl,
    Placeholder,
    FetchMode,
    RequestTimeout,
}

impl ConfigKey {
    /// Keys that may appear in a config file. The file location itself is not one of them.
    fn from_file() -> impl Iterator<Item = ConfigKey> {
        ConfigKey::iter().filter(|key| *key != ConfigKey::ConfigFile)
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        return CONFIG
            .get(&key)
            .map(|val| val.value().clone())
            .unwrap_or_default();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key, value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        match key {
            ConfigKey::BackendUrl => "http://localhost:8000".to_string(),
            ConfigKey::Placeholder => DEFAULT_PLACEHOLDER.to_string(),
            ConfigKey::FetchMode => FetchStrategy::default().to_string(),
            ConfigKey::RequestTimeout => "0".to_string(),
            ConfigKey::ConfigFile => dirs::config_dir()
                .map(|dir| dir.join("menugen").join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("menugen.toml"))
                .to_string_lossy()
                .to_string(),
        }
    }

    pub fn fetch_strategy() -> Result<FetchStrategy> {
        let mode = Config::get(ConfigKey::FetchMode);
        match mode.parse::<FetchStrategy>() {
            Ok(strategy) => return Ok(strategy),
            Err(_) => bail!("invalid fetch-mode '{mode}'"),
        }
    }

    /// `None` when requests may wait indefinitely.
    pub fn request_timeout() -> Result<Option<Duration>> {
        let raw = Config::get(ConfigKey::RequestTimeout);
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let Ok(millis) = raw.trim().parse::<u64>() else {
            bail!("request-timeout must be a whole number of milliseconds, got '{raw}'");
        };
        if millis == 0 {
            return Ok(None);
        }

        return Ok(Some(Duration::from_millis(millis)));
    }

    /// Layers defaults, then the config file, then command-line flags.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key));
        }

        let config_file = clap_arg_matches
            .iter()
            .filter_map(|matches| arg_value(matches, ConfigKey::ConfigFile))
            .last()
            .unwrap_or_else(|| Config::default(ConfigKey::ConfigFile));
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            Config::apply_file(&cmd, &toml_str)?;
        }

        for key in ConfigKey::from_file() {
            for matches in &clap_arg_matches {
                if let Some(val) = arg_value(matches, key) {
                    Config::set(key, &val);
                }
            }
        }

        Config::set(
            ConfigKey::BackendUrl,
            Config::get(ConfigKey::BackendUrl).trim_end_matches('/'),
        );
        Config::fetch_strategy()?;
        Config::request_timeout()?;

        tracing::debug!(
            config_file = %config_file,
            backend_url = %Config::get(ConfigKey::BackendUrl),
            fetch_mode = %Config::get(ConfigKey::FetchMode),
            request_timeout = %Config::get(ConfigKey::RequestTimeout),
            "config loaded"
        );

        return Ok(());
    }

    fn apply_file(cmd: &Command, toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::from_file() {
            let val = match doc.get(&key.to_string()) {
                None => continue,
                Some(Item::Value(val)) => val,
                Some(_) => bail!("config.toml key '{key}' must be a string or an integer"),
            };

            if let Some(val_int) = val.as_integer() {
                Config::set(key, &val_int.to_string());
                continue;
            }

            let Some(val_str) = val.as_str() else {
                bail!("config.toml key '{key}' must be a string or an integer");
            };
            if val_str.is_empty() {
                continue;
            }

            // clap's possible values double as the file's validation rules.
            let possible_values = find_arg(cmd, key)
                .map(possible_values)
                .unwrap_or_default();
            if !possible_values.is_empty() && !possible_values.iter().any(|e| e == val_str) {
                bail!(
                    "config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}",
                    possible_values.join(", ")
                );
            }
            Config::set(key, val_str);
        }

        return Ok(());
    }

    /// Renders the default config file, one commented entry per documented flag.
    pub fn serialize_default(cmd: Command) -> String {
        return ConfigKey::from_file()
            .filter_map(|key| {
                let arg = find_arg(&cmd, key)?;
                Some(format!("# {}\n{}", describe(arg), default_entry(key)))
            })
            .collect::<Vec<String>>()
            .join("\n\n");
    }
}

fn arg_value(matches: &ArgMatches, key: ConfigKey) -> Option<String> {
    match matches.try_get_one::<String>(&key.to_string()) {
        Ok(Some(val)) if !val.is_empty() => Some(val.to_string()),
        _ => None,
    }
}

fn find_arg(cmd: &Command, key: ConfigKey) -> Option<&Arg> {
    let long = key.to_string();
    return cmd
        .get_arguments()
        .find(|arg| arg.get_long() == Some(long.as_str()));
}

fn possible_values(arg: &Arg) -> Vec<String> {
    arg.get_possible_values()
        .iter()
        .map(|e| e.get_name().to_string())
        .collect()
}

fn describe(arg: &Arg) -> String {
    let help = arg.get_help().map(|help| help.to_string()).unwrap_or_default();
    let description = help.split("[default:").next().unwrap_or_default().trim();

    let values = possible_values(arg);
    if values.is_empty() {
        return description.to_string();
    }
    return format!("{description} [possible values: {}]", values.join(", "));
}

fn default_entry(key: ConfigKey) -> String {
    let val = Config::default(key);
    if val.is_empty() {
        return format!("# {key} = \"\"");
    }
    if val.parse::<i64>().is_ok() {
        return format!("{key} = {val}");
    }
    return format!("{key} = \"{val}\"");
}
