#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    #[strum(serialize = "dialogue-url")]
    DialogueURL,
    HealthCheckTimeout,
    RequestTimeout,
    StorageFile,
    Username,
}

impl ConfigKey {
    fn is_integer(&self) -> bool {
        return *self == ConfigKey::HealthCheckTimeout || *self == ConfigKey::RequestTimeout;
    }
}

pub fn cache_dir() -> path::PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("ivf-intake");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    /// Returns the integer value of a millisecond key, or `None` when it is
    /// unset or zero.
    pub fn get_millis(key: ConfigKey) -> Option<u64> {
        return Config::get(key)
            .parse::<u64>()
            .ok()
            .filter(|millis| return *millis > 0);
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "You".to_string();
            }

            return user;
        }

        let config_path = cache_dir().join("config.toml");
        let storage_path = cache_dir().join("storage.yaml");

        let res = match key {
            ConfigKey::DialogueURL => "http://127.0.0.1:8000".to_string(),
            ConfigKey::HealthCheckTimeout => "1000".to_string(),
            ConfigKey::RequestTimeout => "".to_string(),
            ConfigKey::StorageFile => storage_path.to_string_lossy().to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::Username => "".to_string(),
        };

        return res;
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            Config::load_toml(&toml_str)?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    if key.is_integer() && val.parse::<u64>().is_err() {
                        bail!(format!("Invalid value for '{key}': {val} is not a number of milliseconds"));
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            dialogue_url = Config::get(ConfigKey::DialogueURL),
            health_check_timeout = Config::get(ConfigKey::HealthCheckTimeout),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            storage_file = Config::get(ConfigKey::StorageFile),
            username = Config::get(ConfigKey::Username),
            "config"
        );

        return Ok(());
    }

    fn load_toml(toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter() {
            if key == ConfigKey::ConfigFile {
                continue;
            }

            if let Some(val) = doc.get(&key.to_string()) {
                if let Some(val_int) = val.as_integer() {
                    if val_int < 0 {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_int}"));
                    }
                    Config::set(key, &val_int.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    if key.is_integer() && val_str.parse::<u64>().is_err() {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nExpected a number of milliseconds."));
                    }
                    Config::set(key, val_str);
                }
            }
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your name displayed next to your messages.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()?
                    .to_string()
                    .split("[default:")
                    .next()?
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<u64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{}\"", val.replace('\\', "\\\\"));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
